//! CSV writer that only replaces its destination once everything is written.
//!
//! Rows go to a temporary file next to the destination, `finish()` renames it
//! over the destination. Dropping the writer before `finish()` deletes the
//! temporary file and leaves any previous file untouched.

use std::fs;
use std::path::{Path, PathBuf};
use csv::{Writer, WriterBuilder};
use failure::{format_err, Error, ResultExt};
use serde::Serialize;
use tempfile::NamedTempFile;

pub struct AtomicCsvWriter {
    writer: Writer<NamedTempFile>,
    final_path: PathBuf
}

impl AtomicCsvWriter {
    /// Creates the parent directory of `final_path` when missing.
    pub fn create(final_path: &Path) -> Result<AtomicCsvWriter, Error> {
        let parent_dir = match final_path.parent() {
            Some(parent) if parent.as_os_str().is_empty() => Path::new("."),
            Some(parent) => parent,
            None => return Err(format_err!("cannot determine parent directory of {}", final_path.display()))
        };
        fs::create_dir_all(parent_dir)
            .with_context(|_| format!("failed to create directory {}", parent_dir.display()))?;

        let temp_file = NamedTempFile::new_in(parent_dir)
            .with_context(|_| format!("failed to create a temporary file in {}", parent_dir.display()))?;
        // Headers are written explicitly so that an empty export still has one
        let writer = WriterBuilder::new()
            .has_headers(false)
            .from_writer(temp_file);

        Ok(AtomicCsvWriter { writer, final_path: final_path.to_path_buf() })
    }

    pub fn write_header(&mut self, header: &[&str]) -> Result<(), Error> {
        self.writer.write_record(header)?;
        Ok(())
    }

    pub fn write_row<R: Serialize>(&mut self, row: &R) -> Result<(), Error> {
        self.writer.serialize(row)?;
        Ok(())
    }

    /// Flush and move the temporary file to its final path.
    pub fn finish(self) -> Result<PathBuf, Error> {
        let AtomicCsvWriter { writer, final_path } = self;
        let temp_file = writer.into_inner()
            .map_err(|err| format_err!("failed to flush CSV writer: {}", err.error()))?;
        temp_file.persist(&final_path)
            .map_err(|err| format_err!("failed to persist {}: {}", final_path.display(), err.error))?;
        Ok(final_path)
    }
}
