use std::path::{Path, PathBuf};
use failure::{Error, ResultExt};
use serde::{Deserializer, Serializer};
use serde::de::{self, Deserialize};
use crate::eventbrite::model::Attendee;

pub mod atomic_writer;

use self::atomic_writer::AtomicCsvWriter;

/// Column order of the export file.
pub const HEADER: [&'static str; 10] = [
    "organization_id", "event_id", "event_name", "event_start", "checked_in",
    "attendee_name", "email", "age", "gender", "cell_phone",
];

fn write_flag<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *value { "True" } else { "False" })
}

fn read_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" | "" => Ok(false),
        other => Err(de::Error::custom(format!("invalid checked_in value {}", other)))
    }
}

/// Flat projection of one attendee, one line of the export.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct AttendeeRow {
    pub organization_id: Option<String>,
    pub event_id: Option<String>,
    pub event_name: Option<String>,
    pub event_start: Option<String>,
    #[serde(serialize_with = "write_flag", deserialize_with = "read_flag")]
    pub checked_in: bool,
    pub attendee_name: Option<String>,
    pub email: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub cell_phone: Option<String>
}

impl From<Attendee> for AttendeeRow {
    fn from(attendee: Attendee) -> AttendeeRow {
        let event = attendee.event.unwrap_or_default();
        let profile = attendee.profile.unwrap_or_default();
        AttendeeRow {
            organization_id: event.organization_id,
            event_id: attendee.event_id,
            event_name: event.name.and_then(|name| name.text),
            event_start: event.start.and_then(|start| start.utc),
            checked_in: attendee.checked_in.unwrap_or(false),
            attendee_name: profile.name,
            email: profile.email,
            age: profile.age,
            gender: profile.gender,
            cell_phone: profile.cell_phone,
        }
    }
}

/// Write every attendee to `output_file`, replacing it only once the whole
/// export succeeded. Returns the number of data rows written.
pub fn write_attendees_csv<I>(attendees: I, output_file: &Path) -> Result<usize, Error>
    where I: IntoIterator<Item=Attendee> {
    let mut writer = AtomicCsvWriter::create(output_file)?;
    writer.write_header(&HEADER)?;
    let mut count = 0;
    for attendee in attendees {
        writer.write_row(&AttendeeRow::from(attendee))?;
        count += 1;
    }
    let path: PathBuf = writer.finish()?;
    debug!("{} rows written to {}", count, path.display());
    Ok(count)
}

pub fn read_attendees_csv(input_file: &Path) -> Result<Vec<AttendeeRow>, Error> {
    let mut reader = csv::Reader::from_path(input_file)
        .with_context(|_| format!("failed to open {}", input_file.display()))?;
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row.with_context(|_| format!("invalid row in {}", input_file.display()))?);
    }
    Ok(rows)
}
