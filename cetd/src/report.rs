//! Summaries of an attendees export.
//!
//! Three tables are computed from the CSV alone: unique events per month,
//! attendees per event for the latest year of the export, and the most
//! frequent attendees. Each one is written as its own CSV file.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use chrono::{DateTime, Datelike, NaiveDateTime, TimeZone, Utc};
use failure::{format_err, Error, ResultExt};
use crate::export::{read_attendees_csv, AttendeeRow};
use crate::export::atomic_writer::AtomicCsvWriter;

pub const EVENTS_PER_MONTH_FILE: &'static str = "events_per_month.csv";
pub const ATTENDEES_PER_EVENT_FILE: &'static str = "attendees_per_event.csv";
pub const FREQUENT_ATTENDEES_FILE: &'static str = "frequent_attendees.csv";

/// Value Eventbrite uses in place of data the attendee did not provide.
const PLACEHOLDER: &'static str = "Info Requested";
pub const FREQUENT_ATTENDEES_LIMIT: usize = 10;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MonthlyEvents {
    pub month: String,
    pub events: usize
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EventAttendance {
    pub event_name: String,
    pub event_id: String,
    pub attendees: usize
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FrequentAttendee {
    pub attendee_name: String,
    pub email: String,
    pub events_attended: usize
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub events_per_month: Vec<MonthlyEvents>,
    /// Latest year found in the export with its attendance per event.
    pub attendees_per_event: Option<(i32, Vec<EventAttendance>)>,
    pub frequent_attendees: Vec<FrequentAttendee>
}

fn parse_start(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|date| date.with_timezone(&Utc))
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").ok().map(|date| Utc.from_utc_datetime(&date)))
}

fn dated_rows(rows: &[AttendeeRow]) -> Vec<(DateTime<Utc>, &AttendeeRow)> {
    let dated: Vec<(DateTime<Utc>, &AttendeeRow)> = rows.iter()
        .filter_map(|row| row.event_start.as_ref().and_then(|start| parse_start(start)).map(|start| (start, row)))
        .collect();
    if dated.len() < rows.len() {
        warn!("{} rows without a usable event_start are left out of the date based reports", rows.len() - dated.len());
    }
    dated
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_ref().map(|value| value.trim()).filter(|value| !value.is_empty())
}

/// Number of unique events per calendar month, oldest month first.
pub fn events_per_month(rows: &[AttendeeRow]) -> Vec<MonthlyEvents> {
    let mut months: BTreeMap<(i32, u32), BTreeSet<&str>> = BTreeMap::new();
    for (start, row) in dated_rows(rows) {
        let events = months.entry((start.year(), start.month())).or_insert_with(BTreeSet::new);
        if let Some(event_id) = present(&row.event_id) {
            events.insert(event_id);
        }
    }
    months.into_iter()
        .map(|((year, month), events)| MonthlyEvents { month: format!("{:04}-{:02}", year, month), events: events.len() })
        .collect()
}

/// Attendees per event for the latest year present, busiest event first.
pub fn attendees_per_event(rows: &[AttendeeRow]) -> Option<(i32, Vec<EventAttendance>)> {
    let dated = dated_rows(rows);
    let latest_year = dated.iter().map(|(start, _)| start.year()).max()?;

    let mut events: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    for (_, row) in dated.iter().filter(|(start, _)| start.year() == latest_year) {
        if let (Some(event_name), Some(event_id)) = (present(&row.event_name), present(&row.event_id)) {
            *events.entry((event_name, event_id)).or_insert(0) += 1;
        }
    }

    let mut attendance: Vec<EventAttendance> = events.into_iter()
        .map(|((event_name, event_id), attendees)| EventAttendance { event_name: event_name.to_owned(), event_id: event_id.to_owned(), attendees })
        .collect();
    attendance.sort_by(|left, right| right.attendees.cmp(&left.attendees));
    Some((latest_year, attendance))
}

/// Attendees who came to the most distinct events.
pub fn frequent_attendees(rows: &[AttendeeRow], limit: usize) -> Vec<FrequentAttendee> {
    let mut attendees: BTreeMap<(&str, &str), BTreeSet<&str>> = BTreeMap::new();
    for row in rows {
        match (present(&row.attendee_name), present(&row.email)) {
            (Some(name), Some(email)) if name != PLACEHOLDER && email != PLACEHOLDER => {
                let events = attendees.entry((name, email)).or_insert_with(BTreeSet::new);
                if let Some(event_id) = present(&row.event_id) {
                    events.insert(event_id);
                }
            }
            _ => ()
        }
    }

    let mut frequent: Vec<FrequentAttendee> = attendees.into_iter()
        .map(|((name, email), events)| FrequentAttendee { attendee_name: name.to_owned(), email: email.to_owned(), events_attended: events.len() })
        .collect();
    frequent.sort_by(|left, right| right.events_attended.cmp(&left.events_attended));
    frequent.truncate(limit);
    frequent
}

pub fn summarize(rows: &[AttendeeRow]) -> Report {
    Report {
        events_per_month: events_per_month(rows),
        attendees_per_event: attendees_per_event(rows),
        frequent_attendees: frequent_attendees(rows, FREQUENT_ATTENDEES_LIMIT),
    }
}

fn write_table<R: serde::Serialize>(path: &Path, header: &[&str], rows: &[R]) -> Result<PathBuf, Error> {
    let mut writer = AtomicCsvWriter::create(path)?;
    writer.write_header(header)?;
    for row in rows {
        writer.write_row(row)?;
    }
    let path = writer.finish()?;
    info!("Report saved to {}", path.display());
    Ok(path)
}

/// Load `input_file` and write the three report tables into `output_dir`.
pub fn generate_reports(input_file: &Path, output_dir: &Path) -> Result<Vec<PathBuf>, Error> {
    if !input_file.exists() {
        return Err(format_err!("the file {} was not found", input_file.display()));
    }
    if !output_dir.exists() {
        fs::create_dir_all(output_dir)
            .with_context(|_| format!("failed to create directory {}", output_dir.display()))?;
        info!("Output directory {} created", output_dir.display());
    }

    let rows = read_attendees_csv(input_file)?;
    let report = summarize(&rows);

    let (year, attendance) = report.attendees_per_event.unwrap_or((0, Vec::new()));
    if !attendance.is_empty() {
        info!("Analyzing data for the year {}", year);
    }
    if report.frequent_attendees.is_empty() {
        warn!("No frequent attendee data to display (no valid names or emails found)");
    }

    Ok(vec![
        write_table(&output_dir.join(EVENTS_PER_MONTH_FILE), &["month", "events"], &report.events_per_month)?,
        write_table(&output_dir.join(ATTENDEES_PER_EVENT_FILE), &["event_name", "event_id", "attendees"], &attendance)?,
        write_table(&output_dir.join(FREQUENT_ATTENDEES_FILE), &["attendee_name", "email", "events_attended"], &report.frequent_attendees)?,
    ])
}
