use std::fmt;
use std::path::{Path, PathBuf};
use failure::Error;
use crate::config::Config;
use crate::eventbrite::attendees::{flatten, load_all_attendees};
use crate::eventbrite::client::EventbriteClient;
use crate::eventbrite::organizations::list_organizations;
use crate::export::write_attendees_csv;

pub const DEFAULT_OUTPUT_FILE: &'static str = "data/attendees.csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    ListingOrganizations,
    FetchingAttendees,
    Exporting,
    Done,
    Failed
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match *self {
            Stage::Idle => "idle",
            Stage::ListingOrganizations => "listing organizations",
            Stage::FetchingAttendees => "fetching attendees",
            Stage::Exporting => "exporting",
            Stage::Done => "done",
            Stage::Failed => "failed"
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrganizationSummary {
    pub id: String,
    pub name: String,
    pub attendees: usize
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Same order as the organizations returned by the API.
    pub organizations: Vec<OrganizationSummary>,
    pub total_attendees: usize,
    pub output_file: PathBuf
}

struct Progress {
    stage: Stage
}

impl Progress {
    fn advance(&mut self, next: Stage) {
        debug!("{} -> {}", self.stage, next);
        self.stage = next;
    }
}

/// Fetch every attendee of every organization and export them to `output_file`.
///
/// The export file is only replaced when the whole run succeeds.
pub async fn run(config: &Config, output_file: &Path) -> Result<RunSummary, Error> {
    let client = EventbriteClient::new(config)?;
    run_with_client(&client, output_file).await
}

pub async fn run_with_client(client: &EventbriteClient, output_file: &Path) -> Result<RunSummary, Error> {
    let mut progress = Progress { stage: Stage::Idle };
    match export_all(client, output_file, &mut progress).await {
        Ok(summary) => {
            progress.advance(Stage::Done);
            Ok(summary)
        }
        Err(err) => {
            error!("Run failed while {} : {}", progress.stage, err);
            progress.advance(Stage::Failed);
            Err(err)
        }
    }
}

async fn export_all(client: &EventbriteClient, output_file: &Path, progress: &mut Progress) -> Result<RunSummary, Error> {
    progress.advance(Stage::ListingOrganizations);
    let organizations = list_organizations(client).await?;

    progress.advance(Stage::FetchingAttendees);
    let attendees_by_organization = load_all_attendees(client, &organizations).await?;
    let summaries: Vec<OrganizationSummary> = organizations.iter()
        .zip(attendees_by_organization.iter())
        .map(|(organization, attendees)| OrganizationSummary {
            id: organization.id.clone(),
            name: organization.name.clone(),
            attendees: attendees.len(),
        })
        .collect();
    let attendees = flatten(attendees_by_organization);
    info!("Total attendees fetched: {}", attendees.len());

    progress.advance(Stage::Exporting);
    let total_attendees = write_attendees_csv(attendees, output_file)?;
    info!("Attendee data exported to {}", output_file.display());

    Ok(RunSummary { organizations: summaries, total_attendees, output_file: output_file.to_path_buf() })
}
