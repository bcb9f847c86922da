use failure::Error;

#[derive(Debug, Fail)]
pub enum EventbriteError {
    #[fail(display = "invalid configuration for {}: {}", variable, reason)]
    Configuration {
        variable: String,
        reason: String
    },
    #[fail(display = "request to {} failed", url)]
    Transport {
        url: String,
        #[cause] cause: reqwest::Error
    },
    #[fail(display = "{} answered with HTTP status {}", url, status)]
    HttpStatus {
        status: u16,
        url: String
    },
    #[fail(display = "unexpected response from {}: {}", url, reason)]
    DataShape {
        url: String,
        reason: String
    },
    #[fail(display = "error while loading attendees for organization {}", organization_id)]
    AttendeesLoadError {
        organization_id: String,
        #[cause] cause: Error
    }
}
