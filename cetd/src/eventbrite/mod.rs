use std::time::Duration;

pub mod errors;

pub mod model;
pub mod client;
pub mod pagination;
pub mod organizations;
pub mod attendees;

pub const EVENTBRITE_BASE_URL: &'static str = "https://www.eventbriteapi.com/v3";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
