extern crate failure;
#[macro_use]
extern crate failure_derive;
#[macro_use]
extern crate serde_derive;
extern crate serde;
extern crate serde_json;
extern crate reqwest;
extern crate futures;
#[macro_use]
extern crate log;
extern crate csv;
extern crate tempfile;
extern crate chrono;
extern crate urlencoding;
#[cfg(test)] #[macro_use] extern crate matches;

pub mod config;
pub mod eventbrite;
pub mod export;
pub mod report;
pub mod run;
