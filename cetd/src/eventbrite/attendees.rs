use std::future::Future;
use failure::Error;
use futures::future::join_all;
use serde_json::Value;
use urlencoding::encode;
use super::client::EventbriteClient;
use super::errors::EventbriteError;
use super::model::{Attendee, AttendeesResponse, Organization};
use super::pagination::fetch_all_pages;

/// Traverse a Vec<Result<T, Error>> and combine the values to return a Result<Vec<T>, Error>
///
/// If all values of the vector are Ok then return a Ok containing all the values in order
/// On the first Err it stop accumulating values and return the matched error
fn sequence<R>(seq: Vec<Result<R, Error>>) -> Result<Vec<R>, Error> {
    seq.into_iter().fold(Ok(Vec::new()), |result, current|
        result.and_then(|mut vec|
            match current {
                Ok(value) => {
                    vec.push(value);
                    Ok(vec)
                }
                Err(e) => Err(e)
            }))
}

fn attendees_url(base_url: &str, organization_id: &str, continuation: Option<&str>) -> String {
    let url = format!("{base_url}/organizations/{organization_id}/attendees/?expand=event", base_url = base_url, organization_id = encode(organization_id));
    match continuation {
        Some(token) => format!("{url}&continuation={token}", url = url, token = encode(token)),
        None => url
    }
}

async fn fetch_all_attendees<F, Fut>(fetch: F, base_url: &str, organization_id: &str) -> Result<Vec<Attendee>, Error>
    where F: Fn(String) -> Fut,
          Fut: Future<Output=Result<Value, Error>> {
    fetch_all_pages::<AttendeesResponse, _, _, _>(fetch, |continuation| attendees_url(base_url, organization_id, continuation))
        .await
        .map_err(|err| EventbriteError::AttendeesLoadError { organization_id: String::from(organization_id), cause: err }.into())
}

/// One result per organization, in the order of `organizations`.
///
/// All organizations are fetched concurrently. Every fetch runs to completion,
/// then the first failure in organization order is returned.
async fn fetch_attendees_by_organization<F, Fut>(fetch: F, base_url: &str, organizations: &[Organization]) -> Result<Vec<Vec<Attendee>>, Error>
    where F: Fn(String) -> Fut,
          Fut: Future<Output=Result<Value, Error>> {
    let fetch = &fetch;
    let tasks = organizations.iter().map(move |organization| async move {
        let attendees = fetch_all_attendees(fetch, base_url, &organization.id).await;
        match attendees {
            Ok(ref attendees) => debug!("Organization {} : {} attendees loaded", organization.id, attendees.len()),
            Err(ref err) => warn!("Organization {} : {}", organization.id, err)
        }
        attendees
    });
    sequence(join_all(tasks).await)
}

/// All attendees of one organization, with the event expanded.
pub async fn load_attendees(client: &EventbriteClient, organization_id: &str) -> Result<Vec<Attendee>, Error> {
    fetch_all_attendees(move |url| client.get_json(url), client.base_url(), organization_id).await
}

/// Attendees of every organization, sharing the client connection pool.
pub async fn load_all_attendees(client: &EventbriteClient, organizations: &[Organization]) -> Result<Vec<Vec<Attendee>>, Error> {
    fetch_attendees_by_organization(move |url| client.get_json(url), client.base_url(), organizations).await
}

/// Consumes the per organization lists, keeping organization order.
pub fn flatten(attendees_by_organization: Vec<Vec<Attendee>>) -> Vec<Attendee> {
    attendees_by_organization.into_iter().flatten().collect()
}
