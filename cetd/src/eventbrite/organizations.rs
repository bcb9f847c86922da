use std::future::Future;
use failure::Error;
use serde_json::Value;
use urlencoding::encode;
use super::client::EventbriteClient;
use super::model::{Organization, OrganizationsResponse};
use super::pagination::fetch_all_pages;

fn organizations_url(base_url: &str, continuation: Option<&str>) -> String {
    match continuation {
        Some(token) => format!("{base_url}/users/me/organizations/?continuation={token}", base_url = base_url, token = encode(token)),
        None => format!("{base_url}/users/me/organizations/", base_url = base_url)
    }
}

async fn fetch_all_organizations<F, Fut>(fetch: F, base_url: &str) -> Result<Vec<Organization>, Error>
    where F: Fn(String) -> Fut,
          Fut: Future<Output=Result<Value, Error>> {
    fetch_all_pages::<OrganizationsResponse, _, _, _>(fetch, |continuation| organizations_url(base_url, continuation)).await
}

/// Every organization of the authenticated user, in API order.
pub async fn list_organizations(client: &EventbriteClient) -> Result<Vec<Organization>, Error> {
    let organizations = fetch_all_organizations(move |url| client.get_json(url), client.base_url()).await?;
    info!("Found {} organizations", organizations.len());
    Ok(organizations)
}
