use std::future::Future;
use failure::Error;
use serde::de::DeserializeOwned;
use serde_json::{self, Value};
use super::errors::EventbriteError;
use super::model::{Attendee, AttendeesResponse, Organization, OrganizationsResponse, Pagination};

/// A page of a continuation based listing.
pub trait Page: DeserializeOwned {
    type Item;

    fn pagination(&self) -> &Pagination;

    fn into_items(self) -> Vec<Self::Item>;
}

impl Page for OrganizationsResponse {
    type Item = Organization;

    fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    fn into_items(self) -> Vec<Organization> {
        self.organizations
    }
}

impl Page for AttendeesResponse {
    type Item = Attendee;

    fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    fn into_items(self) -> Vec<Attendee> {
        self.attendees
    }
}

fn decode_page<P: Page>(url: &str, body: Value) -> Result<P, Error> {
    serde_json::from_value(body)
        .map_err(|err| EventbriteError::DataShape { url: url.to_owned(), reason: err.to_string() }.into())
}

/// Follow continuation tokens until the server reports no more items.
///
/// Pages are fetched one after the other since each request needs the token of
/// the previous answer. `url_for` receives `None` for the first page.
/// The loop only stops on `has_more_items`, there is no page count limit.
pub async fn fetch_all_pages<P, F, Fut, U>(fetch: F, url_for: U) -> Result<Vec<P::Item>, Error>
    where P: Page,
          F: Fn(String) -> Fut,
          Fut: Future<Output=Result<Value, Error>>,
          U: Fn(Option<&str>) -> String {
    let mut items = Vec::new();
    let mut continuation: Option<String> = None;
    loop {
        let url = url_for(continuation.as_ref().map(|token| token.as_str()));
        let page: P = decode_page(&url, fetch(url.clone()).await?)?;
        let has_more_items = page.pagination().has_more_items();
        let next = page.pagination().next_continuation().map(|token| token.to_owned());
        items.extend(page.into_items());

        if !has_more_items {
            return Ok(items);
        }
        match next {
            Some(token) => continuation = Some(token),
            None => return Err(EventbriteError::DataShape {
                url,
                reason: "more items announced without a continuation token".to_owned(),
            }.into())
        }
    }
}
