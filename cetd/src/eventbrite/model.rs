use std::fmt;
use serde::de::{self, Deserializer, Visitor};

/// Accepts a JSON string, number or boolean and keeps its textual form.
/// `null` becomes `None`.
struct LenientText;

impl<'de> Visitor<'de> for LenientText {
    type Value = Option<String>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string, a number or a boolean")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(Some(value.to_owned()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(Some(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(LenientText)
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    deserializer.deserialize_any(LenientText)
}

fn identifier<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    lenient_text(deserializer)?.ok_or_else(|| de::Error::custom("identifier must not be null"))
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Pagination {
    #[serde(default)]
    pub continuation: Option<String>,
    #[serde(default)]
    pub has_more_items: Option<bool>
}

impl Pagination {
    pub fn has_more_items(&self) -> bool {
        self.has_more_items.unwrap_or(false)
    }

    /// Continuation token to resume from, empty tokens are ignored.
    pub fn next_continuation(&self) -> Option<&str> {
        self.continuation.as_ref()
            .map(|token| token.as_str())
            .filter(|token| !token.is_empty())
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Organization {
    #[serde(deserialize_with = "identifier")]
    pub id: String,
    #[serde(default)]
    pub name: String
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Text {
    #[serde(default)]
    pub text: Option<String>
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Moment {
    #[serde(default)]
    pub utc: Option<String>
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Event {
    #[serde(default, deserialize_with = "lenient_text")]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub name: Option<Text>,
    #[serde(default)]
    pub start: Option<Moment>
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Profile {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub age: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub cell_phone: Option<String>
}

/// One registration as returned by the attendees endpoint with `expand=event`.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Attendee {
    #[serde(default, deserialize_with = "lenient_text")]
    pub event_id: Option<String>,
    #[serde(default)]
    pub checked_in: Option<bool>,
    #[serde(default)]
    pub event: Option<Event>,
    #[serde(default)]
    pub profile: Option<Profile>
}

#[derive(Deserialize, Debug, Clone)]
pub struct OrganizationsResponse {
    pub organizations: Vec<Organization>,
    pub pagination: Pagination
}

#[derive(Deserialize, Debug, Clone)]
pub struct AttendeesResponse {
    #[serde(default)]
    pub attendees: Vec<Attendee>,
    pub pagination: Pagination
}
