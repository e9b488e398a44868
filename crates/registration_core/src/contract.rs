use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const ROLE_USER: &str = "User";
pub const STATUS_PENDING: &str = "Pending";
pub const SUBMISSION_MESSAGE: &str =
    "Your Account has been submitted to AFSCME for review.";

/// Inbound request descriptor as delivered by the HTTP gateway: a combined
/// method+path route key, optional query parameters, and an optional raw
/// JSON body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouteEvent {
    #[serde(rename = "routeKey")]
    pub route_key: String,
    #[serde(rename = "queryStringParameters", default)]
    pub query_string_parameters: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub body: Option<String>,
}

impl RouteEvent {
    pub fn query_parameter(&self, name: &str) -> Option<&str> {
        self.query_string_parameters
            .as_ref()
            .and_then(|parameters| parameters.get(name))
            .map(String::as_str)
    }
}

/// The submission payload the registration form posts. `affiliation` arrives
/// as a comma-joined string because the form serializes its multi-select that
/// way; callers may include extra fields (`role`, `status`) and they are
/// ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegistrationRequest {
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub state: String,
    pub affiliation: String,
}

/// The persisted registration record. `affiliations` is stored as an ordered
/// list; joining back into a delimited string is a boundary concern.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRecord {
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub state: String,
    pub affiliations: Vec<String>,
    pub role: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListEnvelope {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub data: Vec<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedEnvelope {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub message: String,
    pub id: String,
}

/// Builds the record to persist for a submission. `role` and `status` are
/// always server-assigned; the client-generated `id` is taken verbatim.
pub fn registration_record(request: RegistrationRequest) -> UserRecord {
    UserRecord {
        id: request.id,
        firstname: request.firstname,
        lastname: request.lastname,
        email: request.email,
        state: request.state,
        affiliations: split_affiliations(&request.affiliation),
        role: ROLE_USER.to_string(),
        status: STATUS_PENDING.to_string(),
    }
}

/// Splits the form's comma-joined affiliation selection. Segment order is
/// preserved; whitespace-only segments are dropped.
pub fn split_affiliations(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}
