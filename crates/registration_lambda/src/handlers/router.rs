use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::adapters::document_store::{DocumentStore, Item, KeyCondition};
use crate::runtime::contract::{
    registration_record, CreatedEnvelope, ListEnvelope, RegistrationRequest, RouteEvent,
    SUBMISSION_MESSAGE,
};
use crate::runtime::routes::Route;

/// Partition key of the affiliation table.
pub const STATE_NAME_ATTRIBUTE: &str = "state_name";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

/// Table names the router reads and writes. Resolved from the environment
/// by the binary and shared across invocations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterConfig {
    pub users_table: String,
    pub affiliations_table: String,
}

/// Failure taxonomy at the routing boundary. Caller mistakes and downstream
/// store failures map to distinct transport status codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    BadRequest(String),
    UpstreamFailure(String),
}

impl RouterError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::UpstreamFailure(_) => 502,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest(message) | Self::UpstreamFailure(message) => message,
        }
    }
}

impl std::fmt::Display for RouterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for RouterError {}

/// Dispatches one inbound gateway event. Never panics and never lets a
/// failure escape: every error becomes a response with the taxonomy status
/// and a JSON-encoded message string as the body.
pub fn handle_route_event(
    event: Value,
    config: &RouterConfig,
    store: &dyn DocumentStore,
) -> ApiGatewayResponse {
    let event = match serde_json::from_value::<RouteEvent>(event) {
        Ok(value) => value,
        Err(error) => {
            let failure = RouterError::BadRequest(format!("Malformed request event: {error}"));
            log_router_error("event_rejected", json!({"error": failure.message()}));
            return error_response(&failure);
        }
    };

    match dispatch(&event, config, store) {
        Ok(body) => {
            log_router_info("route_dispatched", json!({"route_key": event.route_key}));
            success_response(body)
        }
        Err(error) => {
            log_router_error(
                "route_failed",
                json!({
                    "route_key": event.route_key,
                    "status_code": error.status_code(),
                    "error": error.message(),
                }),
            );
            error_response(&error)
        }
    }
}

fn dispatch(
    event: &RouteEvent,
    config: &RouterConfig,
    store: &dyn DocumentStore,
) -> Result<String, RouterError> {
    let Some(route) = Route::parse(&event.route_key) else {
        return Err(RouterError::BadRequest(format!(
            "Unsupported route: \"{}\"",
            event.route_key
        )));
    };

    match route {
        Route::ListUsers => list_users(config, store),
        Route::ListStates => list_states(config, store),
        Route::ListAffiliations => list_affiliations(event, config, store),
        Route::CreateUser => create_user(event, config, store),
    }
}

fn list_users(config: &RouterConfig, store: &dyn DocumentStore) -> Result<String, RouterError> {
    let items = store
        .scan(&config.users_table, None)
        .map_err(RouterError::UpstreamFailure)?;

    Ok(list_envelope(items.into_iter().map(Value::Object).collect()))
}

fn list_states(config: &RouterConfig, store: &dyn DocumentStore) -> Result<String, RouterError> {
    let items = store
        .scan(&config.affiliations_table, Some(STATE_NAME_ATTRIBUTE))
        .map_err(RouterError::UpstreamFailure)?;

    // Many affiliation rows share a state; keep the first occurrence of each
    // non-empty name.
    let mut seen = HashSet::new();
    let mut states = Vec::new();
    for item in items {
        let Some(name) = item.get(STATE_NAME_ATTRIBUTE).and_then(Value::as_str) else {
            continue;
        };
        if name.is_empty() {
            continue;
        }
        if seen.insert(name.to_string()) {
            states.push(Value::String(name.to_string()));
        }
    }

    Ok(list_envelope(states))
}

fn list_affiliations(
    event: &RouteEvent,
    config: &RouterConfig,
    store: &dyn DocumentStore,
) -> Result<String, RouterError> {
    let state = match event.query_parameter("state") {
        Some(value) if !value.is_empty() => value,
        _ => {
            return Err(RouterError::BadRequest(
                "Missing required query parameter: state".to_string(),
            ));
        }
    };

    let condition = KeyCondition {
        attribute: STATE_NAME_ATTRIBUTE.to_string(),
        value: state.to_string(),
    };
    let items = store
        .query(&config.affiliations_table, &condition)
        .map_err(RouterError::UpstreamFailure)?;

    Ok(list_envelope(items.into_iter().map(Value::Object).collect()))
}

fn create_user(
    event: &RouteEvent,
    config: &RouterConfig,
    store: &dyn DocumentStore,
) -> Result<String, RouterError> {
    let body = event
        .body
        .as_deref()
        .ok_or_else(|| RouterError::BadRequest("Request body is required".to_string()))?;
    let request: RegistrationRequest = serde_json::from_str(body)
        .map_err(|error| RouterError::BadRequest(format!("Malformed registration payload: {error}")))?;

    let record = registration_record(request);
    let Value::Object(item) =
        serde_json::to_value(&record).expect("registration record should serialize")
    else {
        return Err(RouterError::UpstreamFailure(
            "registration record did not encode as an object".to_string(),
        ));
    };

    store
        .put(&config.users_table, item)
        .map_err(RouterError::UpstreamFailure)?;

    Ok(stable_envelope_json(&CreatedEnvelope {
        status_code: 200,
        message: SUBMISSION_MESSAGE.to_string(),
        id: record.id,
    }))
}

fn list_envelope(data: Vec<Value>) -> String {
    stable_envelope_json(&ListEnvelope {
        status_code: 200,
        data,
    })
}

fn stable_envelope_json(envelope: &impl Serialize) -> String {
    serde_json::to_string(envelope).expect("response payload should serialize")
}

fn success_response(body: String) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code: 200,
        headers: json!({"Content-Type": "application/json"}),
        body,
    }
}

fn error_response(error: &RouterError) -> ApiGatewayResponse {
    // Failure bodies are a bare JSON-encoded message string, not an envelope
    // object; the registration form only checks for a non-2xx status.
    ApiGatewayResponse {
        status_code: error.status_code(),
        headers: json!({"Content-Type": "application/json"}),
        body: serde_json::to_string(error.message())
            .expect("error message should serialize"),
    }
}

fn log_router_info(event: &str, details: Value) {
    eprintln!(
        "{}",
        json!({
            "component": "registration_router",
            "event": event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}

fn log_router_error(event: &str, details: Value) {
    eprintln!(
        "{}",
        json!({
            "component": "registration_router",
            "level": "error",
            "event": event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}
