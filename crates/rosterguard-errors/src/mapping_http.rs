use crate::model::ErrorObj;
use http::StatusCode;

/// Response status for a rejection. Anything that is not a 4xx or 5xx
/// collapses to 500 so an error never renders as success.
pub fn status_of(err: &ErrorObj) -> StatusCode {
    match StatusCode::from_u16(err.http_status) {
        Ok(status) if status.is_client_error() || status.is_server_error() => status,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
