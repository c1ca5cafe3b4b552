//! Maps upstream responses onto `UpstreamError`.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use super::error::UpstreamError;

/// Error for a non-success `status` returned by `service` with `body`.
///
/// 4xx becomes a `ClientFault` carrying the raw body; anything else is a
/// `ServerFault`.
#[must_use]
pub fn fault(service: &str, status: StatusCode, body: String) -> UpstreamError {
    if status.is_client_error() {
        UpstreamError::ClientFault {
            message: body,
            status: status.as_u16(),
        }
    } else {
        UpstreamError::server_fault(service, body)
    }
}

/// Passes a 2xx body through and classifies everything else.
///
/// # Errors
///
/// Returns the fault for any non-2xx `status`, with the body read as
/// lossy UTF-8.
pub fn classify(service: &str, status: StatusCode, body: Vec<u8>) -> Result<Vec<u8>, UpstreamError> {
    if status.is_success() {
        Ok(body)
    } else {
        Err(fault(service, status, String::from_utf8_lossy(&body).into_owned()))
    }
}

/// Decodes a 2xx JSON body.
///
/// # Errors
///
/// Returns a `ServerFault` carrying the decode error when `body` does not
/// match `T`.
pub fn decode<T: DeserializeOwned>(service: &str, body: &[u8]) -> Result<T, UpstreamError> {
    serde_json::from_slice(body).map_err(|e| UpstreamError::server_fault(service, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_passes_body_through() {
        let body = classify("ReviewsService", StatusCode::OK, b"[]".to_vec()).unwrap();
        assert_eq!(body, b"[]");
    }

    #[test]
    fn test_4xx_keeps_status_and_body() {
        let err = classify("ReviewsService", StatusCode::BAD_REQUEST, b"bad id".to_vec()).unwrap_err();

        assert_eq!(
            err,
            UpstreamError::ClientFault {
                message: "bad id".into(),
                status: 400
            }
        );
    }

    #[test]
    fn test_5xx_is_server_fault_with_body() {
        let err = classify(
            "MoviesInfoService",
            StatusCode::SERVICE_UNAVAILABLE,
            b"unavailable".to_vec(),
        )
        .unwrap_err();

        assert_eq!(
            err,
            UpstreamError::ServerFault("Server Exception in MoviesInfoService unavailable".into())
        );
    }

    #[test]
    fn test_undecodable_body_is_server_fault() {
        let err = decode::<Vec<u32>>("ReviewsService", b"{not json").unwrap_err();

        assert!(err.is_retryable());
        assert!(err.to_string().starts_with("Server Exception in ReviewsService "));
    }
}
