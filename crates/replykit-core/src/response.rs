//! Transport seam for replykit
//!
//! The pipeline hands the transport layer an [`Envelope`] and a
//! [`StatusCode`]; this module turns that pair into an HTTP response with a
//! JSON body. The core trait is [`IntoResponse`], matching the shape web
//! frameworks expect from a body-producing type.
//!
//! # Example
//!
//! ```rust
//! use replykit_core::{process, IntoResponse, Payload};
//! use http::Method;
//!
//! let value = Payload::record([("id", Payload::Int(1))]);
//! let (envelope, status) = process(&value, &Method::GET);
//! let response = (status, envelope).into_response();
//!
//! assert_eq!(response.status(), http::StatusCode::OK);
//! ```

use crate::envelope::Envelope;
use crate::error::ApiError;
use bytes::Bytes;
use http::{header, StatusCode};
use http_body_util::Full;
use thiserror::Error;

/// HTTP Response type
pub type Response = http::Response<Full<Bytes>>;

/// Error from encoding an envelope to body bytes.
///
/// The only fallible step in the crate; classification itself never fails.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The JSON encoder rejected the body.
    #[error("failed to encode envelope: {0}")]
    Json(#[from] serde_json::Error),
}

impl Envelope {
    /// Encode the envelope body for transports that frame it themselves.
    pub fn to_bytes(&self) -> Result<Bytes, EncodeError> {
        Ok(Bytes::from(serde_json::to_vec(self)?))
    }

    /// Wire status for this envelope: the body's own `statusCode` when it
    /// is a valid HTTP code, 200 otherwise.
    pub fn wire_status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::OK)
    }
}

/// Trait for types that can be converted into an HTTP response
pub trait IntoResponse {
    /// Convert self into a Response
    fn into_response(self) -> Response;
}

// Implement for Response itself
impl IntoResponse for Response {
    fn into_response(self) -> Response {
        self
    }
}

// Implement for Envelope - status comes from the body's own statusCode
impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        let status = self.wire_status();
        let body = serde_json::to_vec(&self).unwrap_or_else(|_| {
            br#"{"message":"Failed to serialize response","data":null,"statusCode":500}"#.to_vec()
        });

        http::Response::builder()
            .status(status)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Full::new(Bytes::from(body)))
            .unwrap()
    }
}

// Implement for (StatusCode, impl IntoResponse) - the pair the pipeline
// returns, with the pipeline-chosen status applied over the body's own.
impl<R: IntoResponse> IntoResponse for (StatusCode, R) {
    fn into_response(self) -> Response {
        let mut response = self.1.into_response();
        *response.status_mut() = self.0;
        response
    }
}

// Implement for ApiError
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.into_envelope().into_response()
    }
}

// Implement for Result<T, E> where both implement IntoResponse
impl<T: IntoResponse, E: IntoResponse> IntoResponse for Result<T, E> {
    fn into_response(self) -> Response {
        match self {
            Ok(v) => v.into_response(),
            Err(e) => e.into_response(),
        }
    }
}
