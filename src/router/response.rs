//! Handler results and their conversion into response bodies.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use actix_web::http::StatusCode;
use mime_guess::Mime;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::error;

use crate::error::ViewerError;

/// What a handler hands back on success.
#[derive(Clone, Debug, PartialEq)]
pub enum Reply {
    /// A structured value, already lowered to a JSON tree.
    Json(Value),

    /// A file whose bytes become the response body verbatim.
    File(PathBuf),
}

impl Reply {
    /// Serializes a record (or a sequence of them) into a JSON reply.
    ///
    /// Object keys keep the field declaration order of the record type.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, HttpError> {
        let value = serde_json::to_value(value).map_err(ViewerError::from)?;
        Ok(Self::Json(value))
    }

    /// Replies with the raw contents of `path`.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// Produces the response body.
    ///
    /// File replies are read here and never pass through JSON encoding.
    pub fn into_body(self) -> Result<Body, HttpError> {
        match self {
            Self::Json(value) => Ok(Body::Json(value)),
            Self::File(path) => {
                let content = fs::read(&path).map_err(ViewerError::from)?;
                let content_type = mime_guess::from_path(&path).first_or_octet_stream();
                Ok(Body::Binary {
                    content,
                    content_type,
                })
            }
        }
    }
}

/// A response body, either JSON or opaque bytes.
#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    Json(Value),
    Binary { content: Vec<u8>, content_type: Mime },
}

/// A dispatched response, independent of the HTTP transport.
#[derive(Clone, Debug, PartialEq)]
pub struct Response {
    pub status: StatusCode,
    pub body: Body,
}

impl Response {
    /// An error-style response with body `{"detail": <detail>}`.
    pub fn detail(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            body: Body::Json(json!({ "detail": detail.into() })),
        }
    }

    /// The JSON body, or `None` for binary responses.
    pub fn json(&self) -> Option<&Value> {
        match &self.body {
            Body::Json(value) => Some(value),
            Body::Binary { .. } => None,
        }
    }

    /// The raw bytes, or `None` for JSON responses.
    pub fn bytes(&self) -> Option<&[u8]> {
        match &self.body {
            Body::Binary { content, .. } => Some(content),
            Body::Json(_) => None,
        }
    }

    /// The `detail` message of an error response.
    pub fn detail_message(&self) -> Option<&str> {
        self.json()?.get("detail")?.as_str()
    }
}

/// A handler failure that carries its own status code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpError {
    pub status: StatusCode,
    pub detail: String,
}

impl HttpError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.detail)
    }
}

impl std::error::Error for HttpError {}

impl From<ViewerError> for HttpError {
    /// 4xx errors expose their message; anything else is logged and hidden
    /// behind a generic detail.
    fn from(err: ViewerError) -> Self {
        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(error = %err, "request failed");
            return Self::internal();
        }
        Self::new(status, err.to_string())
    }
}
