use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::ErrorBody;

pub const UNCLEAR_PICTURE: &str = "The MRI picture is not clear. Please provide a clearer picture.";

/// Errors returned by `POST /analyze`. Every variant is a client error.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// Filename does not start with `h` or `n` after lowercasing.
    #[error("{}", UNCLEAR_PICTURE)]
    InvalidInput,

    #[error("No file was uploaded. Send the image in a multipart field named `file`.")]
    MissingFile,

    #[error("Malformed multipart upload: {0}")]
    Multipart(String),
}

impl From<actix_multipart::MultipartError> for AnalyzeError {
    fn from(e: actix_multipart::MultipartError) -> Self {
        AnalyzeError::Multipart(e.to_string())
    }
}

impl ResponseError for AnalyzeError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            detail: self.to_string(),
        })
    }
}

/// Startup configuration problems.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid CORS origin `{origin}`: {reason}")]
    InvalidOrigin { origin: String, reason: String },

    #[error("no CORS origins configured")]
    NoOrigins,
}

impl From<ConfigError> for std::io::Error {
    fn from(e: ConfigError) -> Self {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    }
}
