//! HTTP error mapping.
//!
//! Every handler returns `Result<_, ServiceError>`. Client mistakes become
//! `400 {error}`, unknown slugs and templates `404 {error}`, and internal
//! failures `500 {error, details}` with a generic message plus the
//! underlying error text.

use crate::package::PipelineError;
use crate::render::RenderError;
use crate::storage::StoreError;
use actix_web::error::{BlockingError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use common::responses::ErrorBody;
use log::error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("{0}")]
    NotFound(String),
    #[error("Failed to generate package")]
    Pipeline(#[from] PipelineError),
    #[error("Failed to load site")]
    Store(#[from] StoreError),
    #[error("Internal task failed")]
    Blocking(String),
}

impl ServiceError {
    fn details(&self) -> Option<String> {
        match self {
            ServiceError::Pipeline(e) => Some(e.to_string()),
            ServiceError::Store(e) => Some(e.to_string()),
            ServiceError::Blocking(e) => Some(e.clone()),
            _ => None,
        }
    }
}

impl From<RenderError> for ServiceError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::UnknownTemplate(id) => ServiceError::NotFound(format!("Template '{}' not found", id)),
        }
    }
}

impl From<BlockingError> for ServiceError {
    fn from(err: BlockingError) -> Self {
        ServiceError::Blocking(err.to_string())
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) | ServiceError::MissingField(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Pipeline(_) | ServiceError::Store(_) | ServiceError::Blocking(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let details = self.details();
        if let Some(details) = &details {
            error!("{}: {}", self, details);
        }
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
            details,
        })
    }
}

/// Turns body extraction failures into `400 {error}`.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ServiceError::Validation(format!("Invalid JSON body: {}", err)).into()
}
