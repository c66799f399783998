use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::model::ErrorBody;

/// Rejections produced while reading a scheduling request
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl RequestError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        RequestError::BadRequest(msg.into())
    }
}

impl ResponseError for RequestError {
    fn status_code(&self) -> StatusCode {
        match self {
            RequestError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}

/// Failures of a dashboard run, all rendered the same way
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
    #[error("{field}: {detail}")]
    InputParse { field: &'static str, detail: String },

    #[error("{0}")]
    Network(String),

    /// Non-success status; holds the body's `error` text or the status code
    #[error("{0}")]
    Server(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl DashboardError {
    pub fn input(field: &'static str, detail: impl Into<String>) -> Self {
        DashboardError::InputParse {
            field,
            detail: detail.into(),
        }
    }
}

impl From<reqwest::Error> for DashboardError {
    fn from(e: reqwest::Error) -> Self {
        DashboardError::Network(e.to_string())
    }
}
