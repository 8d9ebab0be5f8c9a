//! HTTP mapping of StackIt errors.

use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use askama::Template;
use sk_core::error::AppError;
use sk_ui::NotFoundTemplate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Rendered as the not-found page.
    #[error("{0} not found")]
    NotFound(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    /// A validation error that escaped its page. Pages normally surface these
    /// as toasts.
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::NotFound(kind, id) => Self::NotFound(format!("{kind} {id}")),
            AppError::Validation(err) => Self::BadRequest(err.to_string()),
            AppError::Unauthorized(reason) => Self::Forbidden(reason),
            AppError::Internal(reason) => Self::Internal(reason),
        }
    }
}

impl From<askama::Error> for ApiError {
    fn from(err: askama::Error) -> Self {
        Self::Internal(format!("template rendering failed: {err}"))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        match self {
            Self::NotFound(missing) => match NotFoundTemplate::new(missing, Vec::new()).render() {
                Ok(html) => HttpResponse::build(status).content_type(ContentType::html()).body(html),
                Err(err) => {
                    log::error!("not-found page failed to render: {err}");
                    HttpResponse::build(status).finish()
                }
            },
            Self::Internal(reason) => {
                log::error!("{reason}");
                HttpResponse::build(status)
                    .content_type(ContentType::plaintext())
                    .body("Something went wrong.")
            }
            other => HttpResponse::build(status)
                .content_type(ContentType::plaintext())
                .body(other.to_string()),
        }
    }
}
