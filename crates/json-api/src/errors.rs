//! Handler Errors

use salvo::{
    oapi::{Components, EndpointOutRegister, Operation},
    prelude::*,
};
use serde::Serialize;

use tamweely_app::domain::validation::ValidationErrors;

/// Failure returned by a handler.
#[derive(Debug)]
pub(crate) enum ApiError {
    Status(StatusError),

    /// Rejected payload or parameters, rendered with every violated field.
    Validation(ValidationErrors),
}

/// Body of a `400` validation response.
#[derive(Debug, Serialize)]
pub(crate) struct ValidationProblem {
    pub title: &'static str,
    pub status: u16,
    pub errors: ValidationErrors,
}

impl From<StatusError> for ApiError {
    fn from(error: StatusError) -> Self {
        Self::Status(error)
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        match self {
            Self::Status(error) => res.render(error),
            Self::Validation(errors) => {
                res.status_code(StatusCode::BAD_REQUEST);
                res.render(Json(ValidationProblem {
                    title: "Validation Error",
                    status: StatusCode::BAD_REQUEST.as_u16(),
                    errors,
                }));
            }
        }
    }
}

impl EndpointOutRegister for ApiError {
    fn register(components: &mut Components, operation: &mut Operation) {
        StatusError::register(components, operation);
    }
}
