use rouille::Response;

use crate::{catalog::error::CatalogError, onboard::ValidationErrors};

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    Validation(ValidationErrors),
    Internal(String),
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::ArtistNotFound(id) => ApiError::NotFound(format!("artist {} not found", id)),

            CatalogError::ArtistBusy(name) => {
                ApiError::Conflict(format!("{} is currently busy", name))
            }

            CatalogError::Parse(_)
            | CatalogError::Fs(_)
            | CatalogError::InvalidArtist { .. }
            | CatalogError::DuplicateId(_) => ApiError::Internal("internal server error".into()),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(err: ValidationErrors) -> Self {
        ApiError::Validation(err)
    }
}

impl ApiError {
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::NotFound(_) => 404,
            ApiError::BadRequest(_) | ApiError::Validation(_) => 400,
            ApiError::Conflict(_) => 409,
            ApiError::Internal(_) => 500,
        }
    }

    pub fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ApiError::NotFound(msg)
            | ApiError::BadRequest(msg)
            | ApiError::Conflict(msg)
            | ApiError::Internal(msg) => {
                Response::text(msg).with_status_code(status)
            }

            ApiError::Validation(errors) => {
                Response::json(&serde_json::json!({ "errors": errors })).with_status_code(status)
            }
        }
    }
}
