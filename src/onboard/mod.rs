//! Artist registration ("join as artist") form.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use crate::selection::Selection;

pub mod submission;

const MIN_NAME_CHARS: usize = 2;
const MIN_BIO_CHARS: usize = 50;
const MIN_LOCATION_CHARS: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArtistForm {
    pub name: String,
    pub bio: String,
    pub category: Selection,
    pub languages: Selection,
    pub fee_range: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Name,
    Bio,
    Category,
    Languages,
    FeeRange,
    Location,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: FormField,
    pub message: &'static str,
}

/// All field errors of a rejected form, in form order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages = self.0.iter().map(|e| e.message).collect::<Vec<_>>();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl ValidationErrors {
    #[cfg(test)]
    pub(crate) fn message_for(&self, field: FormField) -> Option<&'static str> {
        self.0.iter().find(|e| e.field == field).map(|e| e.message)
    }
}

/// Checks a required text field with a minimum character count.
fn check_text(
    value: &str,
    min_chars: usize,
    required: &'static str,
    too_short: &'static str,
) -> Option<&'static str> {
    if value.is_empty() {
        Some(required)
    } else if value.chars().count() < min_chars {
        Some(too_short)
    } else {
        None
    }
}

impl ArtistForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let checks = [
            (
                FormField::Name,
                check_text(
                    &self.name,
                    MIN_NAME_CHARS,
                    "Name is required",
                    "Name must be at least 2 characters",
                ),
            ),
            (
                FormField::Bio,
                check_text(
                    &self.bio,
                    MIN_BIO_CHARS,
                    "Bio is required",
                    "Bio must be at least 50 characters",
                ),
            ),
            (
                FormField::Category,
                self.category
                    .is_empty()
                    .then_some("At least one category is required"),
            ),
            (
                FormField::Languages,
                self.languages
                    .is_empty()
                    .then_some("At least one language is required"),
            ),
            (
                FormField::FeeRange,
                self.fee_range.is_empty().then_some("Fee range is required"),
            ),
            (
                FormField::Location,
                check_text(
                    &self.location,
                    MIN_LOCATION_CHARS,
                    "Location is required",
                    "Location must be at least 2 characters",
                ),
            ),
        ];

        let errors = checks
            .into_iter()
            .filter_map(|(field, message)| message.map(|message| FieldError { field, message }))
            .collect::<Vec<_>>();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }
}

#[cfg(test)]
pub(crate) fn valid_form() -> ArtistForm {
    ArtistForm {
        name: "Kavya Rathore".to_string(),
        bio: "Folk vocalist performing Rajasthani songs at weddings and festivals.".to_string(),
        category: Selection::new().toggled("Singer"),
        languages: Selection::new().toggled("Hindi").toggled("Rajasthani"),
        fee_range: "₹0 - ₹25,000".to_string(),
        location: "Jaipur".to_string(),
        profile_image: None,
    }
}
