use std::{fmt::Display, str::FromStr};

use anyhow::anyhow;
use serde::Serialize;

use crate::{catalog::error::CatalogError, domain::artist::Artist};

/// Management actions offered on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DashboardAction {
    Approve,
    Contact,
    Reject,
}

impl Display for DashboardAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DashboardAction::Approve => write!(f, "Approve"),
            DashboardAction::Contact => write!(f, "Contact"),
            DashboardAction::Reject => write!(f, "Reject"),
        }
    }
}

impl FromStr for DashboardAction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "approve" => Ok(DashboardAction::Approve),
            "contact" => Ok(DashboardAction::Contact),
            "reject" => Ok(DashboardAction::Reject),
            _ => Err(anyhow!("unknown dashboard action '{s}'")),
        }
    }
}

/// Sends a quote request and returns the confirmation shown to the visitor.
///
/// Busy artists do not take quote requests.
pub fn request_quote(artist: &Artist) -> Result<String, CatalogError> {
    if !artist.is_available() {
        return Err(CatalogError::ArtistBusy(artist.name.clone()));
    }

    Ok(format!(
        "Quote request sent to {}! They will get back to you soon.",
        artist.name
    ))
}

pub fn action_message(action: DashboardAction, artist: &Artist) -> String {
    format!("{action} action performed for {}", artist.name)
}
