//! # Types
//!
//! Records shown on the satellite map and in the project detail view.
//!
//! ## Design decisions
//!
//! ### Author-set lifecycle
//!
//! [`ProjectStatus`] and [`VerificationStatus`] are set by whoever authors the
//! catalog. Nothing in the console transitions them; they are display markers.
//!
//! ### Closed boundary rings
//!
//! A [`Project::boundary`] is a GeoJSON-style linear ring: at least four
//! positions, first equal to last. Rings are validated by
//! [`crate::invariants::check_boundary`] before they reach a map surface.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::RegistryError;

/// A `(longitude, latitude)` position in WGS84 degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

impl fmt::Display for LngLat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}°, {:.2}°", self.lng, self.lat)
    }
}

/// Lifecycle marker of a registered project.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    Active,
    Pending,
    Completed,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Pending => "Pending",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verification state reported by the auditing body.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum VerificationStatus {
    Verified,
    #[serde(rename = "Under Review")]
    UnderReview,
    Approved,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verified => "Verified",
            Self::UnderReview => "Under Review",
            Self::Approved => "Approved",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category tag on a project activity entry.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Verification,
    Credit,
    Monitoring,
    Engagement,
    Project,
    /// A tag the console has no dedicated treatment for.
    Other(String),
}

impl ActivityKind {
    /// Parse the authored tag. Unknown tags are kept verbatim.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "verification" => Self::Verification,
            "credit" => Self::Credit,
            "monitoring" => Self::Monitoring,
            "engagement" => Self::Engagement,
            "project" => Self::Project,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Verification => "verification",
            Self::Credit => "credit",
            Self::Monitoring => "monitoring",
            Self::Engagement => "engagement",
            Self::Project => "project",
            Self::Other(tag) => tag,
        }
    }
}

/// One entry of a project's activity log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// ISO `YYYY-MM-DD` date as authored.
    pub date: String,
    pub event: String,
    pub kind: ActivityKind,
}

impl Activity {
    pub fn new(date: &str, event: &str, tag: &str) -> Self {
        Self {
            date: date.to_string(),
            event: event.to_string(),
            kind: ActivityKind::from_tag(tag),
        }
    }

    /// Parsed calendar date.
    pub fn calendar_date(&self) -> Result<NaiveDate, RegistryError> {
        parse_date(&self.date)
    }

    /// `September 25, 2024`. Falls back to the authored text when it does not parse.
    pub fn long_date(&self) -> String {
        match self.calendar_date() {
            Ok(date) => date.format("%B %-d, %Y").to_string(),
            Err(_) => self.date.clone(),
        }
    }
}

/// A blue carbon restoration or conservation project.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Stable registry identifier, e.g. `BC-2024-0078`.
    pub id: String,
    pub name: String,
    pub status: ProjectStatus,
    /// Closed ring of `(lng, lat)` positions.
    pub boundary: Vec<LngLat>,
    pub credits_issued: u64,
    pub credits_retired: u64,
    /// Hectares.
    pub area_covered: f64,
    pub verification_status: VerificationStatus,
    pub description: String,
    pub images: Vec<String>,
    /// Reverse-chronological as authored.
    pub recent_activity: Vec<Activity>,
}

impl Project {
    /// First boundary position, used as the project's display location.
    pub fn anchor(&self) -> Option<LngLat> {
        self.boundary.first().copied()
    }
}

/// Parse an ISO calendar date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, RegistryError> {
    NaiveDate::from_str(raw.trim()).map_err(|e| RegistryError::InvalidDate {
        raw: raw.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_long_date() {
        let activity = Activity::new("2024-09-25", "MRV data submitted for Q3", "verification");
        assert_eq!(activity.long_date(), "September 25, 2024");
        assert_eq!(activity.kind, ActivityKind::Verification);
    }

    #[test]
    fn test_activity_long_date_falls_back_to_raw_text() {
        let activity = Activity::new("Q3 2024", "Field monitoring completed", "monitoring");
        assert_eq!(activity.long_date(), "Q3 2024");
        assert!(activity.calendar_date().is_err());
    }

    #[test]
    fn test_unknown_activity_tag_is_preserved() {
        let kind = ActivityKind::from_tag("audit");
        assert_eq!(kind, ActivityKind::Other("audit".to_string()));
        assert_eq!(kind.as_str(), "audit");
    }

    #[test]
    fn test_lng_lat_display_uses_two_decimals() {
        assert_eq!(LngLat::new(89.0207, 21.9497).to_string(), "89.02°, 21.95°");
    }
}
