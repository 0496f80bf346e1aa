//! Project submissions awaiting registry review, and the MRV evidence
//! (measurement, reporting, verification) attached to them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::RegistryError;

/// Review stage of a submitted project.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QueueStatus {
    PendingPdd,
    PendingMrv,
    PendingValidation,
    Approved,
}

impl QueueStatus {
    pub const ALL: [QueueStatus; 4] = [
        Self::PendingPdd,
        Self::PendingMrv,
        Self::PendingValidation,
        Self::Approved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PendingPdd => "pending-pdd",
            Self::PendingMrv => "pending-mrv",
            Self::PendingValidation => "pending-validation",
            Self::Approved => "approved",
        }
    }

    /// Human label shown in badges and the filter menu.
    pub fn label(&self) -> &'static str {
        match self {
            Self::PendingPdd => "Pending PDD Review",
            Self::PendingMrv => "Pending MRV Data",
            Self::PendingValidation => "Pending Validation",
            Self::Approved => "Approved",
        }
    }
}

impl FromStr for QueueStatus {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| RegistryError::UnknownValue {
                field: "queue status",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for QueueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coastal ecosystem a project restores.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ecosystem {
    Mangrove,
    Seagrass,
    SaltMarsh,
}

impl Ecosystem {
    pub const ALL: [Ecosystem; 3] = [Self::Mangrove, Self::Seagrass, Self::SaltMarsh];

    /// Identifier used by filter menus.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mangrove => "mangrove",
            Self::Seagrass => "seagrass",
            Self::SaltMarsh => "saltmarsh",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Mangrove => "Mangrove",
            Self::Seagrass => "Seagrass",
            Self::SaltMarsh => "Salt Marsh",
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Ecosystem {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|eco| eco.as_str() == s)
            .ok_or_else(|| RegistryError::UnknownValue {
                field: "ecosystem",
                value: s.to_string(),
            })
    }
}

/// A project submission in the review queue.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QueueProject {
    pub id: String,
    pub name: String,
    /// Submitting organization.
    pub entity: String,
    pub date_submitted: String,
    pub status: QueueStatus,
    pub ecosystem: Ecosystem,
    pub location: String,
    pub area_hectares: u64,
    pub expected_credits: u64,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum EvidenceKind {
    Photo,
    Measurement,
    Video,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceStatus {
    Verified,
    Pending,
}

/// A single piece of field evidence submitted for audit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MrvRecord {
    pub id: String,
    pub date: String,
    pub kind: EvidenceKind,
    pub description: String,
    pub lat: f64,
    pub lng: f64,
    pub status: EvidenceStatus,
}
