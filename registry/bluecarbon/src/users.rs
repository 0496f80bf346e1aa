//! Registered users and organizations, and their verification tiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::RegistryError;

/// Verification level. Higher tiers unlock more registry actions.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Tier(u8);

impl Tier {
    pub const ONE: Tier = Tier(1);
    pub const TWO: Tier = Tier(2);
    pub const THREE: Tier = Tier(3);

    pub fn level(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Tier {
    type Error = RegistryError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1..=3 => Ok(Tier(level)),
            other => Err(RegistryError::UnknownValue {
                field: "tier",
                value: other.to_string(),
            }),
        }
    }
}

impl From<Tier> for u8 {
    fn from(tier: Tier) -> u8 {
        tier.0
    }
}

impl FromStr for Tier {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level: u8 = s.trim().parse().map_err(|_| RegistryError::UnknownValue {
            field: "tier",
            value: s.to_string(),
        })?;
        Tier::try_from(level)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tier {}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum AccountKind {
    Organization,
    #[serde(rename = "NGO")]
    Ngo,
    Individual,
    #[serde(rename = "Research Institution")]
    ResearchInstitution,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Organization => "Organization",
            Self::Ngo => "NGO",
            Self::Individual => "Individual",
            Self::ResearchInstitution => "Research Institution",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccountStatus {
    Verified,
    PendingVerification,
    DocumentReview,
    Rejected,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verified => "verified",
            Self::PendingVerification => "pending-verification",
            Self::DocumentReview => "document-review",
            Self::Rejected => "rejected",
        }
    }

    /// Badge text, e.g. `pending verification`.
    pub fn label(&self) -> String {
        self.as_str().replacen('-', " ", 1)
    }
}

/// A registry account awaiting or holding a verification tier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegistryUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub kind: AccountKind,
    pub current_tier: Tier,
    pub target_tier: Tier,
    pub date_registered: String,
    pub status: AccountStatus,
    pub submitted_documents: Vec<String>,
    pub location: String,
}

impl RegistryUser {
    /// Avatar initials: every word for individuals, the first two otherwise.
    pub fn initials(&self) -> String {
        let take = match self.kind {
            AccountKind::Individual => usize::MAX,
            _ => 2,
        };
        self.name
            .split(' ')
            .filter(|word| !word.is_empty())
            .take(take)
            .filter_map(|word| word.chars().next())
            .collect()
    }

    /// Tier upgrade requested and not yet granted.
    pub fn awaiting_upgrade(&self) -> bool {
        self.target_tier > self.current_tier
    }
}
