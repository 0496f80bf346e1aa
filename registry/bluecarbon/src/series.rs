//! Time series and summary figures behind the console's static charts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::RegistryError;
use crate::queue::Ecosystem;

/// A headline figure with optional breakdown badges.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Kpi {
    pub title: String,
    pub value: String,
    pub badges: Vec<KpiBadge>,
    /// Month-over-month change, e.g. `+24%`.
    pub trend: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KpiBadge {
    pub label: String,
    pub tooltip: String,
}

/// Series on the issued-versus-retired credit chart.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreditSeries {
    Issued,
    Retired,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreditPoint {
    pub month: String,
    pub issued: u64,
    pub retired: u64,
}

impl CreditPoint {
    pub fn value(&self, series: CreditSeries) -> u64 {
        match series {
            CreditSeries::Issued => self.issued,
            CreditSeries::Retired => self.retired,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedCategory {
    Project,
    User,
    Credit,
    Validation,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedStatus {
    Pending,
    Completed,
}

/// One line of the dashboard's recent activity feed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeedItem {
    pub time: String,
    pub action: String,
    pub category: FeedCategory,
    pub status: FeedStatus,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: String,
    pub price: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VolumePoint {
    pub date: String,
    pub volume: u64,
}

/// Monthly tonnes sequestered per ecosystem.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SequestrationPoint {
    pub month: String,
    pub mangrove: u64,
    pub seagrass: u64,
    pub saltmarsh: u64,
}

impl SequestrationPoint {
    pub fn value(&self, ecosystem: Ecosystem) -> u64 {
        match ecosystem {
            Ecosystem::Mangrove => self.mangrove,
            Ecosystem::Seagrass => self.seagrass,
            Ecosystem::SaltMarsh => self.saltmarsh,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Asia,
    Pacific,
    Americas,
    Africa,
    Europe,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Self::Asia,
        Self::Pacific,
        Self::Americas,
        Self::Africa,
        Self::Europe,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asia => "asia",
            Self::Pacific => "pacific",
            Self::Americas => "americas",
            Self::Africa => "africa",
            Self::Europe => "europe",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Asia => "Southeast Asia",
            Self::Pacific => "Australia/Pacific",
            Self::Americas => "Americas",
            Self::Africa => "Africa",
            Self::Europe => "Europe",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|region| region.as_str() == s)
            .ok_or_else(|| RegistryError::UnknownValue {
                field: "region",
                value: s.to_string(),
            })
    }
}

/// Share of registered projects in a region.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionShare {
    pub region: Region,
    /// Percent of total.
    pub share: u32,
    pub projects: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngagementPoint {
    pub month: String,
    pub communities: u64,
    pub individuals: u64,
    pub organizations: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionPoint {
    pub month: String,
    pub volume: u64,
    /// USD.
    pub value: u64,
}

/// A report template offered by the reporting screen.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportType {
    pub title: String,
    pub description: String,
    pub fields: Vec<String>,
}
