//! Read-only detail view of one selected project.
//!
//! The modal owns no selection state. The host passes the selected project,
//! whether the modal is open, and which tab is active; [`render`] returns
//! `None` when there is nothing to show.

use bluecarbon_registry::format::{hectares, thousands};
use bluecarbon_registry::{ActivityKind, Project};
use serde::Serialize;

use crate::badge::{self, Badge, Tone};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalTab {
    #[default]
    Details,
    Activity,
}

impl ModalTab {
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "details" => Some(Self::Details),
            "activity" => Some(Self::Activity),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Details => "Details",
            Self::Activity => "Recent Activity",
        }
    }
}

/// Timeline icon for an activity entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityIcon {
    CheckCircle,
    TrendingUp,
    MapPin,
    Users,
    Clock,
}

pub fn activity_icon(kind: &ActivityKind) -> (ActivityIcon, Tone) {
    match kind {
        ActivityKind::Verification => (ActivityIcon::CheckCircle, Tone::Green),
        ActivityKind::Credit => (ActivityIcon::TrendingUp, Tone::Blue),
        ActivityKind::Monitoring => (ActivityIcon::MapPin, Tone::Orange),
        ActivityKind::Engagement => (ActivityIcon::Users, Tone::Purple),
        ActivityKind::Project | ActivityKind::Other(_) => (ActivityIcon::Clock, Tone::Gray),
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ImageView {
    pub uri: String,
    pub alt: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MetricCard {
    pub title: &'static str,
    pub value: String,
    pub tone: Tone,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DetailsContent {
    pub description: String,
    /// First boundary position, e.g. `88.85°, 21.95°`.
    pub coordinates: Option<String>,
    pub coverage: String,
    pub total_credits: String,
    pub retired_credits: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ActivityEntry {
    pub event: String,
    pub date: String,
    pub kind: String,
    pub icon: ActivityIcon,
    pub tone: Tone,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "tab", rename_all = "lowercase")]
pub enum TabContent {
    Details(DetailsContent),
    Activity { entries: Vec<ActivityEntry> },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ModalView {
    pub id: String,
    pub name: String,
    pub status: Badge,
    pub verification: Badge,
    pub images: Vec<ImageView>,
    pub metrics: Vec<MetricCard>,
    /// Whole percent.
    pub retirement_rate: u32,
    pub tabs: Vec<&'static str>,
    pub active_tab: ModalTab,
    pub content: TabContent,
}

/// Build the modal for `project`, or nothing when absent or closed.
pub fn render(project: Option<&Project>, open: bool, tab: ModalTab) -> Option<ModalView> {
    let project = project.filter(|_| open)?;
    let rate = project.retirement_rate();

    let images = project
        .images
        .iter()
        .enumerate()
        .map(|(i, uri)| ImageView {
            uri: uri.clone(),
            alt: format!("{} - Image {}", project.name, i + 1),
        })
        .collect();

    let metrics = vec![
        MetricCard {
            title: "Credits Issued",
            value: thousands(project.credits_issued),
            tone: Tone::Green,
        },
        MetricCard {
            title: "Credits Retired",
            value: thousands(project.credits_retired),
            tone: Tone::Orange,
        },
        MetricCard {
            title: "Area (Ha)",
            value: hectares(project.area_covered),
            tone: Tone::Blue,
        },
        MetricCard {
            title: "Retirement Rate",
            value: format!("{rate}%"),
            tone: Tone::Purple,
        },
    ];

    let content = match tab {
        ModalTab::Details => TabContent::Details(DetailsContent {
            description: project.description.clone(),
            coordinates: project.anchor().map(|at| at.to_string()),
            coverage: format!("{} hectares", hectares(project.area_covered)),
            total_credits: thousands(project.credits_issued),
            retired_credits: thousands(project.credits_retired),
        }),
        ModalTab::Activity => TabContent::Activity {
            entries: project
                .recent_activity
                .iter()
                .map(|activity| {
                    let (icon, tone) = activity_icon(&activity.kind);
                    ActivityEntry {
                        event: activity.event.clone(),
                        date: activity.long_date(),
                        kind: activity.kind.as_str().to_string(),
                        icon,
                        tone,
                    }
                })
                .collect(),
        },
    };

    Some(ModalView {
        id: project.id.clone(),
        name: project.name.clone(),
        status: badge::project_status(project.status),
        verification: badge::verification_status(project.verification_status),
        images,
        metrics,
        retirement_rate: rate,
        tabs: vec![ModalTab::Details.label(), ModalTab::Activity.label()],
        active_tab: tab,
        content,
    })
}
