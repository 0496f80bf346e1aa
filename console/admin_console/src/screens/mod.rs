//! The console's screens.
//!
//! | Screen        | Local state                                   |
//! |---------------|-----------------------------------------------|
//! | `dashboard`   | map overlay, selection, modal, legend hover   |
//! | `projects`    | search, status filter, open detail and tab    |
//! | `users`       | search, tier filter, open profile and tab     |
//! | `marketplace` | tracked credit id                             |
//! | `reporting`   | date range, ecosystem and region filters      |
//!
//! Each screen owns its copy of the mock data and derives its view on
//! demand. Nothing is shared between screens.

pub mod dashboard;
pub mod marketplace;
pub mod projects;
pub mod reporting;
pub mod users;

use serde::Serialize;

use crate::badge::Tone;

pub use dashboard::Dashboard;
pub use marketplace::Marketplace;
pub use projects::ProjectQueue;
pub use reporting::Reporting;
pub use users::UserQueue;

/// One row of an audit or verification timeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    pub title: String,
    pub detail: String,
    pub tone: Tone,
}

impl TimelineEntry {
    fn new(title: impl Into<String>, detail: impl Into<String>, tone: Tone) -> Self {
        TimelineEntry {
            title: title.into(),
            detail: detail.into(),
            tone,
        }
    }
}

/// A labelled count, as shown in the statistic cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatCard {
    pub title: String,
    pub value: String,
}
