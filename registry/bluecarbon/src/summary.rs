//! Derived credit metrics.
//!
//! Everything here is a pure function of its inputs; nothing caches.

use serde::{Deserialize, Serialize};

use crate::types::Project;

/// Totals over a set of projects, as shown in the map's summary panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub count: usize,
    /// Hectares.
    pub total_area: f64,
    pub total_issued: u64,
    pub total_retired: u64,
}

impl CatalogSummary {
    pub fn of<'a, I>(projects: I) -> Self
    where
        I: IntoIterator<Item = &'a Project>,
    {
        projects
            .into_iter()
            .fold(CatalogSummary::default(), |acc, project| CatalogSummary {
                count: acc.count + 1,
                total_area: acc.total_area + project.area_covered,
                total_issued: acc.total_issued.saturating_add(project.credits_issued),
                total_retired: acc.total_retired.saturating_add(project.credits_retired),
            })
    }
}

/// Share of issued credits that have been retired, as a whole percentage.
///
/// `round(retired / issued * 100)`, and `0` when nothing has been issued.
pub fn retirement_rate(issued: u64, retired: u64) -> u32 {
    if issued == 0 {
        return 0;
    }
    let rate = (retired as f64 / issued as f64 * 100.0).round();
    rate as u32
}

impl Project {
    pub fn retirement_rate(&self) -> u32 {
        retirement_rate(self.credits_issued, self.credits_retired)
    }
}
