//! Project review queue.

use bluecarbon_registry::catalog;
use bluecarbon_registry::filter::{Filter, Searchable};
use bluecarbon_registry::format::thousands;
use bluecarbon_registry::queue::{MrvRecord, QueueProject, QueueStatus};
use serde::Serialize;

use crate::badge::{self, Badge, Tone};
use crate::errors::{ConsoleError, Result};
use crate::screens::{StatCard, TimelineEntry};

const DOCUMENTS: [&str; 3] = [
    "Project Design Document",
    "Environmental Impact Assessment",
    "Community Consent Forms",
];

const ACTIONS: [&str; 3] = [
    "Approve Project",
    "Request More Information",
    "Reject Project",
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueTab {
    #[default]
    Summary,
    Mrv,
    Audit,
}

impl QueueTab {
    pub const ALL: [QueueTab; 3] = [Self::Summary, Self::Mrv, Self::Audit];

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "summary" => Some(Self::Summary),
            "mrv" => Some(Self::Mrv),
            "audit" => Some(Self::Audit),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Summary => "Summary & Documents",
            Self::Mrv => "MRV Data Audit",
            Self::Audit => "Audit Trail",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QueueRow {
    pub id: String,
    pub name: String,
    pub entity: String,
    pub date_submitted: String,
    pub status: Badge,
    pub ecosystem: &'static str,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "tab", rename_all = "lowercase")]
pub enum QueueDetailContent {
    Summary {
        location: String,
        area: String,
        expected_credits: String,
        ecosystem: &'static str,
        documents: Vec<&'static str>,
    },
    Mrv {
        records: Vec<MrvRecord>,
    },
    Audit {
        trail: Vec<TimelineEntry>,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QueueDetail {
    pub id: String,
    pub name: String,
    pub entity: String,
    pub status: Badge,
    pub tabs: Vec<&'static str>,
    pub active_tab: QueueTab,
    pub content: QueueDetailContent,
    pub actions: Vec<&'static str>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProjectQueueView {
    pub query: String,
    pub status_filter: String,
    pub stats: Vec<StatCard>,
    pub rows: Vec<QueueRow>,
    pub detail: Option<QueueDetail>,
}

pub struct ProjectQueue {
    records: Vec<QueueProject>,
    mrv: Vec<MrvRecord>,
    query: String,
    status: Filter<QueueStatus>,
    open: Option<String>,
    tab: QueueTab,
}

impl Default for ProjectQueue {
    fn default() -> Self {
        Self::new(catalog::queue_projects(), catalog::mrv_records())
    }
}

impl ProjectQueue {
    pub fn new(records: Vec<QueueProject>, mrv: Vec<MrvRecord>) -> Self {
        ProjectQueue {
            records,
            mrv,
            query: String::new(),
            status: Filter::All,
            open: None,
            tab: QueueTab::default(),
        }
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    /// `all` or a queue status identifier such as `pending-mrv`.
    pub fn set_status_filter(&mut self, raw: &str) -> Result<()> {
        self.status = raw.trim().parse()?;
        Ok(())
    }

    /// Records passing both the text search and the status filter, in queue order.
    pub fn visible(&self) -> Vec<&QueueProject> {
        self.records
            .iter()
            .filter(|record| record.matches(&self.query) && self.status.admits(&record.status))
            .collect()
    }

    pub fn open_detail(&mut self, id: &str) -> Result<()> {
        if !self.records.iter().any(|record| record.id == id) {
            return Err(ConsoleError::NotFound(id.to_string()));
        }
        self.open = Some(id.to_string());
        self.tab = QueueTab::default();
        Ok(())
    }

    pub fn close_detail(&mut self) {
        self.open = None;
    }

    pub fn set_tab(&mut self, id: &str) -> Result<()> {
        self.tab = QueueTab::from_id(id)
            .ok_or_else(|| ConsoleError::Command(format!("Unknown tab: {id}")))?;
        Ok(())
    }

    fn stats(&self) -> Vec<StatCard> {
        let pending = self
            .records
            .iter()
            .filter(|record| record.status != QueueStatus::Approved)
            .count();
        let expected: u64 = self.records.iter().map(|r| r.expected_credits).sum();
        vec![
            StatCard {
                title: "Total Submissions".to_string(),
                value: self.records.len().to_string(),
            },
            StatCard {
                title: "Awaiting Review".to_string(),
                value: pending.to_string(),
            },
            StatCard {
                title: "Expected Credits".to_string(),
                value: thousands(expected),
            },
        ]
    }

    fn detail(&self, record: &QueueProject) -> QueueDetail {
        let content = match self.tab {
            QueueTab::Summary => QueueDetailContent::Summary {
                location: record.location.clone(),
                area: format!("{} hectares", thousands(record.area_hectares)),
                expected_credits: thousands(record.expected_credits),
                ecosystem: record.ecosystem.label(),
                documents: DOCUMENTS.to_vec(),
            },
            QueueTab::Mrv => QueueDetailContent::Mrv {
                records: self.mrv.clone(),
            },
            QueueTab::Audit => QueueDetailContent::Audit {
                trail: audit_trail(record),
            },
        };
        QueueDetail {
            id: record.id.clone(),
            name: record.name.clone(),
            entity: record.entity.clone(),
            status: badge::queue_status(record.status),
            tabs: QueueTab::ALL.iter().map(QueueTab::label).collect(),
            active_tab: self.tab,
            content,
            actions: ACTIONS.to_vec(),
        }
    }

    pub fn view(&self) -> ProjectQueueView {
        let rows = self
            .visible()
            .into_iter()
            .map(|record| QueueRow {
                id: record.id.clone(),
                name: record.name.clone(),
                entity: record.entity.clone(),
                date_submitted: record.date_submitted.clone(),
                status: badge::queue_status(record.status),
                ecosystem: record.ecosystem.label(),
            })
            .collect();
        let detail = self
            .open
            .as_deref()
            .and_then(|id| self.records.iter().find(|record| record.id == id))
            .map(|record| self.detail(record));

        ProjectQueueView {
            query: self.query.clone(),
            status_filter: self.status.to_string(),
            stats: self.stats(),
            rows,
            detail,
        }
    }
}

/// Review steps reached so far, oldest first, ending with the current step.
fn audit_trail(record: &QueueProject) -> Vec<TimelineEntry> {
    let mut trail = vec![TimelineEntry::new(
        "Project submitted for review",
        format!("By: {} • {}", record.entity, record.date_submitted),
        Tone::Green,
    )];
    let current = match record.status {
        QueueStatus::PendingPdd => "Awaiting PDD review",
        QueueStatus::PendingMrv => {
            trail.push(TimelineEntry::new("PDD reviewed", "By: Admin User", Tone::Blue));
            "Awaiting MRV data submission"
        }
        QueueStatus::PendingValidation => {
            trail.push(TimelineEntry::new("PDD reviewed", "By: Admin User", Tone::Blue));
            trail.push(TimelineEntry::new("MRV data received", "By: Admin User", Tone::Blue));
            "Awaiting third-party validation"
        }
        QueueStatus::Approved => {
            trail.push(TimelineEntry::new("PDD reviewed", "By: Admin User", Tone::Blue));
            trail.push(TimelineEntry::new("MRV data received", "By: Admin User", Tone::Blue));
            trail.push(TimelineEntry::new("Project approved", "By: Admin User", Tone::Green));
            return trail;
        }
    };
    trail.push(TimelineEntry::new(
        current,
        "Status: Pending • Current step in workflow",
        Tone::Yellow,
    ));
    trail
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mangrove_search_covers_name_and_entity() {
        let mut queue = ProjectQueue::default();
        queue.set_query("mangrove");
        let ids: Vec<_> = queue.visible().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["BC-2024-002"]);
    }

    #[test]
    fn test_search_is_case_insensitive_and_combines_with_filter() {
        let mut queue = ProjectQueue::default();
        queue.set_query("SEAGRASS");
        assert!(!queue.visible().is_empty());

        queue.set_query("");
        queue.set_status_filter("approved").unwrap();
        assert!(queue
            .visible()
            .iter()
            .all(|r| r.status == QueueStatus::Approved));

        queue.set_status_filter("all").unwrap();
        assert_eq!(queue.visible().len(), catalog::queue_projects().len());
    }

    #[test]
    fn test_unknown_filter_is_rejected() {
        let mut queue = ProjectQueue::default();
        assert!(queue.set_status_filter("archived").is_err());
    }

    #[test]
    fn test_detail_tabs_and_actions() {
        let mut queue = ProjectQueue::default();
        assert!(queue.open_detail("BC-0000").is_err());

        let id = catalog::queue_projects()[0].id.clone();
        queue.open_detail(&id).unwrap();
        queue.set_tab("mrv").unwrap();
        let detail = queue.view().detail.unwrap();
        assert_eq!(detail.active_tab, QueueTab::Mrv);
        assert_eq!(
            detail.tabs,
            vec!["Summary & Documents", "MRV Data Audit", "Audit Trail"]
        );
        assert_eq!(detail.actions[0], "Approve Project");

        queue.close_detail();
        assert!(queue.view().detail.is_none());
    }

    #[test]
    fn test_audit_trail_ends_at_current_step() {
        for record in catalog::queue_projects() {
            let trail = audit_trail(&record);
            assert_eq!(trail[0].title, "Project submitted for review");
            let last = trail.last().unwrap();
            if record.status == QueueStatus::Approved {
                assert_eq!(last.tone, Tone::Green);
            } else {
                assert_eq!(last.tone, Tone::Yellow);
            }
        }
    }
}
