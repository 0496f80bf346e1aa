//! User and organization verification queue.

use bluecarbon_registry::catalog;
use bluecarbon_registry::filter::{Filter, Searchable};
use bluecarbon_registry::format::thousands;
use bluecarbon_registry::users::{AccountStatus, RegistryUser, Tier};
use serde::Serialize;

use crate::badge::{self, Badge, Tone};
use crate::errors::{ConsoleError, Result};
use crate::screens::{StatCard, TimelineEntry};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileTab {
    #[default]
    Profile,
    Documents,
    History,
}

impl ProfileTab {
    pub const ALL: [ProfileTab; 3] = [Self::Profile, Self::Documents, Self::History];

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "profile" => Some(Self::Profile),
            "documents" => Some(Self::Documents),
            "history" => Some(Self::History),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Profile => "Profile Information",
            Self::Documents => "Documents",
            Self::History => "Verification History",
        }
    }
}

/// Badge variant for a tier: the highest tier stands out most.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TierVariant {
    Default,
    Secondary,
    Outline,
}

pub fn tier_variant(tier: Tier) -> TierVariant {
    match tier.level() {
        3 => TierVariant::Default,
        2 => TierVariant::Secondary,
        _ => TierVariant::Outline,
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub initials: String,
    pub kind: &'static str,
    pub current_tier: u8,
    pub target_tier: u8,
    pub tier_variant: TierVariant,
    pub status: Badge,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "tab", rename_all = "lowercase")]
pub enum ProfileContent {
    Profile {
        email: String,
        kind: &'static str,
        location: String,
        date_registered: String,
        tier_upgrade: Option<String>,
    },
    Documents {
        documents: Vec<String>,
    },
    History {
        entries: Vec<TimelineEntry>,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProfileView {
    pub id: String,
    pub name: String,
    pub initials: String,
    pub status: Badge,
    pub tabs: Vec<&'static str>,
    pub active_tab: ProfileTab,
    pub content: ProfileContent,
    /// Empty unless the account is pending verification.
    pub actions: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UserQueueView {
    pub query: String,
    pub tier_filter: String,
    pub stats: Vec<StatCard>,
    pub rows: Vec<UserRow>,
    pub profile: Option<ProfileView>,
}

pub struct UserQueue {
    users: Vec<RegistryUser>,
    headcounts: Vec<(Tier, u32)>,
    pending_reviews: u32,
    query: String,
    tier: Filter<Tier>,
    open: Option<String>,
    tab: ProfileTab,
}

impl Default for UserQueue {
    fn default() -> Self {
        let (headcounts, pending_reviews) = catalog::tier_headcounts();
        let mut queue = Self::new(catalog::users());
        queue.headcounts = headcounts;
        queue.pending_reviews = pending_reviews;
        queue
    }
}

impl UserQueue {
    pub fn new(users: Vec<RegistryUser>) -> Self {
        UserQueue {
            users,
            headcounts: Vec::new(),
            pending_reviews: 0,
            query: String::new(),
            tier: Filter::All,
            open: None,
            tab: ProfileTab::default(),
        }
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    /// `all`, `1`, `2` or `3`. Matches the account's current tier.
    pub fn set_tier_filter(&mut self, raw: &str) -> Result<()> {
        self.tier = raw.trim().parse()?;
        Ok(())
    }

    pub fn visible(&self) -> Vec<&RegistryUser> {
        self.users
            .iter()
            .filter(|user| user.matches(&self.query) && self.tier.admits(&user.current_tier))
            .collect()
    }

    pub fn open_profile(&mut self, id: &str) -> Result<()> {
        if !self.users.iter().any(|user| user.id == id) {
            return Err(ConsoleError::NotFound(id.to_string()));
        }
        self.open = Some(id.to_string());
        self.tab = ProfileTab::default();
        Ok(())
    }

    pub fn close_profile(&mut self) {
        self.open = None;
    }

    pub fn set_tab(&mut self, id: &str) -> Result<()> {
        self.tab = ProfileTab::from_id(id)
            .ok_or_else(|| ConsoleError::Command(format!("Unknown tab: {id}")))?;
        Ok(())
    }

    fn stats(&self) -> Vec<StatCard> {
        let mut stats: Vec<StatCard> = self
            .headcounts
            .iter()
            .map(|(tier, count)| StatCard {
                title: format!("{tier} Verified"),
                value: thousands(u64::from(*count)),
            })
            .collect();
        stats.push(StatCard {
            title: "Pending Review".to_string(),
            value: self.pending_reviews.to_string(),
        });
        stats
    }

    fn profile(&self, user: &RegistryUser) -> ProfileView {
        let content = match self.tab {
            ProfileTab::Profile => ProfileContent::Profile {
                email: user.email.clone(),
                kind: user.kind.as_str(),
                location: user.location.clone(),
                date_registered: user.date_registered.clone(),
                tier_upgrade: user
                    .awaiting_upgrade()
                    .then(|| format!("{} → {}", user.current_tier, user.target_tier)),
            },
            ProfileTab::Documents => ProfileContent::Documents {
                documents: user.submitted_documents.clone(),
            },
            ProfileTab::History => ProfileContent::History {
                entries: verification_history(user),
            },
        };
        let actions = if user.status == AccountStatus::PendingVerification {
            vec![
                format!("Approve {}", user.target_tier),
                "Request Additional Documents".to_string(),
                "Reject Application".to_string(),
            ]
        } else {
            Vec::new()
        };
        ProfileView {
            id: user.id.clone(),
            name: user.name.clone(),
            initials: user.initials(),
            status: badge::account_status(user.status),
            tabs: ProfileTab::ALL.iter().map(ProfileTab::label).collect(),
            active_tab: self.tab,
            content,
            actions,
        }
    }

    pub fn view(&self) -> UserQueueView {
        let rows = self
            .visible()
            .into_iter()
            .map(|user| UserRow {
                id: user.id.clone(),
                name: user.name.clone(),
                email: user.email.clone(),
                initials: user.initials(),
                kind: user.kind.as_str(),
                current_tier: user.current_tier.level(),
                target_tier: user.target_tier.level(),
                tier_variant: tier_variant(user.current_tier),
                status: badge::account_status(user.status),
            })
            .collect();
        let profile = self
            .open
            .as_deref()
            .and_then(|id| self.users.iter().find(|user| user.id == id))
            .map(|user| self.profile(user));
        let tier_filter = match self.tier {
            Filter::All => "all".to_string(),
            Filter::Only(tier) => tier.level().to_string(),
        };

        UserQueueView {
            query: self.query.clone(),
            tier_filter,
            stats: self.stats(),
            rows,
            profile,
        }
    }
}

/// Newest first, ending with registration.
fn verification_history(user: &RegistryUser) -> Vec<TimelineEntry> {
    let mut entries = Vec::new();
    if user.awaiting_upgrade() {
        entries.push(TimelineEntry::new(
            format!("Documents submitted for {}", user.target_tier),
            format!("Status: {}", user.status.label()),
            Tone::Blue,
        ));
    }
    entries.push(TimelineEntry::new(
        format!("{} verification completed", user.current_tier),
        "Verified by: Admin User",
        Tone::Green,
    ));
    entries.push(TimelineEntry::new(
        "Account registered",
        format!("Registration date: {}", user.date_registered),
        Tone::Gray,
    ));
    entries
}
