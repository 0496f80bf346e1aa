//! Status badges and their colour tones.
//!
//! | Value                      | Tone   |
//! |----------------------------|--------|
//! | Active / Verified          | green  |
//! | Pending / Under Review     | yellow |
//! | Completed / Approved       | blue   |

use bluecarbon_registry::queue::QueueStatus;
use bluecarbon_registry::users::AccountStatus;
use bluecarbon_registry::{ProjectStatus, VerificationStatus};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Green,
    Yellow,
    Blue,
    Orange,
    Purple,
    Red,
    Gray,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub label: String,
    pub tone: Tone,
}

impl Badge {
    pub fn new(label: impl Into<String>, tone: Tone) -> Self {
        Badge {
            label: label.into(),
            tone,
        }
    }
}

pub fn project_status(status: ProjectStatus) -> Badge {
    let tone = match status {
        ProjectStatus::Active => Tone::Green,
        ProjectStatus::Pending => Tone::Yellow,
        ProjectStatus::Completed => Tone::Blue,
    };
    Badge::new(status.as_str(), tone)
}

pub fn verification_status(status: VerificationStatus) -> Badge {
    let tone = match status {
        VerificationStatus::Verified => Tone::Green,
        VerificationStatus::UnderReview => Tone::Yellow,
        VerificationStatus::Approved => Tone::Blue,
    };
    Badge::new(status.as_str(), tone)
}

pub fn queue_status(status: QueueStatus) -> Badge {
    let tone = match status {
        QueueStatus::PendingPdd => Tone::Yellow,
        QueueStatus::PendingMrv => Tone::Orange,
        QueueStatus::PendingValidation => Tone::Blue,
        QueueStatus::Approved => Tone::Green,
    };
    Badge::new(status.label(), tone)
}

pub fn account_status(status: AccountStatus) -> Badge {
    let tone = match status {
        AccountStatus::Verified => Tone::Green,
        AccountStatus::PendingVerification => Tone::Yellow,
        AccountStatus::DocumentReview => Tone::Blue,
        AccountStatus::Rejected => Tone::Red,
    };
    Badge::new(status.label(), tone)
}
