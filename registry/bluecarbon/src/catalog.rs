//! # Catalog
//!
//! Compiled-in registry data. Every accessor returns a fresh owned copy, so
//! screens may filter and reorder freely without affecting one another.
//!
//! | Accessor               | Record             | Used by                    |
//! |------------------------|--------------------|----------------------------|
//! | [`projects`]           | [`Project`]        | satellite map, detail view |
//! | [`queue_projects`]     | [`QueueProject`]   | project review queue       |
//! | [`mrv_records`]        | [`MrvRecord`]      | MRV audit tab              |
//! | [`users`]              | [`RegistryUser`]   | user verification queue    |
//! | [`verifier_agencies`]  | [`VerifierAgency`] | marketplace registry       |
//! | [`order_book`]         | [`OrderBook`]      | marketplace order book     |
//! | [`credit_lifecycles`]  | [`CreditLifecycle`]| credit tracker             |
//!
//! Chart series live alongside as plain functions.

use crate::market::{
    AgencyStatus, CreditLifecycle, LifecycleStage, LifecycleStep, OrderBook, OrderLevel,
    VerifierAgency,
};
use crate::queue::{Ecosystem, EvidenceKind, EvidenceStatus, MrvRecord, QueueProject, QueueStatus};
use crate::series::{
    CreditPoint, EngagementPoint, FeedCategory, FeedItem, FeedStatus, Kpi, KpiBadge, PricePoint,
    Region, RegionShare, ReportType, SequestrationPoint, TransactionPoint, VolumePoint,
};
use crate::types::{Activity, LngLat, Project, ProjectStatus, VerificationStatus};
use crate::users::{AccountKind, AccountStatus, RegistryUser, Tier};

fn ring(points: &[(f64, f64)]) -> Vec<LngLat> {
    points.iter().map(|&(lng, lat)| LngLat::new(lng, lat)).collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ── Map projects ─────────────────────────────────────────────────────

/// Projects drawn on the satellite map.
pub fn projects() -> Vec<Project> {
    vec![
        Project {
            id: "BC-2024-0078".to_string(),
            name: "Sundarbans Delta Restoration".to_string(),
            status: ProjectStatus::Active,
            boundary: ring(&[
                (89.0207, 21.9497),
                (88.7909, 21.5794),
                (88.2721, 21.6961),
                (88.5413, 22.2536),
                (89.1769, 22.1283),
                (89.0207, 21.9497),
            ]),
            credits_issued: 12_500,
            credits_retired: 8_300,
            area_covered: 2_800.0,
            verification_status: VerificationStatus::Verified,
            description: "Large-scale mangrove restoration project in the Sundarbans delta \
                          region focusing on biodiversity conservation and carbon sequestration."
                .to_string(),
            images: strings(&["https://images.unsplash.com/photo-1643276714790-9e30f89a5a9f"]),
            recent_activity: vec![
                Activity::new("2024-09-25", "MRV data submitted for Q3", "verification"),
                Activity::new("2024-09-20", "1,200 credits issued", "credit"),
                Activity::new("2024-09-15", "Field monitoring completed", "monitoring"),
            ],
        },
        Project {
            id: "BC-2024-0092".to_string(),
            name: "Bhitarkanika Mangroves Project".to_string(),
            status: ProjectStatus::Active,
            boundary: ring(&[
                (86.9150, 20.7681),
                (86.8404, 20.6750),
                (86.9749, 20.5898),
                (87.0583, 20.7222),
                (86.9150, 20.7681),
            ]),
            credits_issued: 8_900,
            credits_retired: 5_600,
            area_covered: 1_950.0,
            verification_status: VerificationStatus::UnderReview,
            description: "Critical mangrove ecosystem restoration in Bhitarkanika National \
                          Park, Odisha."
                .to_string(),
            images: strings(&["https://images.unsplash.com/photo-1629215833375-edd0fb49a690"]),
            recent_activity: vec![
                Activity::new("2024-09-28", "Community workshop conducted", "engagement"),
                Activity::new("2024-09-22", "Verification review initiated", "verification"),
                Activity::new("2024-09-18", "800 credits issued", "credit"),
            ],
        },
        Project {
            id: "BC-2024-0065".to_string(),
            name: "Pichavaram Mangrove Forest Project".to_string(),
            status: ProjectStatus::Active,
            boundary: ring(&[
                (79.7758, 11.4939),
                (79.7616, 11.4111),
                (79.8093, 11.4332),
                (79.7995, 11.4912),
                (79.7758, 11.4939),
            ]),
            credits_issued: 15_200,
            credits_retired: 11_800,
            area_covered: 3_400.0,
            verification_status: VerificationStatus::Verified,
            description: "One of the largest mangrove forests in India, located in Tamil Nadu \
                          with comprehensive restoration efforts."
                .to_string(),
            images: strings(&["https://images.unsplash.com/photo-1753874150294-11c4a91349b3"]),
            recent_activity: vec![
                Activity::new("2024-09-26", "Coral restoration milestone reached", "project"),
                Activity::new("2024-09-21", "1,500 credits retired", "credit"),
                Activity::new("2024-09-16", "Annual audit completed", "verification"),
            ],
        },
    ]
}

// ── Review queue ─────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
fn queue_project(
    id: &str,
    name: &str,
    entity: &str,
    date_submitted: &str,
    status: QueueStatus,
    ecosystem: Ecosystem,
    location: &str,
    area_hectares: u64,
    expected_credits: u64,
) -> QueueProject {
    QueueProject {
        id: id.to_string(),
        name: name.to_string(),
        entity: entity.to_string(),
        date_submitted: date_submitted.to_string(),
        status,
        ecosystem,
        location: location.to_string(),
        area_hectares,
        expected_credits,
    }
}

/// Submissions awaiting registry review.
pub fn queue_projects() -> Vec<QueueProject> {
    vec![
        queue_project(
            "BC-2024-001",
            "Sundarbans Delta Restoration",
            "Coastal Communities Org",
            "2024-01-15",
            QueueStatus::PendingMrv,
            Ecosystem::Mangrove,
            "Bangladesh",
            2_450,
            12_500,
        ),
        queue_project(
            "BC-2024-002",
            "Mangrove Restoration KL",
            "Green Earth Foundation",
            "2024-01-12",
            QueueStatus::PendingValidation,
            Ecosystem::Mangrove,
            "Malaysia",
            1_800,
            9_200,
        ),
        queue_project(
            "BC-2024-003",
            "Seagrass Conservation Project",
            "Marine Life Institute",
            "2024-01-10",
            QueueStatus::Approved,
            Ecosystem::Seagrass,
            "Australia",
            3_200,
            15_800,
        ),
        queue_project(
            "BC-2024-004",
            "Salt Marsh Rehabilitation",
            "Coastal Restoration LLC",
            "2024-01-08",
            QueueStatus::PendingPdd,
            Ecosystem::SaltMarsh,
            "United States",
            950,
            4_800,
        ),
    ]
}

/// Field evidence shown in the MRV audit tab.
pub fn mrv_records() -> Vec<MrvRecord> {
    let record = |id: &str, date: &str, kind, description: &str, lat, lng, status| MrvRecord {
        id: id.to_string(),
        date: date.to_string(),
        kind,
        description: description.to_string(),
        lat,
        lng,
        status,
    };
    vec![
        record(
            "MRV-001",
            "2024-01-15",
            EvidenceKind::Photo,
            "Mangrove seedling progress - North section",
            22.1568,
            89.1339,
            EvidenceStatus::Verified,
        ),
        record(
            "MRV-002",
            "2024-01-14",
            EvidenceKind::Measurement,
            "Water salinity levels - monitoring station 3",
            22.1498,
            89.1405,
            EvidenceStatus::Pending,
        ),
        record(
            "MRV-003",
            "2024-01-13",
            EvidenceKind::Video,
            "Community engagement session",
            22.1634,
            89.1278,
            EvidenceStatus::Verified,
        ),
    ]
}

// ── Accounts ─────────────────────────────────────────────────────────

/// Accounts in the verification queue.
pub fn users() -> Vec<RegistryUser> {
    vec![
        RegistryUser {
            id: "USR-001".to_string(),
            name: "Coastal Communities Org".to_string(),
            email: "admin@coastalcommunities.org".to_string(),
            kind: AccountKind::Organization,
            current_tier: Tier::TWO,
            target_tier: Tier::THREE,
            date_registered: "2023-12-15".to_string(),
            status: AccountStatus::PendingVerification,
            submitted_documents: strings(&["Aadhaar", "80G Certificate", "Land Ownership"]),
            location: "Sundarbans, Bangladesh".to_string(),
        },
        RegistryUser {
            id: "USR-002".to_string(),
            name: "Green Earth Foundation".to_string(),
            email: "verify@greenearth.org".to_string(),
            kind: AccountKind::Ngo,
            current_tier: Tier::THREE,
            target_tier: Tier::THREE,
            date_registered: "2023-11-20".to_string(),
            status: AccountStatus::Verified,
            submitted_documents: strings(&[
                "Organization Certificate",
                "Tax Exemption",
                "Environmental License",
            ]),
            location: "Kuala Lumpur, Malaysia".to_string(),
        },
        RegistryUser {
            id: "USR-003".to_string(),
            name: "Dr. Rajesh Kumar".to_string(),
            email: "rajesh.kumar@marinelab.in".to_string(),
            kind: AccountKind::Individual,
            current_tier: Tier::ONE,
            target_tier: Tier::TWO,
            date_registered: "2024-01-05".to_string(),
            status: AccountStatus::DocumentReview,
            submitted_documents: strings(&["Aadhaar", "Academic Credentials"]),
            location: "Chennai, India".to_string(),
        },
        RegistryUser {
            id: "USR-004".to_string(),
            name: "Marine Life Institute".to_string(),
            email: "admin@marinelife.au".to_string(),
            kind: AccountKind::ResearchInstitution,
            current_tier: Tier::THREE,
            target_tier: Tier::THREE,
            date_registered: "2023-10-10".to_string(),
            status: AccountStatus::Verified,
            submitted_documents: strings(&[
                "Institution License",
                "Research Permit",
                "Environmental Compliance",
            ]),
            location: "Sydney, Australia".to_string(),
        },
    ]
}

/// Registry-wide tier headcounts: `(tier, accounts)`, plus accounts pending review.
pub fn tier_headcounts() -> (Vec<(Tier, u32)>, u32) {
    (vec![(Tier::THREE, 324), (Tier::TWO, 589), (Tier::ONE, 334)], 42)
}

// ── Marketplace ──────────────────────────────────────────────────────

pub fn verifier_agencies() -> Vec<VerifierAgency> {
    let agency = |id: &str, name: &str, certs: &[&str], wallet: &str, status, verified, date: &str| {
        VerifierAgency {
            id: id.to_string(),
            name: name.to_string(),
            certifications: strings(certs),
            wallet_address: wallet.to_string(),
            status,
            projects_verified: verified,
            date_registered: date.to_string(),
        }
    };
    vec![
        agency(
            "VER-001",
            "Environmental Solutions Ltd",
            &["ISO 14064", "VCS", "Gold Standard"],
            "0x1234...5678",
            AgencyStatus::Active,
            45,
            "2023-08-15",
        ),
        agency(
            "VER-002",
            "Carbon Trust International",
            &["ISO 14064", "CDM", "VCS"],
            "0x8765...4321",
            AgencyStatus::Active,
            72,
            "2023-06-20",
        ),
        agency(
            "VER-003",
            "Blue Carbon Auditing Co",
            &["VCS", "Blue Carbon Std"],
            "0x9876...1234",
            AgencyStatus::Pending,
            28,
            "2024-01-10",
        ),
    ]
}

pub fn order_book() -> OrderBook {
    let level = |price, volume, total| OrderLevel {
        price,
        volume,
        total,
    };
    OrderBook {
        asks: vec![
            level(15.50, 120, 120),
            level(15.25, 85, 205),
            level(15.00, 200, 405),
            level(14.75, 150, 555),
            level(14.50, 180, 735),
        ],
        bids: vec![
            level(14.25, 95, 95),
            level(14.00, 160, 255),
            level(13.75, 220, 475),
            level(13.50, 140, 615),
            level(13.25, 190, 805),
        ],
    }
}

pub fn credit_lifecycles() -> Vec<CreditLifecycle> {
    vec![CreditLifecycle {
        credit_id: "BC-2024-0156".to_string(),
        steps: vec![
            LifecycleStep {
                stage: LifecycleStage::Minted,
                date: "2024-01-15".to_string(),
                counterparty: None,
            },
            LifecycleStep {
                stage: LifecycleStage::Listed,
                date: "2024-01-16".to_string(),
                counterparty: None,
            },
            LifecycleStep {
                stage: LifecycleStage::Sold,
                date: "2024-01-20".to_string(),
                counterparty: Some("Corporate Buyer".to_string()),
            },
        ],
    }]
}

pub fn price_history() -> Vec<PricePoint> {
    [
        ("Jan 1", 12.5),
        ("Jan 8", 13.2),
        ("Jan 15", 12.8),
        ("Jan 22", 14.1),
        ("Jan 29", 13.9),
        ("Feb 5", 15.2),
    ]
    .into_iter()
    .map(|(date, price)| PricePoint {
        date: date.to_string(),
        price,
    })
    .collect()
}

pub fn volume_history() -> Vec<VolumePoint> {
    [
        ("Jan 1", 850),
        ("Jan 8", 1_200),
        ("Jan 15", 950),
        ("Jan 22", 1_800),
        ("Jan 29", 1_350),
        ("Feb 5", 2_100),
    ]
    .into_iter()
    .map(|(date, volume)| VolumePoint {
        date: date.to_string(),
        volume,
    })
    .collect()
}

/// Headline marketplace figures.
pub fn market_overview() -> Vec<Kpi> {
    let kpi = |title: &str, value: &str, trend: Option<&str>| Kpi {
        title: title.to_string(),
        value: value.to_string(),
        badges: Vec::new(),
        trend: trend.map(str::to_string),
    };
    vec![
        kpi("Average Credit Price", "$14.25", Some("+8.5%")),
        kpi("24h Trading Volume", "2,145", None),
        kpi("Credits Listed", "8,450", None),
        kpi("24h Market Cap", "$30.4K", None),
    ]
}

// ── Dashboard ────────────────────────────────────────────────────────

pub fn dashboard_kpis() -> Vec<Kpi> {
    let badge = |label: &str, tooltip: &str| KpiBadge {
        label: label.to_string(),
        tooltip: tooltip.to_string(),
    };
    vec![
        Kpi {
            title: "Total Projects".to_string(),
            value: "142".to_string(),
            badges: vec![
                badge("68 Active", "Total number of currently active projects"),
                badge("52 Pending", "Projects awaiting validation or approval"),
                badge("22 Completed", "Successfully completed projects"),
            ],
            trend: None,
        },
        Kpi {
            title: "Verified Users".to_string(),
            value: "1,247".to_string(),
            badges: vec![
                badge("324 Tier 3", "Highest tier verified organizations"),
                badge("589 Tier 2", "Mid-tier verified organizations"),
                badge("334 Tier 1", "Basic tier verified organizations"),
            ],
            trend: None,
        },
        Kpi {
            title: "Credits Issued".to_string(),
            value: "18,642".to_string(),
            badges: Vec::new(),
            trend: Some("+24%".to_string()),
        },
        Kpi {
            title: "Credits Retired".to_string(),
            value: "12,389".to_string(),
            badges: Vec::new(),
            trend: Some("+18%".to_string()),
        },
    ]
}

pub fn credit_history() -> Vec<CreditPoint> {
    [
        ("Jan", 1_200, 800),
        ("Feb", 1_900, 1_200),
        ("Mar", 2_100, 1_600),
        ("Apr", 2_800, 2_000),
        ("May", 3_200, 2_400),
        ("Jun", 3_800, 2_900),
    ]
    .into_iter()
    .map(|(month, issued, retired)| CreditPoint {
        month: month.to_string(),
        issued,
        retired,
    })
    .collect()
}

pub fn activity_feed() -> Vec<FeedItem> {
    let item = |time: &str, action: &str, category, status| FeedItem {
        time: time.to_string(),
        action: action.to_string(),
        category,
        status,
    };
    vec![
        item(
            "9:45 AM",
            "Project 'Sundarbans Delta' submitted for validation",
            FeedCategory::Project,
            FeedStatus::Pending,
        ),
        item(
            "9:32 AM",
            "New User 'Org ABC' completed Tier 2 verification",
            FeedCategory::User,
            FeedStatus::Completed,
        ),
        item(
            "9:15 AM",
            "Credit batch #BC-2024-0156 issued for 'Mangrove Restoration KL'",
            FeedCategory::Credit,
            FeedStatus::Completed,
        ),
        item(
            "8:58 AM",
            "Auditor 'Environmental Solutions Ltd' approved MRV data",
            FeedCategory::Validation,
            FeedStatus::Completed,
        ),
        item(
            "8:43 AM",
            "User 'Coastal Communities Org' requested Tier 3 verification",
            FeedCategory::User,
            FeedStatus::Pending,
        ),
    ]
}

// ── Reporting ────────────────────────────────────────────────────────

pub fn sequestration_history() -> Vec<SequestrationPoint> {
    [
        ("Jan", 1_200, 800, 400),
        ("Feb", 1_500, 950, 380),
        ("Mar", 1_800, 1_100, 450),
        ("Apr", 2_100, 1_250, 520),
        ("May", 2_400, 1_400, 580),
        ("Jun", 2_800, 1_600, 620),
    ]
    .into_iter()
    .map(|(month, mangrove, seagrass, saltmarsh)| SequestrationPoint {
        month: month.to_string(),
        mangrove,
        seagrass,
        saltmarsh,
    })
    .collect()
}

pub fn regional_distribution() -> Vec<RegionShare> {
    [
        (Region::Asia, 35, 48),
        (Region::Pacific, 28, 32),
        (Region::Americas, 22, 31),
        (Region::Africa, 10, 18),
        (Region::Europe, 5, 13),
    ]
    .into_iter()
    .map(|(region, share, projects)| RegionShare {
        region,
        share,
        projects,
    })
    .collect()
}

pub fn engagement_history() -> Vec<EngagementPoint> {
    [
        ("Jan", 25, 450, 12),
        ("Feb", 32, 580, 15),
        ("Mar", 38, 720, 18),
        ("Apr", 45, 890, 22),
        ("May", 52, 1_050, 28),
        ("Jun", 58, 1_200, 32),
    ]
    .into_iter()
    .map(|(month, communities, individuals, organizations)| EngagementPoint {
        month: month.to_string(),
        communities,
        individuals,
        organizations,
    })
    .collect()
}

pub fn transaction_history() -> Vec<TransactionPoint> {
    [
        ("Jan", 850, 12_150),
        ("Feb", 1_200, 17_400),
        ("Mar", 950, 13_680),
        ("Apr", 1_800, 25_920),
        ("May", 1_350, 19_440),
        ("Jun", 2_100, 30_240),
    ]
    .into_iter()
    .map(|(month, volume, value)| TransactionPoint {
        month: month.to_string(),
        volume,
        value,
    })
    .collect()
}

pub fn report_types() -> Vec<ReportType> {
    let report = |title: &str, description: &str, fields: &[&str]| ReportType {
        title: title.to_string(),
        description: description.to_string(),
        fields: strings(fields),
    };
    vec![
        report(
            "Environmental Impact Report",
            "Carbon sequestration by project and region",
            &["Date Range", "Project Type", "Region"],
        ),
        report(
            "Community Engagement Report",
            "Participation metrics and demographics",
            &["Date Range", "Community Type", "Engagement Level"],
        ),
        report(
            "Market Transaction Summary",
            "Trading volume and value analysis",
            &["Date Range", "Transaction Type", "Market Segment"],
        ),
        report(
            "Global Distribution Report",
            "Geographic project distribution and impact",
            &["Date Range", "Country/Region", "Ecosystem Type"],
        ),
    ]
}
