use std::collections::HashSet;

use crate::catalog;
use crate::invariants::check_project;
use crate::types::{ActivityKind, ProjectStatus};
use crate::users::Tier;

#[test]
fn test_project_ids_are_unique() {
    let projects = catalog::projects();
    let ids: HashSet<_> = projects.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids.len(), projects.len());
}

#[test]
fn test_queue_ids_are_unique() {
    let queue = catalog::queue_projects();
    let ids: HashSet<_> = queue.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids.len(), queue.len());
}

#[test]
fn test_every_project_passes_invariants() {
    for project in catalog::projects() {
        check_project(&project).unwrap();
        assert_eq!(project.status, ProjectStatus::Active);
        assert!(!project.images.is_empty());
    }
}

#[test]
fn test_activity_is_authored_newest_first() {
    for project in catalog::projects() {
        let dates: Vec<_> = project
            .recent_activity
            .iter()
            .map(|a| a.calendar_date().unwrap())
            .collect();
        assert!(
            dates.windows(2).all(|w| w[0] >= w[1]),
            "{} activity is not reverse-chronological",
            project.id
        );
    }
}

#[test]
fn test_activity_tags_are_all_known() {
    for project in catalog::projects() {
        for activity in &project.recent_activity {
            assert!(
                !matches!(activity.kind, ActivityKind::Other(_)),
                "unexpected tag {:?}",
                activity.kind
            );
        }
    }
}

#[test]
fn test_target_tier_never_below_current() {
    for user in catalog::users() {
        assert!(user.target_tier >= user.current_tier, "{}", user.id);
        assert!(user.current_tier >= Tier::ONE);
    }
}

#[test]
fn test_order_book_totals_are_cumulative() {
    let book = catalog::order_book();
    for side in [&book.asks, &book.bids] {
        let mut running = 0;
        for level in side.iter() {
            running += level.volume;
            assert_eq!(level.total, running);
        }
    }
}

#[test]
fn test_region_shares_sum_to_one_hundred() {
    let total: u32 = catalog::regional_distribution()
        .iter()
        .map(|r| r.share)
        .sum();
    assert_eq!(total, 100);
}

#[test]
fn test_project_serializes_with_readable_enums() {
    let project = catalog::projects().remove(1);
    let json = serde_json::to_value(&project).unwrap();
    assert_eq!(json["verification_status"], "Under Review");
    assert_eq!(json["status"], "Active");
    assert_eq!(json["recent_activity"][0]["kind"], "engagement");
    assert_eq!(json["boundary"][0]["lng"], 86.9150);
}
