//! Structural checks applied to catalog records before they are drawn.
//!
//! Each check returns the first violation it finds. Callers decide whether a
//! violation skips one record or rejects the whole batch; the map overlay
//! skips the record and keeps going.

use crate::errors::{RegistryError, Result};
use crate::types::{LngLat, Project};

/// Minimum positions in a closed linear ring (triangle plus closing point).
pub const MIN_RING_POSITIONS: usize = 4;

/// Boundary is a closed ring of at least four in-range positions, three of
/// them distinct.
pub fn check_boundary(id: &str, boundary: &[LngLat]) -> Result<()> {
    if boundary.len() < MIN_RING_POSITIONS {
        return Err(RegistryError::TooFewPositions {
            id: id.to_string(),
            count: boundary.len(),
        });
    }

    for (index, position) in boundary.iter().enumerate() {
        let in_range = position.lng.is_finite()
            && position.lat.is_finite()
            && (-180.0..=180.0).contains(&position.lng)
            && (-90.0..=90.0).contains(&position.lat);
        if !in_range {
            return Err(RegistryError::PositionOutOfRange {
                id: id.to_string(),
                index,
                lng: position.lng,
                lat: position.lat,
            });
        }
    }

    // Length was checked above, so both ends exist.
    if boundary.first() != boundary.last() {
        return Err(RegistryError::OpenRing { id: id.to_string() });
    }

    // The closing position repeats the first one.
    let mut distinct: Vec<&LngLat> = Vec::with_capacity(MIN_RING_POSITIONS);
    for position in &boundary[..boundary.len() - 1] {
        if !distinct.contains(&position) {
            distinct.push(position);
        }
    }
    if distinct.len() < MIN_RING_POSITIONS - 1 {
        return Err(RegistryError::DegenerateRing { id: id.to_string() });
    }

    Ok(())
}

/// Retired credits never exceed issued credits.
pub fn check_credits(project: &Project) -> Result<()> {
    if project.credits_retired > project.credits_issued {
        return Err(RegistryError::RetiredExceedsIssued {
            id: project.id.clone(),
            issued: project.credits_issued,
            retired: project.credits_retired,
        });
    }
    Ok(())
}

/// Covered area is a finite, non-negative number of hectares.
pub fn check_area(project: &Project) -> Result<()> {
    if !project.area_covered.is_finite() || project.area_covered < 0.0 {
        return Err(RegistryError::InvalidArea {
            id: project.id.clone(),
            area: project.area_covered,
        });
    }
    Ok(())
}

/// Run every project check.
pub fn check_project(project: &Project) -> Result<()> {
    check_boundary(&project.id, &project.boundary)?;
    check_credits(project)?;
    check_area(project)
}
