//! Capability interface over the mapping substrate.
//!
//! The map overlay never talks to a renderer directly. It drives a
//! [`MapSurface`] obtained from a [`SurfaceFactory`], which lets the overlay
//! run against the headless substrate in production and a recording fake in
//! tests.
//!
//! ## Contract
//!
//! * Creation may fail (missing credential, resource failure). Callers must
//!   treat that as "map unavailable", never as fatal.
//! * A created surface is not usable for layers until its `loaded` one-shot
//!   fires.
//! * [`MapSurface::set_style`] drops every source and layer. The substrate
//!   reports [`SurfaceEvent::StyleLoaded`](crate::events::SurfaceEvent) once
//!   the new style is in place, tagged with the generation it was created
//!   with.

use std::fmt;

use bluecarbon_registry::{LngLat, ProjectStatus};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::oneshot;

use crate::events::MapEventKind;

// ─────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("no access credential configured for the map substrate")]
    MissingCredential,

    #[error("map substrate unavailable: {0}")]
    Unavailable(String),

    #[error("source {0} already exists")]
    DuplicateSource(String),

    #[error("layer {0} already exists")]
    DuplicateLayer(String),

    #[error("unknown source {0}")]
    UnknownSource(String),

    #[error("unknown layer {0}")]
    UnknownLayer(String),

    #[error("surface has been destroyed")]
    Destroyed,
}

// ─────────────────────────────────────────────────────────
// Value types
// ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ContainerSize {
    pub width: u32,
    pub height: u32,
}

/// The host element the surface draws into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Container {
    pub id: String,
    pub size: ContainerSize,
}

/// The two base renderings the map can switch between.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BaseStyle {
    /// Imagery with street and place labels.
    #[default]
    SatelliteStreets,
    /// Imagery only.
    Satellite,
}

impl BaseStyle {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SatelliteStreets => "satellite-streets-v12",
            Self::Satellite => "satellite-v9",
        }
    }

    pub fn url(&self) -> String {
        format!("mapbox://styles/mapbox/{}", self.name())
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "satellite-streets-v12" => Some(Self::SatelliteStreets),
            "satellite-v9" => Some(Self::Satellite),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::SatelliteStreets => Self::Satellite,
            Self::Satellite => Self::SatelliteStreets,
        }
    }
}

/// Camera position.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Camera {
    pub center: LngLat,
    pub zoom: f64,
}

impl Camera {
    /// Centered on India.
    pub const DEFAULT: Camera = Camera {
        center: LngLat::new(78.9629, 20.5937),
        zoom: 5.0,
    };
    pub const MIN_ZOOM: f64 = 0.0;
    pub const MAX_ZOOM: f64 = 22.0;

    pub fn zoomed_by(self, delta: f64) -> Self {
        Camera {
            zoom: (self.zoom + delta).clamp(Self::MIN_ZOOM, Self::MAX_ZOOM),
            ..self
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SourceId(String);

impl SourceId {
    pub fn project(project_id: &str) -> Self {
        SourceId(format!("project-{project_id}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct LayerId(String);

impl LayerId {
    pub fn fill(project_id: &str) -> Self {
        LayerId(format!("project-fill-{project_id}"))
    }

    pub fn border(project_id: &str) -> Self {
        LayerId(format!("project-border-{project_id}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ListenerId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PopupHandle(pub u64);

/// Properties attached to a project polygon feature.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FeatureProperties {
    pub id: String,
    pub name: String,
    pub status: ProjectStatus,
    pub credits_issued: u64,
    pub area_covered: f64,
}

/// A single-ring polygon feature.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PolygonFeature {
    pub properties: FeatureProperties,
    pub ring: Vec<LngLat>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Fill,
    Line,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "property", content = "value", rename_all = "kebab-case")]
pub enum PaintProperty {
    FillColor(String),
    FillOpacity(f64),
    LineColor(String),
    LineWidth(f64),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LayerSpec {
    pub id: LayerId,
    pub kind: LayerKind,
    pub source: SourceId,
    pub paint: Vec<PaintProperty>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Control {
    Navigation,
    Scale,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Tooltip shown while a project polygon is hovered.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PopupContent {
    pub project_id: String,
    pub name: String,
    pub status: ProjectStatus,
    /// Grouped, e.g. `12,500`.
    pub credits_issued: String,
    /// e.g. `2,800 hectares`.
    pub area: String,
    pub hint: &'static str,
}

/// Parameters for creating a surface.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceOptions {
    pub style: BaseStyle,
    pub camera: Camera,
    /// Render the globe projection rather than a flat map.
    pub globe: bool,
    /// Echoed back in events the surface reports asynchronously.
    pub generation: u64,
}

// ─────────────────────────────────────────────────────────
// Capabilities
// ─────────────────────────────────────────────────────────

/// A live drawing surface.
pub trait MapSurface {
    fn add_source(&mut self, id: &SourceId, feature: PolygonFeature) -> Result<(), SurfaceError>;
    fn remove_source(&mut self, id: &SourceId) -> Result<(), SurfaceError>;

    fn add_layer(&mut self, layer: LayerSpec) -> Result<(), SurfaceError>;
    fn remove_layer(&mut self, id: &LayerId) -> Result<(), SurfaceError>;

    /// Subscribe to pointer events delivered for `layer`.
    fn on(&mut self, kind: MapEventKind, layer: &LayerId) -> ListenerId;
    fn off(&mut self, listener: ListenerId);

    fn set_paint_property(
        &mut self,
        layer: &LayerId,
        paint: PaintProperty,
    ) -> Result<(), SurfaceError>;
    fn set_cursor(&mut self, cursor: Cursor);

    fn show_popup(&mut self, at: LngLat, content: PopupContent) -> PopupHandle;
    fn remove_popup(&mut self, popup: PopupHandle);

    fn add_control(&mut self, control: Control, corner: Corner);

    /// Re-fit the drawing buffer to the container.
    fn resize(&mut self, size: ContainerSize);
    /// Short animated transition, used for zoom steps.
    fn ease_to(&mut self, camera: Camera);
    /// Long animated transition, used for resets.
    fn fly_to(&mut self, camera: Camera);

    /// Swap the base style. Drops every source and layer.
    fn set_style(&mut self, style: BaseStyle);

    /// Release the surface and everything attached to it.
    fn destroy(&mut self);
}

/// A surface whose base layer is still loading.
pub struct PendingSurface {
    pub surface: Box<dyn MapSurface>,
    /// Fires once when the base style has loaded. Dropped without firing if
    /// loading fails.
    pub loaded: oneshot::Receiver<()>,
}

/// Creates drawing surfaces.
pub trait SurfaceFactory {
    fn create(
        &mut self,
        container: &Container,
        options: SurfaceOptions,
    ) -> Result<PendingSurface, SurfaceError>;
}
