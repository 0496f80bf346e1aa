//! Satellite map overlay: draws every catalog project as a polygon, tracks
//! hover and click interaction, and reports selections to the host screen.
//!
//! ## Lifecycle
//!
//! ```text
//! Unmounted ──initialize──► Loading ──ready──► Ready
//!     ▲            │                              │
//!     │            └──create failed──► Unavailable│
//!     └──────────────────teardown─────────────────┘
//! ```
//!
//! Every project that made it onto the surface owns exactly one
//! [`LayerRegistration`]. Registrations are keyed by project id, so
//! rebuilding is clear-then-register and can never duplicate layers or
//! listeners.
//!
//! The overlay never presents project details. A click sends the full
//! [`Project`] down the selection channel and the host decides what to show.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicU64, Ordering};

use bluecarbon_registry::format::{hectares, thousands};
use bluecarbon_registry::invariants::check_boundary;
use bluecarbon_registry::{CatalogSummary, LngLat, Project};
use serde::Serialize;
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::events::{HostEventKind, HostWindow, MapEventKind, SurfaceEvent};
use crate::surface::{
    BaseStyle, Camera, Container, ContainerSize, Control, Corner, Cursor, FeatureProperties,
    LayerId, LayerKind, LayerSpec, ListenerId, MapSurface, PaintProperty, PolygonFeature,
    PopupContent, PopupHandle, SourceId, SurfaceError, SurfaceFactory, SurfaceOptions,
};

const FILL_COLOR: &str = "#3B82F6";
const LINE_COLOR: &str = "#2563EB";
const FILL_OPACITY_REST: f64 = 0.4;
const FILL_OPACITY_HOVER: f64 = 0.65;
const LINE_WIDTH_REST: f64 = 1.5;
const LINE_WIDTH_HOVER: f64 = 2.0;

const POPUP_HINT: &str = "Click for detailed information";

/// Surface generations, unique across overlay instances.
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// Where selected projects are delivered.
pub type SelectionSender = mpsc::UnboundedSender<Project>;

// ─────────────────────────────────────────────────────────
// View shapes
// ─────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SurfaceState {
    Unmounted,
    Loading,
    Ready,
    Unavailable { reason: String },
}

/// Panel shown in place of the map until it is ready.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Placeholder {
    pub title: &'static str,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: &'static str,
    pub opacity: f64,
}

/// The fixed map legend.
pub fn legend() -> Vec<LegendEntry> {
    vec![
        LegendEntry {
            label: "Project Areas",
            color: FILL_COLOR,
            opacity: FILL_OPACITY_REST,
        },
        LegendEntry {
            label: "Coastal Ecosystems",
            color: "#16A34A",
            opacity: 1.0,
        },
        LegendEntry {
            label: "Desert Regions",
            color: "#CA8A04",
            opacity: 1.0,
        },
        LegendEntry {
            label: "Mountain Ranges",
            color: "#4B5563",
            opacity: 1.0,
        },
    ]
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OverlayView {
    pub surface: SurfaceState,
    pub placeholder: Option<Placeholder>,
    pub style: &'static str,
    pub camera: Camera,
    pub hovered: Option<String>,
    pub popup: Option<PopupContent>,
    pub registered: Vec<String>,
    pub skipped: Vec<String>,
    pub summary: CatalogSummary,
    pub legend: Vec<LegendEntry>,
}

/// Wait handle for the substrate's one-shot ready notification.
///
/// Whoever awaits `loaded` must hand `generation` back to
/// [`MapOverlay::handle_ready`], and should stop waiting once `cancel` fires.
#[derive(Debug)]
pub struct ReadySignal {
    pub generation: u64,
    pub loaded: oneshot::Receiver<()>,
    pub cancel: CancellationToken,
}

// ─────────────────────────────────────────────────────────
// Per-project registrations
// ─────────────────────────────────────────────────────────

/// Everything one project owns on the surface.
#[derive(Debug)]
struct LayerRegistration {
    source: SourceId,
    fill: LayerId,
    border: LayerId,
    listeners: Vec<(MapEventKind, ListenerId)>,
}

impl LayerRegistration {
    /// Add the project's source, fill and border layers, and pointer listeners.
    /// Partially added resources are removed again on failure.
    fn register(surface: &mut dyn MapSurface, project: &Project) -> Result<Self, SurfaceError> {
        let source = SourceId::project(&project.id);
        let fill = LayerId::fill(&project.id);
        let border = LayerId::border(&project.id);

        let feature = PolygonFeature {
            properties: FeatureProperties {
                id: project.id.clone(),
                name: project.name.clone(),
                status: project.status,
                credits_issued: project.credits_issued,
                area_covered: project.area_covered,
            },
            ring: project.boundary.clone(),
        };
        surface.add_source(&source, feature)?;

        let fill_spec = LayerSpec {
            id: fill.clone(),
            kind: LayerKind::Fill,
            source: source.clone(),
            paint: vec![
                PaintProperty::FillColor(FILL_COLOR.to_string()),
                PaintProperty::FillOpacity(FILL_OPACITY_REST),
            ],
        };
        if let Err(e) = surface.add_layer(fill_spec) {
            let _ = surface.remove_source(&source);
            return Err(e);
        }

        let border_spec = LayerSpec {
            id: border.clone(),
            kind: LayerKind::Line,
            source: source.clone(),
            paint: vec![
                PaintProperty::LineColor(LINE_COLOR.to_string()),
                PaintProperty::LineWidth(LINE_WIDTH_REST),
            ],
        };
        if let Err(e) = surface.add_layer(border_spec) {
            let _ = surface.remove_layer(&fill);
            let _ = surface.remove_source(&source);
            return Err(e);
        }

        let listeners = MapEventKind::ALL
            .into_iter()
            .map(|kind| (kind, surface.on(kind, &fill)))
            .collect();

        Ok(LayerRegistration {
            source,
            fill,
            border,
            listeners,
        })
    }

    fn listens(&self, kind: MapEventKind) -> bool {
        self.listeners.iter().any(|(k, _)| *k == kind)
    }

    fn set_emphasis(&self, surface: &mut dyn MapSurface, emphasized: bool) {
        let (opacity, width) = if emphasized {
            (FILL_OPACITY_HOVER, LINE_WIDTH_HOVER)
        } else {
            (FILL_OPACITY_REST, LINE_WIDTH_REST)
        };
        if let Err(e) = surface.set_paint_property(&self.fill, PaintProperty::FillOpacity(opacity)) {
            debug!(layer = %self.fill, "paint update failed: {e}");
        }
        if let Err(e) = surface.set_paint_property(&self.border, PaintProperty::LineWidth(width)) {
            debug!(layer = %self.border, "paint update failed: {e}");
        }
    }

    fn release(self, surface: &mut dyn MapSurface) {
        for (_, listener) in self.listeners {
            surface.off(listener);
        }
        for layer in [&self.border, &self.fill] {
            if let Err(e) = surface.remove_layer(layer) {
                debug!(layer = %layer, "layer already gone: {e}");
            }
        }
        if let Err(e) = surface.remove_source(&self.source) {
            debug!(source = %self.source, "source already gone: {e}");
        }
    }
}

// ─────────────────────────────────────────────────────────
// Overlay
// ─────────────────────────────────────────────────────────

pub struct MapOverlay {
    container: Container,
    projects: BTreeMap<String, Project>,
    /// Catalog order, for presentation only.
    order: Vec<String>,
    summary: CatalogSummary,
    on_select: SelectionSender,

    surface: Option<Box<dyn MapSurface>>,
    state: SurfaceState,
    generation: u64,
    cancel: Option<CancellationToken>,
    resize_listener: Option<ListenerId>,

    registrations: BTreeMap<String, LayerRegistration>,
    skipped: BTreeSet<String>,
    hovered: Option<String>,
    popup: Option<(PopupHandle, PopupContent)>,

    style: BaseStyle,
    camera: Camera,
    /// A style switch was requested and its layers are not rebuilt yet.
    restyling: bool,
}

impl MapOverlay {
    pub fn new(container: Container, catalog: Vec<Project>, on_select: SelectionSender) -> Self {
        let mut overlay = MapOverlay {
            container,
            projects: BTreeMap::new(),
            order: Vec::new(),
            summary: CatalogSummary::default(),
            on_select,
            surface: None,
            state: SurfaceState::Unmounted,
            generation: 0,
            cancel: None,
            resize_listener: None,
            registrations: BTreeMap::new(),
            skipped: BTreeSet::new(),
            hovered: None,
            popup: None,
            style: BaseStyle::default(),
            camera: Camera::DEFAULT,
            restyling: false,
        };
        overlay.load_catalog(catalog);
        overlay
    }

    /// Start with `style` instead of the default base style.
    pub fn with_style(mut self, style: BaseStyle) -> Self {
        self.style = style;
        self
    }

    /// Acquire a drawing surface for the container.
    ///
    /// Returns the ready signal to await, or `None` when the substrate is
    /// unavailable; the overlay then shows its placeholder for good.
    /// Initializing an already mounted overlay tears it down first.
    pub fn initialize(
        &mut self,
        factory: &mut dyn SurfaceFactory,
        window: &mut HostWindow,
    ) -> Option<ReadySignal> {
        if self.state != SurfaceState::Unmounted {
            self.teardown(window);
        }
        self.generation = NEXT_GENERATION.fetch_add(1, Ordering::Relaxed);

        let options = SurfaceOptions {
            style: self.style,
            camera: self.camera,
            globe: true,
            generation: self.generation,
        };
        match factory.create(&self.container, options) {
            Ok(pending) => {
                let cancel = CancellationToken::new();
                self.surface = Some(pending.surface);
                self.cancel = Some(cancel.clone());
                self.resize_listener = Some(window.add_listener(HostEventKind::Resize));
                self.state = SurfaceState::Loading;
                info!(
                    container = %self.container.id,
                    style = self.style.name(),
                    "Map surface created, waiting for base style"
                );
                Some(ReadySignal {
                    generation: self.generation,
                    loaded: pending.loaded,
                    cancel,
                })
            }
            Err(e) => {
                warn!(container = %self.container.id, "Map unavailable: {e}");
                self.state = SurfaceState::Unavailable {
                    reason: e.to_string(),
                };
                None
            }
        }
    }

    /// The base style finished loading for surface `generation`.
    pub fn handle_ready(&mut self, generation: u64) {
        if generation != self.generation || self.state != SurfaceState::Loading {
            debug!(generation, "Ignoring stale ready notification");
            return;
        }
        self.state = SurfaceState::Ready;
        self.restyling = false;

        if let Some(surface) = self.surface.as_deref_mut() {
            surface.resize(self.container.size);
            surface.add_control(Control::Navigation, Corner::BottomRight);
            surface.add_control(Control::Scale, Corner::BottomLeft);
        }
        self.register_all();
        info!(
            registered = self.registrations.len(),
            skipped = self.skipped.len(),
            "Map ready"
        );
    }

    /// The substrate dropped its ready signal without firing it.
    pub fn handle_load_failed(&mut self, generation: u64) {
        if generation != self.generation || self.state != SurfaceState::Loading {
            return;
        }
        warn!("Map base style failed to load");
        self.state = SurfaceState::Unavailable {
            reason: "base style failed to load".to_string(),
        };
    }

    /// Replace the catalog. Registered layers are cleared and rebuilt.
    pub fn set_catalog(&mut self, catalog: Vec<Project>) {
        self.clear_hover();
        self.release_all();
        self.load_catalog(catalog);
        if self.state == SurfaceState::Ready && !self.restyling {
            self.register_all();
        }
    }

    fn load_catalog(&mut self, catalog: Vec<Project>) {
        self.projects.clear();
        self.order.clear();
        for project in catalog {
            if self.projects.contains_key(&project.id) {
                warn!(project_id = %project.id, "Duplicate project id in catalog, keeping the first");
                continue;
            }
            self.order.push(project.id.clone());
            self.projects.insert(project.id.clone(), project);
        }
        self.summary = CatalogSummary::of(self.order.iter().filter_map(|id| self.projects.get(id)));
    }

    fn register_all(&mut self) {
        let Some(surface) = self.surface.as_deref_mut() else {
            return;
        };
        self.skipped.clear();
        for id in &self.order {
            if self.registrations.contains_key(id) {
                continue;
            }
            let Some(project) = self.projects.get(id) else {
                continue;
            };
            if let Err(e) = check_boundary(&project.id, &project.boundary) {
                warn!(project_id = %id, "Skipping malformed project geometry: {e}");
                self.skipped.insert(id.clone());
                continue;
            }
            match LayerRegistration::register(surface, project) {
                Ok(registration) => {
                    self.registrations.insert(id.clone(), registration);
                }
                Err(e) => {
                    warn!(project_id = %id, "Failed to register project layers: {e}");
                    self.skipped.insert(id.clone());
                }
            }
        }
    }

    fn release_all(&mut self) {
        let registrations = std::mem::take(&mut self.registrations);
        if let Some(surface) = self.surface.as_deref_mut() {
            for (_, registration) in registrations {
                registration.release(surface);
            }
        }
    }

    // ── Interaction ──────────────────────────────────────

    /// Dispatch an event reported by the surface.
    pub fn handle_surface_event(&mut self, event: SurfaceEvent) {
        if self.surface.is_none() {
            debug!(?event, "Ignoring surface event without a live surface");
            return;
        }
        match event {
            SurfaceEvent::CameraMoved(camera) => self.camera = camera,
            SurfaceEvent::StyleLoaded { generation } => {
                if generation != self.generation {
                    debug!(generation, "Ignoring style load from another surface");
                } else if self.state == SurfaceState::Ready && self.restyling {
                    self.restyling = false;
                    self.register_all();
                    debug!(style = self.style.name(), "Project layers restored after style switch");
                }
            }
            pointer => {
                if self.state != SurfaceState::Ready {
                    return;
                }
                let (Some(kind), Some(layer)) = (pointer.kind(), pointer.layer()) else {
                    return;
                };
                let Some(project_id) = self.listening_project(layer, kind) else {
                    debug!(layer = %layer, "No listener for {}", kind.as_str());
                    return;
                };
                match pointer {
                    SurfaceEvent::PointerEnter { at, .. } => self.pointer_enter(&project_id, at),
                    SurfaceEvent::PointerLeave { .. } => self.pointer_leave(&project_id),
                    SurfaceEvent::Click { .. } => self.click(&project_id),
                    SurfaceEvent::StyleLoaded { .. } | SurfaceEvent::CameraMoved(_) => {}
                }
            }
        }
    }

    fn listening_project(&self, layer: &LayerId, kind: MapEventKind) -> Option<String> {
        self.registrations
            .iter()
            .find(|(_, registration)| &registration.fill == layer && registration.listens(kind))
            .map(|(id, _)| id.clone())
    }

    fn pointer_enter(&mut self, project_id: &str, at: LngLat) {
        let Some(surface) = self.surface.as_deref_mut() else {
            return;
        };
        if let Some(previous) = self.hovered.take() {
            if let Some(registration) = self.registrations.get(&previous) {
                registration.set_emphasis(surface, false);
            }
        }
        if let Some(registration) = self.registrations.get(project_id) {
            registration.set_emphasis(surface, true);
        }
        surface.set_cursor(Cursor::Pointer);

        if let Some((handle, _)) = self.popup.take() {
            surface.remove_popup(handle);
        }
        if let Some(project) = self.projects.get(project_id) {
            let content = PopupContent {
                project_id: project.id.clone(),
                name: project.name.clone(),
                status: project.status,
                credits_issued: thousands(project.credits_issued),
                area: format!("{} hectares", hectares(project.area_covered)),
                hint: POPUP_HINT,
            };
            let handle = surface.show_popup(at, content.clone());
            self.popup = Some((handle, content));
        }
        self.hovered = Some(project_id.to_string());
    }

    fn pointer_leave(&mut self, project_id: &str) {
        if self.hovered.as_deref() != Some(project_id) {
            // A newer enter already took over the hover.
            return;
        }
        self.clear_hover();
    }

    fn clear_hover(&mut self) {
        let Some(surface) = self.surface.as_deref_mut() else {
            self.hovered = None;
            self.popup = None;
            return;
        };
        if let Some(previous) = self.hovered.take() {
            if let Some(registration) = self.registrations.get(&previous) {
                registration.set_emphasis(surface, false);
            }
            surface.set_cursor(Cursor::Default);
        }
        if let Some((handle, _)) = self.popup.take() {
            surface.remove_popup(handle);
        }
    }

    fn click(&mut self, project_id: &str) {
        let Some(project) = self.projects.get(project_id) else {
            return;
        };
        debug!(project_id, "Project selected on map");
        if self.on_select.send(project.clone()).is_err() {
            debug!(project_id, "Selection receiver is gone");
        }
    }

    // ── Viewport ─────────────────────────────────────────

    pub fn zoom_in(&mut self) {
        self.camera = self.camera.zoomed_by(1.0);
        if let Some(surface) = self.surface.as_deref_mut() {
            surface.ease_to(self.camera);
        }
    }

    pub fn zoom_out(&mut self) {
        self.camera = self.camera.zoomed_by(-1.0);
        if let Some(surface) = self.surface.as_deref_mut() {
            surface.ease_to(self.camera);
        }
    }

    /// Return to the default center and zoom.
    pub fn reset_view(&mut self) {
        self.camera = Camera::DEFAULT;
        if let Some(surface) = self.surface.as_deref_mut() {
            surface.fly_to(self.camera);
        }
    }

    /// Flip between the two base styles.
    ///
    /// The current style is tracked here rather than read back from the
    /// substrate. Project layers are released before the switch and rebuilt
    /// when the substrate reports the new style loaded.
    pub fn toggle_style(&mut self) {
        self.style = self.style.toggled();
        if self.surface.is_none() {
            return;
        }
        if self.state == SurfaceState::Ready {
            self.clear_hover();
            self.release_all();
            self.restyling = true;
        }
        if let Some(surface) = self.surface.as_deref_mut() {
            surface.set_style(self.style);
        }
    }

    /// Window or container size changed.
    pub fn on_resize(&mut self, window: &HostWindow, size: ContainerSize) {
        let listening = self
            .resize_listener
            .is_some_and(|listener| window.is_listening(listener));
        if !listening {
            return;
        }
        self.container.size = size;
        if let Some(surface) = self.surface.as_deref_mut() {
            surface.resize(size);
        }
    }

    /// Release every layer, listener, popup and the surface itself.
    pub fn teardown(&mut self, window: &mut HostWindow) {
        if let Some(cancel) = self.cancel.take() {
            cancel.cancel();
        }
        if let Some(listener) = self.resize_listener.take() {
            window.remove_listener(listener);
        }
        self.clear_hover();
        self.release_all();
        if let Some(mut surface) = self.surface.take() {
            surface.destroy();
        }
        self.skipped.clear();
        self.restyling = false;
        self.state = SurfaceState::Unmounted;
        debug!(container = %self.container.id, "Map overlay torn down");
    }

    // ── Accessors ────────────────────────────────────────

    pub fn state(&self) -> &SurfaceState {
        &self.state
    }

    pub fn summary(&self) -> CatalogSummary {
        self.summary
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn style(&self) -> BaseStyle {
        self.style
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// Look a project up in the catalog the overlay draws.
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.get(id)
    }

    pub fn registered_ids(&self) -> Vec<&str> {
        self.registrations.keys().map(String::as_str).collect()
    }

    pub fn placeholder(&self) -> Option<Placeholder> {
        match &self.state {
            SurfaceState::Ready => None,
            SurfaceState::Unmounted | SurfaceState::Loading => Some(Placeholder {
                title: "Loading satellite map",
                message: "Project boundaries appear once the base map has loaded.".to_string(),
            }),
            SurfaceState::Unavailable { reason } => Some(Placeholder {
                title: "Map unavailable",
                message: format!(
                    "To display the satellite map, set MAP_ACCESS_TOKEN for the map substrate ({reason})."
                ),
            }),
        }
    }

    pub fn view(&self) -> OverlayView {
        OverlayView {
            surface: self.state.clone(),
            placeholder: self.placeholder(),
            style: self.style.name(),
            camera: self.camera,
            hovered: self.hovered.clone(),
            popup: self.popup.as_ref().map(|(_, content)| content.clone()),
            registered: self.registrations.keys().cloned().collect(),
            skipped: self.skipped.iter().cloned().collect(),
            summary: self.summary,
            legend: legend(),
        }
    }
}

impl Drop for MapOverlay {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel.cancel();
        }
    }
}
