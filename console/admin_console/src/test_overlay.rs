//! Map overlay scenarios against a recording fake substrate.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use bluecarbon_registry::{catalog, CatalogSummary, LngLat, Project};
use tokio::sync::{mpsc, oneshot};

use crate::events::{HostEventKind, HostWindow, MapEventKind, SurfaceEvent};
use crate::overlay::{MapOverlay, ReadySignal, SurfaceState};
use crate::surface::{
    BaseStyle, Camera, Container, ContainerSize, Control, Corner, Cursor, LayerId, LayerSpec,
    ListenerId, MapSurface, PaintProperty, PendingSurface, PolygonFeature, PopupContent,
    PopupHandle, SourceId, SurfaceError, SurfaceFactory, SurfaceOptions,
};

// ── Fake substrate ───────────────────────────────────────

#[derive(Default)]
struct Recorded {
    sources: BTreeSet<SourceId>,
    layers: BTreeMap<LayerId, LayerSpec>,
    listeners: BTreeMap<ListenerId, (MapEventKind, LayerId)>,
    popups: BTreeMap<PopupHandle, PopupContent>,
    cursor: Cursor,
    camera: Option<Camera>,
    styles: Vec<BaseStyle>,
    sizes: Vec<ContainerSize>,
    controls: Vec<(Control, Corner)>,
    destroyed: bool,
    generation: u64,
    next_id: u64,
}

impl Recorded {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn listeners_of(&self, kind: MapEventKind) -> usize {
        self.listeners.values().filter(|(k, _)| *k == kind).count()
    }

    fn paint(&self, layer: &LayerId) -> Vec<PaintProperty> {
        self.layers
            .get(layer)
            .map(|spec| spec.paint.clone())
            .unwrap_or_default()
    }
}

struct FakeSurface {
    rec: Rc<RefCell<Recorded>>,
}

impl MapSurface for FakeSurface {
    fn add_source(&mut self, id: &SourceId, _feature: PolygonFeature) -> Result<(), SurfaceError> {
        let mut rec = self.rec.borrow_mut();
        if !rec.sources.insert(id.clone()) {
            return Err(SurfaceError::DuplicateSource(id.to_string()));
        }
        Ok(())
    }

    fn remove_source(&mut self, id: &SourceId) -> Result<(), SurfaceError> {
        if self.rec.borrow_mut().sources.remove(id) {
            Ok(())
        } else {
            Err(SurfaceError::UnknownSource(id.to_string()))
        }
    }

    fn add_layer(&mut self, layer: LayerSpec) -> Result<(), SurfaceError> {
        let mut rec = self.rec.borrow_mut();
        if rec.layers.contains_key(&layer.id) {
            return Err(SurfaceError::DuplicateLayer(layer.id.to_string()));
        }
        rec.layers.insert(layer.id.clone(), layer);
        Ok(())
    }

    fn remove_layer(&mut self, id: &LayerId) -> Result<(), SurfaceError> {
        match self.rec.borrow_mut().layers.remove(id) {
            Some(_) => Ok(()),
            None => Err(SurfaceError::UnknownLayer(id.to_string())),
        }
    }

    fn on(&mut self, kind: MapEventKind, layer: &LayerId) -> ListenerId {
        let mut rec = self.rec.borrow_mut();
        let id = ListenerId(rec.next_id());
        rec.listeners.insert(id, (kind, layer.clone()));
        id
    }

    fn off(&mut self, listener: ListenerId) {
        self.rec.borrow_mut().listeners.remove(&listener);
    }

    fn set_paint_property(
        &mut self,
        layer: &LayerId,
        paint: PaintProperty,
    ) -> Result<(), SurfaceError> {
        let mut rec = self.rec.borrow_mut();
        let spec = rec
            .layers
            .get_mut(layer)
            .ok_or_else(|| SurfaceError::UnknownLayer(layer.to_string()))?;
        spec.paint
            .retain(|p| std::mem::discriminant(p) != std::mem::discriminant(&paint));
        spec.paint.push(paint);
        Ok(())
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.rec.borrow_mut().cursor = cursor;
    }

    fn show_popup(&mut self, _at: LngLat, content: PopupContent) -> PopupHandle {
        let mut rec = self.rec.borrow_mut();
        let handle = PopupHandle(rec.next_id());
        rec.popups.insert(handle, content);
        handle
    }

    fn remove_popup(&mut self, popup: PopupHandle) {
        self.rec.borrow_mut().popups.remove(&popup);
    }

    fn add_control(&mut self, control: Control, corner: Corner) {
        self.rec.borrow_mut().controls.push((control, corner));
    }

    fn resize(&mut self, size: ContainerSize) {
        self.rec.borrow_mut().sizes.push(size);
    }

    fn ease_to(&mut self, camera: Camera) {
        self.rec.borrow_mut().camera = Some(camera);
    }

    fn fly_to(&mut self, camera: Camera) {
        self.rec.borrow_mut().camera = Some(camera);
    }

    fn set_style(&mut self, style: BaseStyle) {
        let mut rec = self.rec.borrow_mut();
        rec.styles.push(style);
        rec.layers.clear();
        rec.sources.clear();
    }

    fn destroy(&mut self) {
        let mut rec = self.rec.borrow_mut();
        rec.layers.clear();
        rec.sources.clear();
        rec.listeners.clear();
        rec.popups.clear();
        rec.destroyed = true;
    }
}

#[derive(Default)]
struct FakeFactory {
    unavailable: bool,
    surfaces: Vec<Rc<RefCell<Recorded>>>,
    loaded: Vec<oneshot::Sender<()>>,
}

impl FakeFactory {
    fn unavailable() -> Self {
        FakeFactory {
            unavailable: true,
            ..Default::default()
        }
    }

    fn last(&self) -> Rc<RefCell<Recorded>> {
        Rc::clone(self.surfaces.last().expect("a surface was created"))
    }
}

impl SurfaceFactory for FakeFactory {
    fn create(
        &mut self,
        _container: &Container,
        options: SurfaceOptions,
    ) -> Result<PendingSurface, SurfaceError> {
        if self.unavailable {
            return Err(SurfaceError::MissingCredential);
        }
        let rec = Rc::new(RefCell::new(Recorded {
            camera: Some(options.camera),
            generation: options.generation,
            ..Default::default()
        }));
        self.surfaces.push(Rc::clone(&rec));
        let (tx, rx) = oneshot::channel();
        self.loaded.push(tx);
        Ok(PendingSurface {
            surface: Box::new(FakeSurface { rec }),
            loaded: rx,
        })
    }
}

// ── Harness ──────────────────────────────────────────────

struct Harness {
    overlay: MapOverlay,
    selections: mpsc::UnboundedReceiver<Project>,
    factory: FakeFactory,
    window: HostWindow,
}

impl Harness {
    fn new(catalog: Vec<Project>) -> Self {
        Self::with_factory(catalog, FakeFactory::default())
    }

    fn with_factory(catalog: Vec<Project>, factory: FakeFactory) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let container = Container {
            id: "map".to_string(),
            size: ContainerSize {
                width: 800,
                height: 600,
            },
        };
        Harness {
            overlay: MapOverlay::new(container, catalog, tx),
            selections: rx,
            factory,
            window: HostWindow::new(),
        }
    }

    fn mount(&mut self) -> Option<ReadySignal> {
        self.overlay.initialize(&mut self.factory, &mut self.window)
    }

    /// Mount and deliver the ready notification.
    fn mount_ready(&mut self) -> Rc<RefCell<Recorded>> {
        let signal = self.mount().expect("surface available");
        self.overlay.handle_ready(signal.generation);
        self.factory.last()
    }

    fn teardown(&mut self) {
        self.overlay.teardown(&mut self.window);
    }

    /// Report the new style loaded on the most recently created surface.
    fn style_loaded(&mut self) {
        let generation = self.factory.last().borrow().generation;
        self.overlay
            .handle_surface_event(SurfaceEvent::StyleLoaded { generation });
    }

    fn enter(&mut self, id: &str) {
        self.overlay.handle_surface_event(SurfaceEvent::PointerEnter {
            layer: LayerId::fill(id),
            at: LngLat::new(86.0, 20.5),
        });
    }

    fn leave(&mut self, id: &str) {
        self.overlay.handle_surface_event(SurfaceEvent::PointerLeave {
            layer: LayerId::fill(id),
        });
    }

    fn click(&mut self, id: &str) {
        self.overlay.handle_surface_event(SurfaceEvent::Click {
            layer: LayerId::fill(id),
            at: LngLat::new(86.0, 20.5),
        });
    }
}

const SUNDARBANS: &str = "BC-2024-0078";
const BHITARKANIKA: &str = "BC-2024-0092";

fn fill_opacity(rec: &Recorded, id: &str) -> Option<f64> {
    rec.paint(&LayerId::fill(id)).into_iter().find_map(|p| match p {
        PaintProperty::FillOpacity(value) => Some(value),
        _ => None,
    })
}

fn line_width(rec: &Recorded, id: &str) -> Option<f64> {
    rec.paint(&LayerId::border(id)).into_iter().find_map(|p| match p {
        PaintProperty::LineWidth(value) => Some(value),
        _ => None,
    })
}

// ── Lifecycle ────────────────────────────────────────────

#[test]
fn test_unavailable_substrate_shows_persistent_placeholder() {
    let mut h = Harness::with_factory(catalog::projects(), FakeFactory::unavailable());
    assert!(h.mount().is_none());
    assert!(matches!(h.overlay.state(), SurfaceState::Unavailable { .. }));

    let placeholder = h.overlay.placeholder().expect("placeholder shown");
    assert_eq!(placeholder.title, "Map unavailable");
    assert_eq!(h.window.active(HostEventKind::Resize), 0);

    // Interaction is inert rather than fatal.
    h.enter(SUNDARBANS);
    h.overlay.zoom_in();
    h.overlay.toggle_style();
    assert!(h.overlay.hovered().is_none());
    assert_eq!(h.overlay.summary().count, 3);
}

#[test]
fn test_loading_placeholder_until_ready() {
    let mut h = Harness::new(catalog::projects());
    let signal = h.mount().expect("surface available");
    let rec = h.factory.last();

    assert_eq!(h.overlay.state(), &SurfaceState::Loading);
    assert_eq!(
        h.overlay.placeholder().map(|p| p.title),
        Some("Loading satellite map")
    );
    assert!(rec.borrow().layers.is_empty());

    h.overlay.handle_ready(signal.generation);
    assert_eq!(h.overlay.state(), &SurfaceState::Ready);
    assert!(h.overlay.placeholder().is_none());
}

#[test]
fn test_ready_registers_one_polygon_set_per_project() {
    let mut h = Harness::new(catalog::projects());
    let rec = h.mount_ready();
    let rec = rec.borrow();

    assert_eq!(rec.sources.len(), 3);
    assert_eq!(rec.layers.len(), 6);
    for kind in MapEventKind::ALL {
        assert_eq!(rec.listeners_of(kind), 3);
    }
    assert!(rec.layers.contains_key(&LayerId::fill(SUNDARBANS)));
    assert!(rec.layers.contains_key(&LayerId::border(SUNDARBANS)));
    assert_eq!(fill_opacity(&rec, SUNDARBANS), Some(0.4));
    assert_eq!(line_width(&rec, SUNDARBANS), Some(1.5));
    assert_eq!(
        rec.controls,
        vec![
            (Control::Navigation, Corner::BottomRight),
            (Control::Scale, Corner::BottomLeft),
        ]
    );
    assert_eq!(
        rec.sizes.last(),
        Some(&ContainerSize {
            width: 800,
            height: 600
        })
    );
}

#[test]
fn test_malformed_geometry_is_skipped_and_rest_registered() {
    let mut projects = catalog::projects();
    projects[1].boundary.pop();
    let broken = projects[1].id.clone();

    let mut h = Harness::new(projects);
    let rec = h.mount_ready();

    assert_eq!(rec.borrow().sources.len(), 2);
    assert!(!h.overlay.registered_ids().contains(&broken.as_str()));
    assert_eq!(h.overlay.view().skipped, vec![broken]);
    // The summary still covers the full catalog.
    assert_eq!(h.overlay.summary().count, 3);
}

#[test]
fn test_collapsed_ring_is_skipped() {
    let mut projects = catalog::projects();
    let corner = projects[2].boundary[0];
    projects[2].boundary = vec![corner; 4];
    let collapsed = projects[2].id.clone();

    let mut h = Harness::new(projects);
    let rec = h.mount_ready();

    assert_eq!(rec.borrow().sources.len(), 2);
    assert_eq!(h.overlay.registered_ids().len(), 2);
    assert_eq!(h.overlay.view().skipped, vec![collapsed]);
}

#[test]
fn test_duplicate_ids_keep_first_record() {
    let mut projects = catalog::projects();
    let mut copy = projects[0].clone();
    copy.name = "Shadow".to_string();
    projects.push(copy);

    let mut h = Harness::new(projects);
    let rec = h.mount_ready();
    assert_eq!(rec.borrow().sources.len(), 3);
    assert_eq!(h.overlay.summary().count, 3);
}

#[test]
fn test_set_catalog_rebuilds_without_duplicates() {
    let mut h = Harness::new(catalog::projects());
    let rec = h.mount_ready();

    h.overlay.set_catalog(catalog::projects());
    assert_eq!(rec.borrow().layers.len(), 6);
    assert_eq!(rec.borrow().listeners.len(), 9);

    let fewer: Vec<_> = catalog::projects().into_iter().take(1).collect();
    h.overlay.set_catalog(fewer);
    assert_eq!(rec.borrow().layers.len(), 2);
    assert_eq!(rec.borrow().listeners.len(), 3);
    assert_eq!(h.overlay.summary().count, 1);
}

// ── Aggregate summary ────────────────────────────────────

#[test]
fn test_summary_is_independent_of_catalog_order() {
    let forward = Harness::new(catalog::projects()).overlay.summary();
    let mut reversed = catalog::projects();
    reversed.reverse();
    let backward = Harness::new(reversed).overlay.summary();

    assert_eq!(forward, backward);
    assert_eq!(
        forward,
        CatalogSummary {
            count: 3,
            total_area: 8_150.0,
            total_issued: 36_600,
            total_retired: 25_700,
        }
    );
}

// ── Hover ────────────────────────────────────────────────

#[test]
fn test_hover_shows_one_popup_and_emphasis() {
    let mut h = Harness::new(catalog::projects());
    let rec = h.mount_ready();

    h.enter(SUNDARBANS);
    {
        let rec = rec.borrow();
        assert_eq!(rec.popups.len(), 1);
        let popup = rec.popups.values().next().unwrap();
        assert_eq!(popup.project_id, SUNDARBANS);
        assert_eq!(popup.credits_issued, "12,500");
        assert_eq!(popup.hint, "Click for detailed information");
        assert_eq!(fill_opacity(&rec, SUNDARBANS), Some(0.65));
        assert_eq!(line_width(&rec, SUNDARBANS), Some(2.0));
        assert_eq!(rec.cursor, Cursor::Pointer);
    }

    h.leave(SUNDARBANS);
    let rec = rec.borrow();
    assert!(rec.popups.is_empty());
    assert_eq!(fill_opacity(&rec, SUNDARBANS), Some(0.4));
    assert_eq!(line_width(&rec, SUNDARBANS), Some(1.5));
    assert_eq!(rec.cursor, Cursor::Default);
    assert!(h.overlay.hovered().is_none());
}

#[test]
fn test_entering_another_polygon_replaces_popup() {
    let mut h = Harness::new(catalog::projects());
    let rec = h.mount_ready();

    h.enter(SUNDARBANS);
    h.enter(BHITARKANIKA);

    let rec_ref = rec.borrow();
    assert_eq!(rec_ref.popups.len(), 1);
    assert_eq!(
        rec_ref.popups.values().next().unwrap().project_id,
        BHITARKANIKA
    );
    assert_eq!(fill_opacity(&rec_ref, SUNDARBANS), Some(0.4));
    assert_eq!(fill_opacity(&rec_ref, BHITARKANIKA), Some(0.65));
    assert_eq!(h.overlay.hovered(), Some(BHITARKANIKA));
    drop(rec_ref);

    // A late leave for the first polygon does not clear the second.
    h.leave(SUNDARBANS);
    assert_eq!(rec.borrow().popups.len(), 1);
    assert_eq!(h.overlay.hovered(), Some(BHITARKANIKA));
}

#[test]
fn test_events_for_unknown_layers_are_ignored() {
    let mut h = Harness::new(catalog::projects());
    let rec = h.mount_ready();
    h.enter("BC-0000-0000");
    h.click("BC-0000-0000");
    assert!(rec.borrow().popups.is_empty());
    assert!(h.selections.try_recv().is_err());
}

// ── Click ────────────────────────────────────────────────

#[test]
fn test_click_reports_selection_exactly_once() {
    let mut h = Harness::new(catalog::projects());
    h.mount_ready();

    h.click(SUNDARBANS);
    let selected = h.selections.try_recv().expect("one selection");
    assert_eq!(selected.id, SUNDARBANS);
    assert_eq!(selected, catalog::projects()[0]);
    assert!(h.selections.try_recv().is_err());
}

#[test]
fn test_click_without_receiver_is_harmless() {
    let mut h = Harness::new(catalog::projects());
    h.mount_ready();
    h.selections.close();
    h.click(SUNDARBANS);
    assert_eq!(h.overlay.state(), &SurfaceState::Ready);
}

// ── Viewport ─────────────────────────────────────────────

#[test]
fn test_reset_restores_default_camera_after_any_sequence() {
    let mut h = Harness::new(catalog::projects());
    let rec = h.mount_ready();

    for _ in 0..4 {
        h.overlay.zoom_in();
    }
    h.overlay.zoom_out();
    h.overlay.handle_surface_event(SurfaceEvent::CameraMoved(Camera {
        center: LngLat::new(120.0, -8.0),
        zoom: 11.3,
    }));
    assert_ne!(h.overlay.camera(), Camera::DEFAULT);

    h.overlay.reset_view();
    assert_eq!(h.overlay.camera(), Camera::DEFAULT);
    assert_eq!(rec.borrow().camera, Some(Camera::DEFAULT));
}

#[test]
fn test_zoom_steps_by_one_level() {
    let mut h = Harness::new(catalog::projects());
    let rec = h.mount_ready();
    h.overlay.zoom_in();
    assert_eq!(h.overlay.camera().zoom, 6.0);
    h.overlay.zoom_out();
    h.overlay.zoom_out();
    assert_eq!(rec.borrow().camera.map(|c| c.zoom), Some(4.0));
}

// ── Style toggle ─────────────────────────────────────────

#[test]
fn test_style_toggle_twice_returns_to_original_with_polygons() {
    let mut h = Harness::new(catalog::projects());
    let rec = h.mount_ready();
    let original = h.overlay.style();

    h.overlay.toggle_style();
    assert_eq!(h.overlay.style(), BaseStyle::Satellite);
    assert!(rec.borrow().layers.is_empty());
    h.style_loaded();
    assert_eq!(rec.borrow().layers.len(), 6);
    assert_eq!(rec.borrow().listeners.len(), 9);

    h.overlay.toggle_style();
    h.style_loaded();
    assert_eq!(h.overlay.style(), original);
    assert_eq!(rec.borrow().layers.len(), 6);
    assert_eq!(rec.borrow().listeners.len(), 9);
    assert_eq!(
        rec.borrow().styles,
        vec![BaseStyle::Satellite, BaseStyle::SatelliteStreets]
    );
}

#[test]
fn test_toggle_clears_hover_popup() {
    let mut h = Harness::new(catalog::projects());
    let rec = h.mount_ready();
    h.enter(SUNDARBANS);
    h.overlay.toggle_style();
    assert!(rec.borrow().popups.is_empty());
    assert!(h.overlay.hovered().is_none());
}

#[test]
fn test_unsolicited_style_loaded_does_not_duplicate() {
    let mut h = Harness::new(catalog::projects());
    let rec = h.mount_ready();
    h.style_loaded();
    assert_eq!(rec.borrow().layers.len(), 6);
}

#[test]
fn test_style_loaded_from_previous_surface_is_ignored() {
    let mut h = Harness::new(catalog::projects());
    let old = h.mount_ready().borrow().generation;
    let rec = h.mount_ready();
    assert_ne!(rec.borrow().generation, old);

    h.overlay.toggle_style();
    h.overlay
        .handle_surface_event(SurfaceEvent::StyleLoaded { generation: old });
    assert!(rec.borrow().layers.is_empty());
    assert!(h.overlay.registered_ids().is_empty());

    h.style_loaded();
    assert_eq!(rec.borrow().layers.len(), 6);
}

// ── Resize ───────────────────────────────────────────────

#[test]
fn test_resize_refits_surface_while_mounted() {
    let mut h = Harness::new(catalog::projects());
    let rec = h.mount_ready();
    let size = ContainerSize {
        width: 1024,
        height: 400,
    };
    h.overlay.on_resize(&h.window, size);
    assert_eq!(rec.borrow().sizes.last(), Some(&size));

    let before = rec.borrow().sizes.len();
    h.teardown();
    h.overlay.on_resize(&h.window, size);
    assert_eq!(rec.borrow().sizes.len(), before);
}

// ── Teardown ─────────────────────────────────────────────

#[test]
fn test_teardown_releases_everything() {
    let mut h = Harness::new(catalog::projects());
    let signal = h.mount().expect("surface available");
    h.overlay.handle_ready(signal.generation);
    let rec = h.factory.last();
    h.enter(SUNDARBANS);

    h.teardown();
    let rec = rec.borrow();
    assert!(rec.destroyed);
    assert!(rec.layers.is_empty());
    assert!(rec.sources.is_empty());
    assert!(rec.listeners.is_empty());
    assert!(rec.popups.is_empty());
    assert_eq!(h.window.active(HostEventKind::Resize), 0);
    assert!(signal.cancel.is_cancelled());
    assert_eq!(h.overlay.state(), &SurfaceState::Unmounted);
}

#[test]
fn test_remount_has_exactly_one_listener_set() {
    let mut h = Harness::new(catalog::projects());
    h.mount_ready();
    h.teardown();
    let rec = h.mount_ready();

    assert_eq!(h.window.active(HostEventKind::Resize), 1);
    for kind in MapEventKind::ALL {
        assert_eq!(rec.borrow().listeners_of(kind), 3);
    }
    assert_eq!(h.factory.surfaces.len(), 2);
}

#[test]
fn test_initialize_twice_tears_down_first_surface() {
    let mut h = Harness::new(catalog::projects());
    let first = h.mount_ready();
    let second = h.mount_ready();

    assert!(first.borrow().destroyed);
    assert_eq!(second.borrow().layers.len(), 6);
    assert_eq!(h.window.active(HostEventKind::Resize), 1);
}

#[test]
fn test_stale_callbacks_after_teardown_are_noops() {
    let mut h = Harness::new(catalog::projects());
    let signal = h.mount().expect("surface available");
    h.teardown();

    h.overlay.handle_ready(signal.generation);
    h.enter(SUNDARBANS);
    h.click(SUNDARBANS);
    h.overlay.handle_surface_event(SurfaceEvent::StyleLoaded {
        generation: signal.generation,
    });

    assert_eq!(h.overlay.state(), &SurfaceState::Unmounted);
    assert!(h.overlay.registered_ids().is_empty());
    assert!(h.selections.try_recv().is_err());
}

#[test]
fn test_ready_from_previous_mount_is_ignored() {
    let mut h = Harness::new(catalog::projects());
    let old = h.mount().expect("surface available");
    h.teardown();
    let _new = h.mount().expect("surface available");

    h.overlay.handle_ready(old.generation);
    assert_eq!(h.overlay.state(), &SurfaceState::Loading);
    assert!(h.factory.last().borrow().layers.is_empty());
}

#[test]
fn test_dropped_ready_signal_marks_map_unavailable() {
    let mut h = Harness::new(catalog::projects());
    let signal = h.mount().expect("surface available");
    h.overlay.handle_load_failed(signal.generation);
    assert!(matches!(h.overlay.state(), SurfaceState::Unavailable { .. }));
}
