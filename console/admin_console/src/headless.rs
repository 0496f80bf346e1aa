//! Headless map substrate.
//!
//! Implements the surface capability set without a renderer: every call is
//! applied to an in-memory [`Scene`] and logged at `debug`. Base-style loads
//! complete after a configurable delay on the tokio runtime, which lets the
//! console be driven end to end from a terminal.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use bluecarbon_registry::LngLat;
use serde::Serialize;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::events::{MapEventKind, SurfaceEvent};
use crate::runtime::ConsoleEvent;
use crate::surface::{
    BaseStyle, Camera, Container, ContainerSize, Control, Corner, Cursor, LayerId, LayerSpec,
    ListenerId, MapSurface, PaintProperty, PendingSurface, PolygonFeature, PopupContent,
    PopupHandle, SourceId, SurfaceError, SurfaceFactory, SurfaceOptions,
};

/// Everything currently attached to a headless surface.
#[derive(Debug)]
pub struct Scene {
    container: String,
    style: BaseStyle,
    camera: Camera,
    size: ContainerSize,
    cursor: Cursor,
    sources: BTreeMap<SourceId, PolygonFeature>,
    layers: BTreeMap<LayerId, LayerSpec>,
    listeners: BTreeMap<ListenerId, (MapEventKind, LayerId)>,
    popups: BTreeMap<PopupHandle, PopupContent>,
    controls: Vec<(Control, Corner)>,
    destroyed: bool,
    next_id: u64,
}

impl Scene {
    fn new(container: &Container, options: &SurfaceOptions) -> Self {
        Scene {
            container: container.id.clone(),
            style: options.style,
            camera: options.camera,
            size: container.size,
            cursor: Cursor::Default,
            sources: BTreeMap::new(),
            layers: BTreeMap::new(),
            listeners: BTreeMap::new(),
            popups: BTreeMap::new(),
            controls: Vec::new(),
            destroyed: false,
            next_id: 0,
        }
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn listening(&self, kind: MapEventKind, layer: &LayerId) -> bool {
        self.listeners
            .values()
            .any(|(k, l)| *k == kind && l == layer)
    }

    pub fn summary(&self) -> SceneSummary {
        SceneSummary {
            container: self.container.clone(),
            style: self.style.name(),
            camera: self.camera,
            size: self.size,
            cursor: self.cursor,
            sources: self.sources.len(),
            layers: self.layers.len(),
            listeners: self.listeners.len(),
            popups: self.popups.len(),
            controls: self.controls.clone(),
            destroyed: self.destroyed,
        }
    }
}

/// Counts of what a headless surface holds, for snapshots.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SceneSummary {
    pub container: String,
    pub style: &'static str,
    pub camera: Camera,
    pub size: ContainerSize,
    pub cursor: Cursor,
    pub sources: usize,
    pub layers: usize,
    pub listeners: usize,
    pub popups: usize,
    pub controls: Vec<(Control, Corner)>,
    pub destroyed: bool,
}

pub struct HeadlessSurface {
    scene: Rc<RefCell<Scene>>,
    generation: u64,
    load_delay: Duration,
    events: mpsc::UnboundedSender<ConsoleEvent>,
}

impl HeadlessSurface {
    fn live(&self) -> Result<std::cell::RefMut<'_, Scene>, SurfaceError> {
        let scene = self.scene.borrow_mut();
        if scene.destroyed {
            return Err(SurfaceError::Destroyed);
        }
        Ok(scene)
    }
}

impl MapSurface for HeadlessSurface {
    fn add_source(&mut self, id: &SourceId, feature: PolygonFeature) -> Result<(), SurfaceError> {
        let mut scene = self.live()?;
        if scene.sources.contains_key(id) {
            return Err(SurfaceError::DuplicateSource(id.to_string()));
        }
        debug!(source = %id, "add_source");
        scene.sources.insert(id.clone(), feature);
        Ok(())
    }

    fn remove_source(&mut self, id: &SourceId) -> Result<(), SurfaceError> {
        let mut scene = self.live()?;
        if scene.layers.values().any(|layer| &layer.source == id) {
            return Err(SurfaceError::Unavailable(format!(
                "source {id} is still used by a layer"
            )));
        }
        scene
            .sources
            .remove(id)
            .map(|_| debug!(source = %id, "remove_source"))
            .ok_or_else(|| SurfaceError::UnknownSource(id.to_string()))
    }

    fn add_layer(&mut self, layer: LayerSpec) -> Result<(), SurfaceError> {
        let mut scene = self.live()?;
        if scene.layers.contains_key(&layer.id) {
            return Err(SurfaceError::DuplicateLayer(layer.id.to_string()));
        }
        if !scene.sources.contains_key(&layer.source) {
            return Err(SurfaceError::UnknownSource(layer.source.to_string()));
        }
        debug!(layer = %layer.id, kind = ?layer.kind, "add_layer");
        scene.layers.insert(layer.id.clone(), layer);
        Ok(())
    }

    fn remove_layer(&mut self, id: &LayerId) -> Result<(), SurfaceError> {
        let mut scene = self.live()?;
        scene
            .layers
            .remove(id)
            .map(|_| debug!(layer = %id, "remove_layer"))
            .ok_or_else(|| SurfaceError::UnknownLayer(id.to_string()))
    }

    fn on(&mut self, kind: MapEventKind, layer: &LayerId) -> ListenerId {
        let mut scene = self.scene.borrow_mut();
        let id = ListenerId(scene.next_id());
        debug!(layer = %layer, event = kind.as_str(), listener = id.0, "on");
        scene.listeners.insert(id, (kind, layer.clone()));
        id
    }

    fn off(&mut self, listener: ListenerId) {
        debug!(listener = listener.0, "off");
        self.scene.borrow_mut().listeners.remove(&listener);
    }

    fn set_paint_property(
        &mut self,
        layer: &LayerId,
        paint: PaintProperty,
    ) -> Result<(), SurfaceError> {
        let mut scene = self.live()?;
        let spec = scene
            .layers
            .get_mut(layer)
            .ok_or_else(|| SurfaceError::UnknownLayer(layer.to_string()))?;
        debug!(layer = %layer, ?paint, "set_paint_property");
        let same_property = |existing: &PaintProperty| {
            std::mem::discriminant(existing) == std::mem::discriminant(&paint)
        };
        spec.paint.retain(|existing| !same_property(existing));
        spec.paint.push(paint);
        Ok(())
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        debug!(?cursor, "set_cursor");
        self.scene.borrow_mut().cursor = cursor;
    }

    fn show_popup(&mut self, at: LngLat, content: PopupContent) -> PopupHandle {
        let mut scene = self.scene.borrow_mut();
        let handle = PopupHandle(scene.next_id());
        debug!(popup = handle.0, project_id = %content.project_id, %at, "show_popup");
        scene.popups.insert(handle, content);
        handle
    }

    fn remove_popup(&mut self, popup: PopupHandle) {
        debug!(popup = popup.0, "remove_popup");
        self.scene.borrow_mut().popups.remove(&popup);
    }

    fn add_control(&mut self, control: Control, corner: Corner) {
        debug!(?control, ?corner, "add_control");
        self.scene.borrow_mut().controls.push((control, corner));
    }

    fn resize(&mut self, size: ContainerSize) {
        debug!(width = size.width, height = size.height, "resize");
        self.scene.borrow_mut().size = size;
    }

    fn ease_to(&mut self, camera: Camera) {
        debug!(zoom = camera.zoom, "ease_to");
        self.scene.borrow_mut().camera = camera;
    }

    fn fly_to(&mut self, camera: Camera) {
        debug!(center = %camera.center, zoom = camera.zoom, "fly_to");
        self.scene.borrow_mut().camera = camera;
    }

    fn set_style(&mut self, style: BaseStyle) {
        {
            let mut scene = self.scene.borrow_mut();
            if scene.destroyed {
                return;
            }
            debug!(style = style.name(), "set_style");
            scene.style = style;
            scene.layers.clear();
            scene.sources.clear();
        }
        let events = self.events.clone();
        let delay = self.load_delay;
        let generation = self.generation;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events.send(ConsoleEvent::Surface(SurfaceEvent::StyleLoaded {
                generation,
            }));
        });
    }

    fn destroy(&mut self) {
        let mut scene = self.scene.borrow_mut();
        debug!(container = %scene.container, "destroy");
        scene.sources.clear();
        scene.layers.clear();
        scene.listeners.clear();
        scene.popups.clear();
        scene.controls.clear();
        scene.destroyed = true;
    }
}

/// Creates headless surfaces and routes simulated pointer input to them.
pub struct HeadlessFactory {
    access_token: Option<String>,
    load_delay: Duration,
    events: mpsc::UnboundedSender<ConsoleEvent>,
    current: Option<Rc<RefCell<Scene>>>,
}

impl HeadlessFactory {
    pub fn new(
        access_token: Option<String>,
        load_delay: Duration,
        events: mpsc::UnboundedSender<ConsoleEvent>,
    ) -> Self {
        HeadlessFactory {
            access_token,
            load_delay,
            events,
            current: None,
        }
    }

    /// The most recently created surface, if it is still alive.
    pub fn scene(&self) -> Option<SceneSummary> {
        self.current.as_ref().map(|scene| scene.borrow().summary())
    }

    /// Build the pointer event the live surface would deliver for `project_id`.
    ///
    /// Returns `None` when nothing listens for `kind` on that project's fill
    /// layer, the way a real substrate drops events no listener asked for.
    pub fn pointer(&self, kind: MapEventKind, project_id: &str) -> Option<SurfaceEvent> {
        let scene = self.current.as_ref()?.borrow();
        if scene.destroyed {
            return None;
        }
        let layer = LayerId::fill(project_id);
        if !scene.listening(kind, &layer) {
            return None;
        }
        let at = scene
            .sources
            .get(&SourceId::project(project_id))
            .and_then(|feature| feature.ring.first().copied())
            .unwrap_or(scene.camera.center);
        Some(match kind {
            MapEventKind::MouseEnter => SurfaceEvent::PointerEnter { layer, at },
            MapEventKind::MouseLeave => SurfaceEvent::PointerLeave { layer },
            MapEventKind::Click => SurfaceEvent::Click { layer, at },
        })
    }
}

impl SurfaceFactory for HeadlessFactory {
    fn create(
        &mut self,
        container: &Container,
        options: SurfaceOptions,
    ) -> Result<PendingSurface, SurfaceError> {
        if self.access_token.is_none() {
            return Err(SurfaceError::MissingCredential);
        }
        let scene = Rc::new(RefCell::new(Scene::new(container, &options)));
        self.current = Some(Rc::clone(&scene));
        debug!(
            container = %container.id,
            style = %options.style.url(),
            globe = options.globe,
            generation = options.generation,
            "create surface"
        );

        let (tx, rx) = oneshot::channel();
        let delay = self.load_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(());
        });

        Ok(PendingSurface {
            surface: Box::new(HeadlessSurface {
                scene,
                generation: options.generation,
                load_delay: self.load_delay,
                events: self.events.clone(),
            }),
            loaded: rx,
        })
    }
}
