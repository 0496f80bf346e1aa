//! Events flowing into the console: pointer events the map substrate
//! delegates to layers, and window-level events the host dispatches to
//! whoever is listening.

use std::collections::BTreeMap;

use bluecarbon_registry::LngLat;
use serde::{Deserialize, Serialize};

use crate::surface::{Camera, ContainerSize, LayerId, ListenerId};

/// Pointer events a surface delivers to layer listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapEventKind {
    MouseEnter,
    MouseLeave,
    Click,
}

impl MapEventKind {
    pub const ALL: [MapEventKind; 3] = [Self::MouseEnter, Self::MouseLeave, Self::Click];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MouseEnter => "mouseenter",
            Self::MouseLeave => "mouseleave",
            Self::Click => "click",
        }
    }
}

/// Something that happened on the drawing surface.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    PointerEnter { layer: LayerId, at: LngLat },
    PointerLeave { layer: LayerId },
    Click { layer: LayerId, at: LngLat },
    /// A style requested through `set_style` finished loading on the
    /// surface created for `generation`.
    StyleLoaded { generation: u64 },
    /// The user panned or zoomed the map directly.
    CameraMoved(Camera),
}

impl SurfaceEvent {
    /// The listener kind this event is delivered to, for layer-scoped events.
    pub fn kind(&self) -> Option<MapEventKind> {
        match self {
            Self::PointerEnter { .. } => Some(MapEventKind::MouseEnter),
            Self::PointerLeave { .. } => Some(MapEventKind::MouseLeave),
            Self::Click { .. } => Some(MapEventKind::Click),
            Self::StyleLoaded { .. } | Self::CameraMoved(_) => None,
        }
    }

    pub fn layer(&self) -> Option<&LayerId> {
        match self {
            Self::PointerEnter { layer, .. }
            | Self::PointerLeave { layer }
            | Self::Click { layer, .. } => Some(layer),
            Self::StyleLoaded { .. } | Self::CameraMoved(_) => None,
        }
    }
}

/// Window-level events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HostEventKind {
    Resize,
}

/// Listener registry of the host window.
///
/// Components register on mount and must remove what they registered on
/// teardown; [`HostWindow::active`] lets tests verify nothing accumulates.
#[derive(Debug, Default)]
pub struct HostWindow {
    listeners: BTreeMap<ListenerId, HostEventKind>,
    next_id: u64,
    size: Option<ContainerSize>,
}

impl HostWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&mut self, kind: HostEventKind) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.insert(id, kind);
        id
    }

    /// Returns `false` if `id` was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    pub fn is_listening(&self, id: ListenerId) -> bool {
        self.listeners.contains_key(&id)
    }

    /// Number of live listeners of `kind`.
    pub fn active(&self, kind: HostEventKind) -> usize {
        self.listeners.values().filter(|&&k| k == kind).count()
    }

    /// Record a new window size.
    pub fn resize(&mut self, size: ContainerSize) {
        self.size = Some(size);
    }

    pub fn size(&self) -> Option<ContainerSize> {
        self.size
    }
}
