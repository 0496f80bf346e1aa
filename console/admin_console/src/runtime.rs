//! The console event loop.
//!
//! Everything the console reacts to arrives as a [`ConsoleEvent`] on one
//! unbounded channel: operator input lines, the map's ready notification,
//! and events reported by the map substrate. Events are handled one at a
//! time on the current task; the only work spawned elsewhere is waiting on
//! the substrate's ready one-shot.

use std::io::Write;

use bluecarbon_registry::catalog;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::errors::{ConsoleError, Result};
use crate::events::{HostEventKind, HostWindow, SurfaceEvent};
use crate::headless::{HeadlessFactory, SceneSummary};
use crate::input::Command;
use crate::modal::ModalTab;
use crate::overlay::ReadySignal;
use crate::shell::{Screen, Shell, ShellView, View};
use crate::surface::{Container, ContainerSize};

#[derive(Debug)]
pub enum ConsoleEvent {
    /// One line of operator input.
    Input(String),
    /// Operator input reached end of file.
    InputClosed,
    /// The map surface of `generation` finished loading its base style.
    Ready { generation: u64 },
    /// The map surface of `generation` gave up loading.
    LoadFailed { generation: u64 },
    /// Reported by the map substrate.
    Surface(SurfaceEvent),
}

/// What the loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Render,
    Quit,
}

#[derive(Debug, Serialize)]
pub struct Snapshot {
    #[serde(flatten)]
    pub shell: ShellView,
    pub substrate: Option<SceneSummary>,
    pub resize_listeners: usize,
}

pub struct Console {
    shell: Shell,
    factory: HeadlessFactory,
    window: HostWindow,
    events: mpsc::UnboundedSender<ConsoleEvent>,
}

impl Console {
    pub fn new(config: &Config, events: mpsc::UnboundedSender<ConsoleEvent>) -> Self {
        let container = Container {
            id: "satellite-map".to_string(),
            size: config.container_size,
        };
        let mut window = HostWindow::new();
        window.resize(config.container_size);
        Console {
            shell: Shell::new(container, config.map_style, catalog::projects()),
            factory: HeadlessFactory::new(
                config.map_access_token.clone(),
                config.map_load_delay,
                events.clone(),
            ),
            window,
            events,
        }
    }

    pub fn navigate(&mut self, view: View) {
        if let Some(signal) = self.shell.navigate(view, &mut self.factory, &mut self.window) {
            self.watch_ready(signal);
        }
    }

    /// Wait for the substrate's ready one-shot off the loop and report back
    /// through the event channel, unless the surface is torn down first.
    fn watch_ready(&self, signal: ReadySignal) {
        let events = self.events.clone();
        tokio::spawn(async move {
            let ReadySignal {
                generation,
                loaded,
                cancel,
            } = signal;
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!(generation, "Ready wait cancelled");
                }
                result = loaded => {
                    let event = match result {
                        Ok(()) => ConsoleEvent::Ready { generation },
                        Err(_) => ConsoleEvent::LoadFailed { generation },
                    };
                    let _ = events.send(event);
                }
            }
        });
    }

    pub fn handle(&mut self, event: ConsoleEvent) -> Result<Step> {
        match event {
            ConsoleEvent::Input(line) => match Command::parse(&line)? {
                Some(command) => self.apply(command),
                None => Ok(Step::Continue),
            },
            ConsoleEvent::InputClosed => Ok(Step::Quit),
            ConsoleEvent::Ready { generation } => {
                if let Some(dashboard) = self.shell.dashboard_mut() {
                    dashboard.overlay_mut().handle_ready(generation);
                }
                Ok(Step::Continue)
            }
            ConsoleEvent::LoadFailed { generation } => {
                if let Some(dashboard) = self.shell.dashboard_mut() {
                    dashboard.overlay_mut().handle_load_failed(generation);
                }
                Ok(Step::Continue)
            }
            ConsoleEvent::Surface(event) => {
                if let Some(dashboard) = self.shell.dashboard_mut() {
                    dashboard.overlay_mut().handle_surface_event(event);
                    dashboard.pump_selections();
                }
                Ok(Step::Continue)
            }
        }
    }

    fn apply(&mut self, command: Command) -> Result<Step> {
        match command {
            Command::Quit => return Ok(Step::Quit),
            Command::Snapshot => return Ok(Step::Render),
            Command::Navigate(view) => self.navigate(view),
            Command::Resize(size) => self.resize(size),
            Command::Pointer(kind, project_id) => {
                let event = self.factory.pointer(kind, &project_id).ok_or_else(|| {
                    ConsoleError::Command(format!(
                        "Nothing on the map listens for {} on {project_id}",
                        kind.as_str()
                    ))
                })?;
                let dashboard = self.dashboard()?;
                dashboard.overlay_mut().handle_surface_event(event);
                dashboard.pump_selections();
            }
            Command::ZoomIn => self.dashboard()?.overlay_mut().zoom_in(),
            Command::ZoomOut => self.dashboard()?.overlay_mut().zoom_out(),
            Command::ResetView => self.dashboard()?.overlay_mut().reset_view(),
            Command::ToggleStyle => self.dashboard()?.overlay_mut().toggle_style(),
            Command::Legend(series) => self.dashboard()?.hover_series(series),
            command => self.apply_to_screen(command)?,
        }
        Ok(Step::Render)
    }

    fn apply_to_screen(&mut self, command: Command) -> Result<()> {
        let screen = self
            .shell
            .screen_mut()
            .ok_or_else(|| ConsoleError::Command("No screen is mounted".to_string()))?;

        match (screen, command) {
            (Screen::Dashboard(dashboard), Command::Open(id)) => dashboard.open(&id)?,
            (Screen::Dashboard(dashboard), Command::Close) => dashboard.close_modal(),
            (Screen::Dashboard(dashboard), Command::Tab(id)) => {
                let tab = ModalTab::from_id(&id)
                    .ok_or_else(|| ConsoleError::Command(format!("Unknown tab: {id}")))?;
                dashboard.set_modal_tab(tab);
            }

            (Screen::Projects(queue), Command::Search(query)) => queue.set_query(&query),
            (Screen::Projects(queue), Command::Filter(raw)) => queue.set_status_filter(&raw)?,
            (Screen::Projects(queue), Command::Open(id)) => queue.open_detail(&id)?,
            (Screen::Projects(queue), Command::Close) => queue.close_detail(),
            (Screen::Projects(queue), Command::Tab(id)) => queue.set_tab(&id)?,

            (Screen::Users(queue), Command::Search(query)) => queue.set_query(&query),
            (Screen::Users(queue), Command::Filter(raw)) => queue.set_tier_filter(&raw)?,
            (Screen::Users(queue), Command::Open(id)) => queue.open_profile(&id)?,
            (Screen::Users(queue), Command::Close) => queue.close_profile(),
            (Screen::Users(queue), Command::Tab(id)) => queue.set_tab(&id)?,

            (Screen::Marketplace(market), Command::Track(id)) => market.track(&id)?,

            (Screen::Reporting(reporting), Command::Range(start, end)) => {
                reporting.set_range(&start, &end)?
            }
            (Screen::Reporting(reporting), Command::Start(raw)) => reporting.set_start(&raw)?,
            (Screen::Reporting(reporting), Command::End(raw)) => reporting.set_end(&raw)?,
            (Screen::Reporting(reporting), Command::Ecosystem(raw)) => {
                reporting.set_ecosystem_filter(&raw)?
            }
            (Screen::Reporting(reporting), Command::Region(raw)) => {
                reporting.set_region_filter(&raw)?
            }

            (screen, command) => {
                return Err(ConsoleError::Command(format!(
                    "{command:?} is not available on {}",
                    screen.view_id().label()
                )));
            }
        }
        Ok(())
    }

    fn dashboard(&mut self) -> Result<&mut crate::screens::Dashboard> {
        self.shell
            .dashboard_mut()
            .ok_or_else(|| ConsoleError::Command("The map is only on the dashboard".to_string()))
    }

    fn resize(&mut self, size: ContainerSize) {
        self.window.resize(size);
        if let Some(dashboard) = self.shell.dashboard_mut() {
            dashboard.overlay_mut().on_resize(&self.window, size);
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            shell: self.shell.view(),
            substrate: self.factory.scene(),
            resize_listeners: self.window.active(HostEventKind::Resize),
        }
    }

    /// Tear down the active screen.
    pub fn shutdown(&mut self) {
        self.shell.unmount(&mut self.window);
    }
}

/// Drive `console` until input closes or the operator quits, writing one
/// JSON snapshot per line to `out` after every applied command.
pub async fn run<W: Write>(
    mut console: Console,
    mut events: mpsc::UnboundedReceiver<ConsoleEvent>,
    out: &mut W,
) -> Result<()> {
    while let Some(event) = events.recv().await {
        match console.handle(event) {
            Ok(Step::Continue) => {}
            Ok(Step::Render) => {
                serde_json::to_writer(&mut *out, &console.snapshot())?;
                writeln!(out)?;
            }
            Ok(Step::Quit) => break,
            Err(e) => {
                warn!("{e}");
                serde_json::to_writer(&mut *out, &serde_json::json!({ "error": e.to_string() }))?;
                writeln!(out)?;
            }
        }
        out.flush()?;
    }
    console.shutdown();
    info!("Console stopped");
    Ok(())
}
