//! Navigation shell: one active screen at a time.
//!
//! Navigating builds the target screen fresh and tears the previous one
//! down, so screen-local state (search text, open details, the map surface)
//! never outlives its screen.

use bluecarbon_registry::Project;
use serde::Serialize;
use tracing::info;

use crate::events::HostWindow;
use crate::overlay::ReadySignal;
use crate::screens::dashboard::DashboardView;
use crate::screens::marketplace::MarketplaceView;
use crate::screens::projects::ProjectQueueView;
use crate::screens::reporting::ReportingView;
use crate::screens::users::UserQueueView;
use crate::screens::{Dashboard, Marketplace, ProjectQueue, Reporting, UserQueue};
use crate::surface::{BaseStyle, Container, SurfaceFactory};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Dashboard,
    Projects,
    Users,
    Marketplace,
    Reporting,
}

impl View {
    pub const ALL: [View; 5] = [
        Self::Dashboard,
        Self::Projects,
        Self::Users,
        Self::Marketplace,
        Self::Reporting,
    ];

    /// Parse a view identifier. Unknown identifiers fall back to the dashboard.
    pub fn from_id(id: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|view| view.as_str() == id.trim())
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Projects => "projects",
            Self::Users => "users",
            Self::Marketplace => "marketplace",
            Self::Reporting => "reporting",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Projects => "Project Management",
            Self::Users => "User Management",
            Self::Marketplace => "Marketplace",
            Self::Reporting => "Reporting",
        }
    }
}

pub enum Screen {
    Dashboard(Dashboard),
    Projects(ProjectQueue),
    Users(UserQueue),
    Marketplace(Marketplace),
    Reporting(Reporting),
}

impl Screen {
    pub fn view_id(&self) -> View {
        match self {
            Self::Dashboard(_) => View::Dashboard,
            Self::Projects(_) => View::Projects,
            Self::Users(_) => View::Users,
            Self::Marketplace(_) => View::Marketplace,
            Self::Reporting(_) => View::Reporting,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub id: &'static str,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum ScreenView {
    Dashboard(DashboardView),
    Projects(ProjectQueueView),
    Users(UserQueueView),
    Marketplace(MarketplaceView),
    Reporting(ReportingView),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ShellView {
    pub nav: Vec<NavItem>,
    pub screen: Option<ScreenView>,
}

pub struct Shell {
    container: Container,
    style: BaseStyle,
    projects: Vec<Project>,
    screen: Option<Screen>,
}

impl Shell {
    pub fn new(container: Container, style: BaseStyle, projects: Vec<Project>) -> Self {
        Shell {
            container,
            style,
            projects,
            screen: None,
        }
    }

    pub fn active(&self) -> Option<View> {
        self.screen.as_ref().map(Screen::view_id)
    }

    /// Switch to `view`. Returns the map's ready signal when the dashboard is mounted.
    pub fn navigate(
        &mut self,
        view: View,
        factory: &mut dyn SurfaceFactory,
        window: &mut HostWindow,
    ) -> Option<ReadySignal> {
        if self.active() == Some(view) {
            return None;
        }
        self.unmount(window);

        if let Some(size) = window.size() {
            self.container.size = size;
        }
        info!(view = view.as_str(), "Switching view");
        let (screen, ready) = match view {
            View::Dashboard => {
                let mut dashboard =
                    Dashboard::new(self.container.clone(), self.projects.clone(), self.style);
                let ready = dashboard.mount(factory, window);
                (Screen::Dashboard(dashboard), ready)
            }
            View::Projects => (Screen::Projects(ProjectQueue::default()), None),
            View::Users => (Screen::Users(UserQueue::default()), None),
            View::Marketplace => (Screen::Marketplace(Marketplace::default()), None),
            View::Reporting => (Screen::Reporting(Reporting::default()), None),
        };
        self.screen = Some(screen);
        ready
    }

    /// Tear down the active screen, if any.
    pub fn unmount(&mut self, window: &mut HostWindow) {
        if let Some(Screen::Dashboard(mut dashboard)) = self.screen.take() {
            // Keep the user's base style choice across visits.
            self.style = dashboard.overlay().style();
            dashboard.teardown(window);
        }
    }

    pub fn screen_mut(&mut self) -> Option<&mut Screen> {
        self.screen.as_mut()
    }

    pub fn dashboard_mut(&mut self) -> Option<&mut Dashboard> {
        match &mut self.screen {
            Some(Screen::Dashboard(dashboard)) => Some(dashboard),
            _ => None,
        }
    }

    pub fn view(&self) -> ShellView {
        let active = self.active();
        let nav = View::ALL
            .into_iter()
            .map(|view| NavItem {
                id: view.as_str(),
                label: view.label(),
                active: active == Some(view),
            })
            .collect();
        let screen = self.screen.as_ref().map(|screen| match screen {
            Screen::Dashboard(s) => ScreenView::Dashboard(s.view()),
            Screen::Projects(s) => ScreenView::Projects(s.view()),
            Screen::Users(s) => ScreenView::Users(s.view()),
            Screen::Marketplace(s) => ScreenView::Marketplace(s.view()),
            Screen::Reporting(s) => ScreenView::Reporting(s.view()),
        });
        ShellView { nav, screen }
    }
}
