//! Dashboard: KPI cards, credit series, activity feed and the project map.
//!
//! The dashboard is the only owner of the selected project. The map overlay
//! reports clicks on its selection channel; [`Dashboard::pump_selections`]
//! drains that channel and opens the detail modal.

use bluecarbon_registry::catalog;
use bluecarbon_registry::series::{CreditPoint, CreditSeries, FeedItem, Kpi};
use bluecarbon_registry::Project;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::debug;

use crate::errors::{ConsoleError, Result};
use crate::events::HostWindow;
use crate::modal::{self, ModalTab, ModalView};
use crate::overlay::{MapOverlay, OverlayView, ReadySignal};
use crate::surface::{BaseStyle, Container, SurfaceFactory};

const SERIES_OPACITY: f64 = 0.6;
const SERIES_OPACITY_DIMMED: f64 = 0.2;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SeriesView {
    pub series: CreditSeries,
    pub fill_opacity: f64,
    pub points: Vec<(String, u64)>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DashboardView {
    pub kpis: Vec<Kpi>,
    pub credit_series: Vec<SeriesView>,
    pub feed: Vec<FeedItem>,
    pub map: OverlayView,
    pub modal: Option<ModalView>,
}

pub struct Dashboard {
    overlay: MapOverlay,
    selections: mpsc::UnboundedReceiver<Project>,
    selected: Option<Project>,
    modal_open: bool,
    modal_tab: ModalTab,
    highlighted: Option<CreditSeries>,
    kpis: Vec<Kpi>,
    credits: Vec<CreditPoint>,
    feed: Vec<FeedItem>,
}

impl Dashboard {
    pub fn new(container: Container, projects: Vec<Project>, style: BaseStyle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Dashboard {
            overlay: MapOverlay::new(container, projects, tx).with_style(style),
            selections: rx,
            selected: None,
            modal_open: false,
            modal_tab: ModalTab::default(),
            highlighted: None,
            kpis: catalog::dashboard_kpis(),
            credits: catalog::credit_history(),
            feed: catalog::activity_feed(),
        }
    }

    pub fn mount(
        &mut self,
        factory: &mut dyn SurfaceFactory,
        window: &mut HostWindow,
    ) -> Option<ReadySignal> {
        self.overlay.initialize(factory, window)
    }

    pub fn teardown(&mut self, window: &mut HostWindow) {
        self.overlay.teardown(window);
    }

    pub fn overlay(&self) -> &MapOverlay {
        &self.overlay
    }

    pub fn overlay_mut(&mut self) -> &mut MapOverlay {
        &mut self.overlay
    }

    /// Apply every selection the overlay has reported. Returns how many.
    pub fn pump_selections(&mut self) -> usize {
        let mut count = 0;
        while let Ok(project) = self.selections.try_recv() {
            self.select(project);
            count += 1;
        }
        count
    }

    pub fn select(&mut self, project: Project) {
        debug!(project_id = %project.id, "Opening project details");
        self.selected = Some(project);
        self.modal_open = true;
        self.modal_tab = ModalTab::default();
    }

    /// Select a project by id from the catalog shown on the map.
    pub fn open(&mut self, id: &str) -> Result<()> {
        let project = self
            .overlay
            .project(id)
            .cloned()
            .ok_or_else(|| ConsoleError::NotFound(id.to_string()))?;
        self.select(project);
        Ok(())
    }

    pub fn close_modal(&mut self) {
        self.selected = None;
        self.modal_open = false;
    }

    pub fn set_modal_tab(&mut self, tab: ModalTab) {
        self.modal_tab = tab;
    }

    pub fn selected(&self) -> Option<&Project> {
        self.selected.as_ref()
    }

    pub fn modal_open(&self) -> bool {
        self.modal_open
    }

    /// Highlight one credit series in the chart legend, or none.
    pub fn hover_series(&mut self, series: Option<CreditSeries>) {
        self.highlighted = series;
    }

    fn series_opacity(&self, series: CreditSeries) -> f64 {
        match self.highlighted {
            Some(highlighted) if highlighted != series => SERIES_OPACITY_DIMMED,
            _ => SERIES_OPACITY,
        }
    }

    pub fn view(&self) -> DashboardView {
        let credit_series = [CreditSeries::Issued, CreditSeries::Retired]
            .into_iter()
            .map(|series| SeriesView {
                series,
                fill_opacity: self.series_opacity(series),
                points: self
                    .credits
                    .iter()
                    .map(|point| (point.month.clone(), point.value(series)))
                    .collect(),
            })
            .collect();

        DashboardView {
            kpis: self.kpis.clone(),
            credit_series,
            feed: self.feed.clone(),
            map: self.overlay.view(),
            modal: modal::render(self.selected.as_ref(), self.modal_open, self.modal_tab),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::ContainerSize;

    fn dashboard() -> Dashboard {
        let container = Container {
            id: "map".to_string(),
            size: ContainerSize {
                width: 800,
                height: 600,
            },
        };
        Dashboard::new(container, catalog::projects(), BaseStyle::default())
    }

    #[test]
    fn test_select_opens_and_close_clears() {
        let mut dashboard = dashboard();
        let project = catalog::projects().remove(0);
        dashboard.select(project.clone());
        assert!(dashboard.modal_open());
        assert_eq!(dashboard.selected(), Some(&project));
        assert!(dashboard.view().modal.is_some());

        dashboard.close_modal();
        assert!(!dashboard.modal_open());
        assert!(dashboard.selected().is_none());
        assert!(dashboard.view().modal.is_none());
    }

    #[test]
    fn test_open_uses_the_map_catalog() {
        let mut dashboard = dashboard();
        let mut replacement = catalog::projects().remove(1);
        replacement.id = "BC-2025-0001".to_string();
        dashboard.overlay_mut().set_catalog(vec![replacement]);

        dashboard.open("BC-2025-0001").unwrap();
        assert_eq!(dashboard.selected().map(|p| p.id.as_str()), Some("BC-2025-0001"));

        assert!(matches!(
            dashboard.open("BC-2024-0078"),
            Err(ConsoleError::NotFound(_))
        ));
    }

    #[test]
    fn test_legend_hover_dims_other_series() {
        let mut dashboard = dashboard();
        dashboard.hover_series(Some(CreditSeries::Retired));
        let view = dashboard.view();
        assert_eq!(view.credit_series[0].fill_opacity, SERIES_OPACITY_DIMMED);
        assert_eq!(view.credit_series[1].fill_opacity, SERIES_OPACITY);

        dashboard.hover_series(None);
        let view = dashboard.view();
        assert!(view
            .credit_series
            .iter()
            .all(|s| s.fill_opacity == SERIES_OPACITY));
    }

    #[test]
    fn test_map_summary_covers_catalog() {
        let view = dashboard().view();
        assert_eq!(view.map.summary.count, 3);
        assert!(view.map.placeholder.is_some());
    }
}
