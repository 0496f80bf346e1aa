//! Marketplace oversight: order book, verifier registry and credit tracking.

use bluecarbon_registry::catalog;
use bluecarbon_registry::market::{
    AgencyStatus, CreditLifecycle, LifecycleStage, OrderBook, OrderLevel, VerifierAgency,
};
use bluecarbon_registry::series::{Kpi, PricePoint, VolumePoint};
use bluecarbon_registry::types::parse_date;
use serde::Serialize;

use crate::badge::{Badge, Tone};
use crate::errors::{ConsoleError, Result};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OrderBookView {
    pub asks: Vec<OrderLevel>,
    pub bids: Vec<OrderLevel>,
    pub best_ask: Option<f64>,
    pub best_bid: Option<f64>,
    pub spread: Option<String>,
}

impl From<&OrderBook> for OrderBookView {
    fn from(book: &OrderBook) -> Self {
        OrderBookView {
            asks: book.asks.clone(),
            bids: book.bids.clone(),
            best_ask: book.best_ask(),
            best_bid: book.best_bid(),
            spread: book.spread().map(|spread| format!("${spread:.2}")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AgencyRow {
    pub id: String,
    pub name: String,
    pub certifications: Vec<String>,
    pub wallet_address: String,
    pub status: Badge,
    pub projects_verified: u32,
    pub actions: Vec<&'static str>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrackedStep {
    pub stage: LifecycleStage,
    pub label: String,
    pub date: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrackerView {
    pub credit_id: String,
    pub steps: Vec<TrackedStep>,
    pub retired: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MarketplaceView {
    pub overview: Vec<Kpi>,
    pub current_price: &'static str,
    pub price_change: &'static str,
    pub prices: Vec<PricePoint>,
    pub volumes: Vec<VolumePoint>,
    pub order_book: OrderBookView,
    pub agencies: Vec<AgencyRow>,
    pub tracker: Option<TrackerView>,
}

pub struct Marketplace {
    overview: Vec<Kpi>,
    prices: Vec<PricePoint>,
    volumes: Vec<VolumePoint>,
    book: OrderBook,
    agencies: Vec<VerifierAgency>,
    lifecycles: Vec<CreditLifecycle>,
    tracked: Option<String>,
}

impl Default for Marketplace {
    fn default() -> Self {
        Marketplace {
            overview: catalog::market_overview(),
            prices: catalog::price_history(),
            volumes: catalog::volume_history(),
            book: catalog::order_book(),
            agencies: catalog::verifier_agencies(),
            lifecycles: catalog::credit_lifecycles(),
            tracked: None,
        }
    }
}

impl Marketplace {
    /// Look up a credit batch in the lifecycle tracker.
    pub fn track(&mut self, credit_id: &str) -> Result<()> {
        let credit_id = credit_id.trim();
        if !self.lifecycles.iter().any(|l| l.credit_id == credit_id) {
            return Err(ConsoleError::NotFound(credit_id.to_string()));
        }
        self.tracked = Some(credit_id.to_string());
        Ok(())
    }

    fn tracker(&self) -> Option<TrackerView> {
        let id = self.tracked.as_deref()?;
        let lifecycle = self.lifecycles.iter().find(|l| l.credit_id == id)?;
        let steps = lifecycle
            .steps
            .iter()
            .map(|step| {
                let label = match (&step.stage, &step.counterparty) {
                    (LifecycleStage::Sold, Some(buyer)) => format!("Sold to {buyer}"),
                    (stage, _) => stage_label(*stage).to_string(),
                };
                let date = parse_date(&step.date)
                    .map(|date| date.format("%b %-d").to_string())
                    .unwrap_or_else(|_| step.date.clone());
                TrackedStep {
                    stage: step.stage,
                    label,
                    date,
                }
            })
            .collect();
        Some(TrackerView {
            credit_id: lifecycle.credit_id.clone(),
            steps,
            retired: lifecycle.is_retired(),
        })
    }

    pub fn view(&self) -> MarketplaceView {
        let agencies = self
            .agencies
            .iter()
            .map(|agency| {
                let (label, tone, actions) = match agency.status {
                    AgencyStatus::Active => ("active", Tone::Green, Vec::new()),
                    AgencyStatus::Pending => ("pending", Tone::Yellow, vec!["Approve", "Reject"]),
                };
                AgencyRow {
                    id: agency.id.clone(),
                    name: agency.name.clone(),
                    certifications: agency.certifications.clone(),
                    wallet_address: agency.wallet_address.clone(),
                    status: Badge::new(label, tone),
                    projects_verified: agency.projects_verified,
                    actions,
                }
            })
            .collect();

        MarketplaceView {
            overview: self.overview.clone(),
            current_price: "$14.25",
            price_change: "+$0.52 (+3.8%)",
            prices: self.prices.clone(),
            volumes: self.volumes.clone(),
            order_book: OrderBookView::from(&self.book),
            agencies,
            tracker: self.tracker(),
        }
    }
}

fn stage_label(stage: LifecycleStage) -> &'static str {
    match stage {
        LifecycleStage::Minted => "Minted",
        LifecycleStage::Listed => "Listed",
        LifecycleStage::Sold => "Sold",
        LifecycleStage::Retired => "Retired",
    }
}
