//! Marketplace records: order book, verifier agencies and credit lifecycles.

use serde::{Deserialize, Serialize};

/// One price level of the order book.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderLevel {
    /// USD per credit.
    pub price: f64,
    pub volume: u64,
    /// Cumulative volume as published by the exchange.
    pub total: u64,
}

/// Resting sell (`asks`) and buy (`bids`) orders, in published order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderBook {
    pub asks: Vec<OrderLevel>,
    pub bids: Vec<OrderLevel>,
}

impl OrderBook {
    /// Lowest ask price.
    pub fn best_ask(&self) -> Option<f64> {
        self.asks.iter().map(|level| level.price).reduce(f64::min)
    }

    /// Highest bid price.
    pub fn best_bid(&self) -> Option<f64> {
        self.bids.iter().map(|level| level.price).reduce(f64::max)
    }

    /// `best_ask - best_bid`, when both sides are populated.
    pub fn spread(&self) -> Option<f64> {
        Some(self.best_ask()? - self.best_bid()?)
    }

    pub fn ask_volume(&self) -> u64 {
        self.asks.iter().map(|level| level.volume).sum()
    }

    pub fn bid_volume(&self) -> u64 {
        self.bids.iter().map(|level| level.volume).sum()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgencyStatus {
    Active,
    Pending,
}

/// An accredited third-party verifier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VerifierAgency {
    pub id: String,
    pub name: String,
    pub certifications: Vec<String>,
    /// Abbreviated wallet address as displayed.
    pub wallet_address: String,
    pub status: AgencyStatus,
    pub projects_verified: u32,
    pub date_registered: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleStage {
    Minted,
    Listed,
    Sold,
    Retired,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LifecycleStep {
    pub stage: LifecycleStage,
    pub date: String,
    pub counterparty: Option<String>,
}

/// Movement history of a credit batch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreditLifecycle {
    pub credit_id: String,
    pub steps: Vec<LifecycleStep>,
}

impl CreditLifecycle {
    pub fn is_retired(&self) -> bool {
        self.steps
            .iter()
            .any(|step| step.stage == LifecycleStage::Retired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    #[test]
    fn test_sample_book_spread() {
        let book = catalog::order_book();
        assert_eq!(book.best_ask(), Some(14.50));
        assert_eq!(book.best_bid(), Some(14.25));
        assert_eq!(book.spread(), Some(0.25));
    }

    #[test]
    fn test_empty_side_has_no_spread() {
        let book = OrderBook {
            asks: Vec::new(),
            bids: catalog::order_book().bids,
        };
        assert_eq!(book.spread(), None);
        assert_eq!(book.ask_volume(), 0);
    }

    #[test]
    fn test_sample_lifecycle_is_not_retired() {
        let lifecycle = catalog::credit_lifecycles().remove(0);
        assert!(!lifecycle.is_retired());
        assert_eq!(lifecycle.steps.len(), 3);
    }
}
