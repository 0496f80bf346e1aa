//! Reporting: static impact series narrowed by date range, ecosystem and region.

use bluecarbon_registry::catalog;
use bluecarbon_registry::filter::Filter;
use bluecarbon_registry::queue::Ecosystem;
use bluecarbon_registry::series::{
    EngagementPoint, Region, RegionShare, ReportType, SequestrationPoint, TransactionPoint,
};
use bluecarbon_registry::types::parse_date;
use chrono::NaiveDate;
use serde::Serialize;

use crate::errors::{ConsoleError, Result};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EcosystemSeries {
    pub ecosystem: Ecosystem,
    pub label: &'static str,
    pub points: Vec<(String, u64)>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReportingView {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub ecosystem_filter: String,
    pub region_filter: String,
    pub report_types: Vec<ReportType>,
    pub sequestration: Vec<EcosystemSeries>,
    pub regions: Vec<RegionShare>,
    pub engagement: Vec<EngagementPoint>,
    pub transactions: Vec<TransactionPoint>,
}

pub struct Reporting {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    ecosystem: Filter<Ecosystem>,
    region: Filter<Region>,
    sequestration: Vec<SequestrationPoint>,
    regions: Vec<RegionShare>,
    engagement: Vec<EngagementPoint>,
    transactions: Vec<TransactionPoint>,
    report_types: Vec<ReportType>,
}

impl Default for Reporting {
    fn default() -> Self {
        Reporting {
            start: None,
            end: None,
            ecosystem: Filter::All,
            region: Filter::All,
            sequestration: catalog::sequestration_history(),
            regions: catalog::regional_distribution(),
            engagement: catalog::engagement_history(),
            transactions: catalog::transaction_history(),
            report_types: catalog::report_types(),
        }
    }
}

impl Reporting {
    /// Set both ends of the range. `none` clears an end.
    pub fn set_range(&mut self, start: &str, end: &str) -> Result<()> {
        let start = parse_bound(start)?;
        let end = parse_bound(end)?;
        check_range(start, end)?;
        self.start = start;
        self.end = end;
        Ok(())
    }

    pub fn set_start(&mut self, raw: &str) -> Result<()> {
        let start = parse_bound(raw)?;
        check_range(start, self.end)?;
        self.start = start;
        Ok(())
    }

    pub fn set_end(&mut self, raw: &str) -> Result<()> {
        let end = parse_bound(raw)?;
        check_range(self.start, end)?;
        self.end = end;
        Ok(())
    }

    /// `all`, `mangrove`, `seagrass` or `saltmarsh`.
    pub fn set_ecosystem_filter(&mut self, raw: &str) -> Result<()> {
        self.ecosystem = raw.trim().parse()?;
        Ok(())
    }

    /// `all` or a region identifier such as `asia`.
    pub fn set_region_filter(&mut self, raw: &str) -> Result<()> {
        self.region = raw.trim().parse()?;
        Ok(())
    }

    pub fn view(&self) -> ReportingView {
        let sequestration = Ecosystem::ALL
            .into_iter()
            .filter(|ecosystem| self.ecosystem.admits(ecosystem))
            .map(|ecosystem| EcosystemSeries {
                ecosystem,
                label: ecosystem.label(),
                points: self
                    .sequestration
                    .iter()
                    .map(|point| (point.month.clone(), point.value(ecosystem)))
                    .collect(),
            })
            .collect();
        let regions = self
            .regions
            .iter()
            .filter(|share| self.region.admits(&share.region))
            .cloned()
            .collect();

        ReportingView {
            start: self.start,
            end: self.end,
            ecosystem_filter: self.ecosystem.to_string(),
            region_filter: self.region.to_string(),
            report_types: self.report_types.clone(),
            sequestration,
            regions,
            engagement: self.engagement.clone(),
            transactions: self.transactions.clone(),
        }
    }
}

fn parse_bound(raw: &str) -> Result<Option<NaiveDate>> {
    match raw.trim() {
        "" | "none" => Ok(None),
        date => Ok(Some(parse_date(date)?)),
    }
}

fn check_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<()> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(ConsoleError::DateRange(format!(
            "end {end} is before start {start}"
        ))),
        _ => Ok(()),
    }
}
