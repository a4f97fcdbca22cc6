//! Aggregated KPIs and grouped breakdowns over a set of client records.
//!
//! A summary has no identity of its own: it is rebuilt from the current
//! view on every filter change and dropped after use. Rounding happens
//! only here, never on the underlying records.

use crate::{
    error::{PortfolioError, PortfolioResult},
    portfolio::{ClientRecord, Segment},
    types::{round_to, CountryCode},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;

pub const AUM_DECIMALS: u32 = 2;
pub const RETURN_DECIMALS: u32 = 4;
pub const VOLATILITY_DECIMALS: u32 = 4;
pub const SHARPE_DECIMALS: u32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentBreakdown {
    pub segment: Segment,
    pub aum_chf: f64,
    pub return_ytd: f64,
    pub volatility: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryBreakdown {
    pub country: CountryCode,
    pub aum_chf: f64,
    pub return_ytd: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_aum_chf: f64,
    pub avg_return_ytd: f64,
    pub avg_volatility: f64,
    pub avg_sharpe_ratio: f64,
    pub segment_view: Vec<SegmentBreakdown>,
    pub country_view: Vec<CountryBreakdown>,
    pub n_clients: usize,
}

impl PortfolioSummary {
    /// Nested JSON mapping handed to the narrative service.
    pub fn to_json(&self) -> PortfolioResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Running sums for one group. Groups remember the order they were first seen.
#[derive(Default)]
struct GroupTotals {
    count: usize,
    aum: f64,
    return_ytd: f64,
    volatility: f64,
}

impl GroupTotals {
    fn add(&mut self, r: &ClientRecord) {
        self.count += 1;
        self.aum += r.aum_chf;
        self.return_ytd += r.return_ytd;
        self.volatility += r.volatility;
    }

    fn mean_return(&self) -> f64 {
        self.return_ytd / self.count as f64
    }

    fn mean_volatility(&self) -> f64 {
        self.volatility / self.count as f64
    }
}

/// Partition by `key`, keeping first-encountered order, then stable-sort
/// by summed AUM descending so ties keep that order.
fn group_by<'a, K, F>(records: &[&'a ClientRecord], key: F) -> Vec<(K, GroupTotals)>
where
    K: Eq + Hash + Clone,
    F: Fn(&'a ClientRecord) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, GroupTotals)> = Vec::new();
    for &r in records {
        let k = key(r);
        let slot = *index.entry(k.clone()).or_insert_with(|| {
            groups.push((k, GroupTotals::default()));
            groups.len() - 1
        });
        groups[slot].1.add(r);
    }
    groups.sort_by(|a, b| b.1.aum.total_cmp(&a.1.aum));
    groups
}

/// Build the summary for `records`.
///
/// Returns `PortfolioError::EmptyInput` when there is nothing to
/// aggregate; callers substitute their own "no data" message.
pub fn summarize<'a, I>(records: I) -> PortfolioResult<PortfolioSummary>
where
    I: IntoIterator<Item = &'a ClientRecord>,
{
    let records: Vec<&ClientRecord> = records.into_iter().collect();
    if records.is_empty() {
        return Err(PortfolioError::EmptyInput);
    }
    let n = records.len() as f64;

    let total_aum: f64 = records.iter().map(|r| r.aum_chf).sum();
    let avg_return = records.iter().map(|r| r.return_ytd).sum::<f64>() / n;
    let avg_volatility = records.iter().map(|r| r.volatility).sum::<f64>() / n;
    let avg_sharpe = records.iter().map(|r| r.sharpe_ratio).sum::<f64>() / n;

    let segment_view = group_by(&records, |r| r.segment)
        .into_iter()
        .map(|(segment, g)| SegmentBreakdown {
            segment,
            aum_chf: round_to(g.aum, AUM_DECIMALS),
            return_ytd: round_to(g.mean_return(), RETURN_DECIMALS),
            volatility: round_to(g.mean_volatility(), VOLATILITY_DECIMALS),
        })
        .collect();

    let country_view = group_by(&records, |r| r.country.as_str())
        .into_iter()
        .map(|(country, g)| CountryBreakdown {
            country: country.to_string(),
            aum_chf: round_to(g.aum, AUM_DECIMALS),
            return_ytd: round_to(g.mean_return(), RETURN_DECIMALS),
        })
        .collect();

    Ok(PortfolioSummary {
        total_aum_chf: round_to(total_aum, AUM_DECIMALS),
        avg_return_ytd: round_to(avg_return, RETURN_DECIMALS),
        avg_volatility: round_to(avg_volatility, VOLATILITY_DECIMALS),
        avg_sharpe_ratio: round_to(avg_sharpe, SHARPE_DECIMALS),
        segment_view,
        country_view,
        n_clients: records.len(),
    })
}
