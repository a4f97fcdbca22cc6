//! Derived views the dashboard renders next to the summary: the KPI
//! strip, the segment distribution, the average allocation and the
//! risk / return scatter.

use crate::{
    portfolio::{AllocationMix, ClientRecord, Segment},
    types::ClientId,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiPanel {
    pub total_aum_chf: f64,
    pub avg_return_ytd: f64,
    pub avg_sharpe_ratio: f64,
    pub n_clients: usize,
}

/// Display strings for the KPI strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiDisplay {
    pub total_aum: String,
    pub avg_return: String,
    pub avg_sharpe: String,
    pub n_clients: String,
}

impl KpiPanel {
    /// `None` when the view is empty.
    pub fn from_records<'a, I>(records: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a ClientRecord>,
    {
        let (mut n, mut aum, mut ret, mut sharpe) = (0usize, 0.0, 0.0, 0.0);
        for r in records {
            n += 1;
            aum += r.aum_chf;
            ret += r.return_ytd;
            sharpe += r.sharpe_ratio;
        }
        if n == 0 {
            return None;
        }
        Some(Self {
            total_aum_chf: aum,
            avg_return_ytd: ret / n as f64,
            avg_sharpe_ratio: sharpe / n as f64,
            n_clients: n,
        })
    }

    pub fn formatted(&self) -> KpiDisplay {
        KpiDisplay {
            total_aum: thousands(self.total_aum_chf),
            avg_return: format!("{:.2}%", self.avg_return_ytd * 100.0),
            avg_sharpe: format!("{:.2}", self.avg_sharpe_ratio),
            n_clients: self.n_clients.to_string(),
        }
    }
}

/// Whole-number amount with comma thousands separators, e.g. `1,234,568`.
pub fn thousands(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if rounded < 0.0 {
        out.insert(0, '-');
    }
    out
}

/// Client counts per segment, largest first; ties keep first-seen order.
pub fn segment_distribution<'a, I>(records: I) -> Vec<(Segment, usize)>
where
    I: IntoIterator<Item = &'a ClientRecord>,
{
    let mut counts: Vec<(Segment, usize)> = Vec::new();
    for r in records {
        match counts.iter_mut().find(|(seg, _)| *seg == r.segment) {
            Some((_, c)) => *c += 1,
            None => counts.push((r.segment, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Column means of the four allocation fractions.
pub fn average_allocation<'a, I>(records: I) -> Option<AllocationMix>
where
    I: IntoIterator<Item = &'a ClientRecord>,
{
    let mut n = 0usize;
    let mut sum = AllocationMix { equity: 0.0, bonds: 0.0, fx: 0.0, alts: 0.0 };
    for r in records {
        n += 1;
        sum.equity += r.asset_equity;
        sum.bonds  += r.asset_bonds;
        sum.fx     += r.asset_fx;
        sum.alts   += r.asset_alts;
    }
    if n == 0 {
        return None;
    }
    let n = n as f64;
    Some(AllocationMix {
        equity: sum.equity / n,
        bonds:  sum.bonds / n,
        fx:     sum.fx / n,
        alts:   sum.alts / n,
    })
}

/// One point of the risk / return scatter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReturnPoint {
    pub client_id: ClientId,
    pub volatility: f64,
    pub return_ytd: f64,
    pub segment: Segment,
}

/// Per-client (volatility, return) points coloured by segment, in view order.
pub fn risk_return_points<'a, I>(records: I) -> Vec<RiskReturnPoint>
where
    I: IntoIterator<Item = &'a ClientRecord>,
{
    records
        .into_iter()
        .map(|r| RiskReturnPoint {
            client_id: r.client_id.clone(),
            volatility: r.volatility,
            return_ytd: r.return_ytd,
            segment: r.segment,
        })
        .collect()
}
