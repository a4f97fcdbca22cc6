//! Client records, segments and regions.

use crate::{
    error::PortfolioError,
    types::{ClientId, CountryCode},
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Tolerance for the four allocation fractions summing to 1.0.
/// Each field is rounded to 3 dp independently, so the error can compound.
pub const ALLOCATION_SUM_TOLERANCE: f64 = 0.002;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Segment {
    #[serde(rename = "HNW")]
    Hnw,
    #[serde(rename = "UHNW")]
    Uhnw,
    #[serde(rename = "Affluent")]
    Affluent,
}

impl Segment {
    /// Draw order for the segment column. Weights in GeneratorConfig follow it.
    pub const ALL: [Segment; 3] = [Segment::Hnw, Segment::Uhnw, Segment::Affluent];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hnw      => "HNW",
            Self::Uhnw     => "UHNW",
            Self::Affluent => "Affluent",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Segment {
    type Err = PortfolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Segment::ALL
            .into_iter()
            .find(|seg| seg.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PortfolioError::invalid("segment", format!("unknown segment '{s}'")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Europe,
    Global,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Europe => "europe",
            Self::Global => "global",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Region {
    type Err = PortfolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "europe" => Ok(Self::Europe),
            "global" => Ok(Self::Global),
            other => Err(PortfolioError::invalid(
                "region",
                format!("expected 'europe' or 'global', got '{other}'"),
            )),
        }
    }
}

/// Four-way asset allocation of a client's holdings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AllocationMix {
    pub equity: f64,
    pub bonds:  f64,
    pub fx:     f64,
    pub alts:   f64,
}

impl AllocationMix {
    pub fn total(&self) -> f64 {
        self.equity + self.bonds + self.fx + self.alts
    }

    pub fn is_normalized(&self) -> bool {
        (self.total() - 1.0).abs() <= ALLOCATION_SUM_TOLERANCE
    }
}

/// One synthetic client. Immutable once generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub client_id:    ClientId,
    pub country:      CountryCode,
    pub aum_chf:      f64,
    pub return_ytd:   f64,
    pub volatility:   f64,
    pub sharpe_ratio: f64,
    pub segment:      Segment,
    pub advisor_id:   u32,
    pub asset_equity: f64,
    pub asset_bonds:  f64,
    pub asset_fx:     f64,
    pub asset_alts:   f64,
}

impl ClientRecord {
    pub fn allocation(&self) -> AllocationMix {
        AllocationMix {
            equity: self.asset_equity,
            bonds:  self.asset_bonds,
            fx:     self.asset_fx,
            alts:   self.asset_alts,
        }
    }
}

/// `C0001`-style id for the 1-based ordinal `n`.
pub fn client_id(n: usize) -> ClientId {
    format!("C{n:04}")
}
