use crate::{
    error::{PortfolioError, PortfolioResult},
    portfolio::{Region, Segment},
    types::CountryCode,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Half-open range [low, high) for a uniform draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UniformRange {
    pub low: f64,
    pub high: f64,
}

impl UniformRange {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalParams {
    pub mean: f64,
    pub std_dev: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionCountries {
    pub europe: Vec<CountryCode>,
    pub global: Vec<CountryCode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentWeight {
    pub segment: Segment,
    pub weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AllocationRanges {
    pub equity: UniformRange,
    pub bonds: UniformRange,
    pub fx: UniformRange,
    pub alts: UniformRange,
}

/// Decimal places applied to each generated column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneratorRounding {
    pub aum: u32,
    pub return_ytd: u32,
    pub volatility: u32,
    pub sharpe: u32,
    pub allocation_raw: u32,
    pub allocation_normalized: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub countries: RegionCountries,
    pub aum_chf: UniformRange,
    pub return_ytd: NormalParams,
    pub volatility: UniformRange,
    pub sharpe_ratio: NormalParams,
    pub segment_weights: Vec<SegmentWeight>,
    pub advisor_id_min: u32,
    pub advisor_id_max: u32,
    pub allocation: AllocationRanges,
    pub rounding: GeneratorRounding,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let codes = |cs: &[&str]| cs.iter().map(|c| c.to_string()).collect::<Vec<_>>();
        Self {
            countries: RegionCountries {
                europe: codes(&["CH", "DE", "FR", "IT", "UK", "LU"]),
                global: codes(&["CH", "US", "HK", "SG", "AE", "UK"]),
            },
            aum_chf: UniformRange::new(150_000.0, 8_000_000.0),
            return_ytd: NormalParams { mean: 0.045, std_dev: 0.07 },
            volatility: UniformRange::new(0.04, 0.32),
            sharpe_ratio: NormalParams { mean: 0.9, std_dev: 0.35 },
            segment_weights: vec![
                SegmentWeight { segment: Segment::Hnw,      weight: 0.5 },
                SegmentWeight { segment: Segment::Uhnw,     weight: 0.2 },
                SegmentWeight { segment: Segment::Affluent, weight: 0.3 },
            ],
            advisor_id_min: 1,
            advisor_id_max: 14,
            allocation: AllocationRanges {
                equity: UniformRange::new(0.15, 0.85),
                bonds:  UniformRange::new(0.05, 0.60),
                fx:     UniformRange::new(0.0, 0.25),
                alts:   UniformRange::new(0.0, 0.25),
            },
            rounding: GeneratorRounding {
                aum: 0,
                return_ytd: 4,
                volatility: 4,
                sharpe: 2,
                allocation_raw: 4,
                allocation_normalized: 3,
            },
        }
    }
}

impl GeneratorConfig {
    /// Load from a JSON file such as `data/generator.json`.
    /// In tests, use GeneratorConfig::default().
    pub fn load(path: impl AsRef<Path>) -> PortfolioResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| PortfolioError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: GeneratorConfig = serde_json::from_str(&content)?;
        config.validate()?;
        log::debug!("generator config loaded from {}", path.display());
        Ok(config)
    }

    pub fn countries_for(&self, region: Region) -> &[CountryCode] {
        match region {
            Region::Europe => &self.countries.europe,
            Region::Global => &self.countries.global,
        }
    }

    pub fn weights(&self) -> Vec<f64> {
        self.segment_weights.iter().map(|w| w.weight).collect()
    }

    pub fn validate(&self) -> PortfolioResult<()> {
        if self.countries.europe.is_empty() || self.countries.global.is_empty() {
            return Err(PortfolioError::Config("country sets must not be empty".into()));
        }

        let ranges = [
            ("aum_chf", self.aum_chf),
            ("volatility", self.volatility),
            ("allocation.equity", self.allocation.equity),
            ("allocation.bonds", self.allocation.bonds),
            ("allocation.fx", self.allocation.fx),
            ("allocation.alts", self.allocation.alts),
        ];
        for (name, r) in ranges {
            if !(r.low.is_finite() && r.high.is_finite()) || r.high <= r.low {
                return Err(PortfolioError::Config(format!(
                    "{name}: range [{}, {}) is empty",
                    r.low, r.high
                )));
            }
        }
        if self.aum_chf.low <= 0.0 {
            return Err(PortfolioError::Config("aum_chf must be positive".into()));
        }
        if self.volatility.low < 0.0 {
            return Err(PortfolioError::Config("volatility must be non-negative".into()));
        }
        let alloc = &self.allocation;
        if [alloc.bonds.low, alloc.fx.low, alloc.alts.low].iter().any(|l| *l < 0.0) {
            return Err(PortfolioError::Config("allocation ranges must be non-negative".into()));
        }
        // Normalization divides by the row sum; equity alone keeps it positive.
        if alloc.equity.low <= 0.0 {
            return Err(PortfolioError::Config(
                "allocation.equity lower bound must be strictly positive".into(),
            ));
        }

        for p in [self.return_ytd, self.sharpe_ratio] {
            if !p.mean.is_finite() || !p.std_dev.is_finite() || p.std_dev < 0.0 {
                return Err(PortfolioError::Config(format!(
                    "normal params mean={} std_dev={} are invalid",
                    p.mean, p.std_dev
                )));
            }
        }

        if self.segment_weights.is_empty() {
            return Err(PortfolioError::Config("segment_weights must not be empty".into()));
        }
        if self.segment_weights.iter().any(|w| w.weight < 0.0) {
            return Err(PortfolioError::Config("segment weights must be non-negative".into()));
        }
        let total: f64 = self.segment_weights.iter().map(|w| w.weight).sum();
        if (total - 1.0).abs() > 1e-6 {
            return Err(PortfolioError::Config(format!(
                "segment weights sum to {total}, expected 1.0"
            )));
        }

        if self.advisor_id_min == 0 || self.advisor_id_max < self.advisor_id_min {
            return Err(PortfolioError::Config(format!(
                "advisor id range [{}, {}] is invalid",
                self.advisor_id_min, self.advisor_id_max
            )));
        }
        Ok(())
    }
}
