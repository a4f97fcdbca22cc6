//! Non-destructive selections over a portfolio.
//!
//! Filtering never copies or mutates records: a filtered view is a
//! vector of borrows into the original slice, which stays available
//! for re-filtering.

use crate::{
    error::PortfolioError,
    portfolio::{ClientRecord, Segment},
    types::CountryCode,
};
use std::{collections::BTreeSet, str::FromStr};

pub const ALL_LABEL: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: PartialEq> Selection<T> {
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }
}

impl FromStr for Selection<Segment> {
    type Err = PortfolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(ALL_LABEL) {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

impl FromStr for Selection<CountryCode> {
    type Err = PortfolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(ALL_LABEL) {
            return Ok(Self::All);
        }
        if s.is_empty() {
            return Err(PortfolioError::invalid("country", "must not be empty"));
        }
        Ok(Self::Only(s.to_ascii_uppercase()))
    }
}

/// Segment and country predicates, combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientFilter {
    pub segment: Selection<Segment>,
    pub country: Selection<CountryCode>,
}

impl ClientFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_segment(mut self, segment: Segment) -> Self {
        self.segment = Selection::Only(segment);
        self
    }

    pub fn with_country(mut self, country: impl Into<CountryCode>) -> Self {
        self.country = Selection::Only(country.into());
        self
    }

    pub fn matches(&self, record: &ClientRecord) -> bool {
        self.segment.admits(&record.segment) && self.country.admits(&record.country)
    }

    pub fn apply<'a>(&self, records: &'a [ClientRecord]) -> Vec<&'a ClientRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Selector entries offered to the dashboard: "All" first, then the
/// distinct values present in the data, sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOptions {
    pub segments: Vec<String>,
    pub countries: Vec<String>,
}

impl FilterOptions {
    pub fn from_records(records: &[ClientRecord]) -> Self {
        let segments: BTreeSet<&str> = records.iter().map(|r| r.segment.as_str()).collect();
        let countries: BTreeSet<&str> = records.iter().map(|r| r.country.as_str()).collect();
        let with_all = |values: BTreeSet<&str>| -> Vec<String> {
            std::iter::once(ALL_LABEL)
                .chain(values)
                .map(str::to_string)
                .collect()
        };
        Self {
            segments: with_all(segments),
            countries: with_all(countries),
        }
    }
}
