//! Prompt construction for the portfolio commentary.
//!
//! Text generation itself is an external service behind the
//! NarrativeService trait. This module only decides what to ask and
//! when not to ask at all.

use crate::{
    error::{PortfolioError, PortfolioResult},
    portfolio::ClientRecord,
    summary::{summarize, PortfolioSummary},
};
use serde::{Deserialize, Serialize};

/// Returned instead of calling the service when the view is empty.
pub const NO_MATCHING_CLIENTS: &str =
    "No clients match the current filters. Please broaden the selection.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    De,
    Fr,
    It,
    Es,
}

impl Language {
    pub const ALL: [Language; 5] = [Self::En, Self::De, Self::Fr, Self::It, Self::Es];

    /// Unknown codes fall back to English.
    pub fn from_code(code: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|l| l.code().eq_ignore_ascii_case(code.trim()))
            .unwrap_or(Self::En)
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::De => "de",
            Self::Fr => "fr",
            Self::It => "it",
            Self::Es => "es",
        }
    }

    /// English name of the language, as used in the prompt.
    pub fn name(&self) -> &'static str {
        match self {
            Self::En => "English",
            Self::De => "German",
            Self::Fr => "French",
            Self::It => "Italian",
            Self::Es => "Spanish",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    pub language: Language,
}

impl NarrativeRequest {
    pub fn from_summary(summary: &PortfolioSummary, language: Language) -> PortfolioResult<Self> {
        let system_prompt = format!(
            "You are a wealth management reporting analyst. \
             Given aggregated portfolio data, you write short, structured commentary \
             for internal dashboards. You never give investment advice or recommendations. \
             You only describe patterns in the data and possible operational follow-ups. \
             Write in {}.",
            language.name()
        );

        let user_prompt = format!(
            "You are given portfolio summary data for a filtered client set in a private banking context.\n\n\
             DATA (JSON):\n{}\n\n\
             Write a concise narrative (max 10-12 sentences) with:\n\
             1) A high-level overview of the filtered portfolio (size, return, risk).\n\
             2) A comparison of client segments and which ones drive AUM and performance.\n\
             3) A brief view by country (if relevant).\n\
             4) Any notable patterns, concentrations, or outliers that might be worth a follow-up from RM or management.\n\n\
             Keep the tone factual and neutral. Do not give investment advice. Do not speculate about the future.",
            summary.to_json()?
        );

        Ok(Self {
            system_prompt,
            user_prompt,
            language,
        })
    }
}

/// An opaque text generator: structured summary in, prose out.
/// Implementations may block; they should honour their own timeout.
pub trait NarrativeService {
    fn generate(&self, request: &NarrativeRequest) -> anyhow::Result<String>;
}

/// Commentary for the current view.
///
/// An empty view never reaches the service: the fixed
/// NO_MATCHING_CLIENTS message is returned instead.
pub fn portfolio_insights<'a, I, S>(
    records: I,
    language: Language,
    service: &S,
) -> PortfolioResult<String>
where
    I: IntoIterator<Item = &'a ClientRecord>,
    S: NarrativeService + ?Sized,
{
    let summary = match summarize(records) {
        Ok(summary) => summary,
        Err(PortfolioError::EmptyInput) => {
            log::info!("narrative: empty selection, skipping service call");
            return Ok(NO_MATCHING_CLIENTS.to_string());
        }
        Err(e) => return Err(e),
    };

    let request = NarrativeRequest::from_summary(&summary, language)?;
    log::debug!(
        "narrative: requesting commentary lang={} n_clients={}",
        language.code(),
        summary.n_clients
    );
    let text = service
        .generate(&request)
        .map_err(|e| PortfolioError::Narrative(format!("{e:#}")))?;
    Ok(text.trim().to_string())
}
