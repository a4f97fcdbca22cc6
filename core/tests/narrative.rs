//! Prompt construction and the empty-selection short circuit.

use std::cell::{Cell, RefCell};
use wealth_core::{
    error::PortfolioError,
    filter::ClientFilter,
    generator::generate,
    narrative::{portfolio_insights, Language, NarrativeRequest, NarrativeService, NO_MATCHING_CLIENTS},
    portfolio::Region,
    summary::summarize,
};

#[derive(Default)]
struct RecordingService {
    calls: Cell<usize>,
    last: RefCell<Option<NarrativeRequest>>,
}

impl NarrativeService for RecordingService {
    fn generate(&self, request: &NarrativeRequest) -> anyhow::Result<String> {
        self.calls.set(self.calls.get() + 1);
        *self.last.borrow_mut() = Some(request.clone());
        Ok("  The portfolio is concentrated in HNW clients.\n".into())
    }
}

struct FailingService;

impl NarrativeService for FailingService {
    fn generate(&self, _request: &NarrativeRequest) -> anyhow::Result<String> {
        anyhow::bail!("request timed out")
    }
}

#[test]
fn empty_selection_never_calls_the_service() {
    let records = generate(100, 42, Region::Europe).unwrap();
    let view = ClientFilter::all().with_country("US").apply(&records);
    let service = RecordingService::default();

    let text = portfolio_insights(view.iter().copied(), Language::En, &service).unwrap();

    assert_eq!(text, NO_MATCHING_CLIENTS);
    assert_eq!(service.calls.get(), 0);
}

#[test]
fn non_empty_selection_calls_service_once_and_trims() {
    let records = generate(100, 42, Region::Europe).unwrap();
    let service = RecordingService::default();

    let text = portfolio_insights(&records, Language::De, &service).unwrap();

    assert_eq!(text, "The portfolio is concentrated in HNW clients.");
    assert_eq!(service.calls.get(), 1);
    let request = service.last.borrow().clone().unwrap();
    assert_eq!(request.language, Language::De);
    assert!(request.system_prompt.contains("Write in German."));
}

#[test]
fn prompt_embeds_summary_and_guardrails() {
    let records = generate(60, 5, Region::Global).unwrap();
    let summary = summarize(&records).unwrap();
    let request = NarrativeRequest::from_summary(&summary, Language::Fr).unwrap();

    assert!(request.system_prompt.contains("never give investment advice"));
    assert!(request.system_prompt.contains("French"));
    assert!(request.user_prompt.contains("\"n_clients\": 60"));
    assert!(request.user_prompt.contains("\"segment_view\""));
    assert!(request.user_prompt.contains("max 10-12 sentences"));
}

#[test]
fn service_failure_surfaces_as_narrative_error() {
    let records = generate(10, 1, Region::Europe).unwrap();
    let err = portfolio_insights(&records, Language::En, &FailingService).unwrap_err();
    match err {
        PortfolioError::Narrative(msg) => assert!(msg.contains("timed out"), "{msg}"),
        other => panic!("expected narrative error, got {other}"),
    }
}

#[test]
fn language_codes_fall_back_to_english() {
    assert_eq!(Language::from_code("de"), Language::De);
    assert_eq!(Language::from_code("IT"), Language::It);
    assert_eq!(Language::from_code("es").name(), "Spanish");
    assert_eq!(Language::from_code("pt"), Language::En);
    assert_eq!(Language::from_code(""), Language::En);
    assert_eq!(Language::default().name(), "English");
}
