//! portfolio-runner: headless report over a synthetic wealth portfolio.
//!
//! Usage:
//!   portfolio-runner --clients 1289 --seed 42 --region europe
//!   portfolio-runner --segment UHNW --country CH --lang de --insights
//!   portfolio-runner --config data/generator.json --json
//!   portfolio-runner --country LU --records

mod narrator;

use anyhow::Result;
use narrator::{ChatCompletionsNarrator, NarratorSettings};
use serde::Serialize;
use std::env;
use wealth_core::{
    cache::DatasetCache,
    config::GeneratorConfig,
    dashboard::{
        average_allocation, risk_return_points, segment_distribution, thousands, KpiDisplay,
        KpiPanel, RiskReturnPoint,
    },
    error::PortfolioError,
    filter::{ClientFilter, FilterOptions},
    narrative::{portfolio_insights, Language, NarrativeRequest, NO_MATCHING_CLIENTS},
    portfolio::{AllocationMix, ClientRecord, Region, Segment},
    summary::{summarize, PortfolioSummary},
};

#[derive(Serialize)]
struct Report<'a> {
    generated_at: String,
    n_clients: i64,
    seed: u64,
    region: Region,
    segment_filter: String,
    country_filter: String,
    options: ReportOptions,
    kpis: Option<KpiDisplay>,
    segment_distribution: Vec<(Segment, usize)>,
    average_allocation: Option<AllocationMix>,
    risk_return: Vec<RiskReturnPoint>,
    summary: Option<PortfolioSummary>,
    message: Option<&'static str>,
    /// Filtered client rows, only with --records.
    #[serde(skip_serializing_if = "Option::is_none")]
    records: Option<Vec<&'a ClientRecord>>,
}

#[derive(Serialize)]
struct ReportOptions {
    segments: Vec<String>,
    countries: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let n_clients = parse_arg(&args, "--clients", 1289i64);
    let seed = parse_arg(&args, "--seed", 42u64);
    let region: Region = str_arg(&args, "--region").unwrap_or("europe").parse()?;
    let segment_arg = str_arg(&args, "--segment").unwrap_or("All");
    let country_arg = str_arg(&args, "--country").unwrap_or("All");
    let language = Language::from_code(str_arg(&args, "--lang").unwrap_or("en"));
    let json_mode = args.iter().any(|a| a == "--json");
    let insights = args.iter().any(|a| a == "--insights");
    let with_records = args.iter().any(|a| a == "--records");

    let config = match str_arg(&args, "--config") {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };

    let filter = ClientFilter {
        segment: segment_arg.parse()?,
        country: country_arg.parse()?,
    };

    let mut cache = DatasetCache::new(config);
    let portfolio = cache.get_or_generate(n_clients, seed, region)?;
    let view = filter.apply(&portfolio);
    log::info!(
        "portfolio: {} clients generated, {} after filter",
        portfolio.len(),
        view.len()
    );

    let summary = match summarize(view.iter().copied()) {
        Ok(s) => Some(s),
        Err(PortfolioError::EmptyInput) => None,
        Err(e) => return Err(e.into()),
    };

    let options = FilterOptions::from_records(&portfolio);
    let report = Report {
        generated_at: chrono::Utc::now().to_rfc3339(),
        n_clients,
        seed,
        region,
        segment_filter: segment_arg.to_string(),
        country_filter: country_arg.to_string(),
        options: ReportOptions {
            segments: options.segments,
            countries: options.countries,
        },
        kpis: KpiPanel::from_records(view.iter().copied()).map(|k| k.formatted()),
        segment_distribution: segment_distribution(view.iter().copied()),
        average_allocation: average_allocation(view.iter().copied()),
        risk_return: risk_return_points(view.iter().copied()),
        message: summary.is_none().then_some(NO_MATCHING_CLIENTS),
        summary,
        records: with_records.then(|| view.clone()),
    };

    if json_mode {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if insights {
        println!();
        println!("=== AI PORTFOLIO INSIGHTS ({}) ===", language.name());
        match NarratorSettings::from_env() {
            Some(settings) => {
                let narrator = ChatCompletionsNarrator::new(settings)?;
                match portfolio_insights(view.iter().copied(), language, &narrator) {
                    Ok(text) => println!("{text}"),
                    Err(e) => {
                        log::warn!("narrative generation failed: {e}");
                        println!("  (commentary unavailable: {e})");
                    }
                }
            }
            None => print_dry_run(report.summary.as_ref(), language)?,
        }
    }

    Ok(())
}

fn print_report(report: &Report) {
    println!("Wealth AI Dashboard: portfolio-runner");
    println!("  generated: {}", report.generated_at);
    println!("  clients:   {}", report.n_clients);
    println!("  seed:      {}", report.seed);
    println!("  region:    {}", report.region);
    println!("  segment:   {}", report.segment_filter);
    println!("  country:   {}", report.country_filter);
    println!();

    let (Some(kpis), Some(summary)) = (&report.kpis, &report.summary) else {
        println!("{}", report.message.unwrap_or(NO_MATCHING_CLIENTS));
        return;
    };

    println!("=== PORTFOLIO KPIs ===");
    println!("  Total AUM (CHF):       {}", kpis.total_aum);
    println!("  Average YTD return:    {}", kpis.avg_return);
    println!("  Average Sharpe ratio:  {}", kpis.avg_sharpe);
    println!("  Number of clients:     {}", kpis.n_clients);
    println!();

    println!("=== CLIENT DISTRIBUTION BY SEGMENT ===");
    for (segment, count) in &report.segment_distribution {
        println!("  {segment:<9} {count}");
    }
    println!();

    if let Some(mix) = &report.average_allocation {
        println!("=== AVERAGE ASSET ALLOCATION ===");
        println!("  Equity:        {:.1}%", mix.equity * 100.0);
        println!("  Bonds:         {:.1}%", mix.bonds * 100.0);
        println!("  FX:            {:.1}%", mix.fx * 100.0);
        println!("  Alternatives:  {:.1}%", mix.alts * 100.0);
        println!();
    }

    println!("=== BY SEGMENT ===");
    for row in &summary.segment_view {
        println!(
            "  {:<9} AUM: {:>16} | Return: {:>7.2}% | Vol: {:>6.2}%",
            row.segment,
            thousands(row.aum_chf),
            row.return_ytd * 100.0,
            row.volatility * 100.0
        );
    }
    println!();

    println!("=== BY COUNTRY ===");
    for row in &summary.country_view {
        println!(
            "  {:<9} AUM: {:>16} | Return: {:>7.2}%",
            row.country,
            thousands(row.aum_chf),
            row.return_ytd * 100.0
        );
    }

    if let Some(records) = &report.records {
        println!();
        println!("=== RAW DATA ({} clients) ===", records.len());
        println!(
            "  {:<7} {:<3} {:>12} {:>8} {:>7} {:>6} {:<9} {:>3} {:>6} {:>6} {:>6} {:>6}",
            "client", "cty", "aum_chf", "ret_ytd", "vol", "sharpe", "segment", "adv",
            "equity", "bonds", "fx", "alts"
        );
        for r in records {
            println!(
                "  {:<7} {:<3} {:>12} {:>8.4} {:>7.4} {:>6.2} {:<9} {:>3} {:>6.3} {:>6.3} {:>6.3} {:>6.3}",
                r.client_id,
                r.country,
                thousands(r.aum_chf),
                r.return_ytd,
                r.volatility,
                r.sharpe_ratio,
                r.segment,
                r.advisor_id,
                r.asset_equity,
                r.asset_bonds,
                r.asset_fx,
                r.asset_alts
            );
        }
    }
}

/// No API key: show what would have been sent.
fn print_dry_run(summary: Option<&PortfolioSummary>, language: Language) -> Result<()> {
    let Some(summary) = summary else {
        println!("{NO_MATCHING_CLIENTS}");
        return Ok(());
    };
    log::warn!("OPENAI_API_KEY not set, printing the prompt instead of calling the service");
    let request = NarrativeRequest::from_summary(summary, language)?;
    println!("--- system ---");
    println!("{}", request.system_prompt);
    println!("--- user ---");
    println!("{}", request.user_prompt);
    Ok(())
}

fn str_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    match str_arg(args, flag) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("{flag}: cannot parse '{raw}', using default");
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_arg_reads_present_flag() {
        let a = args(&["portfolio-runner", "--clients", "250", "--seed", "7"]);
        assert_eq!(parse_arg(&a, "--clients", 1289i64), 250);
        assert_eq!(parse_arg(&a, "--seed", 42u64), 7);
    }

    #[test]
    fn parse_arg_falls_back_on_missing_or_malformed_value() {
        let a = args(&["portfolio-runner", "--clients", "abc"]);
        assert_eq!(parse_arg(&a, "--clients", 1289i64), 1289);
        assert_eq!(parse_arg(&a, "--seed", 42u64), 42);
    }

    #[test]
    fn str_arg_takes_value_after_flag() {
        let a = args(&["portfolio-runner", "--region", "global", "--records"]);
        assert_eq!(str_arg(&a, "--region"), Some("global"));
        assert_eq!(str_arg(&a, "--records"), None);
    }
}
