//! Synthetic portfolio generation.
//!
//! DRAW ORDER (fixed, documented, never reordered):
//!   1. country        uniform over the region's candidate set
//!   2. aum_chf        uniform
//!   3. return_ytd     normal
//!   4. volatility     uniform
//!   5. sharpe_ratio   normal
//!   6. segment        weighted categorical
//!   7. advisor_id     uniform integer, inclusive
//!   8. asset_equity, asset_bonds, asset_fx, asset_alts   uniform
//!
//! Each column is drawn for the whole population before the next one
//! starts. Reordering any step changes every generated portfolio.

use crate::{
    config::{GeneratorConfig, UniformRange},
    error::{PortfolioError, PortfolioResult},
    portfolio::{client_id, ClientRecord, Region, Segment},
    rng::PortfolioRng,
    types::{round_to, Seed},
};

/// Generate `n_clients` records with the built-in parameters.
pub fn generate(n_clients: i64, seed: Seed, region: Region) -> PortfolioResult<Vec<ClientRecord>> {
    generate_with(&GeneratorConfig::default(), n_clients, seed, region)
}

/// Generate `n_clients` records with the given parameters.
pub fn generate_with(
    config: &GeneratorConfig,
    n_clients: i64,
    seed: Seed,
    region: Region,
) -> PortfolioResult<Vec<ClientRecord>> {
    if n_clients <= 0 {
        return Err(PortfolioError::invalid(
            "n_clients",
            format!("must be positive, got {n_clients}"),
        ));
    }
    let n = usize::try_from(n_clients)
        .map_err(|_| PortfolioError::invalid("n_clients", format!("{n_clients} exceeds usize")))?;
    config.validate()?;

    let mut rng = PortfolioRng::new(seed);
    let round = config.rounding;

    let candidates = config.countries_for(region);
    let countries: Vec<&str> = (0..n)
        .map(|_| candidates[rng.choose_index(candidates.len())].as_str())
        .collect();

    let aum = uniform_column(&mut rng, config.aum_chf, n, round.aum);
    let returns: Vec<f64> = (0..n)
        .map(|_| round_to(rng.normal(config.return_ytd.mean, config.return_ytd.std_dev), round.return_ytd))
        .collect();
    let volatility = uniform_column(&mut rng, config.volatility, n, round.volatility);
    let sharpe: Vec<f64> = (0..n)
        .map(|_| round_to(rng.normal(config.sharpe_ratio.mean, config.sharpe_ratio.std_dev), round.sharpe))
        .collect();

    let weights = config.weights();
    let segments: Vec<Segment> = (0..n)
        .map(|_| config.segment_weights[rng.weighted_index(&weights)].segment)
        .collect();

    let advisors: Vec<u32> = (0..n)
        .map(|_| rng.int_inclusive(config.advisor_id_min, config.advisor_id_max))
        .collect();

    let alloc = config.allocation;
    let equity = uniform_column(&mut rng, alloc.equity, n, round.allocation_raw);
    let bonds  = uniform_column(&mut rng, alloc.bonds,  n, round.allocation_raw);
    let fx     = uniform_column(&mut rng, alloc.fx,     n, round.allocation_raw);
    let alts   = uniform_column(&mut rng, alloc.alts,   n, round.allocation_raw);

    let records: Vec<ClientRecord> = (0..n)
        .map(|i| {
            // Row sum is strictly positive: the equity range starts above zero.
            let total = equity[i] + bonds[i] + fx[i] + alts[i];
            let share = |x: f64| round_to(x / total, round.allocation_normalized);
            ClientRecord {
                client_id:    client_id(i + 1),
                country:      countries[i].to_string(),
                aum_chf:      aum[i],
                return_ytd:   returns[i],
                volatility:   volatility[i],
                sharpe_ratio: sharpe[i],
                segment:      segments[i],
                advisor_id:   advisors[i],
                asset_equity: share(equity[i]),
                asset_bonds:  share(bonds[i]),
                asset_fx:     share(fx[i]),
                asset_alts:   share(alts[i]),
            }
        })
        .collect();

    log::debug!(
        "generator: seed={seed} region={region} generated {} clients",
        records.len()
    );
    Ok(records)
}

fn uniform_column(rng: &mut PortfolioRng, range: UniformRange, n: usize, decimals: u32) -> Vec<f64> {
    (0..n)
        .map(|_| round_to(rng.uniform(range.low, range.high), decimals))
        .collect()
}
