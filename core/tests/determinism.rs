//! Same (n_clients, seed, region) must always produce the same portfolio.

use wealth_core::{generator::generate, portfolio::Region, summary::summarize};

#[test]
fn same_seed_produces_identical_portfolios() {
    let a = generate(100, 42, Region::Europe).expect("first run");
    let b = generate(100, 42, Region::Europe).expect("second run");

    assert_eq!(a.len(), b.len());
    for (i, (ra, rb)) in a.iter().zip(b.iter()).enumerate() {
        assert_eq!(ra, rb, "portfolio diverged at row {i}");
    }

    // Bit-level check on the float columns.
    let bits = |rs: &[wealth_core::portfolio::ClientRecord]| -> Vec<u64> {
        rs.iter()
            .flat_map(|r| [r.aum_chf, r.return_ytd, r.volatility, r.sharpe_ratio, r.asset_equity])
            .map(f64::to_bits)
            .collect()
    };
    assert_eq!(bits(&a), bits(&b));
}

#[test]
fn different_seeds_produce_different_portfolios() {
    let a = generate(100, 42, Region::Europe).unwrap();
    let b = generate(100, 99, Region::Europe).unwrap();
    assert!(a != b, "different seeds produced identical portfolios, seed is not being used");
}

#[test]
fn region_changes_only_the_country_set() {
    let europe = generate(50, 42, Region::Europe).unwrap();
    let global = generate(50, 42, Region::Global).unwrap();

    // Draw order is identical, so every non-country column matches.
    for (e, g) in europe.iter().zip(global.iter()) {
        assert_eq!(e.aum_chf, g.aum_chf);
        assert_eq!(e.segment, g.segment);
        assert_eq!(e.asset_alts, g.asset_alts);
    }
}

#[test]
fn summary_is_idempotent_over_the_same_snapshot() {
    let records = generate(300, 8, Region::Global).unwrap();
    let first = summarize(&records).unwrap();
    let second = summarize(&records).unwrap();
    assert_eq!(first, second);
}
