//! Portfolio generation: shape, ranges and invariants.

use proptest::prelude::*;
use std::collections::HashSet;
use wealth_core::{
    error::PortfolioError,
    generator::generate,
    portfolio::{client_id, Region, Segment},
};

const EUROPE: [&str; 6] = ["CH", "DE", "FR", "IT", "UK", "LU"];
const GLOBAL: [&str; 6] = ["CH", "US", "HK", "SG", "AE", "UK"];

#[test]
fn generates_requested_number_of_clients() {
    let records = generate(100, 42, Region::Europe).unwrap();
    assert_eq!(records.len(), 100);
}

#[test]
fn client_ids_are_zero_padded_ordinals() {
    let records = generate(250, 42, Region::Europe).unwrap();
    let ids: Vec<&str> = records.iter().map(|r| r.client_id.as_str()).collect();

    assert_eq!(ids[0], "C0001");
    assert_eq!(ids[249], "C0250");
    for (i, id) in ids.iter().enumerate() {
        assert_eq!(*id, format!("C{:04}", i + 1));
    }
    let unique: HashSet<&str> = ids.iter().copied().collect();
    assert_eq!(unique.len(), ids.len(), "client ids must be unique");
}

#[test]
fn client_ids_grow_past_four_digits() {
    assert_eq!(client_id(7), "C0007");
    assert_eq!(client_id(9999), "C9999");
    assert_eq!(client_id(10_000), "C10000");
}

#[test]
fn europe_draws_only_european_countries() {
    let records = generate(500, 7, Region::Europe).unwrap();
    for r in &records {
        assert!(EUROPE.contains(&r.country.as_str()), "unexpected country {}", r.country);
    }
    let seen: HashSet<&str> = records.iter().map(|r| r.country.as_str()).collect();
    assert_eq!(seen.len(), EUROPE.len(), "500 draws should cover all six countries");
}

#[test]
fn global_draws_only_global_countries() {
    let records = generate(500, 7, Region::Global).unwrap();
    for r in &records {
        assert!(GLOBAL.contains(&r.country.as_str()), "unexpected country {}", r.country);
    }
}

#[test]
fn numeric_columns_stay_in_range_and_are_rounded() {
    let records = generate(1_000, 123, Region::Europe).unwrap();
    for r in &records {
        assert!((150_000.0..=8_000_000.0).contains(&r.aum_chf), "aum {}", r.aum_chf);
        assert_eq!(r.aum_chf.fract(), 0.0, "aum must be whole CHF");

        assert!((0.04..=0.32).contains(&r.volatility), "volatility {}", r.volatility);
        assert!((1..=14).contains(&r.advisor_id), "advisor {}", r.advisor_id);

        let scaled = r.return_ytd * 1e4;
        assert!((scaled - scaled.round()).abs() < 1e-6, "return not 4dp: {}", r.return_ytd);
        let scaled = r.sharpe_ratio * 1e2;
        assert!((scaled - scaled.round()).abs() < 1e-6, "sharpe not 2dp: {}", r.sharpe_ratio);

        for a in [r.asset_equity, r.asset_bonds, r.asset_fx, r.asset_alts] {
            assert!(a >= 0.0, "negative allocation {a}");
        }
    }
}

#[test]
fn return_and_sharpe_follow_their_normal_parameters() {
    let records = generate(5_000, 99, Region::Europe).unwrap();
    let n = records.len() as f64;
    let mean_return = records.iter().map(|r| r.return_ytd).sum::<f64>() / n;
    let mean_sharpe = records.iter().map(|r| r.sharpe_ratio).sum::<f64>() / n;

    assert!((mean_return - 0.045).abs() < 0.01, "mean return {mean_return:.4}");
    assert!((mean_sharpe - 0.9).abs() < 0.05, "mean sharpe {mean_sharpe:.3}");
    assert!(records.iter().any(|r| r.return_ytd < 0.0), "some returns should be negative");
}

#[test]
fn segment_mix_follows_weights() {
    let records = generate(10_000, 5, Region::Global).unwrap();
    let share = |seg: Segment| {
        records.iter().filter(|r| r.segment == seg).count() as f64 / records.len() as f64
    };
    assert!((share(Segment::Hnw) - 0.5).abs() < 0.03);
    assert!((share(Segment::Uhnw) - 0.2).abs() < 0.03);
    assert!((share(Segment::Affluent) - 0.3).abs() < 0.03);
}

#[test]
fn non_positive_client_count_is_rejected() {
    for n in [0, -1, -1_000] {
        let err = generate(n, 42, Region::Europe).unwrap_err();
        assert!(
            matches!(err, PortfolioError::InvalidParameter { name: "n_clients", .. }),
            "n={n}: unexpected error {err}"
        );
    }
}

#[test]
fn unknown_region_is_rejected() {
    let err = "asia".parse::<Region>().unwrap_err();
    assert!(matches!(err, PortfolioError::InvalidParameter { name: "region", .. }));
    assert_eq!("Europe".parse::<Region>().unwrap(), Region::Europe);
    assert_eq!(" GLOBAL ".parse::<Region>().unwrap(), Region::Global);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn allocations_always_sum_to_one(n in 1i64..200, seed in any::<u64>()) {
        let records = generate(n, seed, Region::Europe).unwrap();
        for r in &records {
            let total = r.allocation().total();
            prop_assert!((total - 1.0).abs() <= 0.002, "{} sums to {}", r.client_id, total);
            prop_assert!(r.allocation().is_normalized());
        }
    }

    #[test]
    fn ids_are_exhaustive_for_any_size(n in 1i64..300, seed in any::<u64>()) {
        let records = generate(n, seed, Region::Global).unwrap();
        prop_assert_eq!(records.len() as i64, n);
        for (i, r) in records.iter().enumerate() {
            prop_assert_eq!(&r.client_id, &client_id(i + 1));
        }
    }
}
