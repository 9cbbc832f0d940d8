//! End-to-end tests for credit curve construction.
//!
//! Quotes are generated from a known yield curve so that the solved yields
//! and interpolated tenor points can be checked against it.

use approx::assert_relative_eq;
use proptest::prelude::*;

use bondcurve_bonds::cashflows::CashFlowSchedule;
use bondcurve_bonds::pricing::compute_npv;
use bondcurve_core::{year_fraction, Date, MaturityType};
use bondcurve_curves::prelude::*;

// =============================================================================
// TEST DATA
// =============================================================================

fn as_of() -> Date {
    Date::from_ymd(2024, 3, 15).unwrap()
}

/// Quote whose price reproduces `yield_value` exactly.
fn quote(id: &str, coupon: f64, maturity: Date, yield_value: f64) -> BondQuote {
    let years = year_fraction(as_of(), maturity);
    let schedule = CashFlowSchedule::generate(100.0, coupon, years).unwrap();
    let price = compute_npv(schedule.flows(), yield_value).unwrap();
    BondQuote::new(id, coupon, maturity, price)
}

/// A small issuer curve, unsorted, with one callable and one matured bond.
fn issuer_quotes() -> Vec<BondQuote> {
    vec![
        quote("IBM 4.15 2039", 0.0415, Date::from_ymd(2039, 5, 15).unwrap(), 0.0540),
        quote("IBM 3.30 2026", 0.0330, Date::from_ymd(2026, 5, 15).unwrap(), 0.0500),
        quote("IBM 4.00 2042", 0.0400, Date::from_ymd(2042, 6, 20).unwrap(), 0.0555),
        quote("IBM 3.45 2029", 0.0345, Date::from_ymd(2029, 2, 19).unwrap(), 0.0505),
        quote("IBM 4.25 2049", 0.0425, Date::from_ymd(2049, 5, 15).unwrap(), 0.0565),
        quote("IBM 2.20 2027", 0.0220, Date::from_ymd(2027, 2, 9).unwrap(), 0.0498),
        quote("IBM 7.00 2025 CALL", 0.0700, Date::from_ymd(2025, 10, 30).unwrap(), 0.0900)
            .with_maturity_type(MaturityType::Callable),
        BondQuote::new("IBM 1.88 2022", 0.01875, Date::from_ymd(2022, 8, 1).unwrap(), 100.0),
        quote("IBM 4.90 2052", 0.0490, Date::from_ymd(2052, 7, 27).unwrap(), 0.0570),
        quote("IBM 5.60 2039", 0.0560, Date::from_ymd(2039, 11, 30).unwrap(), 0.0545),
    ]
}

// =============================================================================
// CONSTRUCTION
// =============================================================================

#[test]
fn builds_sorted_observations_and_skips_matured_bond() {
    let build = YieldCurveBuilder::new().build(&issuer_quotes(), as_of()).unwrap();

    assert_eq!(build.observations.len(), 9);
    assert_eq!(build.skipped.len(), 1);
    assert_eq!(build.skipped[0].bond_id, "IBM 1.88 2022");

    assert!(build
        .observations
        .windows(2)
        .all(|w| w[0].maturity_years <= w[1].maturity_years));

    let ten_year = build
        .observations
        .iter()
        .find(|o| o.bond_id == "IBM 4.15 2039")
        .unwrap();
    assert_relative_eq!(ten_year.yield_value, 0.0540, epsilon = 1e-8);
}

#[test]
fn abort_policy_stops_on_matured_bond() {
    let result = YieldCurveBuilder::new()
        .with_failure_policy(FailurePolicy::Abort)
        .build(&issuer_quotes(), as_of());

    assert!(matches!(
        result,
        Err(CurveError::BondFailed { ref bond_id, .. }) if bond_id == "IBM 1.88 2022"
    ));
}

#[test]
fn standard_grid_strict_and_available() {
    let build = YieldCurveBuilder::new().build(&issuer_quotes(), as_of()).unwrap();

    // Shortest bullet matures in ~2.2y, longest in ~28.4y
    assert!(matches!(
        build.interpolate(&TenorGrid::standard()),
        Err(CurveError::TenorOutOfRange { .. })
    ));

    let table = build.interpolate_available(&TenorGrid::standard()).unwrap();
    let covered: Vec<&str> = table.points.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(covered, vec!["3y", "5y", "7y", "10y", "20y"]);
    assert_eq!(table.out_of_range.len(), 8);

    // Every covered yield lies within the range of the anchors
    for point in &table.points {
        assert!(point.yield_value > 0.049 && point.yield_value < 0.058, "{point:?}");
    }
}

#[test]
fn callable_bond_does_not_bend_the_curve() {
    let mut quotes = issuer_quotes();
    let with_callable = YieldCurveBuilder::new().build(&quotes, as_of()).unwrap();

    quotes.retain(|q| q.maturity_type.is_bullet());
    let without_callable = YieldCurveBuilder::new().build(&quotes, as_of()).unwrap();

    let grid = TenorGrid::from_labels(&["3y", "5y", "10y"]).unwrap();
    let a = with_callable.interpolate(&grid).unwrap();
    let b = without_callable.interpolate(&grid).unwrap();
    assert_eq!(a, b);
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn prop_interpolation_between_anchors(
        y1 in 0.0f64..0.15,
        y2 in 0.0f64..0.15,
        m1 in 1u32..120,
        gap in 1u32..240,
        step in 0u32..=240,
    ) {
        let k = step % (gap + 1);
        let anchor = |id: &str, months: u32, yield_value: f64| YieldObservation {
            bond_id: id.to_string(),
            maturity_date: as_of(),
            maturity_years: f64::from(months) / 12.0,
            yield_value,
            maturity_type: MaturityType::AtMaturity,
        };
        let observations = vec![anchor("lo", m1, y1), anchor("hi", m1 + gap, y2)];

        let labels = [format!("{m1}m"), format!("{}m", m1 + k), format!("{}m", m1 + gap)];
        let grid = TenorGrid::from_labels(&labels).unwrap();
        let points = interpolate(&observations, &grid).unwrap();

        // Exact at the anchors, linear in between
        prop_assert!((points[0].yield_value - y1).abs() < 1e-12);
        prop_assert!((points[2].yield_value - y2).abs() < 1e-12);

        let expected = y1 + (y2 - y1) * f64::from(k) / f64::from(gap);
        prop_assert!((points[1].yield_value - expected).abs() < 1e-12);
        prop_assert!(points[1].yield_value >= y1.min(y2) - 1e-12);
        prop_assert!(points[1].yield_value <= y1.max(y2) + 1e-12);
    }

    #[test]
    fn prop_solved_yields_round_trip(
        coupon in 0.0f64..0.1,
        years in 1u32..40,
        yield_value in 0.001f64..0.12,
    ) {
        let maturity = as_of().add_years(years as i32).unwrap();
        let q = quote("P", coupon, maturity, yield_value);

        let observation = YieldCurveBuilder::new().observe(&q, as_of()).unwrap();

        prop_assert!((observation.yield_value - yield_value).abs() < 1e-6);
    }
}
