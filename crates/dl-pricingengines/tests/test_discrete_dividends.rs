//! Regression fixtures for options on a stock paying discrete dividends.
//!
//! Spot 25, rate 5%, vol 30%, valued on 2023-11-22. Dates are turned into
//! Actual/365 year fractions. Reference prices are quoted to three decimals
//! and checked to within 5% relative error.

use chrono::NaiveDate;
use dl_instruments::{
    Dividend, DividendSchedule, ExerciseType, OptionType, PricingEngine, PricingRequest, PricingResults,
};
use dl_pricingengines::{BinomialDividendEngine, DividendSplitEngine};

const SPOT: f64 = 25.0;
const RATE: f64 = 0.05;
const VOL: f64 = 0.3;
const TOLERANCE: f64 = 0.05;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn valuation_date() -> NaiveDate {
    date(2023, 11, 22)
}

/// Actual/365 year fraction from the valuation date.
fn years_to(d: NaiveDate) -> f64 {
    (d - valuation_date()).num_days() as f64 / 365.0
}

fn schedule(divs: &[(NaiveDate, f64)]) -> DividendSchedule {
    divs.iter().map(|&(d, a)| Dividend::new(years_to(d), a)).collect()
}

struct Case {
    expiry: NaiveDate,
    dividends: Vec<(NaiveDate, f64)>,
    /// `(strike, call, put)` reference prices.
    prices: [(f64, f64, f64); 3],
}

fn american_cases() -> Vec<Case> {
    vec![
        Case {
            expiry: date(2024, 2, 14),
            dividends: vec![],
            prices: [(23.0, 2.788, 0.532), (25.0, 1.573, 1.311), (27.0, 0.788, 2.538)],
        },
        Case {
            expiry: date(2024, 7, 15),
            dividends: vec![(date(2024, 2, 15), 0.8)],
            prices: [(23.0, 3.394, 1.442), (25.0, 2.35, 2.419), (27.0, 1.581, 3.668)],
        },
        Case {
            expiry: date(2024, 12, 15),
            dividends: vec![(date(2024, 2, 15), 0.8), (date(2024, 8, 15), 0.8)],
            prices: [(23.0, 3.862, 2.129), (25.0, 2.889, 3.164), (27.0, 2.135, 4.402)],
        },
    ]
}

fn request(
    exercise: ExerciseType,
    option_type: OptionType,
    strike: f64,
    expiry: NaiveDate,
    dividends: DividendSchedule,
    steps: usize,
) -> PricingRequest {
    PricingRequest::builder(exercise, option_type, SPOT, strike)
        .volatility(VOL)
        .time_to_expiry(years_to(expiry))
        .rate(RATE)
        .dividends(dividends)
        .steps(steps)
        .build()
        .unwrap()
}

fn assert_close_to(label: &str, actual: f64, expected: f64) {
    let rel = ((actual - expected) / expected).abs();
    assert!(
        rel < TOLERANCE,
        "{label}: expected {expected}, got {actual:.6} ({:.2}% off)",
        rel * 100.0
    );
}

fn check_american_fixtures(engine: &dyn PricingEngine<PricingRequest>, name: &str) {
    for case in american_cases() {
        let divs = schedule(&case.dividends);
        for (strike, call, put) in case.prices {
            for (option_type, expected) in [(OptionType::Call, call), (OptionType::Put, put)] {
                let args = request(
                    ExerciseType::American,
                    option_type,
                    strike,
                    case.expiry,
                    divs.clone(),
                    100,
                );
                let npv = engine.calculate(&args).unwrap().npv;
                let label = format!(
                    "{name} {option_type} K={strike} expiry {} with {} dividends",
                    case.expiry,
                    divs.len()
                );
                assert_close_to(&label, npv, expected);
            }
        }
    }
}

// ─── American fixtures ────────────────────────────────────────────────────────

#[test]
fn test_bucketed_engine_american_fixtures() {
    check_american_fixtures(&BinomialDividendEngine::default(), "bucketed");
}

#[test]
fn test_split_engine_american_fixtures() {
    check_american_fixtures(&DividendSplitEngine::default(), "split");
}

#[test]
fn test_deep_in_the_money_put_with_zero_dividend_entry() {
    let divs = schedule(&[(date(2023, 12, 15), 0.8), (date(2024, 7, 15), 0.0)]);
    let args = request(
        ExerciseType::American,
        OptionType::Put,
        100.0,
        date(2024, 12, 15),
        divs,
        200,
    );
    let npv = BinomialDividendEngine::default().calculate(&args).unwrap().npv;
    assert_close_to("deep ITM put", npv, 75.2798);
}

// ─── European fixtures with a continuous yield ────────────────────────────────

#[test]
fn test_european_fixtures_with_continuous_yield() {
    let cases: [(NaiveDate, [(f64, f64, f64); 3]); 3] = [
        (
            date(2024, 2, 14),
            [(23.0, 2.721, 0.545), (25.0, 1.526, 1.326), (27.0, 0.758, 2.535)],
        ),
        (
            date(2024, 7, 15),
            [(23.0, 3.716, 1.225), (25.0, 2.638, 2.084), (27.0, 1.813, 3.196)],
        ),
        (
            date(2024, 12, 15),
            [(23.0, 4.466, 1.669), (25.0, 3.444, 2.543), (27.0, 2.616, 3.611)],
        ),
    ];
    let engine = BinomialDividendEngine::default();
    for (expiry, prices) in cases {
        for (strike, call, put) in prices {
            for (option_type, expected) in [(OptionType::Call, call), (OptionType::Put, put)] {
                let args = PricingRequest::builder(ExerciseType::European, option_type, SPOT, strike)
                    .volatility(VOL)
                    .time_to_expiry(years_to(expiry))
                    .rate(RATE)
                    .dividend_yield(0.015)
                    .steps(170)
                    .build()
                    .unwrap();
                let npv = engine.calculate(&args).unwrap().npv;
                assert_close_to(&format!("European {option_type} K={strike} {expiry}"), npv, expected);
            }
        }
    }
}

// ─── Dividend handling ────────────────────────────────────────────────────────

#[test]
fn test_dividend_at_or_after_expiry_is_ignored() {
    let expiry = date(2024, 7, 15);
    let engine = BinomialDividendEngine::default();
    let base = schedule(&[(date(2024, 2, 15), 0.8)]);
    let with_late = schedule(&[
        (date(2024, 2, 15), 0.8),
        (expiry, 0.8),
        (date(2024, 9, 1), 1.5),
    ]);

    for option_type in [OptionType::Call, OptionType::Put] {
        let a = engine
            .calculate(&request(ExerciseType::American, option_type, 25.0, expiry, base.clone(), 100))
            .unwrap();
        let b = engine
            .calculate(&request(ExerciseType::American, option_type, 25.0, expiry, with_late.clone(), 100))
            .unwrap();
        assert_eq!(a.npv, b.npv, "{option_type}");
        assert_eq!(b.result("dividends_dropped"), Some(2.0));
    }
}

#[test]
fn test_dividend_before_valuation_is_ignored() {
    let expiry = date(2024, 7, 15);
    let engine = BinomialDividendEngine::default();
    let with_past = schedule(&[(date(2023, 11, 1), 0.8)]);
    let a = engine
        .calculate(&request(ExerciseType::American, OptionType::Put, 25.0, expiry, DividendSchedule::new(), 100))
        .unwrap();
    let b = engine
        .calculate(&request(ExerciseType::American, OptionType::Put, 25.0, expiry, with_past, 100))
        .unwrap();
    assert_eq!(a.npv, b.npv);
}

#[test]
fn test_schedule_order_does_not_matter() {
    let expiry = date(2024, 12, 15);
    let forward = schedule(&[(date(2024, 2, 15), 0.8), (date(2024, 8, 15), 0.5)]);
    let backward = schedule(&[(date(2024, 8, 15), 0.5), (date(2024, 2, 15), 0.8)]);
    for engine in [
        &BinomialDividendEngine::default() as &dyn PricingEngine<PricingRequest>,
        &DividendSplitEngine::default(),
    ] {
        let a = engine
            .calculate(&request(ExerciseType::American, OptionType::Call, 23.0, expiry, forward.clone(), 60))
            .unwrap();
        let b = engine
            .calculate(&request(ExerciseType::American, OptionType::Call, 23.0, expiry, backward.clone(), 60))
            .unwrap();
        assert_eq!(a.npv, b.npv, "{engine:?}");
    }
}

#[test]
fn test_parallel_schedule_input() {
    let times = [years_to(date(2024, 2, 15)), years_to(date(2024, 8, 15))];
    let from_parallel = DividendSchedule::from_parallel(&times, &[0.8, 0.8]).unwrap();
    let from_pairs = schedule(&[(date(2024, 2, 15), 0.8), (date(2024, 8, 15), 0.8)]);
    assert_eq!(from_parallel, from_pairs);
    assert!(DividendSchedule::from_parallel(&times, &[0.8]).unwrap_err().is_input_error());
}

#[test]
fn test_root_price_reproduces_spot_with_many_dividends() {
    // Quarterly dividends over two years.
    let divs: DividendSchedule = (1..=8).map(|q| Dividend::new(0.25 * q as f64 - 0.1, 0.3)).collect();
    let args = PricingRequest::builder(ExerciseType::American, OptionType::Put, SPOT, 25.0)
        .volatility(VOL)
        .time_to_expiry(2.0)
        .rate(RATE)
        .dividends(divs)
        .steps(500)
        .build()
        .unwrap();
    let results: PricingResults = BinomialDividendEngine::default().calculate(&args).unwrap();
    assert!((results.result("root_price").unwrap() - SPOT).abs() < 1e-8);
    assert_eq!(results.result("dividends_applied"), Some(8.0));
}
