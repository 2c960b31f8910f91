use crate::fixtures::bars_from_closes;
use trendwatch::indicators::trend::{calculate_sma, calculate_sma_pair};

#[test]
fn sma_averages_the_latest_closes() {
    let bars = bars_from_closes(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    let sma = calculate_sma(&bars, 2).unwrap();
    assert_eq!(sma.value, 4.5);
    assert_eq!(sma.period, 2);
}

#[test]
fn sma_pair_requires_the_long_window() {
    let bars = bars_from_closes(&[1.0, 2.0, 3.0]);
    assert!(calculate_sma_pair(&bars, 2, 4).is_none());

    let (short, long) = calculate_sma_pair(&bars, 2, 3).unwrap();
    assert_eq!(short.value, 2.5);
    assert_eq!(long.value, 2.0);
}

#[test]
fn zero_period_sma_is_undefined() {
    let bars = bars_from_closes(&[1.0, 2.0]);
    assert!(calculate_sma(&bars, 0).is_none());
}
