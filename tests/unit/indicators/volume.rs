use crate::fixtures::{bar, bars_from_closes};
use trendwatch::indicators::volume::{calculate_volume_ma, is_volume_confirmed};

#[test]
fn equal_volume_confirms_at_ratio_one() {
    let bars = bars_from_closes(&[10.0; 20]);
    let volume = calculate_volume_ma(&bars, 20).unwrap();
    assert_eq!(volume.volume, volume.volume_ma);
    assert!(is_volume_confirmed(&volume, 1.0));
    assert!(!is_volume_confirmed(&volume, 1.01));
}

#[test]
fn spike_is_included_in_its_own_average() {
    let mut bars = bars_from_closes(&[10.0; 19]);
    bars.push(bar(19, 10.0, 2_900_000.0));
    let volume = calculate_volume_ma(&bars, 20).unwrap();
    assert_eq!(volume.volume, 2_900_000.0);
    assert_eq!(volume.volume_ma, 1_095_000.0);
    assert!(is_volume_confirmed(&volume, 2.5));
}

#[test]
fn short_series_has_no_volume_average() {
    let bars = bars_from_closes(&[10.0; 5]);
    assert!(calculate_volume_ma(&bars, 20).is_none());
}
