mod common;

use approx::assert_abs_diff_eq;
use bandwatch_indicator::{
    BollingerBands, Indicator, IndicatorError, MovingAverageFactory, MovingAverageType, stats,
};
use bandwatch_shared::MarketData;
use common::{bar, price_path, setup};
use strum::IntoEnumIterator;

const PERIODS: [usize; 4] = [1, 2, 5, 20];

#[test]
fn construction_validates_arguments() {
    setup();

    assert!(matches!(
        BollingerBands::new(0, 2.0, None),
        Err(IndicatorError::InvalidArgument { .. })
    ));
    assert!(matches!(
        BollingerBands::new(20, -1.0, None),
        Err(IndicatorError::InvalidArgument { .. })
    ));

    for ma_type in MovingAverageType::iter() {
        for period in PERIODS {
            let bb = BollingerBands::new(period, 0.5, Some(ma_type)).unwrap();
            assert_eq!(bb.upper(), 0.0);
            assert_eq!(bb.lower(), 0.0);
            assert!(!bb.initialized());
            assert!(!bb.has_inputs());
        }
    }
}

#[test]
fn window_bounded_and_initialized_at_period() {
    setup();

    for ma_type in MovingAverageType::iter() {
        for period in PERIODS {
            let mut bb = BollingerBands::new(period, 2.0, Some(ma_type)).unwrap();

            for (i, price) in price_path(3 * period + 5).into_iter().enumerate() {
                bb.update_raw(price + 0.5, price - 0.5, price);

                assert!(bb.window_len() <= period);
                assert!(bb.has_inputs());
                assert_eq!(bb.initialized(), i + 1 >= period, "{ma_type} period {period}");
            }
        }
    }
}

#[test]
fn middle_tracks_moving_average_and_bands_are_symmetric() {
    setup();

    for ma_type in MovingAverageType::iter() {
        let period = 6;
        let k = 1.7;
        let mut bb = BollingerBands::new(period, k, Some(ma_type)).unwrap();
        let mut ma = MovingAverageFactory::create(period, ma_type);
        let mut window: Vec<f64> = Vec::new();

        for (i, price) in price_path(40).into_iter().enumerate() {
            let (high, low) = (price + 1.0 + (i % 3) as f64, price - 1.0);
            let typical = (high + low + price) / 3.0;
            bb.update_raw(high, low, price);
            ma.update_raw(typical);

            window.push(typical);
            if window.len() > period {
                window.remove(0);
            }

            assert_eq!(bb.middle(), ma.value(), "{ma_type}");

            let std = stats::std_dev(window.iter().copied(), ma.value());
            assert_abs_diff_eq!(bb.upper() - bb.middle(), k * std, epsilon = 1e-9);
            assert_abs_diff_eq!(bb.middle() - bb.lower(), k * std, epsilon = 1e-9);
            assert!(bb.upper() >= bb.middle() && bb.middle() >= bb.lower());
        }
    }
}

#[test]
fn reset_is_idempotent_and_replay_is_deterministic() {
    setup();

    let inputs: Vec<MarketData> = price_path(30)
        .into_iter()
        .enumerate()
        .map(|(i, close)| bar(i as u64 * 60_000, 60, close + 2.0, close - 2.0, close).into())
        .collect();

    for ma_type in MovingAverageType::iter() {
        let mut bb = BollingerBands::new(8, 2.0, Some(ma_type)).unwrap();
        let first: Vec<_> = inputs.iter().cloned().map(|d| bb.update(d)).collect();

        bb.reset();
        bb.reset();
        assert_eq!(bb.value(), None);
        assert_eq!(bb.window_len(), 0);
        assert_eq!(bb.middle(), 0.0);

        let second: Vec<_> = inputs.iter().cloned().map(|d| bb.update(d)).collect();
        assert_eq!(first, second, "{ma_type}");
    }
}

#[test]
fn two_period_scenario() {
    setup();

    let mut bb = BollingerBands::new(2, 2.0, Some(MovingAverageType::Simple)).unwrap();

    bb.handle_bar(&bar(0, 60, 10.0, 10.0, 10.0));
    assert_abs_diff_eq!(bb.upper(), 10.0);
    assert_abs_diff_eq!(bb.lower(), 10.0);
    assert!(!bb.initialized());

    bb.handle_bar(&bar(60_000, 60, 20.0, 20.0, 20.0));
    assert_abs_diff_eq!(bb.middle(), 15.0);
    assert_abs_diff_eq!(bb.upper(), 25.0);
    assert_abs_diff_eq!(bb.lower(), 5.0);
    assert!(bb.initialized());
}
