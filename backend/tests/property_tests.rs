//! Property-based checks of the closed-form evaluators.

use proptest::prelude::*;
use umoja_sim::models::{
    AdvertisingScenario, PricingMode, PricingSchedule, PricingTier, ProfitModel,
    SeasonalityModel,
};

/// Random valid tier tables: 1..4 bounded tiers plus the open-ended last one.
fn schedule_strategy() -> impl Strategy<Value = PricingSchedule> {
    (
        prop::collection::vec((0.5f64..20.0, 0.0f64..100.0), 1..4),
        0.0f64..100.0,
    )
        .prop_map(|(bounded, last_rate)| {
            let mut threshold = 0.0;
            let mut tiers: Vec<PricingTier> = bounded
                .into_iter()
                .map(|(width, rate)| {
                    threshold += width;
                    PricingTier::new(threshold, rate)
                })
                .collect();
            tiers.push(PricingTier::unbounded(last_rate));
            PricingSchedule::new(tiers, PricingMode::Graduated).unwrap()
        })
}

proptest! {
    #[test]
    fn graduated_pricing_is_non_decreasing(
        schedule in schedule_strategy(),
        a in 0.0f64..100.0,
        b in 0.0f64..100.0,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(schedule.cost(lo).unwrap() <= schedule.cost(hi).unwrap() + 1e-9);
    }

    #[test]
    fn graduated_slope_matches_marginal_rate(
        schedule in schedule_strategy(),
        h in 0.0f64..80.0,
    ) {
        // Step well inside a bracket so the secant equals the bracket rate.
        let rate = schedule.marginal_rate(h).unwrap();
        let next_boundary = schedule
            .boundaries()
            .into_iter()
            .find(|b| *b > h)
            .unwrap_or(f64::INFINITY);
        let step = ((next_boundary - h) / 2.0).min(1.0);
        prop_assume!(step > 1e-3);
        let slope = (schedule.cost(h + step).unwrap() - schedule.cost(h).unwrap()) / step;
        prop_assert!((slope - rate).abs() < 1e-6);
    }

    #[test]
    fn reach_is_monotone_and_bounded(
        max_reach in 0.0f64..1e6,
        growth in 0.0f64..1.0,
        a in 0.0f64..1e4,
        b in 0.0f64..1e4,
    ) {
        let scenario = AdvertisingScenario::new(0.0, max_reach, growth).unwrap();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let r_lo = scenario.reach(lo).unwrap();
        let r_hi = scenario.reach(hi).unwrap();
        prop_assert!(r_lo <= r_hi);
        prop_assert!(r_hi <= max_reach);
    }

    #[test]
    fn profit_optimum_is_local_maximum(
        fixed in 0.0f64..10_000.0,
        variable in 0.0f64..200.0,
        price in 0.0f64..500.0,
        scaling in 0.01f64..5.0,
    ) {
        let model = ProfitModel::new(fixed, variable, price, scaling).unwrap();
        let n = model.optimal_students().unwrap();
        let best = model.profit(n).unwrap();
        prop_assert!(best >= model.profit(n + 1.0).unwrap() - 1e-9);
        if n >= 1.0 {
            prop_assert!(best >= model.profit(n - 1.0).unwrap() - 1e-9);
        }
    }

    #[test]
    fn break_even_roots_are_zeros(
        fixed in 1.0f64..10_000.0,
        variable in 0.0f64..200.0,
        price in 0.0f64..500.0,
        scaling in 0.0f64..5.0,
    ) {
        let model = ProfitModel::new(fixed, variable, price, scaling).unwrap();
        for root in model.break_even() {
            prop_assert!(root > 0.0);
            let scale = model.revenue(root).unwrap().max(fixed);
            prop_assert!(model.profit(root).unwrap().abs() <= 1e-7 * scale);
        }
    }

    #[test]
    fn enrollment_is_periodic(
        baseline in -100.0f64..100.0,
        amplitude in -50.0f64..50.0,
        period in 0.5f64..24.0,
        phase in -3.0f64..3.0,
        harmonic in prop::option::of((-30.0f64..30.0, 1u32..6, -3.0f64..3.0)),
        t in -100.0f64..100.0,
    ) {
        let mut model = SeasonalityModel::new(baseline, amplitude, period, phase).unwrap();
        if let Some((h_amplitude, cycles, h_phase)) = harmonic {
            model = model
                .with_harmonic(h_amplitude, period / f64::from(cycles), h_phase)
                .unwrap();
        }
        let a = model.enrollment(t).unwrap();
        let b = model.enrollment(t + period).unwrap();
        prop_assert!((a - b).abs() < 1e-6);
    }

    #[test]
    fn harmonic_off_the_period_grid_is_rejected(
        period in 0.5f64..24.0,
        cycles in 1u32..6,
        offset in 0.05f64..0.45,
    ) {
        // period / harmonic_period lands strictly between two whole numbers.
        let harmonic_period = period / (f64::from(cycles) + offset);
        let model = SeasonalityModel::new(50.0, 20.0, period, 0.0).unwrap();
        prop_assert!(model.with_harmonic(10.0, harmonic_period, 0.0).is_err());
    }
}
