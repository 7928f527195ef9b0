use super::*;

fn three_tier(mode: PricingMode) -> PricingSchedule {
    PricingSchedule::new(
        vec![
            PricingTier::new(10.0, 30.0),
            PricingTier::new(20.0, 28.0),
            PricingTier::unbounded(25.0),
        ],
        mode,
    )
    .unwrap()
}

#[test]
fn test_graduated_cost_spans_brackets() {
    let schedule = three_tier(PricingMode::Graduated);
    // 10 h at 30 + 5 h at 28
    assert!((schedule.cost(15.0).unwrap() - 440.0).abs() < 1e-9);
    // 10 at 30 + 10 at 28 + 5 at 25
    assert!((schedule.cost(25.0).unwrap() - 705.0).abs() < 1e-9);
}

#[test]
fn test_zero_hours_costs_nothing() {
    let schedule = PricingSchedule::standard();
    assert_eq!(schedule.cost(0.0).unwrap(), 0.0);
    let quote = schedule.quote(0.0).unwrap();
    assert_eq!(quote.effective_rate, 30.0);
    assert_eq!(quote.tier_index, 0);
}

#[test]
fn test_negative_hours_rejected() {
    let err = PricingSchedule::standard().cost(-1.0).unwrap_err();
    assert!(err.is_invalid_input());
    assert_eq!(err.context().parameter.as_deref(), Some("hours"));
}

#[test]
fn test_volume_mode_bills_every_hour_at_active_rate() {
    let schedule = PricingSchedule::standard().with_mode(PricingMode::Volume);
    assert!((schedule.cost(8.0).unwrap() - 224.0).abs() < 1e-9);
    assert!((schedule.cost(12.0).unwrap() - 300.0).abs() < 1e-9);
    // boundary belongs to the lower tier
    assert!((schedule.cost(5.0).unwrap() - 150.0).abs() < 1e-9);
}

#[test]
fn test_graduated_default_schedule() {
    let schedule = PricingSchedule::standard();
    // 5*30 + 3*28
    assert!((schedule.cost(8.0).unwrap() - 234.0).abs() < 1e-9);
    let quote = schedule.quote(8.0).unwrap();
    assert_eq!(quote.tier_label, "Tier 2 (Bulk Rate)");
    assert!((quote.effective_rate - 29.25).abs() < 1e-9);
    assert_eq!(quote.marginal_rate, 28.0);
}

#[test]
fn test_curve_slope_matches_tier_rate() {
    let schedule = three_tier(PricingMode::Graduated);
    let slope = |a: f64, b: f64| (schedule.cost(b).unwrap() - schedule.cost(a).unwrap()) / (b - a);
    assert!((slope(2.0, 4.0) - 30.0).abs() < 1e-9);
    assert!((slope(12.0, 18.0) - 28.0).abs() < 1e-9);
    assert!((slope(30.0, 40.0) - 25.0).abs() < 1e-9);
}

#[test]
fn test_marginal_rate_at_boundary_uses_next_bracket() {
    let schedule = three_tier(PricingMode::Graduated);
    assert_eq!(schedule.marginal_rate(10.0).unwrap(), 28.0);
    assert_eq!(schedule.marginal_rate(9.5).unwrap(), 30.0);
    let volume = three_tier(PricingMode::Volume);
    assert_eq!(volume.marginal_rate(10.0).unwrap(), 30.0);
}

#[test]
fn test_active_tier() {
    let schedule = three_tier(PricingMode::Graduated);
    assert_eq!(schedule.active_tier(10.0).unwrap().rate_per_hour, 30.0);
    assert_eq!(schedule.active_tier(10.5).unwrap().rate_per_hour, 28.0);
    assert_eq!(schedule.active_tier(1000.0).unwrap().rate_per_hour, 25.0);
}

#[test]
fn test_compute_pricing_data() {
    let data = compute_pricing_data(&PricingSchedule::standard(), 8.0, 20.0, 41).unwrap();
    assert_eq!(data.cost_curve.label, "Pricing Function");
    assert_eq!(data.cost_curve.len(), 41);
    assert_eq!(data.cost_curve.x[0], 0.0);
    assert_eq!(*data.cost_curve.x.last().unwrap(), 20.0);
    assert_eq!(data.tier_boundaries.len(), 2);
    assert_eq!(data.tier_boundaries[1].label, "Tier 2 Limit");
    assert_eq!(data.tier_boundaries[1].value, 10.0);
    assert_eq!(data.current.label, "Current Plan");
    assert!((data.current.y - 234.0).abs() < 1e-9);
}

#[test]
fn test_compute_pricing_data_rejects_bad_points() {
    let err = compute_pricing_data(&PricingSchedule::standard(), 8.0, 20.0, 1).unwrap_err();
    assert!(err.is_invalid_input());
}
