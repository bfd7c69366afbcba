use quota_coach::{compute_all, parse_period, PeriodParse, QuotaRecord};

fn record(phone: (f64, f64), fwa: (f64, f64), revenue: (f64, f64)) -> QuotaRecord {
    QuotaRecord {
        phone_target_dollars: phone.0,
        phone_achieved_dollars: phone.1,
        fwa_target_dollars: fwa.0,
        fwa_achieved_dollars: fwa.1,
        revenue_quota: revenue.0,
        revenue_achieved: revenue.1,
    }
}

fn samples() -> Vec<QuotaRecord> {
    vec![
        record((5000.0, 2000.0), (2000.0, 500.0), (10000.0, 4000.0)),
        record((0.0, 0.0), (0.0, 0.0), (0.0, 0.0)),
        record((1200.0, 4800.0), (700.0, 0.0), (2500.5, 9999.99)),
        record((1e9, 3.0), (42.0, 41.0), (1e7, 1e6)),
    ]
}

#[test]
fn test_period_tag_distinguishes_default() {
    assert!(matches!(parse_period(Some("Day 4/22")), PeriodParse::Matched(_)));
    assert!(matches!(parse_period(None), PeriodParse::Defaulted(_)));
    assert!(matches!(
        parse_period(Some("Day 1/30")),
        PeriodParse::Matched(_)
    ));
}

#[test]
fn test_elapsed_periods_have_zero_pace() {
    for subject in ["Day 22/22", "Day 30/22", "Day 5/0"] {
        for rec in samples() {
            let result = compute_all(&rec, Some(subject));
            for pacing in [
                result.phone,
                result.internet,
                result.combined,
                result.revenue,
            ] {
                assert_eq!(pacing.daily_base, 0.0, "{}", subject);
                assert_eq!(pacing.daily_stretch, 0.0, "{}", subject);
            }
        }
    }
}

#[test]
fn test_remaining_is_target_minus_achieved() {
    for rec in samples() {
        let result = compute_all(&rec, Some("Day 3/20"));
        for pacing in [
            result.phone,
            result.internet,
            result.combined,
            result.revenue,
        ] {
            assert!((pacing.remaining - (pacing.target - pacing.achieved)).abs() < 1e-9);
        }
    }
}

#[test]
fn test_stretch_pace_not_below_base_pace() {
    for rec in samples() {
        let result = compute_all(&rec, Some("Day 3/20"));
        for pacing in [
            result.phone,
            result.internet,
            result.combined,
            result.revenue,
        ] {
            assert!(pacing.daily_stretch >= pacing.daily_base);
        }
    }
}

#[test]
fn test_combined_target_is_sum() {
    for rec in samples() {
        let result = compute_all(&rec, Some("Day 3/20"));
        assert_eq!(
            result.combined.target,
            result.phone.target + result.internet.target
        );
        assert_eq!(
            result.combined.achieved,
            result.phone.achieved + result.internet.achieved
        );
    }
}

#[test]
fn test_day_zero_averages_over_one_day() {
    let rec = record((5000.0, 2000.0), (2000.0, 500.0), (10000.0, 4000.0));
    let result = compute_all(&rec, Some("Day 0/22"));

    assert_eq!(result.time.current_day, 0);
    assert_eq!(result.averages.phone, 20.0);
    assert_eq!(result.averages.internet, 5.0);
    assert_eq!(result.averages.combined, 25.0);
    assert_eq!(result.averages.revenue, 4000.0);
}

#[test]
fn test_repeated_calls_are_identical() {
    for rec in samples() {
        let first = serde_json::to_vec(&compute_all(&rec, Some("Day 9/31"))).unwrap();
        let second = serde_json::to_vec(&compute_all(&rec, Some("Day 9/31"))).unwrap();
        assert_eq!(first, second);
    }
}
