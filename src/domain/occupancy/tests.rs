use super::*;

fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

fn weekly_table() -> WeeklyForecastTable {
    WeeklyForecastTable::new(
        (0..7)
            .map(|day| OccupancySeries::from(vec![f64::from(day); 3]))
            .collect(),
    )
}

#[test]
fn forecast_row_index_counts_from_monday() {
    assert_eq!(forecast_row_index(Weekday::Mon), 0);
    assert_eq!(forecast_row_index(Weekday::Wed), 2);
    assert_eq!(forecast_row_index(Weekday::Sat), 5);
    assert_eq!(forecast_row_index(Weekday::Sun), 6);
}

#[test]
fn forecast_row_index_matches_sunday_based_shift() {
    for weekday in [
        Weekday::Sun,
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
    ] {
        let from_sunday = weekday.num_days_from_sunday() as usize;
        assert_eq!(forecast_row_index(weekday), (from_sunday + 6) % 7);
    }
}

#[test]
fn short_weekly_table_yields_no_row() {
    let table = WeeklyForecastTable::new(vec![OccupancySeries::from(vec![1.0, 2.0]); 6]);
    assert_eq!(table.row_for(Weekday::Mon), None);
}

#[test]
fn select_uses_weekday_row() {
    let table = weekly_table();
    let pair = SeriesPair::select(
        Some(OccupancySeries::from(vec![50.0, 60.0])),
        Some(&table),
        Weekday::Fri,
    );
    assert_eq!(pair.forecast, Some(OccupancySeries::from(vec![4.0; 3])));
}

#[test]
fn select_falls_back_to_realtime_when_row_missing() {
    let current = OccupancySeries::from(vec![5.0, 15.0, 25.0]);
    let pair = SeriesPair::select(Some(current.clone()), None, Weekday::Tue);
    assert_eq!(pair.forecast, Some(current.clone()));

    let mut rows = vec![OccupancySeries::from(vec![1.0]); 7];
    rows[1] = OccupancySeries::default();
    let table = WeeklyForecastTable::new(rows);
    let pair = SeriesPair::select(Some(current.clone()), Some(&table), Weekday::Tue);
    assert_eq!(pair.forecast, Some(current));
}

#[test]
fn select_without_any_data_stays_empty() {
    let pair = SeriesPair::select(None, None, Weekday::Sun);
    assert_eq!(pair, SeriesPair::default());
}

#[test]
fn standard_thresholds_boundaries() {
    let t = Thresholds::STANDARD;
    assert_eq!(t.classify(None), StatusTier::NoData);
    assert_eq!(t.classify(Some(f64::NAN)), StatusTier::NoData);
    assert_eq!(t.classify(Some(0.0)), StatusTier::NotBusy);
    assert_eq!(t.classify(Some(24.9)), StatusTier::NotBusy);
    assert_eq!(t.classify(Some(25.0)), StatusTier::ModeratelyBusy);
    assert_eq!(t.classify(Some(50.0)), StatusTier::Busy);
    assert_eq!(t.classify(Some(74.0)), StatusTier::Busy);
    assert_eq!(t.classify(Some(75.0)), StatusTier::VeryBusy);
    assert_eq!(t.classify(Some(140.0)), StatusTier::VeryBusy);
}

#[test]
fn relaxed_thresholds_shift_upper_tiers() {
    let t = Thresholds::RELAXED;
    assert_eq!(t.classify(Some(55.0)), StatusTier::ModeratelyBusy);
    assert_eq!(t.classify(Some(80.0)), StatusTier::Busy);
    assert_eq!(t.classify(Some(85.0)), StatusTier::VeryBusy);
}

#[test]
fn tier_labels() {
    assert_eq!(StatusTier::NoData.label(), "No data");
    assert_eq!(StatusTier::ModeratelyBusy.label(), "Moderately busy");
    assert_eq!(StudioStatus::FetchFailed.label(), "Error");
    assert_eq!(StudioStatus::FetchFailed.tier(), StatusTier::NoData);
}

#[test]
fn day_ratio_reference_points() {
    assert!(day_ratio(at(0, 0)).abs() < f64::EPSILON);
    assert!((day_ratio(at(12, 0)) - 0.5).abs() < f64::EPSILON);
    let late = day_ratio(at(23, 59));
    assert!(late > 0.999 && late < 1.0);
}

#[test]
fn day_ratio_is_monotonic_within_a_day() {
    let mut previous = 0.0;
    for minute in 0..1440 {
        let ratio = day_ratio(at(minute / 60, minute % 60));
        assert!(ratio >= previous);
        previous = ratio;
    }
    assert!(day_ratio(at(0, 0)) < previous);
}

#[test]
fn current_index_clamps_to_last_sample() {
    assert_eq!(current_index(9, 24), Some(9));
    assert_eq!(current_index(20, 12), Some(11));
    assert_eq!(current_index(3, 0), None);
}

#[test]
fn studio_name_is_derived_from_slug() {
    assert_eq!(
        studio_name_from_url("https://www.fitx.de/fitnessstudios/karlsruhe-oststadt"),
        "Karlsruhe Oststadt"
    );
    assert_eq!(
        studio_name_from_url("https://example.com/studios/berlin-mitte/"),
        "Berlin Mitte"
    );
    assert_eq!(studio_name_from_url("///"), "Unknown");
}

#[test]
fn snapshot_picks_current_hour_sample() {
    let pair = SeriesPair {
        current: Some(OccupancySeries::from(vec![10.0, 20.0, 30.0])),
        forecast: Some(OccupancySeries::from(vec![7.0, 8.0, 9.0])),
    };
    let snapshot = StudioSnapshot::from_series("Test", pair, at(1, 30), Thresholds::STANDARD);

    assert_eq!(snapshot.current_index, Some(1));
    assert_eq!(snapshot.current_percentage, Some(20.0));
    assert_eq!(snapshot.status, StudioStatus::Tier(StatusTier::NotBusy));
    assert_eq!(snapshot.now_ratio, Some(90.0 / 1440.0));
    assert_eq!(snapshot.percentage_label(), "20 %");
    assert!(snapshot.has_chart());
}

#[test]
fn snapshot_late_hour_uses_last_sample() {
    let pair = SeriesPair {
        current: Some(OccupancySeries::from(vec![10.0, 20.0, 64.6])),
        forecast: None,
    };
    let snapshot = StudioSnapshot::from_series("Test", pair, at(18, 0), Thresholds::STANDARD);
    assert_eq!(snapshot.current_index, Some(2));
    assert_eq!(snapshot.percentage_label(), "65 %");
    assert_eq!(snapshot.status.label(), "Busy");
}

#[test]
fn snapshot_without_realtime_keeps_everything_unset() {
    let pair = SeriesPair {
        current: None,
        forecast: Some(OccupancySeries::from(vec![1.0, 2.0])),
    };
    let snapshot = StudioSnapshot::from_series("Test", pair, at(10, 0), Thresholds::STANDARD);
    assert_eq!(snapshot, StudioSnapshot::empty("Test"));
    assert_eq!(snapshot.percentage_label(), "–");
    assert!(!snapshot.has_chart());
}

#[test]
fn snapshot_with_missing_current_sample_reports_no_data() {
    let pair = SeriesPair {
        current: Some(OccupancySeries::new(vec![Some(10.0), None])),
        forecast: None,
    };
    let snapshot = StudioSnapshot::from_series("Test", pair, at(5, 0), Thresholds::STANDARD);
    assert_eq!(snapshot.current_percentage, None);
    assert_eq!(snapshot.status, StudioStatus::Tier(StatusTier::NoData));
    assert!(snapshot.realtime.is_some());
}

#[test]
fn failed_snapshot_summary() {
    let snapshot = StudioSnapshot::failed("Karlsruhe Oststadt");
    assert_eq!(snapshot.summary_line(), "Karlsruhe Oststadt: – (Error)");
}
