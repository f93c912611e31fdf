// File: crates/chart-core/tests/properties.rs
// Purpose: End-to-end properties of scale derivation and layout geometry through the public API.

use chart_core::layout::{CartesianLayout, PieLayout, RadarLayout};
use chart_core::scale::nice_step;
use chart_core::{ApproxMetrics, Chart, ChartError, ChartType, Color, Scale, StandardDataset};

fn chart(t: ChartType, sets: &[&[(&str, f64)]]) -> Chart {
    let mut c = Chart::new(t);
    for pairs in sets {
        c.add_standard(StandardDataset::from_pairs(pairs.iter().copied())).unwrap();
    }
    c
}

#[test]
fn non_negative_scales_start_at_zero() {
    for (min, max) in [(0.0, 1.0), (3.0, 7.0), (12.5, 980.0), (400.0, 401.0)] {
        let s = Scale::from_extrema(max, min).unwrap();
        assert_eq!(s.min(), 0.0, "({min}, {max})");
        assert!(s.max() >= max, "({min}, {max}) -> {}", s.max());
    }
}

#[test]
fn negative_scales_extend_below_padded_min() {
    for (min, max) in [(-10.0, 10.0), (-3.0, 50.0), (-250.0, -20.0)] {
        let s = Scale::from_extrema(max, min).unwrap();
        let padded = min - 0.05 * (max - min);
        assert!(s.min() <= padded, "({min}, {max}) -> {}", s.min());
        assert!(s.max() >= max);
    }
}

#[test]
fn nice_steps_are_one_two_five_ten_times_a_power_of_ten() {
    let mut v = 1e-4;
    while v < 1e7 {
        let step = nice_step(v).unwrap();
        assert!(step >= v * (1.0 - 1e-12), "{v} -> {step}");
        let mantissa = step / 10f64.powf(step.log10().floor());
        assert!(
            [1.0, 2.0, 5.0, 10.0].iter().any(|m| (mantissa - m).abs() < 1e-9),
            "{v} -> {step} (mantissa {mantissa})"
        );
        v *= 1.37;
    }
}

#[test]
fn hex_round_trips_and_bad_channels_fail() {
    for hex in ["#000000", "#FFFFFF", "#1A2B3C", "#0d6efd"] {
        assert_eq!(Color::from_hex(hex).unwrap().to_hex(), hex[1..].to_uppercase());
    }
    assert!(matches!(Color::from_channels(256, 0, 0), Err(ChartError::InvalidColor(_))));
    assert!(matches!(Color::from_channels(0, -1, 0), Err(ChartError::InvalidColor(_))));
}

#[test]
fn stacked_bars_add_up_to_the_category_total() {
    let c = chart(
        ChartType::StackedBar,
        &[&[("A", 12.0), ("B", 3.0), ("C", 40.0)], &[("A", 8.0), ("B", 30.0), ("C", 1.0)]],
    );
    let layout = CartesianLayout::compute(&c).unwrap();
    let values = layout.frame.value_scale(&layout.scale);
    for (i, total) in [20.0, 33.0, 41.0].into_iter().enumerate() {
        let stacked: f32 = layout.bars.iter().filter(|b| b.index == i).map(|b| b.rect.height()).sum();
        assert!((stacked - (values.to_px(0.0) - values.to_px(total))).abs() < 1e-2, "category {i}");
    }
}

#[test]
fn waterfall_scale_brackets_running_totals() {
    let c = chart(ChartType::Waterfall, &[&[("a", 10.0), ("b", -3.0), ("c", 5.0)]]);
    assert_eq!(chart_core::running_totals([10.0, -3.0, 5.0]), vec![10.0, 7.0, 12.0]);
    let s = c.scale().unwrap();
    for total in [10.0, 7.0, 12.0] {
        assert!(s.min() <= total && total <= s.max());
    }
}

#[test]
fn pie_sweeps_cover_the_full_circle() {
    let c = chart(ChartType::Pie, &[&[("a", 1.0), ("b", 2.5), ("c", 7.0), ("d", 0.3), ("e", 11.0)]]);
    let pie = PieLayout::compute(&c, &ApproxMetrics).unwrap();
    let total: f32 = pie.slices.iter().map(|s| s.sweep_deg).sum();
    assert!((total - 360.0).abs() < 1e-3, "{total}");
}

#[test]
fn radar_aligns_later_datasets_by_label() {
    let c = chart(ChartType::Radar, &[&[("A", 10.0), ("B", 20.0)], &[("B", 1.0), ("A", 2.0)]]);
    let radar = RadarLayout::compute(&c).unwrap();
    assert_eq!(radar.categories, vec!["A".to_string(), "B".to_string()]);
    assert_eq!(radar.series[1].values, vec![2.0, 1.0]);
}

#[test]
fn bar_heights_follow_values() {
    let c = chart(ChartType::Bar, &[&[("Jan", 10.0), ("Feb", 20.0), ("Mar", 5.0)]]);
    let layout = CartesianLayout::compute(&c).unwrap();
    assert_eq!(layout.scale.min(), 0.0);
    let h: Vec<f32> = layout.bars.iter().map(|b| b.rect.height()).collect();
    assert_eq!(h.len(), 3);
    assert!(h[1] > h[0] && h[0] > h[2], "{h:?}");
}
