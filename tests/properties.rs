use pivotgrid::aggregate::{aggregate, AggregateOptions};
use pivotgrid::data::{KeyValue, Row};
use pivotgrid::order::{DomainOrder, HourGroupVariant, KeyOrder};
use pivotgrid::scale::{BandPolicy, ColorScale};
use pivotgrid::selector::Field;
use pivotgrid::tooltip::{Point, Rect, Size, TooltipPlacer};
use proptest::prelude::*;
use std::cmp::Ordering;

fn make_rows(entries: &[(u8, u8, i32)]) -> Vec<Row> {
    entries
        .iter()
        .map(|(r, c, v)| Row::new().with("r", *r as i64).with("c", *c as i64).with("v", *v as i64))
        .collect()
}

fn any_policy() -> impl Strategy<Value = DomainOrder> {
    prop_oneof![
        Just(DomainOrder::Weekday),
        Just(DomainOrder::Month),
        Just(DomainOrder::HourGroup(HourGroupVariant::Standard)),
        Just(DomainOrder::HourGroup(HourGroupVariant::VariantB)),
        Just(DomainOrder::IsoWeek),
        Just(DomainOrder::Generic),
    ]
}

fn any_key() -> impl Strategy<Value = KeyValue> {
    prop_oneof![
        (0u8..60).prop_map(|n| KeyValue::number(n as f64)),
        "[a-zA-Z0-9:\\- ]{0,12}".prop_map(KeyValue::text),
        Just(KeyValue::text("March")),
        Just(KeyValue::text("8:00 - 10:59")),
    ]
}

proptest! {
    #[test]
    fn prop_cell_totals_sum_to_input(entries in prop::collection::vec((0u8..5, 0u8..5, -1000i32..1000), 0..60)) {
        let rows = make_rows(&entries);
        let grid = aggregate(&rows, &Field::new("r"), &Field::new("c"), Some("v"), &AggregateOptions::default());
        let total: f64 = grid.cells.values().map(|c| c.total).sum();
        let expected: f64 = entries.iter().map(|(_, _, v)| *v as f64).sum();
        prop_assert!((total - expected).abs() < 1e-6);
        let counted: usize = grid.cells.values().map(|c| c.rows).sum();
        prop_assert_eq!(counted, entries.len());
    }

    #[test]
    fn prop_extremes_bound_every_cell(entries in prop::collection::vec((0u8..5, 0u8..5, -1000i32..1000), 1..60)) {
        let rows = make_rows(&entries);
        let grid = aggregate(&rows, &Field::new("r"), &Field::new("c"), Some("v"), &AggregateOptions::default());
        prop_assert!(grid.has_data());
        for cell in grid.cells.values() {
            prop_assert!(grid.min_value <= cell.total && cell.total <= grid.max_value);
        }
        prop_assert!(grid.cells.values().any(|c| c.total == grid.min_value));
        prop_assert!(grid.cells.values().any(|c| c.total == grid.max_value));
    }

    #[test]
    fn prop_order_is_total_and_consistent(policy in any_policy(), keys in prop::collection::vec(any_key(), 1..20)) {
        let order = KeyOrder::resolve(policy, &keys);
        for a in &keys {
            prop_assert_eq!(order.compare(a, a), Ordering::Equal);
            for b in &keys {
                prop_assert_eq!(order.compare(a, b), order.compare(b, a).reverse());
            }
        }
        let sorted = order.sorted(&keys);
        for pair in sorted.windows(2) {
            prop_assert!(order.compare(&pair[0], &pair[1]) != Ordering::Greater);
        }
        // sorting is idempotent
        prop_assert_eq!(order.sorted(&sorted), sorted.clone());
    }

    #[test]
    fn prop_classify_uses_palette_colors(min in -1000.0f64..1000.0, span in 0.001f64..1000.0, t in 0.0f64..1.0) {
        let max = min + span;
        let scale = ColorScale::build(min, max, BandPolicy::Classify5);
        let color = scale.color_for(min + span * t);
        prop_assert!(pivotgrid::palette::CLASSIFY_5.contains(&color));
    }

    #[test]
    fn prop_linear_is_monotone_in_blue(min in -1000.0f64..1000.0, span in 0.001f64..1000.0, a in 0.0f64..1.0, b in 0.0f64..1.0) {
        let scale = ColorScale::build(min, min + span, BandPolicy::Linear { normalized: false });
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let c_lo = scale.color_for(min + span * lo);
        let c_hi = scale.color_for(min + span * hi);
        prop_assert!(c_hi.2 <= c_lo.2);
    }

    #[test]
    fn prop_tooltip_stays_in_viewport(
        px in 0.0f64..2000.0, py in 0.0f64..1000.0,
        w in 1u32..400, h in 1u32..200,
        margin in 0.0f64..20.0,
    ) {
        let (w, h) = (w as f64, h as f64);
        let viewport = Size::new(2000.0, 1000.0);
        let placer = TooltipPlacer::new(margin);
        let pos = placer.place(Point::new(px, py), Size::new(w, h), viewport);
        let placed = Rect::new(pos.x, pos.y, w, h);
        prop_assert!(Rect::new(0.0, 0.0, viewport.width, viewport.height).contains_rect(&placed));
    }
}
