use crate::clip;
use crate::data::{KeyValue, Scalar};
use crate::ir::{Grid, PivotView, ViewCell, ViewRow};
use crate::order::{DomainOrder, KeyOrder};
use crate::palette::{text_color_for, to_hex, NEUTRAL};
use crate::scale::ColorScale;

/// Lay out an aggregated grid: ordered axes, clip sub-rows and per-cell
/// colors.
pub fn build_view(grid: &Grid, row_order: &KeyOrder, col_order: &KeyOrder, scale: &ColorScale) -> PivotView {
    let row_keys = row_order.sorted(&grid.row_keys);
    let col_keys = col_order.sorted(&grid.col_keys);

    let mut rows = Vec::new();
    for row_key in &row_keys {
        let clips = match &grid.clip_index {
            Some(index) => sorted_clips(clip::group_by_clip(row_key, index)),
            None => vec![None],
        };
        for sub_row in clip::expand(clips) {
            let cells = col_keys
                .iter()
                .map(|col_key| view_cell(grid, row_key, col_key, sub_row.clip.as_ref(), scale))
                .collect();
            rows.push(ViewRow {
                key: row_key.to_string(),
                clip: sub_row.clip.as_ref().map(KeyValue::to_string),
                row_span: sub_row.row_span,
                group_end: sub_row.group_end,
                cells,
            });
        }
    }

    let domain = grid.domain();
    PivotView {
        columns: col_keys.iter().map(KeyValue::to_string).collect(),
        rows,
        min_value: domain.map(|(min, _)| min),
        max_value: domain.map(|(_, max)| max),
        bands: scale.policy().to_string(),
    }
}

/// Clip sub-rows are listed in generic key order
fn sorted_clips(clips: Vec<Option<KeyValue>>) -> Vec<Option<KeyValue>> {
    let mut keys: Vec<KeyValue> = clips.iter().flatten().cloned().collect();
    if keys.is_empty() {
        return clips;
    }
    KeyOrder::resolve(DomainOrder::Generic, &keys).sort(&mut keys);
    keys.into_iter().map(Some).collect()
}

fn view_cell(grid: &Grid, row: &KeyValue, col: &KeyValue, clip: Option<&KeyValue>, scale: &ColorScale) -> ViewCell {
    match grid.cell(row, col, clip) {
        Some(cell) => ViewCell {
            value: Some(cell.total),
            raw: cell.raw.clone(),
            color: to_hex(scale.color_for(cell.total)),
            text_color: scale.text_color_for(cell.total).as_str().to_string(),
        },
        None => ViewCell {
            value: None,
            raw: Scalar::Null,
            color: to_hex(NEUTRAL),
            text_color: text_color_for(NEUTRAL, scale.text_threshold()).as_str().to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{aggregate, AggregateOptions};
    use crate::data::Row;
    use crate::scale::BandPolicy;
    use crate::selector::Field;

    fn make_rows() -> Vec<Row> {
        vec![
            Row::new().with("day", 2i64).with("hour", "8:00-10:59").with("visits", 5i64),
            Row::new().with("day", 1i64).with("hour", "0:00-5:59").with("visits", 1i64),
            Row::new().with("day", 1i64).with("hour", "8:00 - 10:59").with("visits", 3i64),
        ]
    }

    fn make_view(rows: &[Row], options: &AggregateOptions) -> PivotView {
        let grid = aggregate(rows, &Field::new("day"), &Field::new("hour"), Some("visits"), options);
        let row_order = KeyOrder::resolve(DomainOrder::Weekday, &grid.row_keys);
        let col_order = KeyOrder::resolve(DomainOrder::HourGroup(Default::default()), &grid.col_keys);
        let scale = ColorScale::build(grid.min_value, grid.max_value, BandPolicy::Classify3);
        build_view(&grid, &row_order, &col_order, &scale)
    }

    #[test]
    fn test_view_orders_axes() {
        let view = make_view(&make_rows(), &AggregateOptions::default());
        let keys: Vec<_> = view.rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["1", "2"]);
        assert_eq!(view.columns[0], "0:00-5:59");
        assert_eq!(view.bands, "classify-3");
        assert_eq!(view.min_value, Some(1.0));
        assert_eq!(view.max_value, Some(5.0));
    }

    #[test]
    fn test_missing_cell_is_neutral() {
        let view = make_view(&make_rows(), &AggregateOptions::default());
        // day 2 has no early-hours row
        let day2 = &view.rows[1];
        let empty = day2
            .cells
            .iter()
            .find(|c| c.value.is_none())
            .expect("day 2 should have an empty cell");
        assert_eq!(empty.color, to_hex(NEUTRAL));
        assert_eq!(empty.raw, Scalar::Null);
    }

    #[test]
    fn test_clip_sub_rows() {
        let rows = vec![
            Row::new().with("day", 1i64).with("hour", "0:00-5:59").with("visits", 1i64).with("ad", "video"),
            Row::new().with("day", 1i64).with("hour", "0:00-5:59").with("visits", 4i64).with("ad", "banner"),
            Row::new().with("day", 2i64).with("hour", "0:00-5:59").with("visits", 2i64).with("ad", "video"),
        ];
        let clip = Field::new("ad");
        let options = AggregateOptions { clip: Some(&clip), ..Default::default() };
        let view = make_view(&rows, &options);

        assert_eq!(view.rows.len(), 3);
        assert_eq!(view.rows[0].clip.as_deref(), Some("banner"));
        assert_eq!(view.rows[0].row_span, 2);
        assert!(!view.rows[0].group_end);
        assert_eq!(view.rows[1].clip.as_deref(), Some("video"));
        assert_eq!(view.rows[1].row_span, 0);
        assert!(view.rows[1].group_end);
        assert_eq!(view.rows[0].cells[0].value, Some(4.0));
    }

    #[test]
    fn test_empty_grid_view() {
        let view = make_view(&[], &AggregateOptions::default());
        assert!(view.rows.is_empty());
        assert!(view.columns.is_empty());
        assert_eq!(view.min_value, None);
    }
}
