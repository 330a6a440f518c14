// Pipeline driver: resolve -> aggregate -> order -> scale -> layout

use crate::aggregate::{aggregate, AggregateOptions};
use crate::data::{Row, RowSet};
use crate::ir::{PivotView, ResolvedPivot};
use crate::layout::build_view;
use crate::order::KeyOrder;
use crate::resolve::resolve_pivot;
use crate::scale::ColorScale;
use crate::selector::KeySelector;
use crate::PivotConfig;
use anyhow::{Context, Result};

/// Resolve `config` against `data` and build the colored pivot view
pub fn render_pivot(config: &PivotConfig, data: &RowSet) -> Result<PivotView> {
    let resolved = resolve_pivot(config, data).context("Failed to resolve pivot configuration")?;
    log::debug!(
        "pivot rows={:?} cols={:?} order={}/{} bands={}",
        resolved.rows.0,
        resolved.cols.0,
        resolved.row_order,
        resolved.col_order,
        resolved.bands
    );
    Ok(build_pivot(&resolved, &data.rows))
}

/// Run the pure pipeline for an already resolved pivot. Never fails: bad
/// values fall back to 0, missing keys drop the row.
pub fn build_pivot(pivot: &ResolvedPivot, rows: &[Row]) -> PivotView {
    let options = AggregateOptions {
        clip: pivot.clip.as_ref().map(|f| f as &dyn KeySelector),
        exclude: pivot.exclude.clone(),
        display: pivot.display.as_deref(),
    };
    let grid = aggregate(rows, &pivot.rows, &pivot.cols, pivot.measure.as_deref(), &options);

    let row_order = KeyOrder::resolve(pivot.row_order, &grid.row_keys);
    let col_order = KeyOrder::resolve(pivot.col_order, &grid.col_keys);
    let scale = ColorScale::build(grid.min_value, grid.max_value, pivot.bands)
        .with_endpoints(pivot.low_color, pivot.high_color)
        .with_text_threshold(pivot.text_threshold);

    build_view(&grid, &row_order, &col_order, &scale)
}
