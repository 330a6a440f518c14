use anyhow::{anyhow, Result};
use crate::data::RowSet;
use crate::ir::ResolvedPivot;
use crate::order::{DomainOrder, HourGroupVariant};
use crate::palette::{parse_color, LINEAR_HIGH, LINEAR_LOW};
use crate::parser::{order_for_dimension, parse_band_policy, parse_hour_variant, parse_order_policy};
use crate::scale::BandPolicy;
use crate::selector::{Field, Fields};
use crate::PivotConfig;
use plotters::style::RGBColor;

/// Resolve a pivot configuration against the row headers
pub fn resolve_pivot(config: &PivotConfig, data: &RowSet) -> Result<ResolvedPivot> {
    if config.rows.is_empty() {
        anyhow::bail!("No row field specified (use --rows <field>)");
    }
    if config.cols.is_empty() {
        anyhow::bail!("No column field specified (use --cols <field>)");
    }

    let rows = resolve_fields(&config.rows, data)?;
    let cols = resolve_fields(&config.cols, data)?;
    let measure = config.measure.as_deref().map(|f| resolve_field(f, data)).transpose()?;
    let display = config.display.as_deref().map(|f| resolve_field(f, data)).transpose()?;
    let clip = config.clip.as_deref().map(|f| resolve_field(f, data)).transpose()?;

    let hour_variant = match &config.hour_variant {
        Some(v) => parse_hour_variant(v)?,
        None => HourGroupVariant::default(),
    };
    let row_order = resolve_order(config.row_order.as_deref(), &rows, hour_variant)?;
    let col_order = resolve_order(config.col_order.as_deref(), &cols, hour_variant)?;

    let bands = match parse_band_policy(&config.bands)? {
        BandPolicy::Linear { normalized } => BandPolicy::Linear { normalized: normalized || config.normalized },
        other => other,
    };

    Ok(ResolvedPivot {
        rows: Fields(rows),
        cols: Fields(cols),
        measure,
        display,
        clip: clip.map(Field),
        exclude: config.exclude.iter().cloned().collect(),
        row_order,
        col_order,
        bands,
        low_color: resolve_color(config.low_color.as_deref(), LINEAR_LOW)?,
        high_color: resolve_color(config.high_color.as_deref(), LINEAR_HIGH)?,
        text_threshold: config.text_threshold,
    })
}

fn resolve_fields(names: &[String], data: &RowSet) -> Result<Vec<String>> {
    names.iter().map(|n| resolve_field(n, data)).collect()
}

/// Canonical header name for `name`. An input without headers (no rows at
/// all) accepts any name so that it can still yield an empty grid.
fn resolve_field(name: &str, data: &RowSet) -> Result<String> {
    if data.headers.is_empty() {
        return Ok(name.to_string());
    }
    data.find_header(name)
        .map(str::to_string)
        .ok_or_else(|| anyhow!("Column '{}' not found", name))
}

/// Explicit policy text wins; otherwise the first field's name decides
fn resolve_order(policy: Option<&str>, fields: &[String], hour_variant: HourGroupVariant) -> Result<DomainOrder> {
    match policy {
        Some(text) => parse_order_policy(text),
        None => Ok(fields
            .first()
            .map(|f| order_for_dimension(f, hour_variant))
            .unwrap_or_default()),
    }
}

fn resolve_color(text: Option<&str>, fallback: RGBColor) -> Result<RGBColor> {
    match text {
        Some(t) => parse_color(t).ok_or_else(|| anyhow!("Invalid color '{}'", t)),
        None => Ok(fallback),
    }
}
