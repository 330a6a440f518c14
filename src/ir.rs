use crate::data::{KeyValue, Scalar};
use crate::order::DomainOrder;
use crate::scale::BandPolicy;
use crate::selector::{Field, Fields};
use plotters::style::RGBColor;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

// =============================================================================
// Phase 1: Resolution
// =============================================================================

/// Result of resolving a `PivotConfig` against the row headers
#[derive(Debug, Clone)]
pub struct ResolvedPivot {
    pub rows: Fields,
    pub cols: Fields,
    pub measure: Option<String>,
    pub display: Option<String>,
    pub clip: Option<Field>,
    pub exclude: HashSet<KeyValue>,
    pub row_order: DomainOrder,
    pub col_order: DomainOrder,
    pub bands: BandPolicy,
    pub low_color: RGBColor,
    pub high_color: RGBColor,
    pub text_threshold: f64,
}

// =============================================================================
// Phase 2: Aggregation
// =============================================================================

/// Identity of one aggregate bucket
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellKey {
    pub row: KeyValue,
    pub col: KeyValue,
    pub clip: Option<KeyValue>,
}

impl CellKey {
    pub fn new(row: KeyValue, col: KeyValue) -> Self {
        Self { row, col, clip: None }
    }

    pub fn with_clip(mut self, clip: Option<KeyValue>) -> Self {
        self.clip = clip;
        self
    }
}

/// Running aggregate for one bucket
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AggregateCell {
    /// Sum of the measure over every row mapped here
    pub total: f64,
    /// Number of contributing rows
    pub rows: usize,
    /// First non-null display value seen
    pub raw: Scalar,
}

/// Row key -> distinct clip keys, in first-seen order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClipIndex {
    pub groups: HashMap<KeyValue, Vec<KeyValue>>,
}

/// Sparse aggregate grid. Key lists are in discovery order; the final
/// display order comes from `order::KeyOrder`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub row_keys: Vec<KeyValue>,
    pub col_keys: Vec<KeyValue>,
    pub cells: HashMap<CellKey, AggregateCell>,
    pub clip_index: Option<ClipIndex>,
    /// `+inf` until a cell exists
    pub min_value: f64,
    /// `-inf` until a cell exists
    pub max_value: f64,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            row_keys: Vec::new(),
            col_keys: Vec::new(),
            cells: HashMap::new(),
            clip_index: None,
            min_value: f64::INFINITY,
            max_value: f64::NEG_INFINITY,
        }
    }
}

impl Grid {
    /// False for the "no data" state (inverted infinity sentinels)
    pub fn has_data(&self) -> bool {
        self.min_value <= self.max_value
    }

    /// `(min, max)` of the cell totals, or `None` for an empty grid
    pub fn domain(&self) -> Option<(f64, f64)> {
        self.has_data().then_some((self.min_value, self.max_value))
    }

    pub fn cell(&self, row: &KeyValue, col: &KeyValue, clip: Option<&KeyValue>) -> Option<&AggregateCell> {
        let key = CellKey::new(row.clone(), col.clone()).with_clip(clip.cloned());
        self.cells.get(&key)
    }
}

// =============================================================================
// Phase 5: Layout
// =============================================================================

/// Ordered, colored grid ready for a table or heatmap renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotView {
    pub columns: Vec<String>,
    pub rows: Vec<ViewRow>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub bands: String,
}

/// One physical (rendered) row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewRow {
    pub key: String,
    pub clip: Option<String>,
    /// Rows covered by the key cell; 0 on continuation sub-rows
    pub row_span: usize,
    /// Last physical row of its key group
    pub group_end: bool,
    pub cells: Vec<ViewCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewCell {
    pub value: Option<f64>,
    pub raw: Scalar,
    pub color: String,
    pub text_color: String,
}
