use crate::data::{KeyValue, Row};
use crate::ir::{AggregateCell, CellKey, ClipIndex, Grid};
use crate::selector::KeySelector;
use std::collections::{HashMap, HashSet};

/// Optional knobs for [`aggregate`]
#[derive(Default)]
pub struct AggregateOptions<'a> {
    /// Secondary key; enables clip grouping
    pub clip: Option<&'a dyn KeySelector>,
    /// Keys dropped from row and column discovery (e.g. a "Closed" state)
    pub exclude: HashSet<KeyValue>,
    /// Field whose first-seen value is kept for display; defaults to the measure
    pub display: Option<&'a str>,
}

/// Fold flat rows into a sparse row-key x column-key grid.
///
/// Rows with a missing or excluded key are skipped. The measure is coerced
/// with `Number(x) || 0`. Extremes are taken over the finished totals.
pub fn aggregate(
    rows: &[Row],
    row_key: &dyn KeySelector,
    col_key: &dyn KeySelector,
    measure: Option<&str>,
    options: &AggregateOptions,
) -> Grid {
    let display = options.display.or(measure);

    let mut row_keys = KeyList::default();
    let mut col_keys = KeyList::default();
    let mut cells: HashMap<CellKey, AggregateCell> = HashMap::new();
    let mut clip_groups: HashMap<KeyValue, KeyList> = HashMap::new();
    let mut skipped = 0usize;

    for row in rows {
        let (Some(r), Some(c)) = (row_key.select(row), col_key.select(row)) else {
            skipped += 1;
            continue;
        };
        if options.exclude.contains(&r) || options.exclude.contains(&c) {
            skipped += 1;
            continue;
        }
        let clip = match options.clip {
            Some(sel) => match sel.select(row) {
                Some(k) => Some(k),
                None => {
                    skipped += 1;
                    continue;
                }
            },
            None => None,
        };

        row_keys.push(&r);
        col_keys.push(&c);
        if let Some(k) = &clip {
            clip_groups.entry(r.clone()).or_default().push(k);
        }

        let cell = cells
            .entry(CellKey::new(r, c).with_clip(clip))
            .or_default();
        if let Some(field) = measure {
            cell.total += row.number(field);
        }
        cell.rows += 1;
        if let Some(field) = display {
            if cell.raw.is_null() {
                cell.raw = row.get(field).clone();
            }
        }
    }

    // Second pass: every total is final here, so the extremes cannot
    // reflect a partially summed cell.
    let (min_value, max_value) = cells.values().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(lo, hi), cell| (lo.min(cell.total), hi.max(cell.total)),
    );

    log::debug!(
        "aggregated {} rows into {} cells ({} skipped), range [{}, {}]",
        rows.len() - skipped,
        cells.len(),
        skipped,
        min_value,
        max_value
    );

    Grid {
        row_keys: row_keys.keys,
        col_keys: col_keys.keys,
        cells,
        clip_index: options.clip.map(|_| ClipIndex {
            groups: clip_groups.into_iter().map(|(k, v)| (k, v.keys)).collect(),
        }),
        min_value,
        max_value,
    }
}

/// Insertion-ordered set of keys
#[derive(Default)]
struct KeyList {
    seen: HashSet<KeyValue>,
    keys: Vec<KeyValue>,
}

impl KeyList {
    fn push(&mut self, key: &KeyValue) {
        if self.seen.insert(key.clone()) {
            self.keys.push(key.clone());
        }
    }
}
