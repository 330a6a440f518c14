use crate::data::KeyValue;
use crate::ir::ClipIndex;

/// Sub-rows for one row key: the clip keys observed for it, or a single
/// unlabeled sub-row when none were recorded.
pub fn group_by_clip(row_key: &KeyValue, clip_index: &ClipIndex) -> Vec<Option<KeyValue>> {
    match clip_index.groups.get(row_key) {
        Some(clips) if !clips.is_empty() => clips.iter().cloned().map(Some).collect(),
        _ => vec![None],
    }
}

/// One physical row of a clip group
#[derive(Debug, Clone, PartialEq)]
pub struct SubRow {
    pub clip: Option<KeyValue>,
    /// Size of the group on the first sub-row, 0 after it
    pub row_span: usize,
    /// Only the last sub-row of a group draws the boundary
    pub group_end: bool,
}

/// Expand a group of clip keys into physical sub-rows
pub fn expand(clips: Vec<Option<KeyValue>>) -> Vec<SubRow> {
    let n = clips.len();
    clips
        .into_iter()
        .enumerate()
        .map(|(i, clip)| SubRow {
            clip,
            row_span: if i == 0 { n } else { 0 },
            group_end: i + 1 == n,
        })
        .collect()
}
