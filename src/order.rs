//! Domain-specific ordering of discovered row/column keys.
//!
//! A [`DomainOrder`] names the policy; [`KeyOrder::resolve`] binds it to the
//! discovered key set (ISO weeks need the whole set to detect a year
//! boundary) and yields a total comparator.

use crate::data::KeyValue;
use std::cmp::Ordering;
use std::fmt;

const MONTHS: [&str; 12] = [
    "january", "february", "march", "april", "may", "june",
    "july", "august", "september", "october", "november", "december",
];

const HOUR_GROUPS_STANDARD: &[&str] = &[
    "0:00-5:59", "6:00-7:59", "8:00-10:59", "11:00-13:59",
    "14:00-16:59", "17:00-19:59", "20:00-23:59",
];

const HOUR_GROUPS_B: &[&str] = &[
    "0:00-3:59", "4:00-7:59", "8:00-11:59", "12:00-15:59", "16:00-19:59", "20:00-23:59",
];

const HOUR_GROUPS_C: &[&str] = &[
    "0:00-8:59", "9:00-11:59", "12:00-13:59", "14:00-17:59", "18:00-20:59", "21:00-23:59",
];

/// Weeks at or below this number are treated as next-year weeks on wraparound
const WRAP_LOW_WEEK: f64 = 6.0;
const WRAP_HIGH_WEEK: f64 = 52.0;
const WRAP_SHIFT: f64 = 53.0;

/// Which hour-bucket label list a data source reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HourGroupVariant {
    #[default]
    Standard,
    VariantB,
    VariantC,
}

impl HourGroupVariant {
    pub fn labels(self) -> &'static [&'static str] {
        match self {
            HourGroupVariant::Standard => HOUR_GROUPS_STANDARD,
            HourGroupVariant::VariantB => HOUR_GROUPS_B,
            HourGroupVariant::VariantC => HOUR_GROUPS_C,
        }
    }
}

/// Ordering policy for one dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DomainOrder {
    /// 1..7 day index
    Weekday,
    /// English month names
    Month,
    HourGroup(HourGroupVariant),
    /// ISO week numbers, wrapping across a year boundary
    IsoWeek,
    /// Numeric if every key is numeric, lexical otherwise
    #[default]
    Generic,
}

impl fmt::Display for DomainOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainOrder::Weekday => f.write_str("weekday"),
            DomainOrder::Month => f.write_str("month"),
            DomainOrder::HourGroup(HourGroupVariant::Standard) => f.write_str("hour_group(standard)"),
            DomainOrder::HourGroup(HourGroupVariant::VariantB) => f.write_str("hour_group(b)"),
            DomainOrder::HourGroup(HourGroupVariant::VariantC) => f.write_str("hour_group(c)"),
            DomainOrder::IsoWeek => f.write_str("iso_week"),
            DomainOrder::Generic => f.write_str("generic"),
        }
    }
}

/// Sort position of a single key. Ranked keys always precede unranked
/// ones; unranked keys compare case-insensitively, then byte-wise.
#[derive(Debug, Clone)]
enum SortKey {
    Ranked(f64),
    Unranked { folded: String, raw: String },
}

fn unranked(raw: String) -> SortKey {
    SortKey::Unranked { folded: raw.to_lowercase(), raw }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Ranked(a), SortKey::Ranked(b)) => a.total_cmp(b),
            (SortKey::Ranked(_), SortKey::Unranked { .. }) => Ordering::Less,
            (SortKey::Unranked { .. }, SortKey::Ranked(_)) => Ordering::Greater,
            (
                SortKey::Unranked { folded: a, raw: raw_a },
                SortKey::Unranked { folded: b, raw: raw_b },
            ) => a.cmp(b).then_with(|| raw_a.cmp(raw_b)),
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

/// A comparator bound to a policy and a discovered key set
#[derive(Debug, Clone, PartialEq)]
pub struct KeyOrder {
    policy: DomainOrder,
    week_wrap: bool,
    numeric: bool,
}

impl KeyOrder {
    /// Bind `policy` to the keys it will order.
    pub fn resolve(policy: DomainOrder, discovered: &[KeyValue]) -> Self {
        let week_wrap = policy == DomainOrder::IsoWeek && spans_year_boundary(discovered);
        let numeric = discovered.iter().all(|k| k.as_f64().is_some());
        if week_wrap {
            log::debug!("week keys span a year boundary, shifting weeks <= {}", WRAP_LOW_WEEK);
        }
        Self { policy, week_wrap, numeric }
    }

    pub fn compare(&self, a: &KeyValue, b: &KeyValue) -> Ordering {
        self.sort_key(a).cmp(&self.sort_key(b))
    }

    /// Stable sort of `keys` under this order
    pub fn sort(&self, keys: &mut [KeyValue]) {
        keys.sort_by_cached_key(|k| self.sort_key(k));
    }

    pub fn sorted(&self, keys: &[KeyValue]) -> Vec<KeyValue> {
        let mut keys = keys.to_vec();
        self.sort(&mut keys);
        keys
    }

    fn sort_key(&self, key: &KeyValue) -> SortKey {
        match self.policy {
            DomainOrder::Weekday => numeric_or_lexical(key),
            DomainOrder::Month => match month_rank(key) {
                Some(rank) => SortKey::Ranked(rank as f64),
                None => unranked(key.to_string()),
            },
            DomainOrder::HourGroup(variant) => {
                let label = normalize_hour_label(&key.to_string());
                match variant.labels().iter().position(|l| *l == label) {
                    Some(rank) => SortKey::Ranked(rank as f64),
                    None => unranked(label),
                }
            }
            DomainOrder::IsoWeek => match key.as_f64() {
                Some(week) if self.week_wrap && week <= WRAP_LOW_WEEK => SortKey::Ranked(week + WRAP_SHIFT),
                Some(week) => SortKey::Ranked(week),
                None => unranked(key.to_string()),
            },
            DomainOrder::Generic if self.numeric => numeric_or_lexical(key),
            DomainOrder::Generic => unranked(key.to_string()),
        }
    }
}

fn numeric_or_lexical(key: &KeyValue) -> SortKey {
    match key.as_f64() {
        Some(n) => SortKey::Ranked(n),
        None => unranked(key.to_string()),
    }
}

fn month_rank(key: &KeyValue) -> Option<usize> {
    match key {
        KeyValue::Text(name) => {
            let name = name.trim().to_lowercase();
            MONTHS.iter().position(|m| *m == name)
        }
        KeyValue::Number(_) => None,
    }
}

fn spans_year_boundary(keys: &[KeyValue]) -> bool {
    let weeks = keys.iter().filter_map(KeyValue::as_f64);
    let (min, max) = weeks.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), w| (lo.min(w), hi.max(w)));
    min <= WRAP_LOW_WEEK && max >= WRAP_HIGH_WEEK
}

/// `"8:00 - 10:59"` -> `"8:00-10:59"`
pub fn normalize_hour_label(label: &str) -> String {
    label
        .split('-')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("-")
}
