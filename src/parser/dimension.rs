// Maps data-source dimension identifiers (e.g. "impressions.week") to an
// order policy. The engine itself only ever sees `DomainOrder`.

use crate::order::{DomainOrder, HourGroupVariant};

/// Pick the order policy for a dimension by its last dotted segment
pub fn order_for_dimension(name: &str, hour_variant: HourGroupVariant) -> DomainOrder {
    let segment = name.rsplit('.').next().unwrap_or(name).trim().to_ascii_lowercase();
    match segment.as_str() {
        "weekday" | "day_of_week" | "dow" => DomainOrder::Weekday,
        "month" | "month_name" => DomainOrder::Month,
        "hour_group" | "hour_bucket" | "hours" => DomainOrder::HourGroup(hour_variant),
        "week" | "iso_week" | "week_number" => DomainOrder::IsoWeek,
        _ => {
            log::debug!("dimension '{}' has no domain order, using generic", name);
            DomainOrder::Generic
        }
    }
}
