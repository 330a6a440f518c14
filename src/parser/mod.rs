// Policy expression parsers (order and band policies)

pub mod dimension;
pub mod lexer;
pub mod order;
pub mod scale;

use anyhow::{anyhow, Result};
use nom::combinator::all_consuming;

use crate::order::{DomainOrder, HourGroupVariant};
use crate::scale::BandPolicy;

pub use dimension::order_for_dimension;

/// Parse a complete order-policy expression, e.g. `hour_group(b)`
pub fn parse_order_policy(input: &str) -> Result<DomainOrder> {
    all_consuming(order::parse_order)(input)
        .map(|(_, policy)| policy)
        .map_err(|_| anyhow!("Unknown order policy '{}'", input))
}

/// Parse a complete band-policy expression, e.g. `classify(5)`
pub fn parse_band_policy(input: &str) -> Result<BandPolicy> {
    all_consuming(scale::parse_bands)(input)
        .map(|(_, policy)| policy)
        .map_err(|_| anyhow!("Unknown band policy '{}'", input))
}

/// Parse a bare hour-group variant name, e.g. `b`
pub fn parse_hour_variant(input: &str) -> Result<HourGroupVariant> {
    order::hour_variant_from_name(input.trim())
        .ok_or_else(|| anyhow!("Unknown hour-group variant '{}'", input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_order_policy() {
        assert_eq!(parse_order_policy("iso_week").unwrap(), DomainOrder::IsoWeek);
        assert!(parse_order_policy("hour_group(z)").is_err());
        assert!(parse_order_policy("month extra").is_err());
    }

    #[test]
    fn test_parse_band_policy() {
        assert_eq!(parse_band_policy(" classify(3) ").unwrap(), BandPolicy::Classify3);
        let err = parse_band_policy("rainbow").unwrap_err();
        assert!(err.to_string().contains("rainbow"));
    }

    #[test]
    fn test_parse_hour_variant() {
        assert_eq!(parse_hour_variant("B").unwrap(), HourGroupVariant::VariantB);
        assert!(parse_hour_variant("d").is_err());
    }
}
