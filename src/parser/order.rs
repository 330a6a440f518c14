// Order-policy parser
// Format: weekday | month | iso_week | week | generic | hour_group | hour_group(standard|b|c)

use crate::order::{DomainOrder, HourGroupVariant};
use super::lexer::{identifier, ws};
use nom::{
    bytes::complete::tag_no_case,
    character::complete::char,
    combinator::{map_opt, opt},
    sequence::delimited,
    IResult,
};

/// Parse an hour-group variant name
pub fn parse_hour_variant(input: &str) -> IResult<&str, HourGroupVariant> {
    map_opt(ws(identifier), |name| hour_variant_from_name(&name))(input)
}

pub fn hour_variant_from_name(name: &str) -> Option<HourGroupVariant> {
    match name.to_ascii_lowercase().as_str() {
        "standard" | "a" => Some(HourGroupVariant::Standard),
        "b" | "variant-b" | "variant_b" => Some(HourGroupVariant::VariantB),
        "c" | "variant-c" | "variant_c" => Some(HourGroupVariant::VariantC),
        _ => None,
    }
}

/// Parse `hour_group` with an optional `(variant)` argument
pub fn parse_hour_group(input: &str) -> IResult<&str, DomainOrder> {
    let (input, _) = ws(tag_no_case("hour_group"))(input)?;
    let (input, variant) = opt(delimited(
        ws(char('(')),
        parse_hour_variant,
        ws(char(')')),
    ))(input)?;
    Ok((input, DomainOrder::HourGroup(variant.unwrap_or_default())))
}

/// Parse any order policy
pub fn parse_order(input: &str) -> IResult<&str, DomainOrder> {
    if let Ok(result) = parse_hour_group(input) {
        return Ok(result);
    }
    map_opt(ws(identifier), |name| match name.to_ascii_lowercase().as_str() {
        "weekday" => Some(DomainOrder::Weekday),
        "month" => Some(DomainOrder::Month),
        "iso_week" | "week" => Some(DomainOrder::IsoWeek),
        "generic" => Some(DomainOrder::Generic),
        _ => None,
    })(input)
}
