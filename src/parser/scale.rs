// Band-policy parser
// Format: linear | linear-2 | linear(normalized) | classify(3|5) | classify-3 | classify-5

use crate::scale::BandPolicy;
use super::lexer::ws;
use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case},
    character::complete::{char, digit1},
    combinator::opt,
    sequence::{delimited, preceded},
    IResult,
};

pub fn parse_linear(input: &str) -> IResult<&str, BandPolicy> {
    let (input, _) = ws(alt((tag_no_case("linear-2"), tag_no_case("linear"))))(input)?;
    let (input, normalized) = opt(delimited(
        ws(char('(')),
        ws(tag_no_case("normalized")),
        ws(char(')')),
    ))(input)?;
    Ok((input, BandPolicy::Linear { normalized: normalized.is_some() }))
}

pub fn parse_classify(input: &str) -> IResult<&str, BandPolicy> {
    let (input, _) = ws(tag_no_case("classify"))(input)?;
    let (input, count) = alt((
        preceded(tag("-"), digit1),
        delimited(ws(char('(')), ws(digit1), ws(char(')'))),
    ))(input)?;
    let band = match count {
        "3" => BandPolicy::Classify3,
        "5" => BandPolicy::Classify5,
        _ => {
            return Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::Verify,
            )))
        }
    };
    Ok((input, band))
}

pub fn parse_bands(input: &str) -> IResult<&str, BandPolicy> {
    alt((parse_linear, parse_classify))(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_linear() {
        assert_eq!(parse_bands("linear"), Ok(("", BandPolicy::Linear { normalized: false })));
        assert_eq!(parse_bands("linear-2"), Ok(("", BandPolicy::Linear { normalized: false })));
        assert_eq!(
            parse_bands("linear(normalized)"),
            Ok(("", BandPolicy::Linear { normalized: true }))
        );
    }

    #[test]
    fn test_parse_classify() {
        assert_eq!(parse_bands("classify-3"), Ok(("", BandPolicy::Classify3)));
        assert_eq!(parse_bands("classify( 5 )"), Ok(("", BandPolicy::Classify5)));
        assert!(parse_bands("classify(4)").is_err());
        assert!(parse_bands("quantile").is_err());
    }
}
