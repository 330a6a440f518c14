// Shared token parsers for policy expressions

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, multispace0},
    combinator::{map, recognize},
    multi::many0_count,
    sequence::{delimited, pair},
    IResult, Parser,
};

/// Wrap a parser so it skips surrounding whitespace
pub fn ws<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: Parser<&'a str, O, nom::error::Error<&'a str>>,
{
    delimited(multispace0, inner, multispace0)
}

/// Identifier: [A-Za-z_][A-Za-z0-9_-]*
pub fn identifier(input: &str) -> IResult<&str, String> {
    map(
        recognize(pair(
            alt((alpha1, tag("_"))),
            many0_count(alt((alphanumeric1, tag("_"), tag("-")))),
        )),
        str::to_string,
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier() {
        assert_eq!(identifier("hour_group(b)"), Ok(("(b)", "hour_group".to_string())));
        assert_eq!(identifier("variant-b)"), Ok((")", "variant-b".to_string())));
        assert!(identifier("3abc").is_err());
    }

    #[test]
    fn test_ws() {
        let mut p = ws(tag("month"));
        assert_eq!(p("  month  "), Ok(("", "month")));
    }
}
