use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while1},
    character::complete::{alpha1, alphanumeric1, multispace0},
    combinator::recognize,
    multi::{many0, separated_list1},
    sequence::{delimited, tuple},
    IResult,
};

pub type SqlResult<'a, T> = IResult<&'a str, T, nom::error::Error<&'a str>>;

fn ident_raw(input: &str) -> SqlResult<&str> {
    recognize(tuple((
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    )))(input)
}

fn quoted_ident(input: &str) -> SqlResult<&str> {
    alt((
        delimited(tag("\""), take_while1(|c| c != '"'), tag("\"")),
        delimited(tag("`"), take_while1(|c| c != '`'), tag("`")),
    ))(input)
}

/// Standard SQL identifier (alpha/underscore followed by alnum/underscore),
/// optionally wrapped in double quotes or backticks.
pub fn ident(input: &str) -> SqlResult<&str> {
    alt((quoted_ident, ident_raw))(input)
}

/// Case-insensitive keyword parser.
pub fn kw<'a>(keyword: &'static str) -> impl FnMut(&'a str) -> SqlResult<'a, &'a str> {
    tag_no_case(keyword)
}

/// Comma-separated list with optional surrounding whitespace.
pub fn comma_sep<'a, O, F>(parser: F) -> impl FnMut(&'a str) -> SqlResult<'a, Vec<O>>
where
    F: FnMut(&'a str) -> SqlResult<'a, O>,
{
    separated_list1(delimited(multispace0, tag(","), multispace0), parser)
}

/// A parenthesised, comma-separated identifier list: `(a, b, c)`.
pub fn ident_list(input: &str) -> SqlResult<Vec<String>> {
    let (input, names) = delimited(
        tuple((tag("("), multispace0)),
        comma_sep(ident),
        tuple((multispace0, tag(")"))),
    )(input)?;
    Ok((input, names.into_iter().map(str::to_string).collect()))
}

/// Removes `--` line comments, leaving quoted strings alone.
pub fn strip_comments(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut quote: Option<char> = None;

    while let Some(c) = chars.next() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
                output.push(c);
            }
            None if c == '\'' || c == '"' || c == '`' => {
                quote = Some(c);
                output.push(c);
            }
            None if c == '-' && chars.peek() == Some(&'-') => {
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        output.push('\n');
                        break;
                    }
                }
            }
            None => output.push(c),
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ident_accepts_valid_names() {
        assert_eq!(ident("foo").unwrap().1, "foo");
        assert_eq!(ident("_bar").unwrap().1, "_bar");
        assert_eq!(ident("a1_b2").unwrap().1, "a1_b2");
    }

    #[test]
    fn ident_rejects_leading_digit() {
        assert!(ident("1abc").is_err());
    }

    #[test]
    fn ident_accepts_quoted_names() {
        assert_eq!(ident("\"order\"").unwrap().1, "order");
        assert_eq!(ident("`group`").unwrap().1, "group");
    }

    #[test]
    fn comma_sep_parses_list() {
        let mut parser = comma_sep(ident);
        let result = parser("a, b, c").unwrap().1;
        assert_eq!(result, vec!["a", "b", "c"]);
    }

    #[test]
    fn ident_list_parses_parenthesised_names() {
        let (rest, names) = ident_list("( user_id ,post_id) tail").unwrap();
        assert_eq!(rest, " tail");
        assert_eq!(names, vec!["user_id".to_string(), "post_id".to_string()]);
    }

    #[test]
    fn strip_comments_keeps_quoted_dashes() {
        let input = "CREATE TABLE a ( -- the table\n  b TEXT DEFAULT '--x'\n);";
        assert_eq!(
            strip_comments(input),
            "CREATE TABLE a ( \n  b TEXT DEFAULT '--x'\n);"
        );
    }
}
