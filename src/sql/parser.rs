use nom::{
    bytes::complete::tag,
    character::complete::multispace0,
};

use crate::error::NullDBError;
use crate::sql::parser_utils::strip_comments;
use crate::sql::statements::Statement;

pub struct Parser;

impl Parser {
    pub fn parse_sql(input: &str) -> Result<Statement, NullDBError> {
        match Statement::parse(input) {
            Ok((remaining, stmt)) => {
                let remaining = remaining.trim().trim_end_matches(';').trim();
                if remaining.is_empty() {
                    Ok(stmt)
                } else {
                    Err(NullDBError::Parse(format!(
                        "Unexpected input after statement: {}",
                        remaining
                    )))
                }
            }
            Err(e) => Err(NullDBError::Parse(format!("Failed to parse SQL: {}", e))),
        }
    }

    /// Parses a whole schema definition: `;`-separated statements with `--`
    /// comments. The final semicolon is optional.
    pub fn parse_schema(input: &str) -> Result<Vec<Statement>, NullDBError> {
        let source = strip_comments(input);
        let mut statements = Vec::new();
        let mut rest = source.as_str();

        loop {
            rest = rest.trim_start();
            if rest.is_empty() {
                break;
            }

            let (remaining, statement) = Statement::parse(rest).map_err(|e| {
                NullDBError::Parse(format!(
                    "Failed to parse schema at line {}: {}",
                    line_of(&source, rest),
                    e
                ))
            })?;
            statements.push(statement);

            let (remaining, _) = multispace0::<_, nom::error::Error<&str>>(remaining)
                .map_err(|e| NullDBError::Parse(e.to_string()))?;
            rest = match tag::<_, _, nom::error::Error<&str>>(";")(remaining) {
                Ok((after, _)) => after,
                Err(_) if remaining.is_empty() => remaining,
                Err(_) => {
                    return Err(NullDBError::Parse(format!(
                        "Expected ';' at line {}",
                        line_of(&source, remaining)
                    )))
                }
            };
        }

        Ok(statements)
    }
}

fn line_of(source: &str, rest: &str) -> usize {
    let consumed = source.len() - rest.len();
    source[..consumed].matches('\n').count() + 1
}
