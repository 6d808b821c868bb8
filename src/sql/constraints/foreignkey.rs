use nom::{
    bytes::complete::tag,
    character::complete::{multispace0, multispace1},
    combinator::opt,
    sequence::{delimited, preceded, tuple},
    IResult,
};
use serde::{Deserialize, Serialize};

use crate::sql::parser_utils::{ident, ident_list, kw};

/// `REFERENCES table [(column)]`, either inline on a column or at the end of
/// a `FOREIGN KEY (...)` clause.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForeignKeyConstraint {
    pub table_name: String,
    pub column_name: Option<String>,
}

impl ForeignKeyConstraint {
    pub fn parse(input: &str) -> IResult<&str, ForeignKeyConstraint> {
        let (input, _) = kw("REFERENCES")(input)?;
        let (input, _) = multispace1(input)?;
        let (input, referenced_table) = ident(input)?;
        let (input, referenced_column) = opt(preceded(
            multispace0,
            delimited(
                tuple((tag("("), multispace0)),
                ident,
                tuple((multispace0, tag(")"))),
            ),
        ))(input)?;

        Ok((
            input,
            ForeignKeyConstraint {
                table_name: referenced_table.to_string(),
                column_name: referenced_column.map(str::to_string),
            },
        ))
    }
}

/// `FOREIGN KEY (columns) REFERENCES table [(column)]`
pub fn parse_foreign_key_clause(input: &str) -> IResult<&str, (Vec<String>, ForeignKeyConstraint)> {
    let (input, _) = kw("FOREIGN")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, _) = kw("KEY")(input)?;
    let (input, _) = multispace0(input)?;
    let (input, columns) = ident_list(input)?;
    let (input, _) = multispace0(input)?;
    let (input, references) = ForeignKeyConstraint::parse(input)?;
    Ok((input, (columns, references)))
}
