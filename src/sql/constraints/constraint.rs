use nom::{
    branch::alt,
    character::complete::{multispace0, multispace1},
    combinator::{map, opt},
    sequence::{preceded, terminated, tuple},
    IResult,
};
use serde::{Deserialize, Serialize};

use super::foreignkey::{parse_foreign_key_clause, ForeignKeyConstraint};
use crate::sql::data_value::DataValue;
use crate::sql::parser_utils::{ident, ident_list, kw};

/// Column-level constraint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Constraint {
    NotNull,
    Null,
    PrimaryKey,
    Unique,
    Default(DataValue),
    References(ForeignKeyConstraint),
}

impl Constraint {
    pub fn parse(input: &str) -> IResult<&str, Constraint> {
        alt((
            map(tuple((kw("NOT"), multispace1, kw("NULL"))), |_| Constraint::NotNull),
            map(kw("NULL"), |_| Constraint::Null),
            map(tuple((kw("PRIMARY"), multispace1, kw("KEY"))), |_| Constraint::PrimaryKey),
            map(kw("UNIQUE"), |_| Constraint::Unique),
            map(preceded(tuple((kw("DEFAULT"), multispace1)), DataValue::parse), Constraint::Default),
            map(ForeignKeyConstraint::parse, Constraint::References),
        ))(input)
    }
}

/// Table-level constraint, inside `CREATE TABLE` or after `ALTER TABLE ... ADD`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum TableConstraint {
    PrimaryKey {
        name: Option<String>,
        columns: Vec<String>,
    },
    ForeignKey {
        name: Option<String>,
        columns: Vec<String>,
        references: ForeignKeyConstraint,
    },
}

impl TableConstraint {
    pub fn parse(input: &str) -> IResult<&str, TableConstraint> {
        let (input, name) = opt(terminated(
            preceded(tuple((kw("CONSTRAINT"), multispace1)), ident),
            multispace1,
        ))(input)?;
        let name = name.map(str::to_string);

        alt((
            map(
                preceded(
                    tuple((kw("PRIMARY"), multispace1, kw("KEY"), multispace0)),
                    ident_list,
                ),
                {
                    let name = name.clone();
                    move |columns| TableConstraint::PrimaryKey {
                        name: name.clone(),
                        columns,
                    }
                },
            ),
            map(parse_foreign_key_clause, move |(columns, references)| {
                TableConstraint::ForeignKey {
                    name: name.clone(),
                    columns,
                    references,
                }
            }),
        ))(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parser_test() {
        assert_eq!(Constraint::parse("NOT NULL"), Ok(("", Constraint::NotNull)));
        assert_eq!(Constraint::parse("null"), Ok(("", Constraint::Null)));
        assert_eq!(Constraint::parse("PRIMARY KEY"), Ok(("", Constraint::PrimaryKey)));
        assert_eq!(Constraint::parse("UNIQUE"), Ok(("", Constraint::Unique)));
        assert_eq!(
            Constraint::parse("DEFAULT 'draft'"),
            Ok(("", Constraint::Default(DataValue::Text("draft".to_string()))))
        );
        assert_eq!(
            Constraint::parse("REFERENCES users"),
            Ok((
                "",
                Constraint::References(ForeignKeyConstraint {
                    table_name: "users".to_string(),
                    column_name: None,
                })
            ))
        );
    }

    #[test]
    fn table_constraint_test() {
        assert_eq!(
            TableConstraint::parse("PRIMARY KEY (tag_id, post_id)"),
            Ok((
                "",
                TableConstraint::PrimaryKey {
                    name: None,
                    columns: vec!["tag_id".to_string(), "post_id".to_string()],
                }
            ))
        );
        assert_eq!(
            TableConstraint::parse("CONSTRAINT fk_author FOREIGN KEY (author_id) REFERENCES authors"),
            Ok((
                "",
                TableConstraint::ForeignKey {
                    name: Some("fk_author".to_string()),
                    columns: vec!["author_id".to_string()],
                    references: ForeignKeyConstraint {
                        table_name: "authors".to_string(),
                        column_name: None,
                    },
                }
            ))
        );
    }

    #[test]
    fn column_definition_is_not_a_table_constraint() {
        assert!(TableConstraint::parse("primary_key_hint TEXT").is_err());
    }
}
