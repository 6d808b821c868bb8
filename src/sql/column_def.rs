use nom::{
    bytes::complete::tag,
    character::complete::{digit1, multispace0, multispace1},
    combinator::{map_res, opt},
    multi::many0,
    sequence::{delimited, preceded, tuple},
    IResult,
};
use serde::{Deserialize, Serialize};

use super::constraints::constraint::Constraint;
use super::data_type::DataType;
use super::data_value::DataValue;
use super::parser_utils::ident;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    pub data_type: DataType,
    pub limit: Option<u32>,
    pub constraints: Vec<Constraint>,
}

impl ColumnDef {
    pub fn new(name: &str, data_type: DataType, constraints: Vec<Constraint>) -> Self {
        ColumnDef {
            name: name.to_string(),
            data_type,
            limit: None,
            constraints,
        }
    }

    pub fn parse(input: &str) -> IResult<&str, ColumnDef> {
        let (input, name) = ident(input)?;
        let (input, _) = multispace1(input)?;
        let (input, data_type) = DataType::parse(input)?;
        let (input, limit) = opt(preceded(multispace0, parse_size))(input)?;
        let (input, constraints) = many0(preceded(multispace1, Constraint::parse))(input)?;

        Ok((
            input,
            ColumnDef {
                name: name.to_string(),
                data_type,
                limit,
                constraints,
            },
        ))
    }

    pub fn is_primary_key(&self) -> bool {
        self.constraints.contains(&Constraint::PrimaryKey)
    }

    /// The last `NULL` / `NOT NULL` wins; primary keys start out not null.
    pub fn nullable(&self) -> bool {
        let mut nullable = !self.is_primary_key();
        for constraint in &self.constraints {
            match constraint {
                Constraint::NotNull => nullable = false,
                Constraint::Null => nullable = true,
                _ => {}
            }
        }
        nullable
    }

    pub fn default_value(&self) -> Option<&DataValue> {
        self.constraints.iter().rev().find_map(|constraint| match constraint {
            Constraint::Default(DataValue::Null) => None,
            Constraint::Default(value) => Some(value),
            _ => None,
        })
    }
}

/// `(n)` or `(precision, scale)`; only the first number is kept.
fn parse_size(input: &str) -> IResult<&str, u32> {
    let (input, (size, _)) = delimited(
        tuple((tag("("), multispace0)),
        tuple((
            map_res(digit1, str::parse::<u32>),
            opt(tuple((multispace0, tag(","), multispace0, digit1))),
        )),
        tuple((multispace0, tag(")"))),
    )(input)?;
    Ok((input, size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::constraints::foreignkey::ForeignKeyConstraint;

    #[test]
    fn test_parse_column_def() {
        let input = "id INTEGER";
        let expected = ColumnDef::new("id", DataType::Integer, vec![]);
        let actual = ColumnDef::parse(input).unwrap().1;
        assert_eq!(expected, actual);
    }

    #[test]
    fn test_parse_column_with_size_and_constraints() {
        let (rest, column) =
            ColumnDef::parse("title VARCHAR(120) NOT NULL DEFAULT 'untitled', body TEXT").unwrap();
        assert_eq!(rest, ", body TEXT");
        assert_eq!(column.name, "title");
        assert_eq!(column.data_type, DataType::String);
        assert_eq!(column.limit, Some(120));
        assert!(!column.nullable());
        assert_eq!(
            column.default_value(),
            Some(&DataValue::Text("untitled".to_string()))
        );
    }

    #[test]
    fn test_parse_decimal_precision() {
        let (_, column) = ColumnDef::parse("price DECIMAL(10, 2)").unwrap();
        assert_eq!(column.data_type, DataType::Float);
        assert_eq!(column.limit, Some(10));
    }

    #[test]
    fn test_primary_key_column_is_not_nullable() {
        let (_, column) = ColumnDef::parse("code TEXT PRIMARY KEY").unwrap();
        assert!(column.is_primary_key());
        assert!(!column.nullable());
    }

    #[test]
    fn test_inline_reference() {
        let (_, column) = ColumnDef::parse("author_id INTEGER REFERENCES authors(id)").unwrap();
        assert_eq!(
            column.constraints,
            vec![Constraint::References(ForeignKeyConstraint {
                table_name: "authors".to_string(),
                column_name: Some("id".to_string()),
            })]
        );
        assert!(column.nullable());
        assert_eq!(column.default_value(), None);
    }
}
