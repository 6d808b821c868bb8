use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{multispace0, multispace1},
    combinator::{map, opt},
    sequence::{delimited, preceded, tuple},
    IResult,
};

use super::Statement;
use crate::sql::column_def::ColumnDef;
use crate::sql::constraints::constraint::TableConstraint;
use crate::sql::parser_utils::{comma_sep, ident, kw};

#[derive(Debug, PartialEq, Clone)]
pub struct CreateStatement {
    pub table_name: String,
    pub columns: Vec<ColumnDef>,
    pub constraints: Vec<TableConstraint>,
    pub without_rowid: bool,
}

enum TableElement {
    Column(ColumnDef),
    Constraint(TableConstraint),
}

impl CreateStatement {
    pub fn parse(input: &str) -> IResult<&str, Statement> {
        let (input, _) = tuple((kw("CREATE"), multispace1, kw("TABLE"), multispace1))(input)?;
        let (input, _) = opt(tuple((
            kw("IF"),
            multispace1,
            kw("NOT"),
            multispace1,
            kw("EXISTS"),
            multispace1,
        )))(input)?;
        let (input, table_name) = ident(input)?;
        let (input, _) = multispace0(input)?;
        let (input, elements) = delimited(
            tuple((tag("("), multispace0)),
            comma_sep(alt((
                map(TableConstraint::parse, TableElement::Constraint),
                map(ColumnDef::parse, TableElement::Column),
            ))),
            tuple((multispace0, tag(")"))),
        )(input)?;
        let (input, without_rowid) = opt(preceded(
            multispace1,
            tuple((kw("WITHOUT"), multispace1, kw("ROWID"))),
        ))(input)?;

        let mut columns = Vec::new();
        let mut constraints = Vec::new();
        for element in elements {
            match element {
                TableElement::Column(column) => columns.push(column),
                TableElement::Constraint(constraint) => constraints.push(constraint),
            }
        }

        Ok((
            input,
            Statement::Create(CreateStatement {
                table_name: table_name.to_string(),
                columns,
                constraints,
                without_rowid: without_rowid.is_some(),
            }),
        ))
    }

    /// The single column declared as primary key, either inline or through a
    /// one-column `PRIMARY KEY (...)` table constraint.
    pub fn primary_key_column(&self) -> Option<&str> {
        if let Some(column) = self.columns.iter().find(|c| c.is_primary_key()) {
            return Some(&column.name);
        }
        self.constraints.iter().find_map(|constraint| match constraint {
            TableConstraint::PrimaryKey { columns, .. } if columns.len() == 1 => {
                Some(columns[0].as_str())
            }
            _ => None,
        })
    }

    /// Whether the implicit `id` column should be added when this table is
    /// defined: not when a single column is already the primary key, nor when
    /// the table opts out with `WITHOUT ROWID`.
    pub fn wants_implicit_id(&self) -> bool {
        !self.without_rowid && self.primary_key_column().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::constraints::constraint::Constraint;
    use crate::sql::data_type::DataType;

    fn parse_create(input: &str) -> CreateStatement {
        match CreateStatement::parse(input) {
            Ok((_, Statement::Create(create))) => create,
            other => panic!("Expected Create statement, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_create_table() {
        let create = parse_create("CREATE TABLE users (name TEXT, age INTEGER)");
        assert_eq!(create.table_name, "users");
        assert_eq!(
            create.columns,
            vec![
                ColumnDef::new("name", DataType::Text, vec![]),
                ColumnDef::new("age", DataType::Integer, vec![]),
            ]
        );
        assert!(create.constraints.is_empty());
        assert!(create.wants_implicit_id());
    }

    #[test]
    fn test_parse_create_table_multiline() {
        let create = parse_create(
            "create table if not exists posts (\n  slug VARCHAR(80) PRIMARY KEY,\n  title TEXT NOT NULL\n)",
        );
        assert_eq!(create.table_name, "posts");
        assert_eq!(create.columns.len(), 2);
        assert_eq!(create.columns[0].constraints, vec![Constraint::PrimaryKey]);
        assert_eq!(create.primary_key_column(), Some("slug"));
        assert!(!create.wants_implicit_id());
    }

    #[test]
    fn test_table_level_primary_key_column() {
        let create = parse_create(
            "CREATE TABLE users (id INTEGER NOT NULL, name TEXT, PRIMARY KEY (id))",
        );
        assert_eq!(create.primary_key_column(), Some("id"));
        assert!(!create.wants_implicit_id());
    }

    #[test]
    fn test_parse_table_constraints_and_without_rowid() {
        let create = parse_create(
            "CREATE TABLE taggings (tag_id INTEGER, post_id INTEGER, PRIMARY KEY (tag_id, post_id)) WITHOUT ROWID",
        );
        assert_eq!(create.columns.len(), 2);
        assert_eq!(create.constraints.len(), 1);
        assert!(create.without_rowid);
        assert_eq!(create.primary_key_column(), None);
        assert!(!create.wants_implicit_id());
    }
}
