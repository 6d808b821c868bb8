use nom::{
    character::complete::multispace1,
    sequence::tuple,
    IResult,
};

use super::Statement;
use crate::sql::constraints::constraint::TableConstraint;
use crate::sql::parser_utils::{ident, kw};

/// `ALTER TABLE t ADD <table constraint>`, the only alteration a schema dump
/// emits after its `CREATE TABLE` statements.
#[derive(Debug, PartialEq, Clone)]
pub struct AlterStatement {
    pub table_name: String,
    pub constraint: TableConstraint,
}

impl AlterStatement {
    pub fn parse(input: &str) -> IResult<&str, Statement> {
        let (input, _) = tuple((kw("ALTER"), multispace1, kw("TABLE"), multispace1))(input)?;
        let (input, table_name) = ident(input)?;
        let (input, _) = multispace1(input)?;
        let (input, _) = kw("ADD")(input)?;
        let (input, _) = multispace1(input)?;
        let (input, constraint) = TableConstraint::parse(input)?;

        Ok((
            input,
            Statement::Alter(AlterStatement {
                table_name: table_name.to_string(),
                constraint,
            }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::constraints::foreignkey::ForeignKeyConstraint;

    #[test]
    fn test_alter_add_foreign_key() {
        assert_eq!(
            AlterStatement::parse(
                "ALTER TABLE posts ADD CONSTRAINT fk_posts_author FOREIGN KEY (author_id) REFERENCES authors (id)"
            ),
            Ok((
                "",
                Statement::Alter(AlterStatement {
                    table_name: "posts".to_string(),
                    constraint: TableConstraint::ForeignKey {
                        name: Some("fk_posts_author".to_string()),
                        columns: vec!["author_id".to_string()],
                        references: ForeignKeyConstraint {
                            table_name: "authors".to_string(),
                            column_name: Some("id".to_string()),
                        },
                    },
                })
            ))
        );
    }

    #[test]
    fn test_alter_add_primary_key() {
        assert_eq!(
            AlterStatement::parse("alter table legacy add primary key (code)"),
            Ok((
                "",
                Statement::Alter(AlterStatement {
                    table_name: "legacy".to_string(),
                    constraint: TableConstraint::PrimaryKey {
                        name: None,
                        columns: vec!["code".to_string()],
                    },
                })
            ))
        );
    }
}
