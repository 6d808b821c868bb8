use nom::{
    character::complete::{multispace0, multispace1},
    combinator::opt,
    sequence::terminated,
    IResult,
};

use super::Statement;
use crate::sql::parser_utils::{ident, ident_list, kw};

#[derive(Debug, PartialEq, Clone)]
pub struct CreateIndexStatement {
    pub name: Option<String>,
    pub table_name: String,
    pub columns: Vec<String>,
    pub unique: bool,
}

impl CreateIndexStatement {
    pub fn parse(input: &str) -> IResult<&str, Statement> {
        let (input, _) = kw("CREATE")(input)?;
        let (input, _) = multispace1(input)?;
        let (input, unique) = opt(terminated(kw("UNIQUE"), multispace1))(input)?;
        let (input, _) = kw("INDEX")(input)?;
        let (input, _) = multispace1(input)?;
        let (input, name) = opt(terminated(index_name, multispace1))(input)?;
        let (input, _) = kw("ON")(input)?;
        let (input, _) = multispace1(input)?;
        let (input, table_name) = ident(input)?;
        let (input, _) = multispace0(input)?;
        let (input, columns) = ident_list(input)?;

        Ok((
            input,
            Statement::CreateIndex(CreateIndexStatement {
                name: name.map(str::to_string),
                table_name: table_name.to_string(),
                columns,
                unique: unique.is_some(),
            }),
        ))
    }
}

// `ON` directly after `INDEX` means the index is anonymous.
fn index_name(input: &str) -> IResult<&str, &str> {
    let (rest, name) = ident(input)?;
    if name.eq_ignore_ascii_case("ON") {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Tag,
        )));
    }
    Ok((rest, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_index(input: &str) -> CreateIndexStatement {
        let (remaining, stmt) = CreateIndexStatement::parse(input).unwrap();
        assert_eq!(remaining, "");
        match stmt {
            Statement::CreateIndex(stmt) => stmt,
            _ => panic!("Expected CreateIndex statement"),
        }
    }

    #[test]
    fn test_create_anonymous_index_parse() {
        let stmt = parse_index("CREATE INDEX ON users(id)");
        assert_eq!(stmt.name, None);
        assert_eq!(stmt.table_name, "users");
        assert_eq!(stmt.columns, vec!["id".to_string()]);
        assert!(!stmt.unique);
    }

    #[test]
    fn test_create_named_unique_index_parse() {
        let stmt = parse_index("CREATE UNIQUE INDEX index_users_on_email ON users ( email, tenant_id )");
        assert_eq!(stmt.name.as_deref(), Some("index_users_on_email"));
        assert_eq!(stmt.table_name, "users");
        assert_eq!(stmt.columns, vec!["email".to_string(), "tenant_id".to_string()]);
        assert!(stmt.unique);
    }
}
