use self::{alter::AlterStatement, create::CreateStatement, create_index::CreateIndexStatement};

use nom::{branch::alt, character::complete::multispace0, sequence::preceded, IResult};

pub mod alter;
pub mod create;
pub mod create_index;

/// A statement of the schema definition file.
#[derive(Debug, PartialEq, Clone)]
pub enum Statement {
    Create(CreateStatement),
    CreateIndex(CreateIndexStatement),
    Alter(AlterStatement),
}

impl Statement {
    pub fn parse(input: &str) -> IResult<&str, Statement> {
        preceded(
            multispace0,
            alt((
                CreateStatement::parse,
                CreateIndexStatement::parse,
                AlterStatement::parse,
            )),
        )(input)
    }
}
