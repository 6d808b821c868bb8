use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case},
    character::complete::digit1,
    combinator::{map, map_res, opt, recognize},
    sequence::{delimited, pair, tuple},
    IResult,
};
use serde::{Deserialize, Serialize};

use crate::sql::data_type::DataType;

/// A literal value, as found in column defaults and result rows.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum DataValue {
    Text(String),
    Integer(i64),
    Boolean(bool),
    Float(f64),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    Null,
}

impl DataValue {
    pub fn parse(input: &str) -> IResult<&str, DataValue> {
        alt((
            parse_date,
            parse_timestamp,
            parse_quoted_text,
            parse_integer,
            parse_float,
            parse_boolean,
            parse_null,
        ))(input)
    }

    pub fn matches_type(&self, data_type: &DataType) -> bool {
        match (self, data_type.normalized()) {
            (DataValue::Text(_), DataType::Text) => true,
            (DataValue::Text(_), DataType::String) => true,
            (DataValue::Integer(_), DataType::Integer) => true,
            (DataValue::Boolean(_), DataType::Boolean) => true,
            (DataValue::Float(_), DataType::Float) => true,
            (DataValue::Integer(_), DataType::Float) => true,
            (DataValue::Date(_), DataType::Date) => true,
            (DataValue::Timestamp(_), DataType::Timestamp) => true,
            (DataValue::Null, _) => true,
            (_, DataType::Other(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Text(s) => write!(f, "{}", s),
            DataValue::Integer(i) => write!(f, "{}", i),
            DataValue::Boolean(b) => write!(f, "{}", b),
            DataValue::Float(x) => write!(f, "{}", x),
            DataValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            DataValue::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S")),
            DataValue::Null => write!(f, "NULL"),
        }
    }
}

fn parse_integer(input: &str) -> IResult<&str, DataValue> {
    let (rest, value) = map_res(recognize(pair(opt(tag("-")), digit1)), str::parse::<i64>)(input)?;
    if rest.starts_with('.') {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Digit,
        )));
    }
    Ok((rest, DataValue::Integer(value)))
}

fn parse_boolean(input: &str) -> IResult<&str, DataValue> {
    alt((
        map(tag_no_case("TRUE"), |_| DataValue::Boolean(true)),
        map(tag_no_case("FALSE"), |_| DataValue::Boolean(false)),
    ))(input)
}

fn parse_float(input: &str) -> IResult<&str, DataValue> {
    let (input, value) = nom::number::complete::double(input)?;
    Ok((input, DataValue::Float(value)))
}

fn parse_null(input: &str) -> IResult<&str, DataValue> {
    map(tag_no_case("NULL"), |_| DataValue::Null)(input)
}

fn parse_date(input: &str) -> IResult<&str, DataValue> {
    let (rest, date_str) = delimited(
        tag("'"),
        recognize(tuple((digit1, tag("-"), digit1, tag("-"), digit1))),
        tag("'"),
    )(input)?;

    match NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        Ok(date) => Ok((rest, DataValue::Date(date))),
        Err(_) => Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Tag,
        ))),
    }
}

fn parse_timestamp(input: &str) -> IResult<&str, DataValue> {
    let (rest, timestamp_str) = delimited(
        tag("'"),
        recognize(tuple((
            digit1,
            tag("-"),
            digit1,
            tag("-"),
            digit1,
            tag(" "),
            digit1,
            tag(":"),
            digit1,
            tag(":"),
            digit1,
        ))),
        tag("'"),
    )(input)?;

    match NaiveDateTime::parse_from_str(timestamp_str, "%Y-%m-%d %H:%M:%S") {
        Ok(timestamp) => Ok((rest, DataValue::Timestamp(timestamp))),
        Err(_) => Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Tag,
        ))),
    }
}

fn parse_quoted_text(input: &str) -> IResult<&str, DataValue> {
    let (body, _) = tag("'")(input)?;
    let mut result = String::new();
    let mut chars = body.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        if c != '\'' {
            result.push(c);
            continue;
        }
        // A doubled quote is an escaped quote.
        if let Some((_, '\'')) = chars.peek() {
            result.push('\'');
            chars.next();
            continue;
        }
        return Ok((&body[pos + 1..], DataValue::Text(result)));
    }

    Err(nom::Err::Error(nom::error::Error::new(
        input,
        nom::error::ErrorKind::Tag,
    )))
}
