//! Delimited text records and typed field values.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::error::OrderError;

/// How a line is split into fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    /// Runs of whitespace separate fields; leading whitespace is ignored.
    #[default]
    Whitespace,
    Char(char),
}

impl FromStr for Delimiter {
    type Err = OrderError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "" | "ws" | "whitespace" => Ok(Delimiter::Whitespace),
            "tab" | "\\t" => Ok(Delimiter::Char('\t')),
            _ => {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Delimiter::Char(c)),
                    _ => Err(OrderError::InvalidArgument(format!(
                        "delimiter must be a single character, got '{value}'"
                    ))),
                }
            }
        }
    }
}

/// One input line split into fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// 1-based line number in the input.
    pub line: usize,
    pub raw: String,
    fields: Vec<String>,
}

impl Record {
    pub fn parse(line: usize, raw: &str, delimiter: Delimiter) -> Record {
        let fields = match delimiter {
            Delimiter::Whitespace => raw.split_whitespace().map(str::to_string).collect(),
            Delimiter::Char(c) => raw.split(c).map(str::to_string).collect(),
        };
        Record {
            line,
            raw: raw.to_string(),
            fields,
        }
    }

    /// The field at a 1-based position; missing, empty and blank fields
    /// are absent.
    pub fn field(&self, position: usize) -> Option<&str> {
        let index = position.checked_sub(1)?;
        self.fields
            .get(index)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

pub fn split_records(input: &str, delimiter: Delimiter) -> Vec<Record> {
    input
        .lines()
        .enumerate()
        .map(|(index, line)| Record::parse(index + 1, line, delimiter))
        .collect()
}

/// Interpretation of a field's text for comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldType {
    #[default]
    Text,
    Int,
    Float,
}

impl FieldType {
    pub fn parse_field(self, raw: &str) -> Result<Field, String> {
        match self {
            FieldType::Text => Ok(Field::Text(raw.to_string())),
            FieldType::Int => raw
                .trim()
                .parse::<i64>()
                .map(Field::Int)
                .map_err(|err| format!("'{raw}' is not an integer: {err}")),
            FieldType::Float => raw
                .trim()
                .parse::<f64>()
                .map(Field::Float)
                .map_err(|err| format!("'{raw}' is not a number: {err}")),
        }
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "text" | "str" => Ok(FieldType::Text),
            "int" | "i" => Ok(FieldType::Int),
            "float" | "num" | "n" => Ok(FieldType::Float),
            other => Err(format!("unknown field type '{other}'")),
        }
    }
}

/// A typed field value.
///
/// Floats use IEEE total ordering, so `NaN` has a fixed place. Values
/// of different kinds order as text < int < float; a single sort key
/// only ever produces one kind.
#[derive(Debug, Clone)]
pub enum Field {
    Text(String),
    Int(i64),
    Float(f64),
}

impl Field {
    fn rank(&self) -> u8 {
        match self {
            Field::Text(_) => 0,
            Field::Int(_) => 1,
            Field::Float(_) => 2,
        }
    }
}

impl Ord for Field {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Field::Text(a), Field::Text(b)) => a.cmp(b),
            (Field::Int(a), Field::Int(b)) => a.cmp(b),
            (Field::Float(a), Field::Float(b)) => a.total_cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Field {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Field {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Field {}
