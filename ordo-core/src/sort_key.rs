//! Sort keys over delimited records.
//!
//! A key is written `FIELD[:TYPE][:FLAG...]`:
//!
//!   2            second field, compared as text
//!   3:int:desc   third field as an integer, largest first
//!   1:fold       first field, ASCII case-insensitive
//!
//! Flags are `desc`, `fold`, `nulls-first` and `nulls-last`. Without an
//! explicit null flag, empty fields sort first for ascending keys and
//! last for descending ones.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::error::OrderError;
use crate::nulls::NullPolicy;
use crate::order::Order;
use crate::record::{Field, FieldType, Record};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    /// 1-based field position.
    pub field: usize,
    pub ty: FieldType,
    pub descending: bool,
    pub fold_case: bool,
    pub nulls: Option<NullPolicy>,
}

impl SortKey {
    pub fn new(field: usize) -> SortKey {
        SortKey {
            field,
            ty: FieldType::Text,
            descending: false,
            fold_case: false,
            nulls: None,
        }
    }

    pub fn null_policy(&self) -> NullPolicy {
        match (self.nulls, self.descending) {
            (Some(policy), _) => policy,
            (None, false) => NullPolicy::First,
            (None, true) => NullPolicy::Last,
        }
    }

    /// The typed value of this key's field, `None` when the field is
    /// missing, empty or does not parse.
    pub fn project(&self, record: &Record) -> Option<Field> {
        let raw = record.field(self.field)?;
        let field = self.ty.parse_field(raw).ok()?;
        Some(match field {
            Field::Text(text) if self.fold_case => Field::Text(text.to_ascii_lowercase()),
            other => other,
        })
    }

    /// Checks that the field parses as this key's type wherever present.
    pub fn validate(&self, record: &Record) -> Result<(), OrderError> {
        match record.field(self.field) {
            Some(raw) => self
                .ty
                .parse_field(raw)
                .map(|_| ())
                .map_err(|message| OrderError::InvalidField {
                    line: record.line,
                    field: self.field,
                    message,
                }),
            None => Ok(()),
        }
    }

    pub fn order(&self) -> Order<Record> {
        let present = if self.descending {
            Order::<Field>::natural_reversed()
        } else {
            Order::<Field>::natural()
        };
        let keys = present.nulls(self.null_policy());
        let key = self.clone();
        Order::by_key_with(&keys, move |record: &Record| key.project(record))
    }
}

impl FromStr for SortKey {
    type Err = OrderError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = |message: String| OrderError::InvalidKey {
            key: value.to_string(),
            message,
        };

        let mut parts = value.split(':');
        let position = parts.next().unwrap_or_default().trim();
        let field = position
            .parse::<usize>()
            .map_err(|_| invalid(format!("field position '{position}' is not a number")))?;
        if field == 0 {
            return Err(invalid("field positions start at 1".to_string()));
        }

        let mut key = SortKey::new(field);
        for (index, part) in parts.enumerate() {
            match part.trim() {
                "desc" => key.descending = true,
                "asc" => key.descending = false,
                "fold" => key.fold_case = true,
                "nulls-first" => key.nulls = Some(NullPolicy::First),
                "nulls-last" => key.nulls = Some(NullPolicy::Last),
                other if index == 0 => key.ty = other.parse().map_err(invalid)?,
                other => return Err(invalid(format!("unknown flag '{other}'"))),
            }
        }
        Ok(key)
    }
}

/// Chains the keys in priority order. With no keys, whole lines are
/// compared as text.
pub fn build_order(keys: &[SortKey]) -> Order<Record> {
    keys.iter()
        .map(SortKey::order)
        .reduce(|primary, fallback| primary.then(&fallback))
        .unwrap_or_else(whole_line)
}

/// Validates every record against every key before any comparison runs.
pub fn validate_records(records: &[Record], keys: &[SortKey]) -> Result<(), OrderError> {
    for record in records {
        for key in keys {
            key.validate(record)?;
        }
    }
    Ok(())
}

fn whole_line() -> Order<Record> {
    Order::from_fn(|a: &Record, b: &Record| -> Ordering { a.raw.cmp(&b.raw) })
}
