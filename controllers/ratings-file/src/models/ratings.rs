// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use controller::error::ErrorKind;
use csv::StringRecord;
use std::{fmt::Display, str::FromStr};

// One row of a ratings file: item, user, score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rating {
    pub item_id: i32,
    pub user_id: i32,
    pub score: f64,
}

impl Rating {
    pub fn new(item_id: i32, user_id: i32, score: f64) -> Self {
        Self {
            item_id,
            user_id,
            score,
        }
    }

    pub fn from_record(record: &StringRecord) -> Result<Self, ErrorKind> {
        let line = record.position().map(|pos| pos.line()).unwrap_or_default();

        if record.len() != 3 {
            return Err(ErrorKind::MalformedRecord(
                line,
                format!("expected 3 fields, found {}", record.len()),
            ));
        }

        Ok(Self {
            item_id: parse_field(record, 0, "item id", line)?,
            user_id: parse_field(record, 1, "user id", line)?,
            score: parse_field(record, 2, "rating", line)?,
        })
    }
}

fn parse_field<T>(record: &StringRecord, idx: usize, name: &str, line: u64) -> Result<T, ErrorKind>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = &record[idx];
    raw.parse()
        .map_err(|e| ErrorKind::MalformedRecord(line, format!("invalid {} '{}': {}", name, raw, e)))
}
