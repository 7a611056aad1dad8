// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use thiserror::Error as DError;

#[derive(Debug, Clone, DError)]
pub enum ErrorKind {
    #[error("Couldn't found user with id({0})")]
    UserNotFound(String),

    #[error("Couldn't found item with id({0})")]
    ItemNotFound(String),

    #[error("Couldn't found rating for user({0}) on item({1})")]
    RatingNotFound(String, String),

    #[error("Malformed record at line {0}: {1}")]
    MalformedRecord(u64, String),

    #[error("Invalid delimiter '{0}', expected a single ASCII character")]
    InvalidDelimiter(char),
}
