//! Route error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RouteError {
    #[error("Route table must contain at least one route")]
    Empty,

    #[error("Index {index} is out of range for {len} routes")]
    OutOfRange { index: usize, len: usize },

    #[error("Page {0} is bound to more than one route")]
    DuplicatePage(String),

    #[error("Invalid route table definition: {0}")]
    Definition(#[from] serde_json::Error),
}
