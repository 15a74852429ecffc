use thiserror::Error;

pub mod categories;
pub mod chart;
pub mod log;
pub mod ops;

pub use categories::{CategorySet, Direction};
pub use chart::{Expectations, YearChart, YearLayout};
pub use log::{Transaction, TransactionLog};
pub use ops::{Append, Apply, Delete, Edit, LogOp};

#[derive(Debug, Error, PartialEq)]
pub enum BudgetError {
    #[error("amount must be greater than zero")]
    NonPositiveAmount,
    #[error("category name is empty")]
    EmptyCategory,
    #[error("no {direction} category named {name:?}")]
    UnknownCategory { direction: Direction, name: String },
    #[error("{direction} already has a category named {name:?}")]
    DuplicateCategory { direction: Direction, name: String },
    #[error("row {row} is out of range, the log holds {rows} transactions")]
    RowOutOfRange { row: usize, rows: usize },
}
