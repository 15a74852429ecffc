use enum_dispatch::enum_dispatch;

use super::log::{Transaction, TransactionLog};
use super::BudgetError;

/// An edit applied to the transaction log. Row numbers address the log in
/// its display order, 1-based with the newest transaction first.
#[enum_dispatch]
pub trait Apply {
    fn apply(self, log: &mut TransactionLog) -> Result<(), BudgetError>;
}

#[derive(Debug)]
pub struct Append {
    transaction: Transaction,
}

impl Append {
    pub fn new(transaction: Transaction) -> Self {
        Append { transaction }
    }
}

impl Apply for Append {
    fn apply(self, log: &mut TransactionLog) -> Result<(), BudgetError> {
        log.append(self.transaction);
        Ok(())
    }
}

#[derive(Debug)]
pub struct Edit {
    row: usize,
    transaction: Transaction,
}

impl Edit {
    pub fn new(row: usize, transaction: Transaction) -> Self {
        Edit { row, transaction }
    }
}

impl Apply for Edit {
    fn apply(self, log: &mut TransactionLog) -> Result<(), BudgetError> {
        log.replace(self.row, self.transaction)
    }
}

#[derive(Debug)]
pub struct Delete {
    row: usize,
}

impl Delete {
    pub fn new(row: usize) -> Self {
        Delete { row }
    }
}

impl Apply for Delete {
    fn apply(self, log: &mut TransactionLog) -> Result<(), BudgetError> {
        log.remove(self.row).map(|_| ())
    }
}

#[enum_dispatch(Apply)]
#[derive(Debug)]
pub enum LogOp {
    Append(Append),
    Edit(Edit),
    Delete(Delete),
}
