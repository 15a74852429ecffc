use std::fmt;

use chrono::{Datelike, NaiveDate};
use getset::{CopyGetters, Getters};
use rust_decimal::Decimal;

use super::categories::Direction;
use super::ops::{Apply, LogOp};
use super::BudgetError;

/// A single logged movement of money. The amount carries the direction in
/// its sign: income is positive, expenses are negative.
#[derive(Debug, Clone, PartialEq, Getters, CopyGetters)]
pub struct Transaction {
    #[getset(get_copy = "pub")]
    date: NaiveDate,
    #[getset(get_copy = "pub")]
    amount: Decimal,
    #[getset(get = "pub")]
    category: String,
    #[getset(get = "pub")]
    description: String,
}

impl Transaction {
    /// Builds a transaction from an already signed amount, as read back from
    /// a log sheet.
    pub fn new(date: NaiveDate, amount: Decimal, category: String, description: String) -> Self {
        Transaction {
            date,
            amount,
            category,
            description,
        }
    }

    /// Builds a transaction from user input: a strictly positive amount plus
    /// the direction that decides its sign.
    pub fn entry(
        direction: Direction,
        date: NaiveDate,
        amount: Decimal,
        category: String,
        description: String,
    ) -> Result<Self, BudgetError> {
        if amount <= Decimal::ZERO {
            return Err(BudgetError::NonPositiveAmount);
        }

        Ok(Transaction::new(
            date,
            direction.signed(amount),
            category,
            description,
        ))
    }

    pub fn direction(&self) -> Direction {
        if self.amount < Decimal::ZERO {
            Direction::Output
        } else {
            Direction::Input
        }
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Date: {}, Amount: ${}, Category: {}, Description: {}",
            self.date,
            self.amount.normalize(),
            self.category,
            self.description
        )
    }
}

/// The transaction log, kept sorted by date with the newest entry first.
/// Rows are addressed 1-based in that display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionLog {
    transactions: Vec<Transaction>,
}

impl TransactionLog {
    pub fn new() -> Self {
        TransactionLog::default()
    }

    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        let mut log = TransactionLog { transactions };
        log.sort();
        log
    }

    pub fn apply(&mut self, op: LogOp) -> Result<(), BudgetError> {
        op.apply(self)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Iterates newest first, matching the stored sheet order.
    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    pub fn get(&self, row: usize) -> Result<&Transaction, BudgetError> {
        let index = self.index_of(row)?;
        Ok(&self.transactions[index])
    }

    /// Iterates one year's transactions, newest first.
    pub fn for_year(&self, year: i32) -> impl Iterator<Item = &Transaction> {
        self.transactions
            .iter()
            .filter(move |transaction| transaction.year() == year)
    }

    /// The distinct years covered by the log, oldest first.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.transactions.iter().map(Transaction::year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    pub(crate) fn append(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
        self.sort();
    }

    pub(crate) fn replace(
        &mut self,
        row: usize,
        transaction: Transaction,
    ) -> Result<(), BudgetError> {
        let index = self.index_of(row)?;
        self.transactions[index] = transaction;
        self.sort();
        Ok(())
    }

    pub(crate) fn remove(&mut self, row: usize) -> Result<Transaction, BudgetError> {
        let index = self.index_of(row)?;
        Ok(self.transactions.remove(index))
    }

    fn index_of(&self, row: usize) -> Result<usize, BudgetError> {
        if row == 0 || row > self.transactions.len() {
            return Err(BudgetError::RowOutOfRange {
                row,
                rows: self.transactions.len(),
            });
        }
        Ok(row - 1)
    }

    // Stable, so same-day transactions keep their insertion order.
    fn sort(&mut self) {
        self.transactions.sort_by(|a, b| b.date().cmp(&a.date()));
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn salary(year: i32, month: u32, day: u32) -> Transaction {
        Transaction::new(
            date(year, month, day),
            dec!(1000),
            "Salary".to_string(),
            String::new(),
        )
    }

    #[test]
    fn entries_are_signed_by_direction() {
        let rent = Transaction::entry(
            Direction::Output,
            date(2024, 1, 3),
            dec!(850),
            "Rent".to_string(),
            "january".to_string(),
        )
        .unwrap();

        assert_eq!(rent.amount(), dec!(-850));
        assert_eq!(rent.direction(), Direction::Output);

        let pay = Transaction::entry(
            Direction::Input,
            date(2024, 1, 25),
            dec!(1900.50),
            "Salary".to_string(),
            String::new(),
        )
        .unwrap();

        assert_eq!(pay.amount(), dec!(1900.50));
        assert_eq!(pay.direction(), Direction::Input);
    }

    #[test]
    fn entry_rejects_non_positive_amounts() {
        let result = Transaction::entry(
            Direction::Input,
            date(2024, 1, 1),
            dec!(0),
            "Salary".to_string(),
            String::new(),
        );
        assert_eq!(result, Err(BudgetError::NonPositiveAmount));
    }

    #[test]
    fn log_sorts_newest_first() {
        let log = TransactionLog::from_transactions(vec![
            salary(2023, 5, 1),
            salary(2024, 2, 10),
            salary(2023, 12, 31),
        ]);

        let dates: Vec<NaiveDate> = log.iter().map(Transaction::date).collect();
        assert_eq!(
            dates,
            vec![date(2024, 2, 10), date(2023, 12, 31), date(2023, 5, 1)]
        );
    }

    #[test]
    fn same_day_transactions_keep_insertion_order() {
        let mut log = TransactionLog::new();
        let first = Transaction::new(
            date(2024, 3, 3),
            dec!(-10),
            "Dining".to_string(),
            "lunch".to_string(),
        );
        let second = Transaction::new(
            date(2024, 3, 3),
            dec!(-20),
            "Dining".to_string(),
            "dinner".to_string(),
        );
        log.append(first.clone());
        log.append(second.clone());

        assert_eq!(log.get(1).unwrap(), &first);
        assert_eq!(log.get(2).unwrap(), &second);
    }

    #[test]
    fn rows_are_one_based() {
        let log = TransactionLog::from_transactions(vec![salary(2024, 1, 1)]);

        assert_eq!(
            log.get(0),
            Err(BudgetError::RowOutOfRange { row: 0, rows: 1 })
        );
        assert!(log.get(1).is_ok());
        assert_eq!(
            log.get(2),
            Err(BudgetError::RowOutOfRange { row: 2, rows: 1 })
        );
    }

    #[test]
    fn years_are_distinct_and_ascending() {
        let log = TransactionLog::from_transactions(vec![
            salary(2024, 1, 1),
            salary(2022, 6, 15),
            salary(2024, 3, 9),
        ]);

        assert_eq!(log.years(), vec![2022, 2024]);
    }

    #[test]
    fn for_year_filters_without_reordering() {
        let log = TransactionLog::from_transactions(vec![
            salary(2024, 1, 1),
            salary(2022, 6, 15),
            salary(2024, 3, 9),
        ]);

        let dates: Vec<NaiveDate> = log.for_year(2024).map(Transaction::date).collect();
        assert_eq!(dates, vec![date(2024, 3, 9), date(2024, 1, 1)]);
        assert_eq!(log.for_year(2021).count(), 0);
    }
}
