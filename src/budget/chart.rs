use std::collections::HashMap;
use std::str::FromStr;

use chrono::NaiveDate;
use getset::CopyGetters;
use log::debug;
use rust_decimal::Decimal;

use super::categories::{CategorySet, Direction};
use super::log::TransactionLog;
use crate::sheets::Grid;

pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const TOTAL_LABEL: &str = "Total";
pub const OVERALL_LABEL: &str = "Overall Total";
pub const CUMULATIVE_LABEL: &str = "Cumulative Total";

/// Row and column positions inside a year sheet, derived from the number of
/// categories per direction. Rows and columns are 1-based.
///
/// Row 1 holds the month names, row 2 the Expected/Actual labels, and then
/// one block per direction: a title row, one row per category, and a Total
/// row, with an Overall Total row at the bottom. Each month owns a column
/// pair, Expected then Actual.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearLayout {
    inputs: usize,
    outputs: usize,
}

impl YearLayout {
    pub fn new(categories: &CategorySet) -> Self {
        YearLayout {
            inputs: categories.list(Direction::Input).len(),
            outputs: categories.list(Direction::Output).len(),
        }
    }

    pub fn section_row(&self, direction: Direction) -> usize {
        match direction {
            Direction::Input => 3,
            Direction::Output => 5 + self.inputs,
        }
    }

    pub fn category_row(&self, direction: Direction, index: usize) -> usize {
        self.section_row(direction) + 1 + index
    }

    pub fn total_row(&self, direction: Direction) -> usize {
        let categories = match direction {
            Direction::Input => self.inputs,
            Direction::Output => self.outputs,
        };
        self.section_row(direction) + 1 + categories
    }

    pub fn overall_row(&self) -> usize {
        self.total_row(Direction::Output) + 1
    }

    /// The row holding the running all-time balance. Only rendered in chart
    /// views, never stored in the sheet.
    pub fn cumulative_row(&self) -> usize {
        self.overall_row() + 1
    }

    pub fn rows(&self) -> usize {
        self.overall_row()
    }

    pub fn expected_col(month: u32) -> usize {
        2 * month as usize
    }

    pub fn actual_col(month: u32) -> usize {
        2 * month as usize + 1
    }

    pub fn columns() -> usize {
        Self::actual_col(12)
    }
}

/// Planned amounts, keyed by direction, category and month. The direction is
/// part of the key so a name used in both directions stays unambiguous.
///
/// A zero expectation is the same as no expectation, and is never stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expectations {
    cells: HashMap<(Direction, String, u32), Decimal>,
}

impl Expectations {
    /// Reads the Expected cells out of a stored year sheet. The first column
    /// drives a small state machine: a section title switches direction,
    /// total and blank labels are skipped, and anything else is treated as a
    /// category label of the current section. Labels no longer in the
    /// taxonomy are dropped. Unreadable cells count as zero.
    pub fn from_grid(grid: &Grid, categories: &CategorySet) -> Self {
        let mut expectations = Expectations::default();
        let mut section = None;

        for row in grid {
            let label = row.first().map(String::as_str).unwrap_or("");
            if let Some(direction) = Direction::from_title(label) {
                section = Some(direction);
                continue;
            }
            if label.is_empty()
                || label == TOTAL_LABEL
                || label == OVERALL_LABEL
                || label == CUMULATIVE_LABEL
            {
                continue;
            }
            let Some(direction) = section else {
                continue;
            };
            if !categories.contains(direction, label) {
                continue;
            }

            for month in 1..=12 {
                let cell = row
                    .get(YearLayout::expected_col(month) - 1)
                    .map(String::as_str)
                    .unwrap_or("");
                expectations.set(direction, label, month, parse_cell_or_zero(cell));
            }
        }

        expectations
    }

    pub fn get(&self, direction: Direction, category: &str, month: u32) -> Decimal {
        self.cells
            .get(&(direction, category.to_string(), month))
            .copied()
            .unwrap_or_default()
    }

    pub fn set(&mut self, direction: Direction, category: &str, month: u32, amount: Decimal) {
        let key = (direction, category.to_string(), month);
        if amount.is_zero() {
            self.cells.remove(&key);
        } else {
            self.cells.insert(key, amount);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

fn parse_cell_or_zero(cell: &str) -> Decimal {
    Decimal::from_str(cell.trim()).unwrap_or_default()
}

fn fmt_cell(value: Decimal) -> String {
    value.normalize().to_string()
}

// The last calendar day of the given month, clamped to the calendar edge
// for years chrono cannot represent.
fn month_end(year: i32, month: u32) -> NaiveDate {
    let first_of_next = if month == 12 {
        year.checked_add(1)
            .and_then(|next_year| NaiveDate::from_ymd_opt(next_year, 1, 1))
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    first_of_next
        .and_then(|first| first.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// One year of the budget: expectations against actuals, by month and
/// category, plus a cumulative all-time balance through each month.
///
/// Actuals are always computed from the log at build time. Only the sheet
/// skeleton and the Expected cells are ever written back to storage.
#[derive(Debug, Clone, PartialEq, CopyGetters)]
pub struct YearChart {
    #[getset(get_copy = "pub")]
    year: i32,
    categories: CategorySet,
    expectations: Expectations,
    actual: HashMap<(Direction, String, u32), Decimal>,
    cumulative: [Decimal; 12],
}

impl YearChart {
    pub fn build(
        year: i32,
        log: &TransactionLog,
        categories: &CategorySet,
        expectations: Expectations,
    ) -> Self {
        let mut actual: HashMap<(Direction, String, u32), Decimal> = HashMap::new();
        for transaction in log.for_year(year) {
            let direction = transaction.direction();
            if !categories.contains(direction, transaction.category()) {
                debug!(
                    "no {} category named {:?}, leaving transaction out of the chart",
                    direction,
                    transaction.category()
                );
                continue;
            }
            let key = (direction, transaction.category().clone(), transaction.month());
            *actual.entry(key).or_default() += transaction.amount();
        }

        // The running balance counts every logged transaction up to the end
        // of the month, prior years and off-taxonomy categories included.
        let mut cumulative = [Decimal::ZERO; 12];
        for month in 1..=12u32 {
            let end = month_end(year, month);
            cumulative[month as usize - 1] = log
                .iter()
                .filter(|transaction| transaction.date() <= end)
                .map(|transaction| transaction.amount())
                .sum();
        }

        YearChart {
            year,
            categories: categories.clone(),
            expectations,
            actual,
            cumulative,
        }
    }

    pub fn layout(&self) -> YearLayout {
        YearLayout::new(&self.categories)
    }

    pub fn sheet_name(&self) -> String {
        self.year.to_string()
    }

    pub fn expected(&self, direction: Direction, category: &str, month: u32) -> Decimal {
        self.expectations.get(direction, category, month)
    }

    pub fn actual(&self, direction: Direction, category: &str, month: u32) -> Decimal {
        self.actual
            .get(&(direction, category.to_string(), month))
            .copied()
            .unwrap_or_default()
    }

    pub fn total_expected(&self, direction: Direction, month: u32) -> Decimal {
        self.categories
            .list(direction)
            .iter()
            .map(|category| self.expected(direction, category, month))
            .sum()
    }

    pub fn total_actual(&self, direction: Direction, month: u32) -> Decimal {
        self.categories
            .list(direction)
            .iter()
            .map(|category| self.actual(direction, category, month))
            .sum()
    }

    pub fn overall_expected(&self, month: u32) -> Decimal {
        self.total_expected(Direction::Input, month) + self.total_expected(Direction::Output, month)
    }

    pub fn overall_actual(&self, month: u32) -> Decimal {
        self.total_actual(Direction::Input, month) + self.total_actual(Direction::Output, month)
    }

    pub fn cumulative(&self, month: u32) -> Decimal {
        self.cumulative
            .get(month as usize - 1)
            .copied()
            .unwrap_or_default()
    }

    /// The grid written to storage: labels plus the non-zero Expected cells.
    /// Actual columns stay blank, they are recomputed from the log on every
    /// read.
    pub fn sheet_grid(&self) -> Grid {
        let layout = self.layout();
        let mut grid = self.frame(&layout);

        for direction in [Direction::Input, Direction::Output] {
            for (index, category) in self.categories.list(direction).iter().enumerate() {
                for month in 1..=12u32 {
                    let value = self.expected(direction, category, month);
                    if !value.is_zero() {
                        grid[layout.category_row(direction, index) - 1]
                            [YearLayout::expected_col(month) - 1] = fmt_cell(value);
                    }
                }
            }
        }

        grid
    }

    /// The fully computed chart: Expected and Actual columns for every
    /// category, section totals, the overall net, and the cumulative balance
    /// row at the bottom.
    pub fn view_grid(&self) -> Grid {
        let layout = self.layout();
        let mut grid = self.frame(&layout);

        for direction in [Direction::Input, Direction::Output] {
            for (index, category) in self.categories.list(direction).iter().enumerate() {
                let row = layout.category_row(direction, index) - 1;
                for month in 1..=12u32 {
                    grid[row][YearLayout::expected_col(month) - 1] =
                        fmt_cell(self.expected(direction, category, month));
                    grid[row][YearLayout::actual_col(month) - 1] =
                        fmt_cell(self.actual(direction, category, month));
                }
            }

            let total = layout.total_row(direction) - 1;
            for month in 1..=12u32 {
                grid[total][YearLayout::expected_col(month) - 1] =
                    fmt_cell(self.total_expected(direction, month));
                grid[total][YearLayout::actual_col(month) - 1] =
                    fmt_cell(self.total_actual(direction, month));
            }
        }

        let overall = layout.overall_row() - 1;
        for month in 1..=12u32 {
            grid[overall][YearLayout::expected_col(month) - 1] =
                fmt_cell(self.overall_expected(month));
            grid[overall][YearLayout::actual_col(month) - 1] = fmt_cell(self.overall_actual(month));
        }

        let mut balance = vec![String::new(); YearLayout::columns()];
        balance[0] = CUMULATIVE_LABEL.to_string();
        for month in 1..=12u32 {
            balance[YearLayout::expected_col(month) - 1] = fmt_cell(self.cumulative(month));
        }
        grid.push(balance);

        grid
    }

    // Empty grid with all the row and column labels in place.
    fn frame(&self, layout: &YearLayout) -> Grid {
        let mut grid: Grid = (0..layout.rows())
            .map(|_| vec![String::new(); YearLayout::columns()])
            .collect();

        for (index, month) in MONTHS.iter().enumerate() {
            let col = YearLayout::expected_col(index as u32 + 1) - 1;
            grid[0][col] = month.to_string();
            grid[1][col] = "Expected".to_string();
            grid[1][col + 1] = "Actual".to_string();
        }

        for direction in [Direction::Input, Direction::Output] {
            grid[layout.section_row(direction) - 1][0] = direction.to_string();
            for (index, category) in self.categories.list(direction).iter().enumerate() {
                grid[layout.category_row(direction, index) - 1][0] = category.clone();
            }
            grid[layout.total_row(direction) - 1][0] = TOTAL_LABEL.to_string();
        }
        grid[layout.overall_row() - 1][0] = OVERALL_LABEL.to_string();

        grid
    }
}
