use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::BudgetError;

/// Which side of the budget a category (or an amount) belongs to.
///
/// Displays as the section title used in year sheets, `Input` or `Output`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Input,
    Output,
}

impl Direction {
    pub fn from_title(label: &str) -> Option<Self> {
        match label {
            "Input" => Some(Direction::Input),
            "Output" => Some(Direction::Output),
            _ => None,
        }
    }

    /// Applies the direction's sign to a positive entry amount. Income is
    /// stored positive, expenses negative.
    pub fn signed(&self, amount: Decimal) -> Decimal {
        match self {
            Direction::Input => amount,
            Direction::Output => -amount,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Input => write!(f, "Input"),
            Direction::Output => write!(f, "Output"),
        }
    }
}

/// The category taxonomy, one ordered list per direction. The same name may
/// appear in both directions and the two entries stay independent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySet {
    #[serde(rename = "Categories In")]
    input: Vec<String>,
    #[serde(rename = "Categories Out")]
    output: Vec<String>,
}

impl CategorySet {
    pub fn new(input: Vec<String>, output: Vec<String>) -> Self {
        CategorySet { input, output }
    }

    pub fn defaults() -> Self {
        CategorySet {
            input: vec!["Salary".to_string(), "Misc".to_string()],
            output: vec![
                "Rent".to_string(),
                "Groceries".to_string(),
                "Car".to_string(),
                "Credit Card".to_string(),
                "Subscriptions".to_string(),
                "Dining".to_string(),
                "Recreational".to_string(),
                "Gifts".to_string(),
                "Misc".to_string(),
            ],
        }
    }

    pub fn list(&self, direction: Direction) -> &[String] {
        match direction {
            Direction::Input => &self.input,
            Direction::Output => &self.output,
        }
    }

    fn list_mut(&mut self, direction: Direction) -> &mut Vec<String> {
        match direction {
            Direction::Input => &mut self.input,
            Direction::Output => &mut self.output,
        }
    }

    pub fn contains(&self, direction: Direction, name: &str) -> bool {
        self.list(direction).iter().any(|category| category == name)
    }

    pub fn require(&self, direction: Direction, name: &str) -> Result<(), BudgetError> {
        if self.contains(direction, name) {
            Ok(())
        } else {
            Err(BudgetError::UnknownCategory {
                direction,
                name: name.to_string(),
            })
        }
    }

    pub fn add(&mut self, direction: Direction, name: &str) -> Result<(), BudgetError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BudgetError::EmptyCategory);
        }
        if self.contains(direction, name) {
            return Err(BudgetError::DuplicateCategory {
                direction,
                name: name.to_string(),
            });
        }
        self.list_mut(direction).push(name.to_string());
        Ok(())
    }

    pub fn remove(&mut self, direction: Direction, name: &str) -> Result<(), BudgetError> {
        let list = self.list_mut(direction);
        match list.iter().position(|category| category == name) {
            Some(index) => {
                list.remove(index);
                Ok(())
            },
            None => Err(BudgetError::UnknownCategory {
                direction,
                name: name.to_string(),
            }),
        }
    }
}
