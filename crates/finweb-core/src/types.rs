//! Basic types for the core ledger module

use serde::{Deserialize, Serialize};

/// Transaction kind enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Money earned
    Income,
    /// Money spent
    Expense,
}

impl TransactionKind {
    /// Both kinds in form order
    pub const ALL: [TransactionKind; 2] = [TransactionKind::Income, TransactionKind::Expense];

    /// Label used for grouping and display
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" | "expenses" => Ok(TransactionKind::Expense),
            _ => Err(format!("Invalid transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Category enumeration
///
/// The set is closed; declaration order is the order used by the input
/// form and as the tie-breaker when sorting breakdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Salary,
    Food,
    Rent,
    Shopping,
    Travel,
    Others,
}

impl Category {
    /// Every category in form order
    pub const ALL: [Category; 6] = [
        Category::Salary,
        Category::Food,
        Category::Rent,
        Category::Shopping,
        Category::Travel,
        Category::Others,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Salary => "Salary",
            Category::Food => "Food",
            Category::Rent => "Rent",
            Category::Shopping => "Shopping",
            Category::Travel => "Travel",
            Category::Others => "Others",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "salary" => Ok(Category::Salary),
            "food" => Ok(Category::Food),
            "rent" => Ok(Category::Rent),
            "shopping" => Ok(Category::Shopping),
            "travel" => Ok(Category::Travel),
            "others" | "other" => Ok(Category::Others),
            _ => Err(format!("Invalid category: {}", s)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
