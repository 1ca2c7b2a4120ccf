use std::fmt::{Display, Formatter};

use error_stack::Report;
use serde::{Deserialize, Serialize};

use crate::KernelError;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = Report<KernelError>;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(Report::new(KernelError::Internal)
                .attach_printable(format!("Unknown transaction kind: {value}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Service,
    Insurance,
    Fuel,
    Marketing,
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 5] = [
        ExpenseCategory::Service,
        ExpenseCategory::Insurance,
        ExpenseCategory::Fuel,
        ExpenseCategory::Marketing,
        ExpenseCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Service => "service",
            ExpenseCategory::Insurance => "insurance",
            ExpenseCategory::Fuel => "fuel",
            ExpenseCategory::Marketing => "marketing",
            ExpenseCategory::Other => "other",
        }
    }
}

impl Display for ExpenseCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ExpenseCategory {
    type Error = Report<KernelError>;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        ExpenseCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| {
                Report::new(KernelError::Internal)
                    .attach_printable(format!("Unknown expense category: {value}"))
            })
    }
}
