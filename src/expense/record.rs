use std::fmt::Display;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExpenseId(u64);
impl ExpenseId {
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}
impl Display for ExpenseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Approval state of an expense. New expenses are submitted as `Pending`;
/// a manager moves them to `Approved` or `Rejected`. No transition is
/// blocked after that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseStatus {
    Pending,
    Approved,
    Rejected,
}
impl ExpenseStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}
impl Display for ExpenseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The fixed category set offered by expense forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    Travel,
    #[serde(rename = "Meals & Entertainment")]
    MealsAndEntertainment,
    #[serde(rename = "Office Supplies")]
    OfficeSupplies,
    #[serde(rename = "Software & Subscriptions")]
    SoftwareAndSubscriptions,
    Marketing,
    #[serde(rename = "Training & Development")]
    TrainingAndDevelopment,
    Equipment,
    Utilities,
    Other,
}

/// All categories, in the order forms present them.
pub const EXPENSE_CATEGORIES: [ExpenseCategory; 9] = [
    ExpenseCategory::Travel,
    ExpenseCategory::MealsAndEntertainment,
    ExpenseCategory::OfficeSupplies,
    ExpenseCategory::SoftwareAndSubscriptions,
    ExpenseCategory::Marketing,
    ExpenseCategory::TrainingAndDevelopment,
    ExpenseCategory::Equipment,
    ExpenseCategory::Utilities,
    ExpenseCategory::Other,
];

impl ExpenseCategory {
    pub fn label(self) -> &'static str {
        match self {
            Self::Travel => "Travel",
            Self::MealsAndEntertainment => "Meals & Entertainment",
            Self::OfficeSupplies => "Office Supplies",
            Self::SoftwareAndSubscriptions => "Software & Subscriptions",
            Self::Marketing => "Marketing",
            Self::TrainingAndDevelopment => "Training & Development",
            Self::Equipment => "Equipment",
            Self::Utilities => "Utilities",
            Self::Other => "Other",
        }
    }
}
impl Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One logged expense. Amounts are accepted as given; form-level
/// validation is the caller's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub amount: f64,
    pub category: ExpenseCategory,
    pub description: String,
    pub date: NaiveDate,
    pub employee: String,
    pub status: ExpenseStatus,
}

/// Input for [`crate::ExpenseStore::add_expense`]. The store assigns the
/// id; everything else is taken as given, including the declared status
/// (submission forms pass [`ExpenseStatus::Pending`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExpense {
    pub amount: f64,
    pub category: ExpenseCategory,
    pub description: String,
    pub date: NaiveDate,
    pub employee: String,
    pub status: ExpenseStatus,
}
