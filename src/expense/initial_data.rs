use chrono::NaiveDate;

use super::record::{Expense, ExpenseCategory, ExpenseId, ExpenseStatus};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("seed dates are valid")
}

/// The built-in expense dataset a fresh workspace starts from. Replaced by
/// stored data once a persisted slot exists.
pub fn initial_expenses() -> Vec<Expense> {
    vec![
        Expense {
            id: ExpenseId::new(1),
            amount: 125.50,
            category: ExpenseCategory::Travel,
            description: "Taxi to client meeting".to_string(),
            date: date(2024, 1, 15),
            employee: "John Smith".to_string(),
            status: ExpenseStatus::Approved,
        },
        Expense {
            id: ExpenseId::new(2),
            amount: 45.00,
            category: ExpenseCategory::MealsAndEntertainment,
            description: "Team lunch".to_string(),
            date: date(2024, 1, 14),
            employee: "Sarah Johnson".to_string(),
            status: ExpenseStatus::Pending,
        },
        Expense {
            id: ExpenseId::new(3),
            amount: 89.99,
            category: ExpenseCategory::OfficeSupplies,
            description: "Printer paper and ink".to_string(),
            date: date(2024, 1, 13),
            employee: "Mike Davis".to_string(),
            status: ExpenseStatus::Rejected,
        },
    ]
}
