use std::collections::HashSet;

use log::debug;

use crate::errors::{NotFound, StoreInitError};

use super::initial_data::initial_expenses;
use super::record::{Expense, ExpenseCategory, ExpenseId, ExpenseStatus, NewExpense};
use super::summary::ExpenseSummary;

type PersistHook = Box<dyn Fn(&ExpenseStore) + Send + Sync>;

/// Owns the expense collection. Created once by the composition root and
/// handed to consumers by reference; every mutation runs to completion
/// before the next starts.
///
/// The collection is kept newest-first, which is also the order readers
/// display it in.
pub struct ExpenseStore {
    previous_expense_id: u64,
    expenses: Vec<Expense>,
    persist: Option<PersistHook>,
}

impl ExpenseStore {
    /// Restores a store from a previously persisted collection. The id
    /// counter continues above the highest restored id.
    pub fn new(expenses: Vec<Expense>) -> Result<Self, StoreInitError> {
        let mut seen = HashSet::new();
        for expense in &expenses {
            if !seen.insert(expense.id) {
                return Err(StoreInitError::DuplicateExpenseId(expense.id));
            }
        }

        let previous_expense_id = expenses.iter().map(|x| x.id.value()).max().unwrap_or(0);

        Ok(Self {
            previous_expense_id,
            expenses,
            persist: None,
        })
    }

    /// Returns a store holding the built-in seed dataset.
    pub fn seeded() -> Self {
        Self::new(initial_expenses()).expect("seed dataset has unique ids")
    }

    /// Installs the hook invoked after every completed mutation. The hook
    /// is fire-and-forget: its outcome never reaches the caller.
    pub fn set_persist_hook(&mut self, hook: impl Fn(&ExpenseStore) + Send + Sync + 'static) {
        self.persist = Some(Box::new(hook));
    }

    fn notify_persist(&self) {
        if let Some(hook) = &self.persist {
            hook(self);
        }
    }

    fn next_expense_id(&mut self) -> ExpenseId {
        self.previous_expense_id += 1;
        ExpenseId::new(self.previous_expense_id)
    }
}

impl ExpenseStore {
    /// All expenses, newest first.
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn expense_from_id(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|x| x.id == id)
    }
}

impl ExpenseStore {
    /// Logs a new expense and returns its id. Always succeeds; the status
    /// is taken from the input as declared.
    pub fn add_expense(&mut self, data: NewExpense) -> ExpenseId {
        let id = self.next_expense_id();
        self.expenses.insert(
            0,
            Expense {
                id,
                amount: data.amount,
                category: data.category,
                description: data.description,
                date: data.date,
                employee: data.employee,
                status: data.status,
            },
        );
        debug!("expense {id} added");
        self.notify_persist();
        id
    }

    /// Moves an expense to a new approval status.
    pub fn update_expense_status(
        &mut self,
        id: ExpenseId,
        status: ExpenseStatus,
    ) -> Result<(), NotFound> {
        match self.expenses.iter_mut().find(|x| x.id == id) {
            Some(expense) => {
                expense.status = status;
                debug!("expense {id} moved to {status}");
                self.notify_persist();
                Ok(())
            }
            None => Err(NotFound::Expense(id)),
        }
    }

    /// Removes an expense permanently. Returns false when no expense
    /// carries the id, so repeated deletion is harmless.
    pub fn delete_expense(&mut self, id: ExpenseId) -> bool {
        match self.expenses.iter().position(|x| x.id == id) {
            Some(index) => {
                self.expenses.remove(index);
                debug!("expense {id} deleted");
                self.notify_persist();
                true
            }
            None => false,
        }
    }
}

impl ExpenseStore {
    /// Totals over the current collection. Pure; recomputed on demand.
    pub fn summary(&self) -> ExpenseSummary {
        let mut summary = ExpenseSummary::default();
        for expense in &self.expenses {
            summary.total += expense.amount;
            match expense.status {
                ExpenseStatus::Pending => summary.pending += expense.amount,
                ExpenseStatus::Approved => summary.approved += expense.amount,
                ExpenseStatus::Rejected => summary.rejected += expense.amount,
            }
            *summary.by_category.entry(expense.category).or_insert(0.0) += expense.amount;
        }
        summary
    }

    /// The subset matching a search term and optional category/status
    /// filters. The term matches case-insensitively against employee,
    /// description and category label; `None` filters pass everything.
    pub fn filtered_expenses(
        &self,
        search_term: &str,
        category: Option<ExpenseCategory>,
        status: Option<ExpenseStatus>,
    ) -> Vec<&Expense> {
        let needle = search_term.to_lowercase();
        self.expenses
            .iter()
            .filter(|expense| {
                let matches_search = expense.employee.to_lowercase().contains(&needle)
                    || expense.description.to_lowercase().contains(&needle)
                    || expense.category.label().to_lowercase().contains(&needle);
                let matches_category = category.map_or(true, |c| expense.category == c);
                let matches_status = status.map_or(true, |s| expense.status == s);
                matches_search && matches_category && matches_status
            })
            .collect()
    }
}
