use std::collections::BTreeMap;

use serde::Serialize;

use super::record::ExpenseCategory;

/// Amount totals over the whole expense collection, partitioned by status
/// and by category. `total` always equals `pending + approved + rejected`,
/// and equals the sum over `by_category`; only categories that actually
/// occur appear as keys.
///
/// The `Default` value (all zeroes, no categories) is the well-defined
/// substitute consumers show before hydration completes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExpenseSummary {
    pub total: f64,
    pub pending: f64,
    pub approved: f64,
    pub rejected: f64,
    pub by_category: BTreeMap<ExpenseCategory, f64>,
}
