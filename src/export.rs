//! Report rendering over the expense collection: a CSV serialization for
//! spreadsheet import and a self-contained printable HTML report. Both
//! are pure functions over data handed in by the caller; writing the
//! result anywhere is the shell's concern.

use chrono::NaiveDate;

use crate::expense::{Expense, ExpenseSummary};

/// Renders the expense collection as CSV, amounts formatted to two
/// decimals. Free-text columns are quoted.
pub fn expenses_csv(expenses: &[Expense]) -> String {
    let mut lines = vec!["Employee,Date,Category,Description,Amount,Status".to_string()];
    for expense in expenses {
        lines.push(format!(
            "{},{},{},{},{:.2},{}",
            csv_quote(&expense.employee),
            expense.date,
            csv_quote(expense.category.label()),
            csv_quote(&expense.description),
            expense.amount,
            expense.status,
        ));
    }
    lines.join("\n")
}

fn csv_quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Renders the printable expense report: summary cards for the status
/// totals followed by the full expense table.
pub fn expense_report_html(
    expenses: &[Expense],
    summary: &ExpenseSummary,
    generated_on: NaiveDate,
) -> String {
    let mut html = String::new();
    html.push_str(
        "<!DOCTYPE html>\n\
         <html>\n<head>\n<title>Expense Report</title>\n<style>\n\
         body { font-family: Arial, sans-serif; margin: 20px; }\n\
         .header { text-align: center; margin-bottom: 30px; }\n\
         .summary { display: flex; justify-content: space-around; margin-bottom: 30px; }\n\
         .summary-card { text-align: center; padding: 15px; border: 1px solid #ddd; border-radius: 8px; }\n\
         table { width: 100%; border-collapse: collapse; margin-top: 20px; }\n\
         th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }\n\
         th { background-color: #f2f2f2; }\n\
         .status-pending { color: #d97706; }\n\
         .status-approved { color: #059669; }\n\
         .status-rejected { color: #dc2626; }\n\
         </style>\n</head>\n<body>\n",
    );

    html.push_str("<div class=\"header\">\n<h1>Company Expense Report</h1>\n");
    html.push_str(&format!("<p>Generated on {generated_on}</p>\n</div>\n"));

    html.push_str("<div class=\"summary\">\n");
    for (title, value) in [
        ("Total Expenses", summary.total),
        ("Pending", summary.pending),
        ("Approved", summary.approved),
        ("Rejected", summary.rejected),
    ] {
        html.push_str(&format!(
            "<div class=\"summary-card\"><h3>{title}</h3><p>${value:.2}</p></div>\n"
        ));
    }
    html.push_str("</div>\n");

    html.push_str(
        "<table>\n<thead>\n<tr>\
         <th>Employee</th><th>Date</th><th>Category</th>\
         <th>Description</th><th>Amount</th><th>Status</th>\
         </tr>\n</thead>\n<tbody>\n",
    );
    for expense in expenses {
        let description = if expense.description.is_empty() {
            "No description".to_string()
        } else {
            html_escape(&expense.description)
        };
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
             <td>${:.2}</td><td class=\"status-{}\">{}</td></tr>\n",
            html_escape(&expense.employee),
            expense.date,
            html_escape(expense.category.label()),
            description,
            expense.amount,
            expense.status,
            title_case(expense.status.label()),
        ));
    }
    html.push_str("</tbody>\n</table>\n</body>\n</html>\n");

    html
}

fn html_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn title_case(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::{
        expense_report_html, expenses_csv, Expense, ExpenseCategory, ExpenseId, ExpenseStatus,
        ExpenseStore,
    };

    fn expense(description: &str, employee: &str) -> Expense {
        Expense {
            id: ExpenseId::new(1),
            amount: 125.5,
            category: ExpenseCategory::Travel,
            description: description.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            employee: employee.to_string(),
            status: ExpenseStatus::Approved,
        }
    }

    #[test]
    fn csv_renders_header_and_quoted_rows() {
        let csv = expenses_csv(&[expense("Taxi to client meeting", "John Smith")]);
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Employee,Date,Category,Description,Amount,Status")
        );
        assert_eq!(
            lines.next(),
            Some("\"John Smith\",2024-01-15,\"Travel\",\"Taxi to client meeting\",125.50,approved")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn csv_doubles_embedded_quotes() {
        let csv = expenses_csv(&[expense("Dinner, \"client\"", "John Smith")]);
        assert!(csv.contains("\"Dinner, \"\"client\"\"\""));
    }

    #[test]
    fn report_contains_summary_cards_and_rows() {
        let store = ExpenseStore::seeded();
        let html = expense_report_html(
            store.expenses(),
            &store.summary(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        );

        assert!(html.contains("<h1>Company Expense Report</h1>"));
        assert!(html.contains("Generated on 2024-02-01"));
        assert!(html.contains("$260.49"));
        assert!(html.contains("Meals &amp; Entertainment"));
        assert!(html.contains("class=\"status-approved\">Approved<"));
    }

    #[test]
    fn report_substitutes_missing_descriptions() {
        let html = expense_report_html(
            &[Expense {
                description: String::new(),
                ..expense("", "Sarah Johnson")
            }],
            &ExpenseStore::seeded().summary(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        );
        assert!(html.contains("<td>No description</td>"));
    }
}
