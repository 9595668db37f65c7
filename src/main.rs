use std::{error::Error, path::PathBuf, sync::Arc};

use clap::{Parser, Subcommand};
use ops_tracker::{expense_report_html, expenses_csv, Hydrator, JsonDirStorage, Workspace};

/// Development shell around the tracker core: hydrates the workspace from
/// a data directory, then prints summaries or report exports.
#[derive(Parser)]
#[command(name = "ops-tracker", version, about)]
struct Args {
    /// Directory holding the JSON storage slots. Falls back to the
    /// TRACKER_DATA_DIR environment variable, then to `.tracker`.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the expense and project summaries (the default).
    Summary,
    /// Print the expense collection as CSV.
    ExportCsv,
    /// Print the printable expense report as HTML.
    ExportHtml,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    let _logger = flexi_logger::Logger::try_with_env_or_str("info")?.start()?;

    let args = Args::parse();
    let data_dir = args
        .data_dir
        .or_else(|| std::env::var("TRACKER_DATA_DIR").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(".tracker"));

    let workspace = Hydrator::new(Arc::new(JsonDirStorage::new(data_dir)))
        .run()
        .await;

    match args.command.unwrap_or(Command::Summary) {
        Command::Summary => print_summaries(&workspace),
        Command::ExportCsv => println!("{}", expenses_csv(workspace.expenses.expenses())),
        Command::ExportHtml => println!(
            "{}",
            expense_report_html(
                workspace.expenses.expenses(),
                &workspace.expenses.summary(),
                chrono::Utc::now().date_naive(),
            )
        ),
    }

    Ok(())
}

fn print_summaries(workspace: &Workspace) {
    let expenses = workspace.expenses.summary();
    println!(
        "Expenses: {:.2} total ({:.2} pending, {:.2} approved, {:.2} rejected)",
        expenses.total, expenses.pending, expenses.approved, expenses.rejected
    );
    for (category, amount) in &expenses.by_category {
        println!("  {category}: {amount:.2}");
    }

    let projects = workspace.projects.project_summary();
    println!(
        "Projects: {} total, {} active, {} completed",
        projects.total_projects, projects.active_projects, projects.completed_projects
    );
    println!(
        "  budget {:.2}, actual cost {:.2}",
        projects.total_budget, projects.total_actual_cost
    );
    println!(
        "  {:.1}h logged ({:.1}h billable), revenue {:.2}",
        projects.total_hours, projects.total_billable_hours, projects.total_revenue
    );

    let tasks = workspace.projects.task_summary();
    println!(
        "Tasks: {} total, {} completed, {} overdue, completion {:.0}%",
        tasks.total_tasks, tasks.completed_tasks, tasks.overdue_tasks, tasks.completion_rate
    );
}
