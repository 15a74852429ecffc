use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};

use tracksheet::budget::chart::MONTHS;
use tracksheet::budget::{
    Append, CategorySet, Delete, Direction, Edit, LogOp, Transaction, TransactionLog, YearChart,
};
use tracksheet::data;
use tracksheet::sheets::{self, Workbook};

/// Spreadsheet style income and expense tracker.
#[derive(Debug, Parser)]
#[command(name = "tracksheet", version)]
struct Cli {
    /// Tracker directory, looked up next to and above the working directory
    /// when not given
    #[arg(short, long, global = true, value_name = "DIR")]
    tracker: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create an empty tracker directory
    Init,
    /// Log a transaction
    Add(AddArgs),
    /// Print the log as CSV, newest first
    Log(LogArgs),
    /// Rewrite fields of a logged transaction
    Edit(EditArgs),
    /// Remove a row from the log
    Delete {
        /// 1-based row in the printed log
        row: usize,
    },
    /// Print a year's chart as CSV and refresh its stored sheet
    Chart {
        /// Four digit year, matching the year sheet names
        #[arg(value_parser = clap::value_parser!(i32).range(1000..=9999))]
        year: i32,
    },
    /// Set the expected amount for a category
    Expect(ExpectArgs),
    /// Show or edit the category taxonomy
    Categories {
        #[command(subcommand)]
        action: Option<CategoriesCommand>,
    },
    /// List the years the tracker covers
    Years,
    /// Build a tracker directory from a Tracker.xlsx workbook
    Import(ImportArgs),
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
struct DirectionArg {
    /// Money coming in
    #[arg(long = "in")]
    input: bool,

    /// Money going out
    #[arg(long = "out")]
    output: bool,
}

impl DirectionArg {
    fn direction(&self) -> Direction {
        if self.input {
            Direction::Input
        } else {
            Direction::Output
        }
    }
}

#[derive(Debug, Args)]
struct AddArgs {
    #[command(flatten)]
    direction: DirectionArg,

    /// Amount as a positive number, the direction flag sets the sign
    amount: String,

    /// Category the amount belongs to
    #[arg(short, long)]
    category: String,

    /// Date of the transaction, defaults to today
    #[arg(short, long, value_name = "YYYY-MM-DD")]
    date: Option<NaiveDate>,

    /// Free text note
    #[arg(short, long, default_value = "")]
    note: String,
}

#[derive(Debug, Args)]
struct LogArgs {
    /// Only rows from this year
    #[arg(long)]
    year: Option<i32>,

    /// Only rows from this month
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: Option<u32>,

    /// Only rows with this category
    #[arg(long)]
    category: Option<String>,
}

#[derive(Debug, Args)]
struct EditArgs {
    /// 1-based row in the printed log
    row: usize,

    /// Turn the row into money coming in
    #[arg(long = "in", conflicts_with = "output")]
    input: bool,

    /// Turn the row into money going out
    #[arg(long = "out")]
    output: bool,

    /// New amount as a positive number
    #[arg(short, long)]
    amount: Option<String>,

    #[arg(short, long)]
    category: Option<String>,

    #[arg(short, long, value_name = "YYYY-MM-DD")]
    date: Option<NaiveDate>,

    #[arg(short, long)]
    note: Option<String>,
}

#[derive(Debug, Args)]
struct ExpectArgs {
    /// Year sheet to write to, four digits
    #[arg(value_parser = clap::value_parser!(i32).range(1000..=9999))]
    year: i32,

    #[command(flatten)]
    direction: DirectionArg,

    /// Category the expectation belongs to
    #[arg(short, long)]
    category: String,

    /// Expected amount as a positive number, zero clears the cell
    #[arg(short, long)]
    amount: String,

    /// Month to set, every month when left out
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: Option<u32>,
}

#[derive(Debug, Subcommand)]
enum CategoriesCommand {
    /// Add a category to one direction
    Add {
        #[command(flatten)]
        direction: DirectionArg,

        name: String,
    },
    /// Remove a category, its logged transactions stay in the log
    Remove {
        #[command(flatten)]
        direction: DirectionArg,

        name: String,
    },
}

#[derive(Debug, Args)]
struct ImportArgs {
    /// The Tracker.xlsx workbook to read
    source: PathBuf,

    /// Taxonomy JSON exported next to the workbook
    #[arg(long, value_name = "FILE")]
    categories: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let tracker = cli.tracker.as_deref();

    match cli.command {
        Command::Init => init(tracker),
        Command::Add(args) => add(tracker, args),
        Command::Log(args) => print_log(tracker, args),
        Command::Edit(args) => edit(tracker, args),
        Command::Delete { row } => delete(tracker, row),
        Command::Chart { year } => chart(tracker, year),
        Command::Expect(args) => expect(tracker, args),
        Command::Categories { action } => categories(tracker, action),
        Command::Years => years(tracker),
        Command::Import(args) => import(tracker, args),
    }
}

fn init(tracker: Option<&Path>) -> Result<()> {
    let dir = tracker.unwrap_or(Path::new(sheets::DEFAULT_DIR));
    let workbook = Workbook::create(dir)?;
    if workbook.has_sheet(data::LOG_SHEET) {
        bail!(
            "tracker at {} is already initialized",
            workbook.dir().display()
        );
    }

    data::save_log(&workbook, &TransactionLog::new())?;
    data::save_categories(&workbook, &CategorySet::defaults())?;
    println!("initialized tracker at {}", workbook.dir().display());
    Ok(())
}

fn add(tracker: Option<&Path>, args: AddArgs) -> Result<()> {
    let workbook = Workbook::discover(tracker)?;
    let categories = data::load_categories(&workbook)?;
    let mut log = data::load_log(&workbook)?;

    let direction = args.direction.direction();
    categories.require(direction, &args.category)?;
    let amount = data::parse_entry_amount(&args.amount)?;
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());

    let transaction = Transaction::entry(direction, date, amount, args.category, args.note)?;
    let year = transaction.year();
    let summary = transaction.to_string();

    log.apply(LogOp::Append(Append::new(transaction)))?;
    data::save_log(&workbook, &log)?;
    data::refresh_year_sheets(&workbook, &log, &categories, &[year])?;

    println!("logged {summary}");
    Ok(())
}

fn print_log(tracker: Option<&Path>, args: LogArgs) -> Result<()> {
    let workbook = Workbook::discover(tracker)?;
    let log = data::load_log(&workbook)?;

    // Rows are numbered before filtering so they stay valid for `edit` and
    // `delete` whatever the filter.
    let rows = log
        .iter()
        .enumerate()
        .map(|(index, transaction)| (index + 1, transaction))
        .filter(|(_, transaction)| {
            args.year.map_or(true, |year| transaction.year() == year)
                && args.month.map_or(true, |month| transaction.month() == month)
                && args
                    .category
                    .as_deref()
                    .map_or(true, |category| transaction.category().as_str() == category)
        });
    data::export_log(rows)
}

fn edit(tracker: Option<&Path>, args: EditArgs) -> Result<()> {
    let workbook = Workbook::discover(tracker)?;
    let categories = data::load_categories(&workbook)?;
    let mut log = data::load_log(&workbook)?;

    let current = log.get(args.row)?.clone();
    let direction = if args.input {
        Direction::Input
    } else if args.output {
        Direction::Output
    } else {
        current.direction()
    };
    let amount = match args.amount.as_deref() {
        Some(raw) => data::parse_entry_amount(raw)?,
        None => current.amount().abs(),
    };
    let category = args.category.unwrap_or_else(|| current.category().clone());
    categories.require(direction, &category)?;
    let date = args.date.unwrap_or(current.date());
    let note = args.note.unwrap_or_else(|| current.description().clone());

    let transaction = Transaction::entry(direction, date, amount, category, note)?;
    let touched = [current.year(), transaction.year()];
    let summary = transaction.to_string();

    log.apply(LogOp::Edit(Edit::new(args.row, transaction)))?;
    data::save_log(&workbook, &log)?;
    data::refresh_year_sheets(&workbook, &log, &categories, &touched)?;

    println!("row {} is now {summary}", args.row);
    Ok(())
}

fn delete(tracker: Option<&Path>, row: usize) -> Result<()> {
    let workbook = Workbook::discover(tracker)?;
    let categories = data::load_categories(&workbook)?;
    let mut log = data::load_log(&workbook)?;

    let removed = log.get(row)?.clone();
    log.apply(LogOp::Delete(Delete::new(row)))?;
    data::save_log(&workbook, &log)?;
    data::refresh_year_sheets(&workbook, &log, &categories, &[removed.year()])?;

    println!("deleted {removed}");
    Ok(())
}

fn chart(tracker: Option<&Path>, year: i32) -> Result<()> {
    let workbook = Workbook::discover(tracker)?;
    let categories = data::load_categories(&workbook)?;
    let log = data::load_log(&workbook)?;

    let expectations = data::load_expectations(&workbook, year, &categories)?;
    let chart = YearChart::build(year, &log, &categories, expectations);
    data::save_year_sheet(&workbook, &chart)?;

    sheets::write_grid_to(io::stdout(), &chart.view_grid())
}

fn expect(tracker: Option<&Path>, args: ExpectArgs) -> Result<()> {
    let workbook = Workbook::discover(tracker)?;
    let categories = data::load_categories(&workbook)?;
    let log = data::load_log(&workbook)?;

    let direction = args.direction.direction();
    categories.require(direction, &args.category)?;
    let amount = direction.signed(data::parse_entry_amount(&args.amount)?);

    let mut expectations = data::load_expectations(&workbook, args.year, &categories)?;
    let months: Vec<u32> = match args.month {
        Some(month) => vec![month],
        None => (1..=12).collect(),
    };
    for month in &months {
        expectations.set(direction, &args.category, *month, amount);
    }

    let chart = YearChart::build(args.year, &log, &categories, expectations);
    data::save_year_sheet(&workbook, &chart)?;

    let span = match args.month {
        Some(month) => MONTHS[month as usize - 1],
        None => "every month",
    };
    println!(
        "expecting {} for {} {} in {} of {}",
        amount.normalize(),
        direction,
        args.category,
        span,
        args.year
    );
    Ok(())
}

fn categories(tracker: Option<&Path>, action: Option<CategoriesCommand>) -> Result<()> {
    let workbook = Workbook::discover(tracker)?;
    let mut categories = data::load_categories(&workbook)?;

    let Some(action) = action else {
        for direction in [Direction::Input, Direction::Output] {
            println!("{direction}:");
            for category in categories.list(direction) {
                println!("  {category}");
            }
        }
        return Ok(());
    };

    match action {
        CategoriesCommand::Add { direction, name } => {
            categories.add(direction.direction(), &name)?;
            println!("added {} category {}", direction.direction(), name.trim());
        },
        CategoriesCommand::Remove { direction, name } => {
            categories.remove(direction.direction(), &name)?;
            println!("removed {} category {}", direction.direction(), name);
        },
    }

    data::save_categories(&workbook, &categories)?;
    let log = data::load_log(&workbook)?;
    data::refresh_all_year_sheets(&workbook, &log, &categories)
}

fn years(tracker: Option<&Path>) -> Result<()> {
    let workbook = Workbook::discover(tracker)?;
    let log = data::load_log(&workbook)?;

    let mut years = log.years();
    years.extend(workbook.year_sheets()?);
    years.sort_unstable();
    years.dedup();

    for year in years {
        println!("{year}");
    }
    Ok(())
}

fn import(tracker: Option<&Path>, args: ImportArgs) -> Result<()> {
    let dir = tracker.unwrap_or(Path::new(sheets::DEFAULT_DIR));
    let workbook = Workbook::create(dir)?;
    let report = data::import_xlsx(&args.source, args.categories.as_deref(), &workbook)?;

    for line in &report.skipped {
        eprintln!("skipped {line}");
    }
    println!(
        "imported {} transactions and {} year sheets into {}",
        report.transactions,
        report.year_sheets,
        workbook.dir().display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn add_requires_exactly_one_direction() {
        assert!(Cli::try_parse_from(["tracksheet", "add", "10", "-c", "Misc"]).is_err());
        assert!(
            Cli::try_parse_from(["tracksheet", "add", "--in", "--out", "10", "-c", "Misc"])
                .is_err()
        );
        assert!(
            Cli::try_parse_from(["tracksheet", "add", "--out", "12.50", "--category", "Dining"])
                .is_ok()
        );
    }

    #[test]
    fn chart_and_expect_years_match_the_sheet_names() {
        assert!(Cli::try_parse_from(["tracksheet", "chart", "2024"]).is_ok());
        assert!(Cli::try_parse_from(["tracksheet", "chart", "999"]).is_err());
        assert!(Cli::try_parse_from(["tracksheet", "chart", "99999"]).is_err());
        assert!(Cli::try_parse_from(["tracksheet", "chart", "2147483647"]).is_err());

        let expect = ["tracksheet", "expect", "99999", "--out", "-c", "Rent", "-a", "850"];
        assert!(Cli::try_parse_from(expect).is_err());
    }

    #[test]
    fn edit_takes_partial_fields() {
        let cli =
            Cli::try_parse_from(["tracksheet", "edit", "3", "--amount", "15", "--in"]).unwrap();
        match cli.command {
            Command::Edit(args) => {
                assert_eq!(args.row, 3);
                assert_eq!(args.amount.as_deref(), Some("15"));
                assert!(args.input);
                assert!(args.category.is_none());
            },
            _ => panic!("expected an edit command"),
        }
    }
}
