use std::fs::{self, File};
use std::path::Path;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use chrono::{Duration, NaiveDate};
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::budget::chart::{CUMULATIVE_LABEL, OVERALL_LABEL, TOTAL_LABEL};
use crate::budget::{
    CategorySet, Direction, Expectations, Transaction, TransactionLog, YearChart,
};
use crate::sheets::{self, Grid, Workbook};

pub const LOG_SHEET: &str = "Log";
pub const CATEGORIES_FILE: &str = "categories.json";
pub const LOG_HEADER: [&str; 4] = ["Date", "Amount", "Category", "Description"];

#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("unreadable date {0:?}")]
    BadDate(String),
    #[error("unreadable amount {0:?}")]
    BadAmount(String),
}

#[derive(Debug, Deserialize)]
pub struct LogRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Amount")]
    pub amount: Decimal,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Description", default)]
    pub description: String,
}

/// A log row as printed by the CLI, with its 1-based display row in front.
#[derive(Debug, Serialize)]
pub struct RowRecord {
    pub row: usize,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Amount")]
    pub amount: Decimal,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Description")]
    pub description: String,
}

impl From<(usize, &Transaction)> for RowRecord {
    fn from((row, transaction): (usize, &Transaction)) -> Self {
        RowRecord {
            row,
            date: transaction.date().to_string(),
            amount: transaction.amount(),
            category: transaction.category().clone(),
            description: transaction.description().clone(),
        }
    }
}

impl TryFrom<LogRecord> for Transaction {
    type Error = RecordError;

    fn try_from(record: LogRecord) -> Result<Self, Self::Error> {
        let date =
            parse_sheet_date(&record.date).ok_or_else(|| RecordError::BadDate(record.date.clone()))?;
        Ok(Transaction::new(
            date,
            record.amount,
            record.category,
            record.description,
        ))
    }
}

/// Parses a date the way sheets hold them: `2024-01-15` with `/` or `.`
/// separators and a trailing time part tolerated, or an Excel day serial
/// counted from 1899-12-30. Serials past Excel's last day are junk, not
/// dates.
pub fn parse_sheet_date(raw: &str) -> Option<NaiveDate> {
    // 2958465 days after the epoch is 9999-12-31, the last day a workbook
    // can hold.
    const MAX_DAY_SERIAL: f64 = 2_958_465.0;

    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    let token = text.split([' ', 'T']).next()?.replace(['/', '.'], "-");
    let mut parts = token.split('-');
    if let (Some(y), Some(m), Some(d), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    {
        if let (Ok(year), Ok(month), Ok(day)) = (y.parse(), m.parse(), d.parse()) {
            return NaiveDate::from_ymd_opt(year, month, day);
        }
        return None;
    }

    let serial: f64 = text.parse().ok()?;
    if !serial.is_finite() || serial <= 0.0 || serial > MAX_DAY_SERIAL {
        return None;
    }
    NaiveDate::from_ymd_opt(1899, 12, 30)?.checked_add_signed(Duration::days(serial as i64))
}

/// Parses an amount typed at the prompt: digits and at most one dot, with an
/// optional leading dollar sign. The sign always comes from the direction
/// flag, never from the text.
pub fn parse_entry_amount(raw: &str) -> Result<Decimal, RecordError> {
    let text = raw.trim();
    let text = text.strip_prefix('$').unwrap_or(text);
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(RecordError::BadAmount(raw.to_string()));
    }
    Decimal::from_str(text).map_err(|_| RecordError::BadAmount(raw.to_string()))
}

// Amounts read back from a sheet keep their sign.
fn parse_sheet_amount(raw: &str) -> Result<Decimal, RecordError> {
    let text = raw.trim();
    let text = text.strip_prefix('$').unwrap_or(text);
    Decimal::from_str(text).map_err(|_| RecordError::BadAmount(raw.to_string()))
}

/// Loads the transaction log, creating an empty log sheet the first time.
/// Rows that fail to parse are skipped, they stay untouched in the file.
pub fn load_log(workbook: &Workbook) -> Result<TransactionLog> {
    if !workbook.has_sheet(LOG_SHEET) {
        let log = TransactionLog::new();
        save_log(workbook, &log)?;
        return Ok(log);
    }

    let file = File::open(workbook.sheet_path(LOG_SHEET))?;
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);

    let mut transactions = Vec::new();
    for record in csv_reader.deserialize::<LogRecord>() {
        match record {
            Ok(record) => match record.try_into() {
                Ok(transaction) => transactions.push(transaction),
                Err(err) => debug!("invalid log row, err={}", err),
            },
            Err(err) => debug!("failed to deserialize log row, err={}", err),
        }
    }

    Ok(TransactionLog::from_transactions(transactions))
}

/// Writes the whole log sheet, newest transaction first.
pub fn save_log(workbook: &Workbook, log: &TransactionLog) -> Result<()> {
    let mut grid: Grid = Vec::with_capacity(log.len() + 1);
    grid.push(LOG_HEADER.iter().map(|cell| cell.to_string()).collect());
    for transaction in log.iter() {
        grid.push(vec![
            transaction.date().to_string(),
            transaction.amount().to_string(),
            transaction.category().clone(),
            transaction.description().clone(),
        ]);
    }
    workbook.write_grid(LOG_SHEET, &grid)
}

/// Writes the log to stdout as CSV, keeping the rows' display numbers so
/// they can be fed back to `edit` and `delete`.
pub fn export_log<'a>(rows: impl Iterator<Item = (usize, &'a Transaction)>) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new().from_writer(std::io::stdout());
    for entry in rows {
        let record: RowRecord = entry.into();
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;

    Ok(())
}

pub fn load_categories(workbook: &Workbook) -> Result<CategorySet> {
    let path = workbook.dir().join(CATEGORIES_FILE);
    if !path.is_file() {
        return Ok(CategorySet::defaults());
    }
    let file = File::open(&path)?;
    let categories = serde_json::from_reader(file)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(categories)
}

/// Saves the taxonomy as pretty JSON with four space indents, the format the
/// original trackers shipped alongside their workbooks.
pub fn save_categories(workbook: &Workbook, categories: &CategorySet) -> Result<()> {
    let path = workbook.dir().join(CATEGORIES_FILE);
    let tmp = path.with_extension("json.tmp");

    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    categories.serialize(&mut serializer)?;
    buffer.push(b'\n');

    fs::write(&tmp, &buffer)?;
    fs::rename(&tmp, &path)?;
    Ok(())
}

/// Reads the Expected cells of a year sheet. A year without a sheet simply
/// has no expectations yet.
pub fn load_expectations(
    workbook: &Workbook,
    year: i32,
    categories: &CategorySet,
) -> Result<Expectations> {
    let name = year.to_string();
    if !workbook.has_sheet(&name) {
        return Ok(Expectations::default());
    }
    let grid = workbook.read_grid(&name)?;
    Ok(Expectations::from_grid(&grid, categories))
}

pub fn save_year_sheet(workbook: &Workbook, chart: &YearChart) -> Result<()> {
    workbook.write_grid(&chart.sheet_name(), &chart.sheet_grid())
}

/// Rebuilds the stored sheets of the given years against the current log
/// and taxonomy, keeping their expectations. Years without a sheet are left
/// alone, a sheet only appears once its chart is first opened.
pub fn refresh_year_sheets(
    workbook: &Workbook,
    log: &TransactionLog,
    categories: &CategorySet,
    years: &[i32],
) -> Result<()> {
    let mut years = years.to_vec();
    years.sort_unstable();
    years.dedup();

    for year in years {
        if !workbook.has_sheet(&year.to_string()) {
            continue;
        }
        let expectations = load_expectations(workbook, year, categories)?;
        let chart = YearChart::build(year, log, categories, expectations);
        save_year_sheet(workbook, &chart)?;
    }
    Ok(())
}

/// Rebuilds every stored year sheet, used after the taxonomy changes shape.
pub fn refresh_all_year_sheets(
    workbook: &Workbook,
    log: &TransactionLog,
    categories: &CategorySet,
) -> Result<()> {
    let years = workbook.year_sheets()?;
    refresh_year_sheets(workbook, log, categories, &years)
}

#[derive(Debug)]
pub struct ImportReport {
    pub transactions: usize,
    pub year_sheets: usize,
    pub skipped: Vec<String>,
}

/// Converts a `Tracker.xlsx` workbook into a fresh tracker directory: the
/// `Log` sheet becomes the transaction log, four digit sheets become year
/// sheets with their expectations, and the taxonomy comes from a JSON dump
/// when one is given or found next to the workbook, else from the newest
/// year sheet's labels, else from the defaults.
pub fn import_xlsx(
    source: &Path,
    categories_json: Option<&Path>,
    workbook: &Workbook,
) -> Result<ImportReport> {
    if !workbook.sheet_names()?.is_empty() {
        bail!(
            "tracker at {} already has sheets, refusing to import over it",
            workbook.dir().display()
        );
    }

    let mut log_grid = None;
    let mut year_grids: Vec<(i32, Grid)> = Vec::new();
    for (name, grid) in sheets::xlsx::read_sheets(source)? {
        if name == LOG_SHEET {
            log_grid = Some(grid);
        } else if let Some(year) = sheets::year_sheet(&name) {
            year_grids.push((year, grid));
        } else {
            debug!("ignoring sheet {:?}", name);
        }
    }
    let log_grid =
        log_grid.with_context(|| format!("no {LOG_SHEET:?} sheet in {}", source.display()))?;

    let mut transactions = Vec::new();
    let mut skipped = Vec::new();
    for (index, row) in log_grid.iter().enumerate().skip(1) {
        if row.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        match transaction_from_cells(row) {
            Ok(transaction) => transactions.push(transaction),
            Err(err) => skipped.push(format!("log row {}: {}", index + 1, err)),
        }
    }
    let log = TransactionLog::from_transactions(transactions);
    let categories = resolve_taxonomy(categories_json, source, &year_grids)?;

    save_log(workbook, &log)?;
    save_categories(workbook, &categories)?;
    for (year, grid) in &year_grids {
        let expectations = Expectations::from_grid(grid, &categories);
        let chart = YearChart::build(*year, &log, &categories, expectations);
        save_year_sheet(workbook, &chart)?;
    }

    Ok(ImportReport {
        transactions: log.len(),
        year_sheets: year_grids.len(),
        skipped,
    })
}

// Taxonomy lookup order: an explicit JSON dump, a `json-dump.json` sitting
// next to the workbook, the newest year sheet's labels, the defaults.
fn resolve_taxonomy(
    categories_json: Option<&Path>,
    source: &Path,
    year_grids: &[(i32, Grid)],
) -> Result<CategorySet> {
    let sidecar = source.parent().map(|dir| dir.join("json-dump.json"));
    let path = categories_json
        .map(Path::to_path_buf)
        .or_else(|| sidecar.filter(|path| path.is_file()));

    match path {
        Some(path) => {
            let file =
                File::open(&path).with_context(|| format!("failed to open {}", path.display()))?;
            serde_json::from_reader(file)
                .with_context(|| format!("failed to parse {}", path.display()))
        },
        None => Ok(categories_from_year_grids(year_grids).unwrap_or_else(CategorySet::defaults)),
    }
}

fn transaction_from_cells(row: &[String]) -> Result<Transaction, RecordError> {
    let date_text = row.first().map(String::as_str).unwrap_or("");
    let date =
        parse_sheet_date(date_text).ok_or_else(|| RecordError::BadDate(date_text.to_string()))?;
    let amount = parse_sheet_amount(row.get(1).map(String::as_str).unwrap_or(""))?;

    Ok(Transaction::new(
        date,
        amount,
        row.get(2).cloned().unwrap_or_default(),
        row.get(3).cloned().unwrap_or_default(),
    ))
}

// The newest year sheet carries the most recent taxonomy in its labels.
fn categories_from_year_grids(year_grids: &[(i32, Grid)]) -> Option<CategorySet> {
    let (_, grid) = year_grids.iter().max_by_key(|(year, _)| *year)?;

    let mut input = Vec::new();
    let mut output = Vec::new();
    let mut section = None;
    for row in grid {
        let label = row.first().map(String::as_str).unwrap_or("");
        if let Some(direction) = Direction::from_title(label) {
            section = Some(direction);
            continue;
        }
        if label.is_empty()
            || label == TOTAL_LABEL
            || label == OVERALL_LABEL
            || label == CUMULATIVE_LABEL
        {
            continue;
        }
        match section {
            Some(Direction::Input) => input.push(label.to_string()),
            Some(Direction::Output) => output.push(label.to_string()),
            None => {},
        }
    }

    if input.is_empty() && output.is_empty() {
        None
    } else {
        Some(CategorySet::new(input, output))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    static TEMP_SEQ: AtomicUsize = AtomicUsize::new(0);

    fn temp_workbook(tag: &str) -> Workbook {
        let dir = std::env::temp_dir().join(format!(
            "tracksheet_data_{}_{}_{}",
            tag,
            std::process::id(),
            TEMP_SEQ.fetch_add(1, Ordering::Relaxed)
        ));
        Workbook::create(&dir).unwrap()
    }

    fn cleanup(workbook: Workbook) {
        let _ = fs::remove_dir_all(workbook.dir());
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn dates_parse_from_the_usual_sheet_shapes() {
        let expected = Some(date(2024, 1, 15));
        assert_eq!(parse_sheet_date("2024-01-15"), expected);
        assert_eq!(parse_sheet_date("2024-1-15"), expected);
        assert_eq!(parse_sheet_date("2024/01/15"), expected);
        assert_eq!(parse_sheet_date("2024.01.15"), expected);
        assert_eq!(parse_sheet_date("2024-01-15 00:00:00"), expected);
        assert_eq!(parse_sheet_date("2024-01-15T09:30:00"), expected);
    }

    #[test]
    fn dates_parse_from_excel_day_serials() {
        assert_eq!(parse_sheet_date("45292"), Some(date(2024, 1, 1)));
        assert_eq!(parse_sheet_date("45292.5"), Some(date(2024, 1, 1)));
        assert_eq!(parse_sheet_date("60"), Some(date(1900, 2, 28)));
        assert_eq!(parse_sheet_date("2958465"), Some(date(9999, 12, 31)));
    }

    #[test]
    fn junk_dates_parse_to_nothing() {
        assert_eq!(parse_sheet_date(""), None);
        assert_eq!(parse_sheet_date("soon"), None);
        assert_eq!(parse_sheet_date("13-45"), None);
        assert_eq!(parse_sheet_date("2024-02-30"), None);
        assert_eq!(parse_sheet_date("-12"), None);
        // Serials past 9999-12-31, including ones too big for a day count.
        assert_eq!(parse_sheet_date("2958466"), None);
        assert_eq!(parse_sheet_date("200000000000"), None);
    }

    #[test]
    fn entry_amounts_take_digits_a_dot_and_a_dollar_sign() {
        assert_eq!(parse_entry_amount("25.50"), Ok(dec!(25.50)));
        assert_eq!(parse_entry_amount("$1900"), Ok(dec!(1900)));
        assert_eq!(parse_entry_amount("0"), Ok(dec!(0)));

        for junk in ["", "$", "abc", "1,000", "12.3.4", "-5"] {
            assert_eq!(
                parse_entry_amount(junk),
                Err(RecordError::BadAmount(junk.to_string())),
                "{junk:?} should not parse"
            );
        }
    }

    #[test]
    fn sheet_amounts_keep_their_sign() {
        assert_eq!(parse_sheet_amount("-850.5"), Ok(dec!(-850.5)));
        assert_eq!(parse_sheet_amount("$-850.5"), Ok(dec!(-850.5)));
        assert_eq!(
            parse_sheet_amount("x"),
            Err(RecordError::BadAmount("x".to_string()))
        );
    }

    #[test]
    fn log_records_convert_into_transactions() {
        let record = LogRecord {
            date: "2024-03-05".to_string(),
            amount: dec!(-42.50),
            category: "Groceries".to_string(),
            description: "weekly shop".to_string(),
        };
        let transaction = Transaction::try_from(record).unwrap();

        assert_eq!(transaction.date(), date(2024, 3, 5));
        assert_eq!(transaction.amount(), dec!(-42.50));
        assert_eq!(transaction.direction(), Direction::Output);

        let bad = LogRecord {
            date: "2024-02-30".to_string(),
            amount: dec!(1),
            category: "Misc".to_string(),
            description: String::new(),
        };
        assert_eq!(
            Transaction::try_from(bad),
            Err(RecordError::BadDate("2024-02-30".to_string()))
        );
    }

    #[test]
    fn log_round_trips_newest_first() {
        let workbook = temp_workbook("log");
        let log = TransactionLog::from_transactions(vec![
            Transaction::new(date(2024, 1, 5), dec!(-10), "Misc".to_string(), String::new()),
            Transaction::new(
                date(2024, 2, 5),
                dec!(1900.50),
                "Salary".to_string(),
                "pay".to_string(),
            ),
        ]);

        save_log(&workbook, &log).unwrap();
        let loaded = load_log(&workbook).unwrap();

        assert_eq!(loaded, log);
        assert_eq!(loaded.get(1).unwrap().date(), date(2024, 2, 5));

        let grid = workbook.read_grid(LOG_SHEET).unwrap();
        assert_eq!(grid[0], vec!["Date", "Amount", "Category", "Description"]);
        assert_eq!(grid[1][0], "2024-02-05");
        assert_eq!(grid[1][1], "1900.50");

        cleanup(workbook);
    }

    #[test]
    fn loading_a_missing_log_creates_the_sheet() {
        let workbook = temp_workbook("fresh");
        let log = load_log(&workbook).unwrap();

        assert!(log.is_empty());
        assert!(workbook.has_sheet(LOG_SHEET));
        assert_eq!(
            workbook.read_grid(LOG_SHEET).unwrap(),
            vec![vec!["Date", "Amount", "Category", "Description"]]
        );

        cleanup(workbook);
    }

    #[test]
    fn unreadable_log_rows_are_skipped() {
        let workbook = temp_workbook("junkrows");
        let grid: Grid = vec![
            LOG_HEADER.iter().map(|cell| cell.to_string()).collect(),
            vec!["2024-01-05".into(), "-10".into(), "Misc".into(), "ok".into()],
            vec!["soon".into(), "-10".into(), "Misc".into(), "bad date".into()],
            vec!["2024-01-06".into(), "ten".into(), "Misc".into(), "bad amount".into()],
            vec!["200000000000".into(), "-10".into(), "Misc".into(), "bad serial".into()],
        ];
        workbook.write_grid(LOG_SHEET, &grid).unwrap();

        let log = load_log(&workbook).unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log.get(1).unwrap().description(), "ok");

        cleanup(workbook);
    }

    #[test]
    fn categories_default_until_saved_and_round_trip() {
        let workbook = temp_workbook("categories");
        assert_eq!(load_categories(&workbook).unwrap(), CategorySet::defaults());

        let mut categories = CategorySet::defaults();
        categories.add(Direction::Output, "Travel").unwrap();
        save_categories(&workbook, &categories).unwrap();

        assert_eq!(load_categories(&workbook).unwrap(), categories);

        let json = fs::read_to_string(workbook.dir().join(CATEGORIES_FILE)).unwrap();
        assert!(json.contains("\"Categories In\""));
        assert!(json.contains("\"Categories Out\""));
        assert!(json.contains("    \"Travel\""));

        cleanup(workbook);
    }

    #[test]
    fn refreshing_a_year_sheet_keeps_its_expectations() {
        let workbook = temp_workbook("refresh");
        let categories = CategorySet::defaults();

        let mut expectations = Expectations::default();
        expectations.set(Direction::Output, "Rent", 1, dec!(-850));
        let chart = YearChart::build(
            2024,
            &TransactionLog::new(),
            &categories,
            expectations.clone(),
        );
        save_year_sheet(&workbook, &chart).unwrap();

        let log = TransactionLog::from_transactions(vec![Transaction::new(
            date(2024, 1, 3),
            dec!(-860),
            "Rent".to_string(),
            String::new(),
        )]);
        refresh_year_sheets(&workbook, &log, &categories, &[2024, 2024, 1999]).unwrap();

        assert_eq!(
            load_expectations(&workbook, 2024, &categories).unwrap(),
            expectations
        );
        // Only opened years get a sheet.
        assert!(!workbook.has_sheet("1999"));

        cleanup(workbook);
    }

    #[test]
    fn import_refuses_a_non_empty_tracker() {
        let workbook = temp_workbook("importguard");
        workbook
            .write_grid("2024", &vec![vec!["Input".to_string()]])
            .unwrap();

        let result = import_xlsx(Path::new("Tracker.xlsx"), None, &workbook);
        assert!(result.is_err());

        cleanup(workbook);
    }

    #[test]
    fn imported_log_cells_tolerate_serials_and_signs() {
        let row = vec![
            "45292".to_string(),
            "$-850.5".to_string(),
            "Rent".to_string(),
            "january rent".to_string(),
        ];
        let transaction = transaction_from_cells(&row).unwrap();

        assert_eq!(transaction.date(), date(2024, 1, 1));
        assert_eq!(transaction.amount(), dec!(-850.5));
        assert_eq!(transaction.category(), "Rent");

        let short = vec!["2024-01-01".to_string(), "12".to_string()];
        let transaction = transaction_from_cells(&short).unwrap();
        assert_eq!(transaction.category(), "");
        assert_eq!(transaction.description(), "");
    }

    #[test]
    fn taxonomy_prefers_a_json_dump_next_to_the_workbook() {
        let workbook = temp_workbook("sidecar");
        let source = workbook.dir().join("Tracker.xlsx");
        let sidecar = workbook.dir().join("json-dump.json");
        fs::write(
            &sidecar,
            r#"{"Categories In": ["Wages"], "Categories Out": ["Bills"]}"#,
        )
        .unwrap();

        let categories = resolve_taxonomy(None, &source, &[]).unwrap();
        assert_eq!(categories.list(Direction::Input), ["Wages"]);
        assert_eq!(categories.list(Direction::Output), ["Bills"]);

        // An explicitly named dump must exist.
        let missing = workbook.dir().join("nope.json");
        assert!(resolve_taxonomy(Some(&missing), &source, &[]).is_err());

        // No dump and no year sheets falls back to the defaults.
        fs::remove_file(&sidecar).unwrap();
        let categories = resolve_taxonomy(None, &source, &[]).unwrap();
        assert_eq!(categories, CategorySet::defaults());

        cleanup(workbook);
    }

    #[test]
    fn taxonomy_recovers_from_the_newest_year_sheet() {
        let old = vec![
            vec!["Input".to_string()],
            vec!["Wages".to_string()],
            vec!["Total".to_string()],
        ];
        let new = vec![
            vec![String::new(), "January".to_string()],
            vec![String::new(), "Expected".to_string(), "Actual".to_string()],
            vec!["Input".to_string()],
            vec!["Salary".to_string()],
            vec!["Misc".to_string()],
            vec!["Total".to_string()],
            vec!["Output".to_string()],
            vec!["Rent".to_string()],
            vec!["Misc".to_string()],
            vec!["Total".to_string()],
            vec!["Overall Total".to_string()],
        ];
        let year_grids = vec![(2022, old), (2024, new)];

        let categories = categories_from_year_grids(&year_grids).unwrap();
        assert_eq!(categories.list(Direction::Input), ["Salary", "Misc"]);
        assert_eq!(categories.list(Direction::Output), ["Rent", "Misc"]);

        assert!(categories_from_year_grids(&[]).is_none());
    }
}
