use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

pub mod xlsx;

/// A sheet as rows of trimmed cell text. Rows may be ragged, missing cells
/// read as empty.
pub type Grid = Vec<Vec<String>>;

pub const DEFAULT_DIR: &str = "Tracker";

/// A tracker workbook on disk: a directory holding one CSV file per sheet,
/// next to the category taxonomy file.
#[derive(Debug, Clone)]
pub struct Workbook {
    dir: PathBuf,
}

impl Workbook {
    /// Opens the directory, creating it first when missing.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Workbook { dir })
    }

    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            bail!("no tracker directory at {}", dir.display());
        }
        Ok(Workbook { dir })
    }

    /// Opens the given directory, or walks the usual spots: `Tracker` in the
    /// working directory, then in its parent.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(dir) = explicit {
            return Workbook::open(dir);
        }

        for candidate in [PathBuf::from(DEFAULT_DIR), Path::new("..").join(DEFAULT_DIR)] {
            if candidate.is_dir() {
                return Workbook::open(candidate);
            }
        }

        bail!("no tracker directory found, pass --tracker or run `tracksheet init`")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn sheet_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.csv"))
    }

    pub fn has_sheet(&self, name: &str) -> bool {
        self.sheet_path(name).is_file()
    }

    /// All sheet names in the workbook, sorted.
    pub fn sheet_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("csv") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// The years that have a sheet, oldest first.
    pub fn year_sheets(&self) -> Result<Vec<i32>> {
        let mut years: Vec<i32> = self
            .sheet_names()?
            .iter()
            .filter_map(|name| year_sheet(name))
            .collect();
        years.sort_unstable();
        Ok(years)
    }

    pub fn read_grid(&self, name: &str) -> Result<Grid> {
        let file = File::open(self.sheet_path(name))?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(BufReader::new(file));

        let mut grid = Grid::new();
        for record in reader.records() {
            let record = record?;
            grid.push(record.iter().map(trim_cell).collect());
        }
        Ok(grid)
    }

    /// Writes the sheet through a temp file so a crash never leaves a half
    /// written sheet behind.
    pub fn write_grid(&self, name: &str, grid: &Grid) -> Result<()> {
        let path = self.sheet_path(name);
        let tmp = path.with_extension("tmp");
        {
            let file = File::create(&tmp)?;
            write_grid_to(BufWriter::new(file), grid)?;
        }
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    pub fn remove_sheet(&self, name: &str) -> Result<()> {
        fs::remove_file(self.sheet_path(name))?;
        Ok(())
    }
}

/// Writes a grid as CSV to any writer, the same shape `read_grid` accepts.
pub fn write_grid_to<W: io::Write>(writer: W, grid: &Grid) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new().flexible(true).from_writer(writer);
    for row in grid {
        csv_writer.write_record(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Parses a sheet name of exactly four digits as a year. Anything else is
/// not a year sheet.
pub fn year_sheet(name: &str) -> Option<i32> {
    if name.len() == 4 && name.chars().all(|c| c.is_ascii_digit()) {
        name.parse().ok()
    } else {
        None
    }
}

pub(crate) fn trim_cell(cell: &str) -> String {
    cell.trim().trim_start_matches('\u{feff}').trim().to_string()
}
