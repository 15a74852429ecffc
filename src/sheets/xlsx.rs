use std::path::Path;

use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Reader};

use super::{trim_cell, Grid};

/// Reads every sheet of an Excel workbook into text grids, in workbook
/// order. Cells are stringified the way the spreadsheet stores them, so
/// date cells come out as raw day serials.
pub fn read_sheets(path: &Path) -> Result<Vec<(String, Grid)>> {
    let mut workbook =
        open_workbook_auto(path).with_context(|| format!("failed to open {}", path.display()))?;

    let names = workbook.sheet_names().to_owned();
    let mut sheets = Vec::with_capacity(names.len());
    for name in names {
        let range = workbook
            .worksheet_range(&name)
            .with_context(|| format!("failed to read sheet {name:?}"))?;

        let grid: Grid = range
            .rows()
            .map(|row| row.iter().map(|cell| trim_cell(&cell.to_string())).collect())
            .collect();
        sheets.push((name, grid));
    }

    Ok(sheets)
}
