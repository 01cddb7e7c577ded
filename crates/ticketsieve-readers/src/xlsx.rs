//! Spreadsheet rows via calamine.

use std::io::Cursor;

use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use ticketsieve_core::{Error, Result, TableReader, TableRow};
use tracing::debug;

/// Rows of the first worksheet, keyed by the header row.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxTableReader;

impl TableReader for XlsxTableReader {
    fn read_rows(&self, bytes: &[u8]) -> Result<Vec<TableRow>> {
        let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))
            .map_err(|e| Error::Reader(format!("Failed to open XLSX: {}", e)))?;

        let Some(sheet) = workbook.sheet_names().first().cloned() else {
            return Ok(Vec::new());
        };
        let range = workbook
            .worksheet_range(&sheet)
            .map_err(|e| Error::Reader(format!("Failed to read sheet {}: {}", sheet, e)))?;

        let mut rows = range.rows();
        let Some(header) = rows.next() else {
            return Ok(Vec::new());
        };
        let columns: Vec<String> = header.iter().map(|cell| cell.to_string()).collect();

        let table: Vec<TableRow> = rows
            .map(|row| row_cells(&columns, row))
            .filter(|row| !row.cells.is_empty())
            .collect();

        debug!(sheet = %sheet, rows = table.len(), "read spreadsheet");
        Ok(table)
    }
}

fn row_cells(columns: &[String], row: &[Data]) -> TableRow {
    let cells = columns
        .iter()
        .zip(row)
        .filter(|(column, _)| !column.trim().is_empty())
        .map(|(column, cell)| (column.trim().to_string(), cell.to_string()))
        .filter(|(_, value)| !value.trim().is_empty())
        .collect();
    TableRow::new(cells)
}
