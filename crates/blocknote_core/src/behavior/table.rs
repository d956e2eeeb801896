//! Row/column editing of table blocks.
//!
//! # Invariants
//! - Every row has exactly one cell per header, before and after each call.
//! - At least one row and one column remain; deleting past that floor is
//!   ignored with `FloorReached`.

use crate::editor::outcome::{EditOutcome, IgnoreReason};
use crate::editor::store::EditorStore;
use crate::model::block::{BlockContent, BlockId, TableContent, TableRow, TableRowId};

/// Appends a row of empty cells; returns the new row ID.
pub fn add_row(store: &mut EditorStore, block_id: BlockId) -> EditOutcome<TableRowId> {
    store.edit_content("table_add_row", block_id, |content| {
        let table = table_mut(content)?;
        let row = TableRow::empty(table.headers.len());
        let row_id = row.id;
        table.rows.push(row);
        Ok(row_id)
    })
}

/// Appends a header and one empty cell to every row; returns the column index.
pub fn add_column(store: &mut EditorStore, block_id: BlockId) -> EditOutcome<usize> {
    store.edit_content("table_add_column", block_id, |content| {
        let table = table_mut(content)?;
        let index = table.headers.len();
        table.headers.push(format!("Column {}", index + 1));
        for row in &mut table.rows {
            row.cells.push(String::new());
        }
        Ok(index)
    })
}

/// Removes one row unless it is the last remaining.
pub fn delete_row(store: &mut EditorStore, block_id: BlockId, row_id: TableRowId) -> EditOutcome {
    store.edit_content("table_delete_row", block_id, |content| {
        let table = table_mut(content)?;
        let index = row_index(table, row_id)?;
        if table.rows.len() <= 1 {
            return Err(IgnoreReason::FloorReached);
        }
        table.rows.remove(index);
        Ok(())
    })
}

/// Removes a header and the matching cell of every row, unless it is the
/// last remaining column.
pub fn delete_column(store: &mut EditorStore, block_id: BlockId, column: usize) -> EditOutcome {
    store.edit_content("table_delete_column", block_id, |content| {
        let table = table_mut(content)?;
        if column >= table.headers.len() {
            return Err(IgnoreReason::IndexOutOfRange(column));
        }
        if table.headers.len() <= 1 {
            return Err(IgnoreReason::FloorReached);
        }
        table.headers.remove(column);
        for row in &mut table.rows {
            row.cells.remove(column);
        }
        Ok(())
    })
}

pub fn set_header(
    store: &mut EditorStore,
    block_id: BlockId,
    column: usize,
    text: impl Into<String>,
) -> EditOutcome {
    let text = text.into();
    store.edit_content("table_set_header", block_id, move |content| {
        let table = table_mut(content)?;
        let header = table
            .headers
            .get_mut(column)
            .ok_or(IgnoreReason::IndexOutOfRange(column))?;
        *header = text;
        Ok(())
    })
}

pub fn set_cell(
    store: &mut EditorStore,
    block_id: BlockId,
    row_id: TableRowId,
    column: usize,
    text: impl Into<String>,
) -> EditOutcome {
    let text = text.into();
    store.edit_content("table_set_cell", block_id, move |content| {
        let table = table_mut(content)?;
        let index = row_index(table, row_id)?;
        let cell = table.rows[index]
            .cells
            .get_mut(column)
            .ok_or(IgnoreReason::IndexOutOfRange(column))?;
        *cell = text;
        Ok(())
    })
}

fn table_mut(content: &mut BlockContent) -> Result<&mut TableContent, IgnoreReason> {
    match content {
        BlockContent::Table(table) => Ok(table),
        other => Err(IgnoreReason::KindMismatch(other.kind())),
    }
}

fn row_index(table: &TableContent, row_id: TableRowId) -> Result<usize, IgnoreReason> {
    table
        .rows
        .iter()
        .position(|row| row.id == row_id)
        .ok_or(IgnoreReason::ElementNotFound(row_id))
}
