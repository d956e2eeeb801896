//! Column and card editing of kanban boards.
//!
//! # Invariants
//! - A board keeps at least one column.
//! - Moving a card never creates or loses cards: the total card count is
//!   the same before and after.
//! - New columns take the next color in `BlockColor::ALL` order.

use crate::editor::outcome::{EditOutcome, IgnoreReason};
use crate::editor::store::EditorStore;
use crate::model::block::{
    BlockColor, BlockContent, BlockId, KanbanCard, KanbanCardId, KanbanColumn, KanbanColumnId,
    KanbanContent,
};

/// Appends an empty column; returns its ID.
pub fn add_column(
    store: &mut EditorStore,
    block_id: BlockId,
    title: impl Into<String>,
) -> EditOutcome<KanbanColumnId> {
    let title = title.into();
    store.edit_content("kanban_add_column", block_id, move |content| {
        let board = board_mut(content)?;
        let column = KanbanColumn::new(title, BlockColor::for_column(board.columns.len()));
        let column_id = column.id;
        board.columns.push(column);
        Ok(column_id)
    })
}

/// Removes a column and its cards, unless it is the last one.
pub fn delete_column(
    store: &mut EditorStore,
    block_id: BlockId,
    column_id: KanbanColumnId,
) -> EditOutcome {
    store.edit_content("kanban_delete_column", block_id, |content| {
        let board = board_mut(content)?;
        let index = column_index(board, column_id)?;
        if board.columns.len() <= 1 {
            return Err(IgnoreReason::FloorReached);
        }
        board.columns.remove(index);
        Ok(())
    })
}

pub fn rename_column(
    store: &mut EditorStore,
    block_id: BlockId,
    column_id: KanbanColumnId,
    title: impl Into<String>,
) -> EditOutcome {
    let title = title.into();
    store.edit_content("kanban_rename_column", block_id, move |content| {
        let board = board_mut(content)?;
        let index = column_index(board, column_id)?;
        board.columns[index].title = title;
        Ok(())
    })
}

/// Appends a card to the end of a column; returns the card ID.
pub fn add_card(
    store: &mut EditorStore,
    block_id: BlockId,
    column_id: KanbanColumnId,
    text: impl Into<String>,
) -> EditOutcome<KanbanCardId> {
    let text = text.into();
    store.edit_content("kanban_add_card", block_id, move |content| {
        let board = board_mut(content)?;
        let index = column_index(board, column_id)?;
        let card = KanbanCard::new(text);
        let card_id = card.id;
        board.columns[index].cards.push(card);
        Ok(card_id)
    })
}

pub fn delete_card(
    store: &mut EditorStore,
    block_id: BlockId,
    column_id: KanbanColumnId,
    card_id: KanbanCardId,
) -> EditOutcome {
    store.edit_content("kanban_delete_card", block_id, |content| {
        let board = board_mut(content)?;
        let column = column_index(board, column_id)?;
        let card = card_index(&board.columns[column], card_id)?;
        board.columns[column].cards.remove(card);
        Ok(())
    })
}

pub fn set_card_text(
    store: &mut EditorStore,
    block_id: BlockId,
    column_id: KanbanColumnId,
    card_id: KanbanCardId,
    text: impl Into<String>,
) -> EditOutcome {
    let text = text.into();
    store.edit_content("kanban_set_card_text", block_id, move |content| {
        let board = board_mut(content)?;
        let column = column_index(board, column_id)?;
        let card = card_index(&board.columns[column], card_id)?;
        board.columns[column].cards[card].text = text;
        Ok(())
    })
}

/// Moves a card from one column to the end of another.
///
/// Moving within the same column is ignored with `NotApplicable`.
pub fn move_card(
    store: &mut EditorStore,
    block_id: BlockId,
    card_id: KanbanCardId,
    from: KanbanColumnId,
    to: KanbanColumnId,
) -> EditOutcome {
    store.edit_content("kanban_move_card", block_id, |content| {
        let board = board_mut(content)?;
        let source = column_index(board, from)?;
        let target = column_index(board, to)?;
        let card = card_index(&board.columns[source], card_id)?;
        if source == target {
            return Err(IgnoreReason::NotApplicable);
        }
        let moved = board.columns[source].cards.remove(card);
        board.columns[target].cards.push(moved);
        Ok(())
    })
}

fn board_mut(content: &mut BlockContent) -> Result<&mut KanbanContent, IgnoreReason> {
    match content {
        BlockContent::Kanban(board) => Ok(board),
        other => Err(IgnoreReason::KindMismatch(other.kind())),
    }
}

fn column_index(board: &KanbanContent, column_id: KanbanColumnId) -> Result<usize, IgnoreReason> {
    board
        .columns
        .iter()
        .position(|column| column.id == column_id)
        .ok_or(IgnoreReason::ElementNotFound(column_id))
}

fn card_index(column: &KanbanColumn, card_id: KanbanCardId) -> Result<usize, IgnoreReason> {
    column
        .cards
        .iter()
        .position(|card| card.id == card_id)
        .ok_or(IgnoreReason::ElementNotFound(card_id))
}
