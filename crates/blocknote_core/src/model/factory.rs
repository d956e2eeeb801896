//! Block factory.
//!
//! # Responsibility
//! - Build a fresh block of any kind with kind-appropriate defaults.
//!
//! # Invariants
//! - Construction is pure: no dependence on document state.
//! - Every call yields new IDs for the block and its nested elements.
//! - Default payloads always pass `Block::validate()`.

use crate::model::block::{
    Block, BlockColor, BlockContent, BlockKind, CalloutContent, CodeContent, ImageContent,
    KanbanColumn, KanbanContent, LinkContent, ListContent, ListItem, TableContent, TableRow,
    TextContent, TodoContent, ToggleContent, UnknownBlockKind,
};

const DEFAULT_TABLE_COLUMNS: usize = 3;
const DEFAULT_TABLE_ROWS: usize = 2;
const DEFAULT_KANBAN_COLUMNS: [&str; 3] = ["To Do", "In Progress", "Done"];

/// Creates a block of `kind` with a fresh ID and default payload.
pub fn create_block(kind: BlockKind) -> Block {
    Block::new(default_content(kind))
}

/// Creates a block from a wire kind tag such as `"bulletList"`.
///
/// # Errors
/// - Returns `UnknownBlockKind` for tags outside the closed kind set.
pub fn create_block_from_tag(tag: &str) -> Result<Block, UnknownBlockKind> {
    let kind = tag.parse::<BlockKind>()?;
    Ok(create_block(kind))
}

/// Returns the default payload for `kind`.
pub fn default_content(kind: BlockKind) -> BlockContent {
    match kind {
        BlockKind::Paragraph => BlockContent::Paragraph(TextContent::default()),
        BlockKind::Heading1 => BlockContent::Heading1(TextContent::default()),
        BlockKind::Heading2 => BlockContent::Heading2(TextContent::default()),
        BlockKind::Heading3 => BlockContent::Heading3(TextContent::default()),
        BlockKind::Todo => BlockContent::Todo(TodoContent::default()),
        BlockKind::BulletList => BlockContent::BulletList(single_item_list()),
        BlockKind::NumberedList => BlockContent::NumberedList(single_item_list()),
        BlockKind::ToggleList => BlockContent::ToggleList(ToggleContent::default()),
        BlockKind::Quote => BlockContent::Quote(TextContent::default()),
        BlockKind::Callout => BlockContent::Callout(CalloutContent::default()),
        BlockKind::Code => BlockContent::Code(CodeContent::default()),
        BlockKind::Divider => BlockContent::Divider,
        BlockKind::Table => BlockContent::Table(default_table()),
        BlockKind::Kanban => BlockContent::Kanban(default_kanban()),
        BlockKind::Image => BlockContent::Image(ImageContent::default()),
        BlockKind::Link => BlockContent::Link(LinkContent::default()),
    }
}

fn single_item_list() -> ListContent {
    ListContent {
        items: vec![ListItem::new("")],
    }
}

fn default_table() -> TableContent {
    TableContent {
        headers: (1..=DEFAULT_TABLE_COLUMNS)
            .map(|index| format!("Column {index}"))
            .collect(),
        rows: (0..DEFAULT_TABLE_ROWS)
            .map(|_| TableRow::empty(DEFAULT_TABLE_COLUMNS))
            .collect(),
    }
}

fn default_kanban() -> KanbanContent {
    KanbanContent {
        columns: DEFAULT_KANBAN_COLUMNS
            .iter()
            .enumerate()
            .map(|(index, title)| KanbanColumn::new(*title, BlockColor::for_column(index)))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::{create_block, create_block_from_tag};
    use crate::model::block::{BlockContent, BlockKind, DEFAULT_CODE_LANGUAGE};

    #[test]
    fn every_default_block_is_valid() {
        for kind in BlockKind::ALL {
            let block = create_block(kind);
            assert_eq!(block.kind(), kind);
            block.validate().expect("default payload should validate");
        }
    }

    #[test]
    fn code_defaults_to_empty_plaintext() {
        match create_block(BlockKind::Code).content {
            BlockContent::Code(code) => {
                assert!(code.code.is_empty());
                assert_eq!(code.language, DEFAULT_CODE_LANGUAGE);
            }
            other => panic!("unexpected content: {other:?}"),
        }
    }

    #[test]
    fn from_tag_rejects_unknown_kind() {
        assert!(create_block_from_tag("numberedList").is_ok());
        assert!(create_block_from_tag("spreadsheet").is_err());
    }
}
