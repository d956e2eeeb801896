use blocknote_core::behavior::list::{press_backspace_on_item, press_enter_on_item, ItemRemoval};
use blocknote_core::behavior::{callout, code, kanban, table, text, toggle};
use blocknote_core::model::block::{KanbanContent, TableContent, TodoContent};
use blocknote_core::{
    create_block, Block, BlockColor, BlockContent, BlockId, BlockKind, CalloutIcon, EditOutcome,
    EditorConfig, EditorStore, IgnoreReason,
};
use blocknote_core::palette::AnchorPosition;

fn store_with(kind: BlockKind) -> (EditorStore, BlockId) {
    let mut store = EditorStore::default();
    let id = store.add_block(create_block(kind), None).applied().unwrap();
    (store, id)
}

fn table_of(store: &EditorStore, id: BlockId) -> TableContent {
    match &store.block(id).unwrap().content {
        BlockContent::Table(table) => table.clone(),
        other => panic!("expected table, got {:?}", other.kind()),
    }
}

fn board_of(store: &EditorStore, id: BlockId) -> KanbanContent {
    match &store.block(id).unwrap().content {
        BlockContent::Kanban(board) => board.clone(),
        other => panic!("expected kanban, got {:?}", other.kind()),
    }
}

fn assert_rectangular(table: &TableContent) {
    for row in &table.rows {
        assert_eq!(row.cells.len(), table.headers.len());
    }
}

#[test]
fn checklist_flow() {
    let mut store = EditorStore::default();
    let todo = Block::new(BlockContent::Todo(TodoContent {
        text: "Buy milk".to_string(),
        checked: false,
    }));
    let first = store.add_block(todo, None).applied().unwrap();

    text::toggle_todo(&mut store, first).applied().unwrap();
    assert!(matches!(
        &store.block(first).unwrap().content,
        BlockContent::Todo(todo) if todo.checked
    ));

    let second = text::press_enter(&mut store, first, false).applied().unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.position(second), Some(1));
    assert_eq!(store.selected(), Some(second));
    assert!(matches!(
        &store.block(second).unwrap().content,
        BlockContent::Todo(todo) if todo.text.is_empty() && !todo.checked
    ));
}

#[test]
fn enter_after_heading_inserts_paragraph() {
    let (mut store, id) = store_with(BlockKind::Heading1);
    let next = text::press_enter(&mut store, id, false).applied().unwrap();
    assert_eq!(store.block(next).unwrap().kind(), BlockKind::Paragraph);
}

#[test]
fn backspace_on_empty_text_deletes_block() {
    let (mut store, id) = store_with(BlockKind::Quote);
    text::press_backspace(&mut store, id).applied().unwrap();
    assert!(store.is_empty());
}

#[test]
fn list_enter_inserts_and_focuses_item() {
    let (mut store, id) = store_with(BlockKind::BulletList);
    let BlockContent::BulletList(list) = &store.block(id).unwrap().content else {
        panic!("expected bullet list");
    };
    let first_item = list.items[0].id;

    let new_item = press_enter_on_item(&mut store, id, first_item)
        .applied()
        .unwrap();
    assert_eq!(store.focused_item(), Some(new_item));

    let BlockContent::BulletList(list) = &store.block(id).unwrap().content else {
        panic!("expected bullet list");
    };
    assert_eq!(list.items.len(), 2);
    assert_eq!(list.items[1].id, new_item);
}

#[test]
fn list_backspace_removes_empty_item_then_whole_block() {
    let (mut store, id) = store_with(BlockKind::NumberedList);
    let BlockContent::NumberedList(list) = &store.block(id).unwrap().content else {
        panic!("expected numbered list");
    };
    let first_item = list.items[0].id;
    let second_item = press_enter_on_item(&mut store, id, first_item)
        .applied()
        .unwrap();

    assert_eq!(
        press_backspace_on_item(&mut store, id, second_item),
        EditOutcome::Applied(ItemRemoval::Removed {
            focused: first_item
        })
    );
    assert_eq!(store.focused_item(), Some(first_item));

    assert_eq!(
        press_backspace_on_item(&mut store, id, first_item),
        EditOutcome::Applied(ItemRemoval::BlockDeleted)
    );
    assert!(store.is_empty());
}

#[test]
fn list_backspace_keeps_non_empty_item() {
    let (mut store, id) = store_with(BlockKind::BulletList);
    let BlockContent::BulletList(list) = &store.block(id).unwrap().content else {
        panic!("expected bullet list");
    };
    let item = list.items[0].id;
    blocknote_core::behavior::list::set_item_text(&mut store, id, item, "keep")
        .applied()
        .unwrap();

    assert_eq!(
        press_backspace_on_item(&mut store, id, item),
        EditOutcome::Ignored(IgnoreReason::NotApplicable)
    );
    assert_eq!(store.len(), 1);
}

#[test]
fn table_growth_scenario() {
    let (mut store, id) = store_with(BlockKind::Table);
    let initial = table_of(&store, id);
    assert_eq!(initial.headers.len(), 3);
    assert_eq!(initial.rows.len(), 2);

    table::add_column(&mut store, id).applied().unwrap();
    table::add_row(&mut store, id).applied().unwrap();

    let grown = table_of(&store, id);
    assert_eq!(grown.headers.len(), 4);
    assert_eq!(grown.headers[3], "Column 4");
    assert_eq!(grown.rows.len(), 3);
    assert_rectangular(&grown);
    assert!(grown.rows[2].cells.iter().all(String::is_empty));
}

#[test]
fn table_column_ops_keep_rows_rectangular() {
    let (mut store, id) = store_with(BlockKind::Table);
    let row = table_of(&store, id).rows[0].id;
    table::set_cell(&mut store, id, row, 1, "middle").applied().unwrap();
    table::set_cell(&mut store, id, row, 2, "last").applied().unwrap();

    table::delete_column(&mut store, id, 1).applied().unwrap();
    let shrunk = table_of(&store, id);
    assert_rectangular(&shrunk);
    assert_eq!(shrunk.headers, vec!["Column 1", "Column 3"]);
    assert_eq!(shrunk.rows[0].cells, vec!["", "last"]);

    assert_eq!(
        table::delete_column(&mut store, id, 5),
        EditOutcome::Ignored(IgnoreReason::IndexOutOfRange(5))
    );
}

#[test]
fn table_floors_hold_at_one_row_and_one_column() {
    let (mut store, id) = store_with(BlockKind::Table);
    table::delete_column(&mut store, id, 0).applied().unwrap();
    table::delete_column(&mut store, id, 0).applied().unwrap();
    assert_eq!(
        table::delete_column(&mut store, id, 0),
        EditOutcome::Ignored(IgnoreReason::FloorReached)
    );

    let rows = table_of(&store, id).rows;
    table::delete_row(&mut store, id, rows[0].id).applied().unwrap();
    assert_eq!(
        table::delete_row(&mut store, id, rows[1].id),
        EditOutcome::Ignored(IgnoreReason::FloorReached)
    );

    let last = table_of(&store, id);
    assert_eq!(last.headers.len(), 1);
    assert_eq!(last.rows.len(), 1);
    assert_rectangular(&last);
}

#[test]
fn kanban_move_conserves_cards() {
    let (mut store, id) = store_with(BlockKind::Kanban);
    let columns = board_of(&store, id)
        .columns
        .iter()
        .map(|column| column.id)
        .collect::<Vec<_>>();

    let card = kanban::add_card(&mut store, id, columns[0], "Write docs")
        .applied()
        .unwrap();
    kanban::add_card(&mut store, id, columns[2], "Ship").applied().unwrap();
    let before = board_of(&store, id).card_count();

    kanban::move_card(&mut store, id, card, columns[0], columns[2])
        .applied()
        .unwrap();

    let board = board_of(&store, id);
    assert_eq!(board.card_count(), before);
    assert!(board.columns[0].cards.is_empty());
    assert_eq!(board.columns[2].cards.len(), 2);
    assert_eq!(board.columns[2].cards[1].id, card);
    assert_eq!(board.columns[2].cards[1].text, "Write docs");
}

#[test]
fn kanban_move_from_wrong_column_is_ignored() {
    let (mut store, id) = store_with(BlockKind::Kanban);
    let columns = board_of(&store, id)
        .columns
        .iter()
        .map(|column| column.id)
        .collect::<Vec<_>>();
    let card = kanban::add_card(&mut store, id, columns[0], "a").applied().unwrap();

    assert_eq!(
        kanban::move_card(&mut store, id, card, columns[1], columns[2]),
        EditOutcome::Ignored(IgnoreReason::ElementNotFound(card))
    );
    assert_eq!(board_of(&store, id).columns[0].cards.len(), 1);
}

#[test]
fn kanban_columns_cycle_colors_and_keep_floor() {
    let (mut store, id) = store_with(BlockKind::Kanban);
    let initial = board_of(&store, id);
    let colors = initial
        .columns
        .iter()
        .map(|column| column.color)
        .collect::<Vec<_>>();
    assert_eq!(colors, BlockColor::ALL[..3].to_vec());

    for column in &initial.columns[1..] {
        kanban::delete_column(&mut store, id, column.id)
            .applied()
            .unwrap();
    }
    assert_eq!(
        kanban::delete_column(&mut store, id, initial.columns[0].id),
        EditOutcome::Ignored(IgnoreReason::FloorReached)
    );

    let added = kanban::add_column(&mut store, id, "Later").applied().unwrap();
    let board = board_of(&store, id);
    assert_eq!(board.columns.len(), 2);
    assert_eq!(board.columns[1].id, added);
    assert_eq!(board.columns[1].color, BlockColor::for_column(1));
    assert!(board.columns[1].cards.is_empty());
}

#[test]
fn toggle_title_and_body_edit_independently() {
    let (mut store, id) = store_with(BlockKind::ToggleList);
    toggle::set_title(&mut store, id, "Details").applied().unwrap();
    toggle::set_body(&mut store, id, "Hidden text").applied().unwrap();
    assert_eq!(toggle::toggle_open(&mut store, id), EditOutcome::Applied(false));
    toggle::set_open(&mut store, id, true).applied().unwrap();

    let BlockContent::ToggleList(content) = &store.block(id).unwrap().content else {
        panic!("expected toggle");
    };
    assert_eq!(content.title, "Details");
    assert_eq!(content.body, "Hidden text");
    assert!(content.is_open);
}

#[test]
fn callout_icon_and_color_are_payload_edits() {
    let (mut store, id) = store_with(BlockKind::Callout);
    callout::set_icon(&mut store, id, CalloutIcon::Warning).applied().unwrap();
    callout::set_color(&mut store, id, BlockColor::Orange).applied().unwrap();
    callout::set_text(&mut store, id, "Careful").applied().unwrap();

    assert_eq!(store.to_markdown(), "> ⚠️ Careful");
}

#[test]
fn code_picker_accepts_only_suggestions() {
    let (mut store, id) = store_with(BlockKind::Code);
    code::select_language(&mut store, id, "Rust").applied().unwrap();
    assert_eq!(
        code::select_language(&mut store, id, "cobol-2099"),
        EditOutcome::Ignored(IgnoreReason::UnsupportedLanguage("cobol-2099".to_string()))
    );
    code::set_code(&mut store, id, "fn main() {}").applied().unwrap();

    assert_eq!(store.to_markdown(), "```rust\nfn main() {}\n```");
}

#[test]
fn behaviors_reject_wrong_kind() {
    let (mut store, id) = store_with(BlockKind::Divider);
    assert_eq!(
        table::add_row(&mut store, id),
        EditOutcome::Ignored(IgnoreReason::KindMismatch(BlockKind::Divider))
    );
    assert_eq!(
        kanban::add_column(&mut store, id, "x"),
        EditOutcome::Ignored(IgnoreReason::KindMismatch(BlockKind::Divider))
    );
    assert_eq!(
        text::toggle_todo(&mut store, id),
        EditOutcome::Ignored(IgnoreReason::KindMismatch(BlockKind::Divider))
    );
    assert_eq!(store.revision(), 1);
}

#[test]
fn behaviors_are_ignored_in_read_only_mode() {
    let paragraph = create_block(BlockKind::Paragraph);
    let table = create_block(BlockKind::Table);
    let board = create_block(BlockKind::Kanban);
    let list = create_block(BlockKind::BulletList);
    let code_block = create_block(BlockKind::Code);
    let toggle_block = create_block(BlockKind::ToggleList);
    let callout_block = create_block(BlockKind::Callout);
    let (p, t, k, l, c, tg, co) = (
        paragraph.id,
        table.id,
        board.id,
        list.id,
        code_block.id,
        toggle_block.id,
        callout_block.id,
    );
    let mut store = EditorStore::with_blocks(
        &EditorConfig::read_only(),
        vec![paragraph, table, board, list, code_block, toggle_block, callout_block],
    );
    let snapshot = store.blocks().to_vec();
    let revision = store.revision();
    let ignored = EditOutcome::Ignored(IgnoreReason::ReadOnly);

    assert_eq!(text::type_slash(&mut store, p, AnchorPosition::default()), ignored);
    assert!(!store.palette().is_open());
    assert_eq!(text::press_enter(&mut store, p, false), EditOutcome::Ignored(IgnoreReason::ReadOnly));
    assert_eq!(text::press_backspace(&mut store, p), ignored);

    assert_eq!(table::add_column(&mut store, t), EditOutcome::Ignored(IgnoreReason::ReadOnly));
    assert_eq!(table::add_row(&mut store, t), EditOutcome::Ignored(IgnoreReason::ReadOnly));
    assert_eq!(
        kanban::add_column(&mut store, k, "Later"),
        EditOutcome::Ignored(IgnoreReason::ReadOnly)
    );

    let item = match &store.block(l).unwrap().content {
        BlockContent::BulletList(list) => list.items[0].id,
        other => panic!("expected list, got {:?}", other.kind()),
    };
    assert_eq!(
        press_enter_on_item(&mut store, l, item),
        EditOutcome::Ignored(IgnoreReason::ReadOnly)
    );
    assert_eq!(
        press_backspace_on_item(&mut store, l, item),
        EditOutcome::Ignored(IgnoreReason::ReadOnly)
    );

    assert_eq!(code::select_language(&mut store, c, "rust"), ignored);
    assert_eq!(toggle::toggle_open(&mut store, tg), EditOutcome::Ignored(IgnoreReason::ReadOnly));
    assert_eq!(callout::set_icon(&mut store, co, CalloutIcon::Fire), ignored);

    assert_eq!(store.blocks(), snapshot.as_slice());
    assert_eq!(store.revision(), revision);
}
