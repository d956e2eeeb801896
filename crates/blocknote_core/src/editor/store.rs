//! Editor store: the single writer of a document and its session state.
//!
//! # Responsibility
//! - Own the ordered block sequence plus selection, list-item focus and
//!   command-palette state of one editing session.
//! - Route every mutation through one apply-or-ignore gate.
//! - Notify the presentation observer with the full sequence after each
//!   applied change.
//!
//! # Invariants
//! - Block IDs are unique; order is a gapless total order (`Vec` order).
//! - Each operation validates before mutating, so no half-applied state is
//!   ever observable.
//! - In read-only mode every mutation is ignored and the palette stays closed.
//! - An empty document is valid; re-seeding is the presentation's job.

use crate::config::EditorConfig;
use crate::editor::outcome::{EditOutcome, IgnoreReason};
use crate::model::block::{Block, BlockContent, BlockId, ListItemId};
use crate::palette::state::{AnchorPosition, OpenPalette, PaletteState};
use crate::serialize::{encode_document, to_markdown, to_plain_text, EncodeError};
use log::{debug, warn};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Receives the full block sequence after every applied change.
pub trait DocumentObserver: Send {
    fn document_changed(&mut self, blocks: &[Block]);
}

impl<F> DocumentObserver for F
where
    F: FnMut(&[Block]) + Send,
{
    fn document_changed(&mut self, blocks: &[Block]) {
        self(blocks)
    }
}

/// Direction for `EditorStore::move_block`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Document plus ephemeral session state for one editor surface.
pub struct EditorStore {
    blocks: Vec<Block>,
    selected: Option<BlockId>,
    focused_item: Option<ListItemId>,
    palette: PaletteState,
    read_only: bool,
    revision: u64,
    observer: Option<Box<dyn DocumentObserver>>,
}

impl Default for EditorStore {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl EditorStore {
    /// Creates an empty editing session.
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            blocks: Vec::new(),
            selected: None,
            focused_item: None,
            palette: PaletteState::Closed,
            read_only: config.read_only,
            revision: 0,
            observer: None,
        }
    }

    /// Creates a session initialized with a starting block sequence.
    pub fn with_blocks(config: &EditorConfig, blocks: Vec<Block>) -> Self {
        let mut store = Self::new(config);
        store.set_blocks(blocks);
        store
    }

    /// Registers the observer notified after each applied change.
    pub fn set_observer(&mut self, observer: impl DocumentObserver + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    // Read API

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|block| block.id == id)
    }

    pub fn position(&self, id: BlockId) -> Option<usize> {
        self.blocks.iter().position(|block| block.id == id)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn selected(&self) -> Option<BlockId> {
        self.selected
    }

    /// List item holding the caret inside the selected list block.
    pub fn focused_item(&self) -> Option<ListItemId> {
        self.focused_item
    }

    pub fn palette(&self) -> &PaletteState {
        &self.palette
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Counter bumped once per applied change, hydration included.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn to_markdown(&self) -> String {
        to_markdown(&self.blocks)
    }

    pub fn to_plain_text(&self) -> String {
        to_plain_text(&self.blocks)
    }

    /// Encodes the current document into the persisted JSON format.
    pub fn encode(&self) -> Result<String, EncodeError> {
        encode_document(&self.blocks)
    }

    // Mode

    /// Switches view-only mode; entering it closes the palette.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
        if read_only {
            self.palette = PaletteState::Closed;
        }
    }

    // Document operations

    /// Replaces the whole document (hydration).
    ///
    /// Invalid blocks and repeated IDs are dropped (first occurrence wins).
    /// Allowed in read-only mode so view-only surfaces can load content.
    pub fn set_blocks(&mut self, blocks: Vec<Block>) {
        let incoming = blocks.len();
        let mut seen = HashSet::with_capacity(incoming);
        let accepted = blocks
            .into_iter()
            .filter(|block| block.validate().is_ok() && seen.insert(block.id))
            .collect::<Vec<_>>();
        let dropped = incoming - accepted.len();
        if dropped > 0 {
            warn!(
                "event=editor_hydrate module=editor status=partial incoming={} dropped={}",
                incoming, dropped
            );
        }

        self.blocks = accepted;
        if let Some(selected) = self.selected {
            if self.position(selected).is_none() {
                self.selected = None;
                self.focused_item = None;
            }
        }
        self.palette = PaletteState::Closed;
        self.revision += 1;
        debug!(
            "event=editor_hydrate module=editor status=ok blocks={} revision={}",
            self.blocks.len(),
            self.revision
        );
        self.notify();
    }

    /// Inserts `block` right after `after`, or appends when `after` is
    /// `None` or absent. The new block becomes selected.
    pub fn add_block(&mut self, block: Block, after: Option<BlockId>) -> EditOutcome<BlockId> {
        self.apply("add_block", |store| {
            if store.position(block.id).is_some() {
                return Err(IgnoreReason::DuplicateId(block.id));
            }
            block
                .validate()
                .map_err(|err| IgnoreReason::InvalidPatch(err.to_string()))?;

            let index = after
                .and_then(|anchor| store.position(anchor))
                .map_or(store.blocks.len(), |anchor_index| anchor_index + 1);
            let id = block.id;
            store.blocks.insert(index, block);
            store.selected = Some(id);
            store.focused_item = None;
            Ok(id)
        })
    }

    /// Shallow-merges a JSON object into the block payload.
    ///
    /// Keys replace payload fields wholesale; the block kind never changes.
    /// A key that is not a payload field of the block's kind rejects the
    /// whole patch.
    pub fn update_block(&mut self, id: BlockId, patch: &Value) -> EditOutcome {
        self.apply("update_block", |store| {
            let index = store.index_of(id)?;
            let Value::Object(fields) = patch else {
                return Err(IgnoreReason::InvalidPatch(
                    "patch must be a JSON object".to_string(),
                ));
            };

            let merged = merge_payload(&store.blocks[index].content, fields)?;
            let candidate = Block {
                content: merged,
                ..store.blocks[index].clone()
            };
            candidate
                .validate()
                .map_err(|err| IgnoreReason::InvalidPatch(err.to_string()))?;

            let block = &mut store.blocks[index];
            block.content = candidate.content;
            block.touch();
            Ok(())
        })
    }

    /// Mutates the payload of one block in place.
    ///
    /// `change` must either fully apply or return `Err` without mutating.
    pub fn update_content<T>(
        &mut self,
        id: BlockId,
        change: impl FnOnce(&mut BlockContent) -> Result<T, IgnoreReason>,
    ) -> EditOutcome<T> {
        self.edit_content("update_content", id, change)
    }

    /// Removes the block. A removed selection moves to the preceding block,
    /// or to the block taking its place when it was first.
    pub fn delete_block(&mut self, id: BlockId) -> EditOutcome {
        self.apply("delete_block", |store| {
            let index = store.index_of(id)?;
            store.blocks.remove(index);

            if store.selected == Some(id) {
                let fallback = if index > 0 {
                    store.blocks.get(index - 1)
                } else {
                    store.blocks.first()
                };
                store.selected = fallback.map(|block| block.id);
                store.focused_item = None;
            }
            Ok(())
        })
    }

    /// Swaps the block with its neighbor; ignored at either boundary.
    pub fn move_block(&mut self, id: BlockId, direction: MoveDirection) -> EditOutcome {
        self.apply("move_block", |store| {
            let index = store.index_of(id)?;
            let target = match direction {
                MoveDirection::Up => index.checked_sub(1),
                MoveDirection::Down => Some(index + 1).filter(|next| *next < store.blocks.len()),
            }
            .ok_or(IgnoreReason::Boundary)?;

            store.blocks.swap(index, target);
            Ok(())
        })
    }

    // Session operations (never touch the document)

    /// Sets or clears the selection.
    pub fn select_block(&mut self, id: Option<BlockId>) -> EditOutcome {
        if let Some(id) = id {
            if self.position(id).is_none() {
                return EditOutcome::Ignored(IgnoreReason::BlockNotFound(id));
            }
        }
        if self.selected != id {
            self.focused_item = None;
        }
        self.selected = id;
        EditOutcome::Applied(())
    }

    /// Moves list-item focus; `None` clears it.
    pub fn focus_item(&mut self, item: Option<ListItemId>) {
        self.focused_item = item;
    }

    /// Opens the command palette at `anchor` with an empty filter.
    pub fn open_slash_menu(&mut self, anchor: AnchorPosition) -> EditOutcome {
        if self.read_only {
            return EditOutcome::Ignored(IgnoreReason::ReadOnly);
        }
        self.palette = PaletteState::Open(OpenPalette::new(anchor));
        debug!("event=palette_open module=editor status=ok");
        EditOutcome::Applied(())
    }

    pub fn close_slash_menu(&mut self) {
        if self.palette.is_open() {
            debug!("event=palette_close module=editor status=ok");
        }
        self.palette = PaletteState::Closed;
    }

    /// Replaces the palette filter and resets the cursor to the top.
    pub fn set_slash_menu_filter(&mut self, filter: impl Into<String>) -> EditOutcome {
        match &mut self.palette {
            PaletteState::Open(open) => {
                open.filter = filter.into();
                open.cursor = 0;
                EditOutcome::Applied(())
            }
            PaletteState::Closed => EditOutcome::Ignored(IgnoreReason::NotApplicable),
        }
    }

    pub(crate) fn palette_mut(&mut self) -> &mut PaletteState {
        &mut self.palette
    }

    // Apply-or-ignore gate

    /// Runs one document mutation.
    ///
    /// On success bumps the revision and notifies the observer; on `Err`
    /// the closure must have left the document untouched.
    pub(crate) fn apply<T>(
        &mut self,
        op: &'static str,
        change: impl FnOnce(&mut Self) -> Result<T, IgnoreReason>,
    ) -> EditOutcome<T> {
        if self.read_only {
            debug!(
                "event=editor_edit module=editor op={} status=ignored reason={}",
                op,
                IgnoreReason::ReadOnly.code()
            );
            return EditOutcome::Ignored(IgnoreReason::ReadOnly);
        }

        match change(self) {
            Ok(value) => {
                self.revision += 1;
                debug!(
                    "event=editor_edit module=editor op={} status=ok blocks={} revision={}",
                    op,
                    self.blocks.len(),
                    self.revision
                );
                self.notify();
                EditOutcome::Applied(value)
            }
            Err(reason) => {
                debug!(
                    "event=editor_edit module=editor op={} status=ignored reason={}",
                    op,
                    reason.code()
                );
                EditOutcome::Ignored(reason)
            }
        }
    }

    /// Runs a payload mutation on one block and refreshes its `updated_at`.
    pub(crate) fn edit_content<T>(
        &mut self,
        op: &'static str,
        id: BlockId,
        change: impl FnOnce(&mut BlockContent) -> Result<T, IgnoreReason>,
    ) -> EditOutcome<T> {
        self.apply(op, |store| {
            let index = store.index_of(id)?;
            let block = &mut store.blocks[index];
            let value = change(&mut block.content)?;
            block.touch();
            Ok(value)
        })
    }

    fn index_of(&self, id: BlockId) -> Result<usize, IgnoreReason> {
        self.position(id).ok_or(IgnoreReason::BlockNotFound(id))
    }

    fn notify(&mut self) {
        if let Some(observer) = &mut self.observer {
            observer.document_changed(&self.blocks);
        }
    }
}

fn merge_payload(
    content: &BlockContent,
    fields: &Map<String, Value>,
) -> Result<BlockContent, IgnoreReason> {
    let mut encoded =
        serde_json::to_value(content).map_err(|err| IgnoreReason::InvalidPatch(err.to_string()))?;
    let Some(Value::Object(payload)) = encoded.get_mut("content") else {
        return Err(IgnoreReason::KindMismatch(content.kind()));
    };
    let allowed = content.kind().payload_fields();
    if let Some(unknown) = fields.keys().find(|key| !allowed.contains(&key.as_str())) {
        return Err(IgnoreReason::InvalidPatch(format!(
            "`{unknown}` is not a `{}` field",
            content.kind()
        )));
    }
    for (key, value) in fields {
        payload.insert(key.clone(), value.clone());
    }
    serde_json::from_value(encoded).map_err(|err| IgnoreReason::InvalidPatch(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{EditorStore, MoveDirection};
    use crate::config::EditorConfig;
    use crate::editor::outcome::{EditOutcome, IgnoreReason};
    use crate::model::block::{BlockContent, BlockKind};
    use crate::model::factory::create_block;
    use serde_json::json;

    #[test]
    fn update_block_cannot_patch_divider() {
        let mut store = EditorStore::default();
        let id = store
            .add_block(create_block(BlockKind::Divider), None)
            .applied()
            .unwrap();
        let outcome = store.update_block(id, &json!({"text": "x"}));
        assert_eq!(
            outcome,
            EditOutcome::Ignored(IgnoreReason::KindMismatch(BlockKind::Divider))
        );
    }

    #[test]
    fn update_block_rejects_type_mismatched_fields() {
        let mut store = EditorStore::default();
        let id = store
            .add_block(create_block(BlockKind::Todo), None)
            .applied()
            .unwrap();
        let outcome = store.update_block(id, &json!({"checked": "yes"}));
        assert!(matches!(
            outcome,
            EditOutcome::Ignored(IgnoreReason::InvalidPatch(_))
        ));
        assert!(matches!(
            &store.blocks()[0].content,
            BlockContent::Todo(todo) if !todo.checked
        ));
    }

    #[test]
    fn read_only_ignores_moves_and_keeps_revision() {
        let first = create_block(BlockKind::Paragraph);
        let second = create_block(BlockKind::Paragraph);
        let second_id = second.id;
        let mut store =
            EditorStore::with_blocks(&EditorConfig::read_only(), vec![first, second]);
        let revision = store.revision();

        let outcome = store.move_block(second_id, MoveDirection::Up);
        assert_eq!(outcome, EditOutcome::Ignored(IgnoreReason::ReadOnly));
        assert_eq!(store.revision(), revision);
    }
}
