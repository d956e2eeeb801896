//! Block domain model.
//!
//! # Responsibility
//! - Define the typed unit of document content and every per-kind payload.
//! - Provide structural validation shared by decode and patch paths.
//!
//! # Invariants
//! - `id` is stable for the block lifetime and never reused.
//! - The payload variant is the only source of truth for a block's kind.
//! - Table rows always carry exactly one cell per header.
//! - Every kanban card belongs to exactly one column.
//!
//! # See also
//! - `crate::model::factory` for default payloads.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier of one block inside a document.
pub type BlockId = Uuid;
/// Stable identifier of one list item inside a list block.
pub type ListItemId = Uuid;
/// Stable identifier of one table row.
pub type TableRowId = Uuid;
/// Stable identifier of one kanban column.
pub type KanbanColumnId = Uuid;
/// Stable identifier of one kanban card.
pub type KanbanCardId = Uuid;

/// Closed set of block kinds.
///
/// Serialized with the same tags as the `type` field of persisted blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockKind {
    Paragraph,
    Heading1,
    Heading2,
    Heading3,
    Todo,
    BulletList,
    NumberedList,
    ToggleList,
    Quote,
    Callout,
    Code,
    Divider,
    Table,
    Kanban,
    Image,
    Link,
}

impl BlockKind {
    /// Every kind in declaration order.
    pub const ALL: [BlockKind; 16] = [
        Self::Paragraph,
        Self::Heading1,
        Self::Heading2,
        Self::Heading3,
        Self::Todo,
        Self::BulletList,
        Self::NumberedList,
        Self::ToggleList,
        Self::Quote,
        Self::Callout,
        Self::Code,
        Self::Divider,
        Self::Table,
        Self::Kanban,
        Self::Image,
        Self::Link,
    ];

    /// Stable wire tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Heading1 => "heading1",
            Self::Heading2 => "heading2",
            Self::Heading3 => "heading3",
            Self::Todo => "todo",
            Self::BulletList => "bulletList",
            Self::NumberedList => "numberedList",
            Self::ToggleList => "toggleList",
            Self::Quote => "quote",
            Self::Callout => "callout",
            Self::Code => "code",
            Self::Divider => "divider",
            Self::Table => "table",
            Self::Kanban => "kanban",
            Self::Image => "image",
            Self::Link => "link",
        }
    }

    /// Wire keys of this kind's `content` object, optional ones included.
    pub fn payload_fields(self) -> &'static [&'static str] {
        match self {
            Self::Paragraph | Self::Heading1 | Self::Heading2 | Self::Heading3 | Self::Quote => {
                &["text"]
            }
            Self::Todo => &["text", "checked"],
            Self::BulletList | Self::NumberedList => &["items"],
            Self::ToggleList => &["title", "body", "isOpen"],
            Self::Callout => &["text", "icon", "color"],
            Self::Code => &["code", "language"],
            Self::Divider => &[],
            Self::Table => &["headers", "rows"],
            Self::Kanban => &["columns"],
            Self::Image => &["url", "alt", "caption"],
            Self::Link => &["url", "title", "description"],
        }
    }

    /// Kinds whose payload is a single text string.
    pub fn is_text_like(self) -> bool {
        matches!(
            self,
            Self::Paragraph | Self::Heading1 | Self::Heading2 | Self::Heading3 | Self::Quote
        )
    }
}

impl Display for BlockKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockKind {
    type Err = UnknownBlockKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| UnknownBlockKind(normalized.to_string()))
    }
}

/// Parse error for block kind tags coming from string boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBlockKind(pub String);

impl Display for UnknownBlockKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown block kind: `{}`", self.0)
    }
}

impl Error for UnknownBlockKind {}

/// Closed color palette shared by callouts and kanban columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockColor {
    Gray,
    #[default]
    Blue,
    Green,
    Yellow,
    Orange,
    Red,
    Purple,
    Pink,
}

impl BlockColor {
    /// Palette order; kanban columns take colors from here in sequence.
    pub const ALL: [BlockColor; 8] = [
        Self::Gray,
        Self::Blue,
        Self::Green,
        Self::Yellow,
        Self::Orange,
        Self::Red,
        Self::Purple,
        Self::Pink,
    ];

    /// Color assigned to the column at `index` in a kanban board.
    pub fn for_column(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }
}

/// Closed icon set for callouts. Serialized as the glyph itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CalloutIcon {
    #[default]
    #[serde(rename = "💡")]
    Lightbulb,
    #[serde(rename = "ℹ️")]
    Info,
    #[serde(rename = "⚠️")]
    Warning,
    #[serde(rename = "🚨")]
    Alert,
    #[serde(rename = "✅")]
    Check,
    #[serde(rename = "📝")]
    Memo,
    #[serde(rename = "⭐")]
    Star,
    #[serde(rename = "🔥")]
    Fire,
}

impl CalloutIcon {
    pub const ALL: [CalloutIcon; 8] = [
        Self::Lightbulb,
        Self::Info,
        Self::Warning,
        Self::Alert,
        Self::Check,
        Self::Memo,
        Self::Star,
        Self::Fire,
    ];

    pub fn glyph(self) -> &'static str {
        match self {
            Self::Lightbulb => "💡",
            Self::Info => "ℹ️",
            Self::Warning => "⚠️",
            Self::Alert => "🚨",
            Self::Check => "✅",
            Self::Memo => "📝",
            Self::Star => "⭐",
            Self::Fire => "🔥",
        }
    }
}

/// Payload of paragraph, heading and quote blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextContent {
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TodoContent {
    pub text: String,
    pub checked: bool,
}

/// One entry of a bullet or numbered list.
///
/// `children` is persisted and rendered but no editing behavior creates
/// nested items yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub id: ListItemId,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ListItem>,
}

impl ListItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListContent {
    pub items: Vec<ListItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToggleContent {
    pub title: String,
    pub body: String,
    pub is_open: bool,
}

impl Default for ToggleContent {
    fn default() -> Self {
        Self {
            title: String::new(),
            body: String::new(),
            is_open: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalloutContent {
    pub text: String,
    pub icon: CalloutIcon,
    pub color: BlockColor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeContent {
    pub code: String,
    /// Free-form tag; the picker only offers known suggestions.
    pub language: String,
}

/// Language assigned to freshly created code blocks.
pub const DEFAULT_CODE_LANGUAGE: &str = "plaintext";

impl Default for CodeContent {
    fn default() -> Self {
        Self {
            code: String::new(),
            language: DEFAULT_CODE_LANGUAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub id: TableRowId,
    #[serde(default)]
    pub cells: Vec<String>,
}

impl TableRow {
    /// Creates a row of `width` empty cells.
    pub fn empty(width: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            cells: vec![String::new(); width],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableContent {
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanbanCard {
    pub id: KanbanCardId,
    #[serde(default)]
    pub text: String,
}

impl KanbanCard {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanbanColumn {
    pub id: KanbanColumnId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub color: BlockColor,
    #[serde(default)]
    pub cards: Vec<KanbanCard>,
}

impl KanbanColumn {
    pub fn new(title: impl Into<String>, color: BlockColor) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            color,
            cards: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KanbanContent {
    pub columns: Vec<KanbanColumn>,
}

impl KanbanContent {
    /// Total number of cards across every column.
    pub fn card_count(&self) -> usize {
        self.columns.iter().map(|column| column.cards.len()).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageContent {
    pub url: String,
    pub alt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkContent {
    pub url: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Per-kind payload, discriminated by the persisted `type` tag.
///
/// Wire shape: `{"type": "<kind>", "content": {...}}`; `divider` carries no
/// `content` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "camelCase")]
pub enum BlockContent {
    Paragraph(TextContent),
    Heading1(TextContent),
    Heading2(TextContent),
    Heading3(TextContent),
    Todo(TodoContent),
    BulletList(ListContent),
    NumberedList(ListContent),
    ToggleList(ToggleContent),
    Quote(TextContent),
    Callout(CalloutContent),
    Code(CodeContent),
    Divider,
    Table(TableContent),
    Kanban(KanbanContent),
    Image(ImageContent),
    Link(LinkContent),
}

impl BlockContent {
    pub fn kind(&self) -> BlockKind {
        match self {
            Self::Paragraph(_) => BlockKind::Paragraph,
            Self::Heading1(_) => BlockKind::Heading1,
            Self::Heading2(_) => BlockKind::Heading2,
            Self::Heading3(_) => BlockKind::Heading3,
            Self::Todo(_) => BlockKind::Todo,
            Self::BulletList(_) => BlockKind::BulletList,
            Self::NumberedList(_) => BlockKind::NumberedList,
            Self::ToggleList(_) => BlockKind::ToggleList,
            Self::Quote(_) => BlockKind::Quote,
            Self::Callout(_) => BlockKind::Callout,
            Self::Code(_) => BlockKind::Code,
            Self::Divider => BlockKind::Divider,
            Self::Table(_) => BlockKind::Table,
            Self::Kanban(_) => BlockKind::Kanban,
            Self::Image(_) => BlockKind::Image,
            Self::Link(_) => BlockKind::Link,
        }
    }

    /// Editable line text of text-like and todo blocks.
    ///
    /// Returns `None` for kinds without a single primary text line.
    pub fn line_text(&self) -> Option<&str> {
        match self {
            Self::Paragraph(content)
            | Self::Heading1(content)
            | Self::Heading2(content)
            | Self::Heading3(content)
            | Self::Quote(content) => Some(content.text.as_str()),
            Self::Todo(content) => Some(content.text.as_str()),
            _ => None,
        }
    }
}

/// One addressable, typed unit of document content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: BlockId,
    #[serde(flatten)]
    pub content: BlockContent,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds; refreshed on every mutation.
    pub updated_at: i64,
}

impl Block {
    /// Creates a block with a generated stable ID.
    pub fn new(content: BlockContent) -> Self {
        Self::with_id(Uuid::new_v4(), content)
    }

    /// Creates a block with a caller-provided ID.
    ///
    /// Used by import paths where identity already exists.
    pub fn with_id(id: BlockId, content: BlockContent) -> Self {
        let now = now_epoch_ms();
        Self {
            id,
            content,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn kind(&self) -> BlockKind {
        self.content.kind()
    }

    /// Refreshes `updated_at`; never moves it backwards.
    pub fn touch(&mut self) {
        self.updated_at = now_epoch_ms().max(self.updated_at);
    }

    /// Validates structural invariants of this block.
    ///
    /// # Errors
    /// - `NilId` when `id` is nil.
    /// - Table/list/kanban floor and shape violations.
    /// - `DuplicateElementId` when nested element IDs collide.
    pub fn validate(&self) -> Result<(), BlockValidationError> {
        if self.id.is_nil() {
            return Err(BlockValidationError::NilId);
        }

        match &self.content {
            BlockContent::BulletList(list) | BlockContent::NumberedList(list) => {
                if list.items.is_empty() {
                    return Err(BlockValidationError::EmptyList);
                }
                let mut seen = HashSet::new();
                collect_list_ids(&list.items, &mut seen)?;
            }
            BlockContent::Table(table) => {
                if table.headers.is_empty() {
                    return Err(BlockValidationError::TableWithoutColumns);
                }
                if table.rows.is_empty() {
                    return Err(BlockValidationError::TableWithoutRows);
                }
                let mut seen = HashSet::new();
                for row in &table.rows {
                    if row.cells.len() != table.headers.len() {
                        return Err(BlockValidationError::TableRowWidthMismatch {
                            row: row.id,
                            expected: table.headers.len(),
                            actual: row.cells.len(),
                        });
                    }
                    insert_unique(&mut seen, row.id)?;
                }
            }
            BlockContent::Kanban(board) => {
                if board.columns.is_empty() {
                    return Err(BlockValidationError::KanbanWithoutColumns);
                }
                let mut seen = HashSet::new();
                for column in &board.columns {
                    insert_unique(&mut seen, column.id)?;
                    for card in &column.cards {
                        insert_unique(&mut seen, card.id)?;
                    }
                }
            }
            _ => {}
        }

        Ok(())
    }
}

fn collect_list_ids(
    items: &[ListItem],
    seen: &mut HashSet<Uuid>,
) -> Result<(), BlockValidationError> {
    for item in items {
        insert_unique(seen, item.id)?;
        collect_list_ids(&item.children, seen)?;
    }
    Ok(())
}

fn insert_unique(seen: &mut HashSet<Uuid>, id: Uuid) -> Result<(), BlockValidationError> {
    if seen.insert(id) {
        Ok(())
    } else {
        Err(BlockValidationError::DuplicateElementId(id))
    }
}

/// Structural validation errors for blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockValidationError {
    NilId,
    EmptyList,
    TableWithoutColumns,
    TableWithoutRows,
    TableRowWidthMismatch {
        row: TableRowId,
        expected: usize,
        actual: usize,
    },
    KanbanWithoutColumns,
    DuplicateElementId(Uuid),
}

impl Display for BlockValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "block id must not be nil"),
            Self::EmptyList => write!(f, "list block must contain at least one item"),
            Self::TableWithoutColumns => write!(f, "table must have at least one column"),
            Self::TableWithoutRows => write!(f, "table must have at least one row"),
            Self::TableRowWidthMismatch {
                row,
                expected,
                actual,
            } => write!(
                f,
                "table row {row} has {actual} cells, expected {expected}"
            ),
            Self::KanbanWithoutColumns => write!(f, "kanban must have at least one column"),
            Self::DuplicateElementId(id) => write!(f, "duplicate nested element id: {id}"),
        }
    }
}

impl Error for BlockValidationError {}

/// Current wall clock in Unix epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
