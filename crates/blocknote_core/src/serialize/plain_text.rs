//! Plain-text export.
//!
//! # Invariants
//! - Covers every block kind; markup-free except for list/todo glyphs.
//! - Tables and kanban boards render as fixed-width aligned text where each
//!   column is as wide as its widest cell, header included.

use crate::model::block::{Block, BlockContent, KanbanContent, ListItem, TableContent};
use crate::serialize::markdown::non_blank;

const CHECKED_GLYPH: &str = "✓";
const UNCHECKED_GLYPH: &str = "○";
const BULLET_GLYPH: &str = "•";
const OPEN_TOGGLE_GLYPH: &str = "▾";
const CLOSED_TOGGLE_GLYPH: &str = "▸";
const DIVIDER_WIDTH: usize = 40;

/// Renders an ordered block sequence as plain text.
pub fn to_plain_text(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(render_block)
        .filter(|rendered| !rendered.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Renders a single block as plain text.
pub fn render_block(block: &Block) -> String {
    match &block.content {
        BlockContent::Paragraph(content)
        | BlockContent::Heading1(content)
        | BlockContent::Heading2(content)
        | BlockContent::Heading3(content)
        | BlockContent::Quote(content) => content.text.clone(),
        BlockContent::Todo(content) => {
            let glyph = if content.checked {
                CHECKED_GLYPH
            } else {
                UNCHECKED_GLYPH
            };
            format!("{glyph} {}", content.text)
        }
        BlockContent::BulletList(list) => {
            let mut lines = Vec::new();
            render_list_items(&list.items, 0, false, &mut lines);
            lines.join("\n")
        }
        BlockContent::NumberedList(list) => {
            let mut lines = Vec::new();
            render_list_items(&list.items, 0, true, &mut lines);
            lines.join("\n")
        }
        BlockContent::ToggleList(toggle) => {
            let glyph = if toggle.is_open {
                OPEN_TOGGLE_GLYPH
            } else {
                CLOSED_TOGGLE_GLYPH
            };
            let mut lines = vec![format!("{glyph} {}", toggle.title)];
            if !toggle.body.is_empty() {
                lines.extend(toggle.body.split('\n').map(|line| format!("  {line}")));
            }
            lines.join("\n")
        }
        BlockContent::Callout(callout) => format!("{} {}", callout.icon.glyph(), callout.text),
        BlockContent::Code(code) => code.code.clone(),
        BlockContent::Divider => "─".repeat(DIVIDER_WIDTH),
        BlockContent::Table(table) => render_table(table),
        BlockContent::Kanban(board) => render_kanban(board),
        BlockContent::Image(image) => {
            let mut rendered = format!("[Image: {}] {}", image.alt, image.url);
            if let Some(caption) = non_blank(image.caption.as_deref()) {
                rendered.push('\n');
                rendered.push_str(caption);
            }
            rendered
        }
        BlockContent::Link(link) => {
            let mut rendered = if link.title.trim().is_empty() {
                link.url.clone()
            } else {
                format!("{} ({})", link.title, link.url)
            };
            if let Some(description) = non_blank(link.description.as_deref()) {
                rendered.push('\n');
                rendered.push_str(description);
            }
            rendered
        }
    }
}

fn render_list_items(items: &[ListItem], depth: usize, numbered: bool, lines: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    for (index, item) in items.iter().enumerate() {
        if numbered {
            lines.push(format!("{indent}{}. {}", index + 1, item.text));
        } else {
            lines.push(format!("{indent}{BULLET_GLYPH} {}", item.text));
        }
        render_list_items(&item.children, depth + 1, numbered, lines);
    }
}

fn render_table(table: &TableContent) -> String {
    let rows = table
        .rows
        .iter()
        .map(|row| row.cells.clone())
        .collect::<Vec<_>>();
    render_grid(&table.headers, &rows)
}

fn render_kanban(board: &KanbanContent) -> String {
    let headers = board
        .columns
        .iter()
        .map(|column| column.title.clone())
        .collect::<Vec<_>>();
    let depth = board
        .columns
        .iter()
        .map(|column| column.cards.len())
        .max()
        .unwrap_or(0);
    let rows = (0..depth)
        .map(|index| {
            board
                .columns
                .iter()
                .map(|column| {
                    column
                        .cards
                        .get(index)
                        .map(|card| card.text.clone())
                        .unwrap_or_default()
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    render_grid(&headers, &rows)
}

/// Aligns a header row and data rows into fixed-width columns.
///
/// Missing cells in short rows render as blanks.
fn render_grid(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths = headers.iter().map(|cell| cell_width(cell)).collect::<Vec<_>>();
    for row in rows {
        for (index, cell) in row.iter().enumerate().take(widths.len()) {
            widths[index] = widths[index].max(cell_width(cell));
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(grid_line(headers, &widths));
    lines.push(
        widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in rows {
        lines.push(grid_line(row, &widths));
    }

    lines
        .into_iter()
        .map(|line| line.trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

fn grid_line(cells: &[String], widths: &[usize]) -> String {
    widths
        .iter()
        .enumerate()
        .map(|(index, width)| {
            let cell = cells
                .get(index)
                .map(|cell| cell.replace('\n', " "))
                .unwrap_or_default();
            let padding = width.saturating_sub(cell_width(&cell));
            format!("{cell}{}", " ".repeat(padding))
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

fn cell_width(cell: &str) -> usize {
    cell.chars().filter(|ch| *ch != '\n').count()
}
