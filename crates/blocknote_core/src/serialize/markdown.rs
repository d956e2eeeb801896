//! Markdown export.
//!
//! # Invariants
//! - Every block kind has a rendering; output is one-directional.
//! - Blocks rendering to an empty string are dropped.
//! - Rendered blocks are separated by one blank line.

use crate::model::block::{
    Block, BlockContent, CalloutContent, CodeContent, ImageContent, KanbanContent, LinkContent,
    ListItem, TableContent, ToggleContent,
};

const KANBAN_EMPTY_PLACEHOLDER: &str = "_No cards_";

/// Renders an ordered block sequence as Markdown.
pub fn to_markdown(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(render_block)
        .filter(|rendered| !rendered.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Renders a single block as Markdown.
pub fn render_block(block: &Block) -> String {
    match &block.content {
        BlockContent::Paragraph(content) => content.text.clone(),
        BlockContent::Heading1(content) => format!("# {}", content.text),
        BlockContent::Heading2(content) => format!("## {}", content.text),
        BlockContent::Heading3(content) => format!("### {}", content.text),
        BlockContent::Quote(content) => prefix_lines(&content.text, "> "),
        BlockContent::Todo(content) => {
            let marker = if content.checked { "- [x] " } else { "- [ ] " };
            format!("{marker}{}", content.text)
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
        BlockContent::ToggleList(toggle) => render_toggle(toggle),
        BlockContent::Callout(callout) => render_callout(callout),
        BlockContent::Code(code) => render_code(code),
        BlockContent::Divider => "---".to_string(),
        BlockContent::Table(table) => render_table(table),
        BlockContent::Kanban(board) => render_kanban(board),
        BlockContent::Image(image) => render_image(image),
        BlockContent::Link(link) => render_link(link),
    }
}

fn prefix_lines(text: &str, prefix: &str) -> String {
    text.split('\n')
        .map(|line| format!("{prefix}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_list_items(items: &[ListItem], depth: usize, numbered: bool, lines: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    for (index, item) in items.iter().enumerate() {
        if numbered {
            lines.push(format!("{indent}{}. {}", index + 1, item.text));
        } else {
            lines.push(format!("{indent}- {}", item.text));
        }
        render_list_items(&item.children, depth + 1, numbered, lines);
    }
}

fn render_toggle(toggle: &ToggleContent) -> String {
    format!(
        "<details>\n<summary>{}</summary>\n\n{}\n</details>",
        toggle.title, toggle.body
    )
}

fn render_callout(callout: &CalloutContent) -> String {
    let body = format!("{} {}", callout.icon.glyph(), callout.text);
    prefix_lines(&body, "> ")
}

fn render_code(code: &CodeContent) -> String {
    let fence = "`".repeat(longest_backtick_run(&code.code).max(2) + 1);
    format!("{fence}{}\n{}\n{fence}", code.language.trim(), code.code)
}

fn longest_backtick_run(text: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for ch in text.chars() {
        if ch == '`' {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

fn render_table(table: &TableContent) -> String {
    let mut lines = Vec::with_capacity(table.rows.len() + 2);
    lines.push(table_row(table.headers.iter().map(String::as_str)));
    lines.push(table_row(table.headers.iter().map(|_| "---")));
    for row in &table.rows {
        lines.push(table_row(row.cells.iter().map(String::as_str)));
    }
    lines.join("\n")
}

fn table_row<'a>(cells: impl Iterator<Item = &'a str>) -> String {
    let joined = cells
        .map(escape_table_cell)
        .collect::<Vec<_>>()
        .join(" | ");
    format!("| {joined} |")
}

fn escape_table_cell(cell: &str) -> String {
    cell.replace('|', "\\|").replace('\n', " ")
}

fn render_kanban(board: &KanbanContent) -> String {
    board
        .columns
        .iter()
        .map(|column| {
            let mut lines = vec![format!("### {}", column.title)];
            if column.cards.is_empty() {
                lines.push(KANBAN_EMPTY_PLACEHOLDER.to_string());
            } else {
                lines.extend(column.cards.iter().map(|card| format!("- {}", card.text)));
            }
            lines.join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_image(image: &ImageContent) -> String {
    let mut rendered = format!("![{}]({})", image.alt, image.url);
    if let Some(caption) = non_blank(image.caption.as_deref()) {
        rendered.push_str(&format!("\n*{caption}*"));
    }
    rendered
}

fn render_link(link: &LinkContent) -> String {
    let title = if link.title.trim().is_empty() {
        link.url.as_str()
    } else {
        link.title.as_str()
    };
    let mut rendered = format!("[{title}]({})", link.url);
    if let Some(description) = non_blank(link.description.as_deref()) {
        rendered.push('\n');
        rendered.push_str(description);
    }
    rendered
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::{longest_backtick_run, render_block, to_markdown};
    use crate::model::block::{Block, BlockContent, CodeContent, TextContent};

    #[test]
    fn quote_prefixes_every_line() {
        let block = Block::new(BlockContent::Quote(TextContent {
            text: "one\ntwo".to_string(),
        }));
        assert_eq!(render_block(&block), "> one\n> two");
    }

    #[test]
    fn code_fence_grows_past_embedded_fences() {
        assert_eq!(longest_backtick_run("a ``` b `"), 3);
        let block = Block::new(BlockContent::Code(CodeContent {
            code: "```".to_string(),
            language: "md".to_string(),
        }));
        assert_eq!(render_block(&block), "````md\n```\n````");
    }

    #[test]
    fn empty_paragraphs_are_dropped() {
        let blocks = vec![
            Block::new(BlockContent::Paragraph(TextContent::default())),
            Block::new(BlockContent::Paragraph(TextContent {
                text: "kept".to_string(),
            })),
        ];
        assert_eq!(to_markdown(&blocks), "kept");
    }
}
