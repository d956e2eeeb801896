//! Static command catalog for the slash menu.
//!
//! The catalog is data: adding an entry needs no store or serializer change.

use crate::model::block::BlockKind;

/// One insertable block command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteCommand {
    pub kind: BlockKind,
    pub label: &'static str,
    pub description: &'static str,
    /// Keyboard shortcut hint shown next to the label.
    pub shortcut: Option<&'static str>,
    pub keywords: &'static [&'static str],
}

impl PaletteCommand {
    /// Case-insensitive substring match on label, description or keywords.
    ///
    /// The filter is used verbatim: surrounding whitespace is part of the
    /// needle.
    pub fn matches(&self, filter: &str) -> bool {
        let needle = filter.to_lowercase();
        if needle.is_empty() {
            return true;
        }

        self.label.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
            || self
                .keywords
                .iter()
                .any(|keyword| keyword.to_lowercase().contains(&needle))
    }
}

pub const COMMANDS: [PaletteCommand; 14] = [
    PaletteCommand {
        kind: BlockKind::Paragraph,
        label: "Text",
        description: "Just start writing with plain text.",
        shortcut: None,
        keywords: &["paragraph", "plain", "p"],
    },
    PaletteCommand {
        kind: BlockKind::Heading1,
        label: "Heading 1",
        description: "Big section heading.",
        shortcut: Some("#"),
        keywords: &["h1", "title", "header"],
    },
    PaletteCommand {
        kind: BlockKind::Heading2,
        label: "Heading 2",
        description: "Medium section heading.",
        shortcut: Some("##"),
        keywords: &["h2", "subtitle", "header"],
    },
    PaletteCommand {
        kind: BlockKind::Heading3,
        label: "Heading 3",
        description: "Small section heading.",
        shortcut: Some("###"),
        keywords: &["h3", "header"],
    },
    PaletteCommand {
        kind: BlockKind::Todo,
        label: "To-do list",
        description: "Track tasks with a checkbox.",
        shortcut: Some("[]"),
        keywords: &["todo", "task", "checkbox", "check"],
    },
    PaletteCommand {
        kind: BlockKind::BulletList,
        label: "Bulleted list",
        description: "Create a simple bulleted list.",
        shortcut: Some("-"),
        keywords: &["bullet", "unordered", "ul"],
    },
    PaletteCommand {
        kind: BlockKind::NumberedList,
        label: "Numbered list",
        description: "Create a list with numbering.",
        shortcut: Some("1."),
        keywords: &["ordered", "number", "ol"],
    },
    PaletteCommand {
        kind: BlockKind::ToggleList,
        label: "Toggle list",
        description: "Toggles can hide and show content inside.",
        shortcut: Some(">"),
        keywords: &["collapse", "expand", "details"],
    },
    PaletteCommand {
        kind: BlockKind::Quote,
        label: "Quote",
        description: "Capture a quote.",
        shortcut: Some("\""),
        keywords: &["blockquote", "citation"],
    },
    PaletteCommand {
        kind: BlockKind::Callout,
        label: "Callout",
        description: "Make writing stand out.",
        shortcut: None,
        keywords: &["note", "info", "warning", "tip"],
    },
    PaletteCommand {
        kind: BlockKind::Code,
        label: "Code",
        description: "Capture a code snippet.",
        shortcut: Some("```"),
        keywords: &["snippet", "program", "syntax"],
    },
    PaletteCommand {
        kind: BlockKind::Divider,
        label: "Divider",
        description: "Visually divide blocks.",
        shortcut: Some("---"),
        keywords: &["separator", "line", "hr", "rule"],
    },
    PaletteCommand {
        kind: BlockKind::Table,
        label: "Table",
        description: "Add a simple table with rows and columns.",
        shortcut: None,
        keywords: &["grid", "spreadsheet", "columns"],
    },
    PaletteCommand {
        kind: BlockKind::Kanban,
        label: "Kanban board",
        description: "Organize cards into columns.",
        shortcut: None,
        keywords: &["board", "cards", "columns", "workflow"],
    },
];

/// Returns commands matching `filter` in catalog order.
pub fn filter_commands(filter: &str) -> Vec<&'static PaletteCommand> {
    COMMANDS
        .iter()
        .filter(|command| command.matches(filter))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{filter_commands, COMMANDS};
    use crate::model::block::BlockKind;
    use std::collections::HashSet;

    #[test]
    fn catalog_has_fourteen_distinct_kinds() {
        let kinds = COMMANDS
            .iter()
            .map(|command| command.kind)
            .collect::<HashSet<_>>();
        assert_eq!(kinds.len(), 14);
        assert!(!kinds.contains(&BlockKind::Image));
        assert!(!kinds.contains(&BlockKind::Link));
    }

    #[test]
    fn empty_filter_lists_everything_and_whitespace_is_literal() {
        assert_eq!(filter_commands("").len(), COMMANDS.len());
        assert!(filter_commands("   ").is_empty());
        assert!(filter_commands("heading 2")
            .iter()
            .any(|command| command.kind == BlockKind::Heading2));
    }

    #[test]
    fn filter_matches_label_description_and_keywords() {
        let by_label = filter_commands("HEADING");
        assert_eq!(by_label.len(), 3);

        let by_description = filter_commands("code snippet");
        assert_eq!(by_description.len(), 1);
        assert_eq!(by_description[0].kind, BlockKind::Code);

        let by_keyword = filter_commands("hr");
        assert!(by_keyword
            .iter()
            .any(|command| command.kind == BlockKind::Divider));
    }

    #[test]
    fn unmatched_filter_is_empty() {
        assert!(filter_commands("zzzz").is_empty());
    }
}
