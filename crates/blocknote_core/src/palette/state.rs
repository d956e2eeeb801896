//! Command palette session state.

use crate::palette::catalog::{filter_commands, PaletteCommand};

/// Screen anchor (caret position) where the palette is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnchorPosition {
    pub x: f64,
    pub y: f64,
}

impl AnchorPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Screen rectangle occupied by the open palette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PaletteRegion {
    /// Returns whether `point` falls inside the region (edges inclusive).
    pub fn contains(&self, point: AnchorPosition) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// State of an open palette.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenPalette {
    pub anchor: AnchorPosition,
    pub filter: String,
    /// Index into the visible (filtered) command list.
    pub cursor: usize,
}

impl OpenPalette {
    pub fn new(anchor: AnchorPosition) -> Self {
        Self {
            anchor,
            filter: String::new(),
            cursor: 0,
        }
    }

    /// Commands matching the current filter, catalog order.
    pub fn visible_commands(&self) -> Vec<&'static PaletteCommand> {
        filter_commands(&self.filter)
    }
}

/// Two-state palette machine: `Closed` or `Open`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PaletteState {
    #[default]
    Closed,
    Open(OpenPalette),
}

impl PaletteState {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    pub fn as_open(&self) -> Option<&OpenPalette> {
        match self {
            Self::Open(open) => Some(open),
            Self::Closed => None,
        }
    }

    pub fn filter(&self) -> Option<&str> {
        self.as_open().map(|open| open.filter.as_str())
    }

    pub fn cursor(&self) -> Option<usize> {
        self.as_open().map(|open| open.cursor)
    }

    pub fn anchor(&self) -> Option<AnchorPosition> {
        self.as_open().map(|open| open.anchor)
    }

    /// Visible commands; empty while closed.
    pub fn visible_commands(&self) -> Vec<&'static PaletteCommand> {
        self.as_open()
            .map(OpenPalette::visible_commands)
            .unwrap_or_default()
    }
}
