//! The slash-command menu: a searchable list of block types shown next to the
//! block it will re-type.

use crate::block::BlockKind;

pub const MENU_WIDTH: f32 = 240.0;
pub const MENU_HEIGHT: f32 = 280.0;
pub const EMPTY_MESSAGE: &str = "No matching blocks";

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Edges are inclusive.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.origin.x
            && point.x <= self.origin.x + self.width
            && point.y >= self.origin.y
            && point.y <= self.origin.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    pub kind: BlockKind,
    pub label: &'static str,
    pub icon: &'static str,
}

pub const MENU_ENTRIES: [MenuEntry; 5] = [
    MenuEntry {
        kind: BlockKind::Text,
        label: "Text",
        icon: "¶",
    },
    MenuEntry {
        kind: BlockKind::Heading,
        label: "Heading",
        icon: "H",
    },
    MenuEntry {
        kind: BlockKind::Todo,
        label: "To-do list",
        icon: "☐",
    },
    MenuEntry {
        kind: BlockKind::Table,
        label: "Table",
        icon: "▦",
    },
    MenuEntry {
        kind: BlockKind::Image,
        label: "Image",
        icon: "▣",
    },
];

#[derive(Debug, Clone, PartialEq)]
pub struct BlockMenu {
    target: usize,
    anchor: Point,
    query: String,
}

impl BlockMenu {
    pub fn new(target: usize, anchor: Point) -> Self {
        Self {
            target,
            anchor,
            query: String::new(),
        }
    }

    /// Position of the block the menu will re-type.
    pub fn target(&self) -> usize {
        self.target
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn bounds(&self) -> Rect {
        Rect {
            origin: self.anchor,
            width: MENU_WIDTH,
            height: MENU_HEIGHT,
        }
    }

    /// Entries whose label contains the query, ignoring case.
    pub fn entries(&self) -> Vec<MenuEntry> {
        let needle = self.query.to_lowercase();
        MENU_ENTRIES
            .into_iter()
            .filter(|entry| entry.label.to_lowercase().contains(&needle))
            .collect()
    }

    /// Message to show in place of the list when nothing matches.
    pub fn empty_message(&self) -> Option<&'static str> {
        self.entries().is_empty().then_some(EMPTY_MESSAGE)
    }
}
