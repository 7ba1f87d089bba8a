#![allow(dead_code)]

use keyevolve::config::PhysicsParams;
use keyevolve::keyboard::{Key, Layout, Row};

/// Builder for small hand-made layouts.
pub struct LayoutBuilder {
    rows: Vec<Row>,
    home: Vec<Key>,
}

impl LayoutBuilder {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            home: Vec::new(),
        }
    }

    pub fn row(mut self, unshifted: &str, shifted: &str) -> Self {
        self.rows.push(Row::new(unshifted, shifted));
        self
    }

    pub fn home(mut self, keys: &str) -> Self {
        self.home = keys.chars().collect();
        self
    }

    pub fn build(self) -> Layout {
        Layout::new(self.rows, self.home).expect("test layout must be valid")
    }
}

/// QWERTY without `z`/`Z` on the bottom row.
pub fn qwerty_without_z() -> Layout {
    LayoutBuilder::new()
        .row("`1234567890-=", "~!@#$%^&*()_+")
        .row("qwertyuiop[]\\", "QWERTYUIOP{}|")
        .row("asdfghjkl;'", "ASDFGHJKL:\"")
        .row("xcvbnm,./", "XCVBNM<>?")
        .home("asdfjkl;")
        .build()
}

pub fn params() -> PhysicsParams {
    PhysicsParams::default()
}

pub fn sorted(keys: impl Iterator<Item = Key>) -> Vec<Key> {
    let mut v: Vec<Key> = keys.collect();
    v.sort_unstable();
    v
}

pub const PANGRAM: &str = "The quick brown fox jumps over the lazy dog; 1234567890 times!";
