use crate::error::{KeResult, KeyEvolveError};
use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A single typable symbol.
pub type Key = char;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Plane {
    Unshifted,
    Shifted,
}

/// Physical placement of a key: row index, column index within the row, and
/// which plane of that physical key carries the symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPos {
    pub row: usize,
    pub col: usize,
    pub plane: Plane,
}

/// One row of physical keys. Position `i` of both planes is the same key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub unshifted: Vec<Key>,
    pub shifted: Vec<Key>,
}

impl Row {
    pub fn new(unshifted: &str, shifted: &str) -> Self {
        Self {
            unshifted: unshifted.chars().collect(),
            shifted: shifted.chars().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.unshifted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.unshifted.is_empty()
    }
}

/// On-disk representation: each row is a pair of strings (unshifted, shifted).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutSpec {
    pub rows: Vec<(String, String)>,
    pub home_keys: String,
    #[serde(default)]
    pub shape: Option<Vec<usize>>,
}

/// A validated keyboard layout.
///
/// Construction checks every invariant up front (unique placement of each
/// symbol across both planes, aligned planes, shape consistency, home keys on
/// the unshifted plane) and builds the position index used by the distance
/// oracle. A `Layout` is never modified after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "LayoutSpec", into = "LayoutSpec")]
pub struct Layout {
    rows: Vec<Row>,
    shape: Vec<usize>,
    home_keys: Vec<Key>,
    index: FnvHashMap<Key, KeyPos>,
}

impl PartialEq for Layout {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows && self.shape == other.shape && self.home_keys == other.home_keys
    }
}

impl Eq for Layout {}

impl Layout {
    pub fn new(rows: Vec<Row>, home_keys: Vec<Key>) -> KeResult<Self> {
        let shape = rows.iter().map(Row::len).collect();
        Self::with_shape(rows, shape, home_keys)
    }

    pub fn with_shape(rows: Vec<Row>, shape: Vec<usize>, home_keys: Vec<Key>) -> KeResult<Self> {
        let index = build_index(&rows)?;

        let total: usize = rows.iter().map(Row::len).sum();
        let shape_total: usize = shape.iter().sum();
        if shape_total != total {
            return Err(KeyEvolveError::Validation(format!(
                "Shape {:?} sums to {} but the layout holds {} keys",
                shape, shape_total, total
            )));
        }
        if shape.len() != rows.len() || shape.iter().zip(&rows).any(|(&s, r)| s != r.len()) {
            return Err(KeyEvolveError::Validation(format!(
                "Shape {:?} does not match the row lengths of the layout",
                shape
            )));
        }

        for (i, &home) in home_keys.iter().enumerate() {
            match index.get(&home) {
                Some(pos) if pos.plane == Plane::Unshifted => {}
                Some(_) => {
                    return Err(KeyEvolveError::Validation(format!(
                        "Home key '{}' sits on the shifted plane",
                        home
                    )))
                }
                None => {
                    return Err(KeyEvolveError::Validation(format!(
                        "Home key '{}' is not on the layout",
                        home
                    )))
                }
            }
            if home_keys[..i].contains(&home) {
                return Err(KeyEvolveError::Validation(format!(
                    "Home key '{}' is assigned to more than one finger",
                    home
                )));
            }
        }

        Ok(Self {
            rows,
            shape,
            home_keys,
            index,
        })
    }

    /// Returns a copy of this layout resting on a different set of home keys.
    pub fn with_home_keys(&self, home_keys: Vec<Key>) -> KeResult<Self> {
        Self::with_shape(self.rows.clone(), self.shape.clone(), home_keys)
    }

    /// The reference QWERTY layout with `asdfjkl;` as home keys.
    pub fn standard() -> Self {
        crate::layouts::KnownLayout::Qwerty.layout()
    }

    /// Reads a layout from JSON: `{"rows": [[unshifted, shifted], ...], "home_keys": "..."}`
    /// with an optional `"shape"`.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> KeResult<Self> {
        let content = fs::read_to_string(path)?;
        let spec: LayoutSpec = serde_json::from_str(&content)?;
        Self::try_from(spec)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn home_keys(&self) -> &[Key] {
        &self.home_keys
    }

    /// Number of physical keys (each carries one symbol per plane).
    pub fn key_count(&self) -> usize {
        self.shape.iter().sum()
    }

    pub fn contains(&self, key: Key) -> bool {
        self.index.contains_key(&key)
    }

    pub fn position(&self, key: Key) -> Option<KeyPos> {
        self.index.get(&key).copied()
    }

    pub fn locate(&self, key: Key) -> KeResult<KeyPos> {
        self.position(key).ok_or(KeyEvolveError::KeyNotFound(key))
    }

    /// (row, column) of every home key, in finger order.
    pub fn home_coordinates(&self) -> KeResult<Vec<(usize, usize)>> {
        self.home_keys
            .iter()
            .map(|&k| self.locate(k).map(|p| (p.row, p.col)))
            .collect()
    }

    pub fn unshifted_keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.rows.iter().flat_map(|r| r.unshifted.iter().copied())
    }

    pub fn shifted_keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.rows.iter().flat_map(|r| r.shifted.iter().copied())
    }
}

fn build_index(rows: &[Row]) -> KeResult<FnvHashMap<Key, KeyPos>> {
    let mut index = FnvHashMap::default();

    for (r, row) in rows.iter().enumerate() {
        if row.unshifted.len() != row.shifted.len() {
            return Err(KeyEvolveError::Validation(format!(
                "Row {} has {} unshifted keys but {} shifted keys",
                r,
                row.unshifted.len(),
                row.shifted.len()
            )));
        }

        let planes = [
            (Plane::Unshifted, &row.unshifted),
            (Plane::Shifted, &row.shifted),
        ];
        for (plane, keys) in planes {
            for (c, &key) in keys.iter().enumerate() {
                let pos = KeyPos {
                    row: r,
                    col: c,
                    plane,
                };
                if let Some(prev) = index.insert(key, pos) {
                    return Err(KeyEvolveError::Validation(format!(
                        "Key '{}' is placed twice (row {} col {} and row {} col {})",
                        key, prev.row, prev.col, r, c
                    )));
                }
            }
        }
    }

    Ok(index)
}

impl TryFrom<LayoutSpec> for Layout {
    type Error = KeyEvolveError;

    fn try_from(spec: LayoutSpec) -> KeResult<Self> {
        let rows: Vec<Row> = spec.rows.iter().map(|(u, s)| Row::new(u, s)).collect();
        let home_keys = spec.home_keys.chars().collect();
        match spec.shape {
            Some(shape) => Self::with_shape(rows, shape, home_keys),
            None => Self::new(rows, home_keys),
        }
    }
}

impl From<Layout> for LayoutSpec {
    fn from(layout: Layout) -> Self {
        Self {
            rows: layout
                .rows
                .iter()
                .map(|r| (r.unshifted.iter().collect(), r.shifted.iter().collect()))
                .collect(),
            home_keys: layout.home_keys.iter().collect(),
            shape: Some(layout.shape),
        }
    }
}
