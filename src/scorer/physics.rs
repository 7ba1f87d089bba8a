use crate::config::PhysicsParams;
use crate::error::KeResult;
use crate::keyboard::{Key, Layout};
use fnv::FnvHashMap;

/// Unordered pair of keys; `KeyPair::new(a, b) == KeyPair::new(b, a)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPair(Key, Key);

impl KeyPair {
    pub fn new(a: Key, b: Key) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }
}

pub type DistanceCache = FnvHashMap<KeyPair, f64>;

/// Staggered (x, y) coordinate of a key. Row 0 is not shifted; every lower
/// row moves right by `row_offset` plus `stagger_offset` per extra row.
pub fn get_key_coords(layout: &Layout, key: Key, params: &PhysicsParams) -> KeResult<(f64, f64)> {
    let pos = layout.locate(key)?;
    let mut x = pos.col as f64;
    let y = pos.row as f64;
    if pos.row > 0 {
        x += params.row_offset + (pos.row - 1) as f64 * params.stagger_offset;
    }
    Ok((x, y))
}

/// Uncached distance between two keys of `layout`.
pub fn get_key_dist(layout: &Layout, a: Key, b: Key, params: &PhysicsParams) -> KeResult<f64> {
    if a == b {
        return Ok(0.0);
    }
    let (x1, y1) = get_key_coords(layout, a, params)?;
    let (x2, y2) = get_key_coords(layout, b, params)?;
    let dx = x2 - x1;
    let dy = y2 - y1;
    Ok(params.round((dx * dx + dy * dy).sqrt()))
}

/// Memoizing distance lookup bound to a single layout.
///
/// The cache borrows the layout it was built for, so entries can never leak
/// into the evaluation of a different arrangement.
pub struct DistanceOracle<'a> {
    layout: &'a Layout,
    params: &'a PhysicsParams,
    cache: DistanceCache,
}

impl<'a> DistanceOracle<'a> {
    pub fn new(layout: &'a Layout, params: &'a PhysicsParams) -> Self {
        Self {
            layout,
            params,
            cache: DistanceCache::default(),
        }
    }

    pub fn distance(&mut self, a: Key, b: Key) -> KeResult<f64> {
        if a == b {
            return Ok(0.0);
        }
        let pair = KeyPair::new(a, b);
        if let Some(&d) = self.cache.get(&pair) {
            return Ok(d);
        }
        let d = get_key_dist(self.layout, a, b, self.params)?;
        self.cache.insert(pair, d);
        Ok(d)
    }

    pub fn cached_pairs(&self) -> usize {
        self.cache.len()
    }
}
