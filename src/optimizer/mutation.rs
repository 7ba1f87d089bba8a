use crate::error::{KeResult, KeyEvolveError};
use crate::keyboard::{Key, Layout, Row};
use fastrand::Rng;

pub const DEFAULT_SHAPE_RETRY_LIMIT: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MutationMode {
    /// Independent random permutation of every key.
    FullShuffle,
    /// `round(rate * key_count)` random pairwise swaps.
    Rate(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationOptions {
    pub mode: MutationMode,
    pub optimize_shift_plane: bool,
    pub optimize_shape: bool,
    pub shape_retry_limit: usize,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            mode: MutationMode::FullShuffle,
            optimize_shift_plane: false,
            optimize_shape: false,
            shape_retry_limit: DEFAULT_SHAPE_RETRY_LIMIT,
        }
    }
}

/// Builds a new layout from the keys of `base`.
///
/// Keys are permuted (or swapped, in mutation mode), optionally re-partitioned
/// into a fresh random shape, and the home keys are read back from
/// `home_coords` on the result. When the shape changes the old coordinates
/// are meaningless, so a fresh set of distinct home positions is drawn.
pub fn random_layout(
    rng: &mut Rng,
    base: &Layout,
    shape: &[usize],
    home_coords: &[(usize, usize)],
    opts: &GenerationOptions,
) -> KeResult<Layout> {
    let mut unshifted: Vec<Key> = base.unshifted_keys().collect();
    let mut shifted: Vec<Key> = base.shifted_keys().collect();
    let n = unshifted.len();

    match opts.mode {
        MutationMode::FullShuffle => {
            let mut order: Vec<usize> = (0..n).collect();
            rng.shuffle(&mut order);
            unshifted = order.iter().map(|&i| unshifted[i]).collect();
            if opts.optimize_shift_plane {
                rng.shuffle(&mut shifted);
            } else {
                // Each shifted symbol follows its unshifted partner.
                shifted = order.iter().map(|&i| shifted[i]).collect();
            }
        }
        MutationMode::Rate(rate) => {
            if !(0.0..=1.0).contains(&rate) {
                return Err(KeyEvolveError::Validation(format!(
                    "Mutation rate must be within [0, 1], got {}",
                    rate
                )));
            }
            let swaps = (rate * n as f64).round() as usize;
            if n >= 2 {
                for _ in 0..swaps {
                    let a = rng.usize(0..n);
                    let b = rng.usize(0..n);
                    unshifted.swap(a, b);
                    if opts.optimize_shift_plane {
                        let c = rng.usize(0..n);
                        let d = rng.usize(0..n);
                        shifted.swap(c, d);
                    } else {
                        shifted.swap(a, b);
                    }
                }
            }
        }
    }

    let new_shape = if opts.optimize_shape {
        random_shape(rng, n, opts.shape_retry_limit)?
    } else {
        let total: usize = shape.iter().sum();
        if total != n {
            return Err(KeyEvolveError::Validation(format!(
                "Shape {:?} sums to {} but the layout holds {} keys",
                shape, total, n
            )));
        }
        shape.to_vec()
    };

    let rows = partition(&unshifted, &shifted, &new_shape);

    let coords = if new_shape.as_slice() != shape {
        random_home_coordinates(rng, &new_shape, home_coords.len())?
    } else {
        home_coords.to_vec()
    };

    let home_keys = coords
        .iter()
        .map(|&(r, c)| {
            rows.get(r)
                .and_then(|row| row.unshifted.get(c))
                .copied()
                .ok_or_else(|| {
                    KeyEvolveError::Validation(format!(
                        "Home coordinate (row {}, col {}) is outside shape {:?}",
                        r, c, new_shape
                    ))
                })
        })
        .collect::<KeResult<Vec<Key>>>()?;

    Layout::with_shape(rows, new_shape, home_keys)
}

/// Mutated copy of `layout`; the input is left untouched.
pub fn mutate(
    rng: &mut Rng,
    layout: &Layout,
    mutation_rate: f64,
    mutate_shape: bool,
    mutate_shift_plane: bool,
) -> KeResult<Layout> {
    let opts = GenerationOptions {
        mode: MutationMode::Rate(mutation_rate),
        optimize_shift_plane: mutate_shift_plane,
        optimize_shape: mutate_shape,
        shape_retry_limit: DEFAULT_SHAPE_RETRY_LIMIT,
    };
    mutate_with(rng, layout, &opts)
}

pub fn mutate_with(rng: &mut Rng, layout: &Layout, opts: &GenerationOptions) -> KeResult<Layout> {
    let home_coords = layout.home_coordinates()?;
    random_layout(rng, layout, layout.shape(), &home_coords, opts)
}

/// Random positive row lengths summing to `total`, by rejection sampling.
pub fn random_shape(rng: &mut Rng, total: usize, retry_limit: usize) -> KeResult<Vec<usize>> {
    if total == 0 {
        return Err(KeyEvolveError::Generation(
            "Cannot shape a layout with no keys".to_string(),
        ));
    }

    for _ in 0..retry_limit {
        let rows = rng.usize(1..=total);
        let max_len = (2 * total / rows).max(1);
        let mut shape = Vec::with_capacity(rows);
        let mut sum = 0;
        for _ in 1..rows {
            let len = rng.usize(1..=max_len);
            shape.push(len);
            sum += len;
        }
        if sum < total {
            shape.push(total - sum);
            return Ok(shape);
        }
    }

    Err(KeyEvolveError::Generation(format!(
        "No valid shape for {} keys after {} attempts",
        total, retry_limit
    )))
}

fn random_home_coordinates(
    rng: &mut Rng,
    shape: &[usize],
    count: usize,
) -> KeResult<Vec<(usize, usize)>> {
    let mut slots: Vec<(usize, usize)> = shape
        .iter()
        .enumerate()
        .flat_map(|(r, &len)| (0..len).map(move |c| (r, c)))
        .collect();
    if count > slots.len() {
        return Err(KeyEvolveError::Generation(format!(
            "Cannot place {} home keys on {} keys",
            count,
            slots.len()
        )));
    }
    rng.shuffle(&mut slots);
    slots.truncate(count);
    Ok(slots)
}

fn partition(unshifted: &[Key], shifted: &[Key], shape: &[usize]) -> Vec<Row> {
    let mut rows = Vec::with_capacity(shape.len());
    let mut start = 0;
    for &len in shape {
        rows.push(Row {
            unshifted: unshifted[start..start + len].to_vec(),
            shifted: shifted[start..start + len].to_vec(),
        });
        start += len;
    }
    rows
}
