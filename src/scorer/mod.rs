pub mod physics;
pub mod types;

pub use self::physics::{DistanceOracle, KeyPair};
pub use self::types::{Evaluation, FingerState};
use crate::config::PhysicsParams;
use crate::error::KeResult;
use crate::keyboard::{Key, Layout};
use tracing::trace;

#[inline(always)]
fn is_skipped_whitespace(c: char) -> bool {
    c.is_whitespace()
}

/// Total finger travel needed to type `text` on `layout`.
///
/// Fingers start on `home_keys`. Each typable character is struck by the
/// finger currently resting closest to it, which then stays on that key.
/// Whitespace and symbols absent from the layout cost nothing. Home keys are
/// only looked up once a finger has to move, so text that never needs them
/// scores 0 whatever they are.
pub fn evaluate(layout: &Layout, text: &str, home_keys: &[Key], params: &PhysicsParams) -> KeResult<f64> {
    evaluate_detailed(layout, text, home_keys, params).map(|e| e.cost)
}

pub fn evaluate_detailed(
    layout: &Layout,
    text: &str,
    home_keys: &[Key],
    params: &PhysicsParams,
) -> KeResult<Evaluation> {
    let mut oracle = DistanceOracle::new(layout, params);
    let mut fingers = FingerState::new(home_keys);
    let mut result = Evaluation {
        finger_travel: vec![0.0; fingers.len()],
        ..Default::default()
    };
    let mut total = 0.0;

    if text.is_empty() || layout.key_count() == 0 {
        result.skipped = text.chars().count();
        return Ok(result);
    }

    for c in text.chars() {
        if is_skipped_whitespace(c) || !layout.contains(c) || fingers.is_empty() {
            result.skipped += 1;
            continue;
        }

        let mut best_finger = 0;
        let mut best_dist = f64::INFINITY;
        for (i, &resting) in fingers.resting().iter().enumerate() {
            let d = oracle.distance(resting, c)?;
            if d < best_dist {
                best_dist = d;
                best_finger = i;
            }
        }

        trace!(
            "'{}' finger is now on '{}' (distance {})",
            fingers.resting()[best_finger],
            c,
            best_dist
        );
        fingers.move_finger(best_finger, c);
        result.finger_travel[best_finger] += best_dist;
        result.typed += 1;
        total += best_dist;
    }

    result.cost = params.round(total);
    Ok(result)
}
