//! Random non-overlapping block placement.

use crate::experiment::config::ExperimentConfig;
use crate::experiment::error::ExperimentError;
use rand::Rng;

/// Generates `count` block center positions on the configured canvas.
///
/// Candidates are sampled uniformly within the margin-inset region and
/// accepted only if their Euclidean distance to every accepted position is
/// at least `min_dist`. Sampling is bounded: once `max_layout_attempts`
/// candidates have been rejected or accepted without reaching `count`, the
/// configuration is reported as infeasible instead of looping forever.
///
/// Precondition: the margins leave a non-empty sampling region on both
/// axes (`2 * margin <= canvas dimension`).
pub fn generate_positions(
    cfg: &ExperimentConfig,
    count: usize,
) -> Result<Vec<(i32, i32)>, ExperimentError> {
    let mut rng = rand::rng();
    let (width, height) = cfg.canvas_size;
    let mut positions: Vec<(i32, i32)> = Vec::with_capacity(count);

    for _ in 0..cfg.max_layout_attempts {
        if positions.len() == count {
            break;
        }

        let candidate = (
            rng.random_range(cfg.margin..=width - cfg.margin),
            rng.random_range(cfg.margin..=height - cfg.margin),
        );

        if positions
            .iter()
            .all(|&p| center_distance(candidate, p) >= cfg.min_dist)
        {
            positions.push(candidate);
        }
    }

    if positions.len() < count {
        return Err(ExperimentError::LayoutInfeasible {
            requested: count,
            placed: positions.len(),
            attempts: cfg.max_layout_attempts,
        });
    }

    Ok(positions)
}

/// Euclidean distance between two block centers.
#[must_use]
pub fn center_distance(a: (i32, i32), b: (i32, i32)) -> f64 {
    let dx = f64::from(a.0 - b.0);
    let dy = f64::from(a.1 - b.1);
    dx.hypot(dy)
}
