//! Stop-order optimizer: nearest-neighbor construction + 2-opt refinement.
//!
//! The first stop is where the vehicle already is, so it never moves. The
//! path is open: there is no return leg to the start.

use serde::Deserialize;
use tracing::debug;

use crate::haversine::Haversine;
use crate::traits::{DistanceMatrixProvider, DistanceMetric, Waypoint};

/// A 2-opt move must shorten the tour by more than this to count.
const IMPROVEMENT_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OptimizeOptions {
    /// Maximum number of 2-opt passes.
    pub max_passes: usize,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self { max_passes: 250 }
    }
}

/// Before/after comparison of a proposed reordering.
#[derive(Debug, Clone)]
pub struct OptimizationPreview<S> {
    pub optimized: Vec<S>,
    pub original_m: f64,
    pub optimized_m: f64,
    pub improvement_pct: f64,
}

impl<S: Waypoint + Clone> OptimizationPreview<S> {
    /// `None` below 3 stops, where there is nothing to reorder.
    pub fn compute(stops: &[S]) -> Option<Self> {
        if stops.len() < 3 {
            return None;
        }

        let original_m = tour_cost(stops);
        let optimized = optimize(stops);
        let optimized_m = tour_cost(&optimized);
        let improvement_pct = if original_m > 0.0 {
            (original_m - optimized_m) / original_m * 100.0
        } else {
            0.0
        };

        Some(Self {
            optimized,
            original_m,
            optimized_m,
            improvement_pct,
        })
    }
}

/// Reorder `stops` to shorten the chained great-circle distance.
pub fn optimize<S: Waypoint + Clone>(stops: &[S]) -> Vec<S> {
    optimize_with(stops, &Haversine, &OptimizeOptions::default())
}

/// Reorder `stops` using pairwise costs from `matrix_provider`.
///
/// Any [`DistanceMetric`] works as a provider.
pub fn optimize_with<S, P>(
    stops: &[S],
    matrix_provider: &P,
    options: &OptimizeOptions,
) -> Vec<S>
where
    S: Waypoint + Clone,
    P: DistanceMatrixProvider,
{
    if stops.len() < 3 {
        return stops.to_vec();
    }

    let locations: Vec<_> = stops.iter().map(|stop| stop.coordinate()).collect();
    let matrix = matrix_provider.matrix_for(&locations);

    let identity: Vec<usize> = (0..stops.len()).collect();
    let original_cost = order_cost(&identity, &matrix);

    let mut order = nearest_neighbor(&matrix);
    let constructed_cost = order_cost(&order, &matrix);
    let passes = two_opt(&mut order, &matrix, options.max_passes);
    let refined_cost = order_cost(&order, &matrix);

    debug!(
        stops = stops.len(),
        start = ?stops[0].id(),
        original_cost,
        constructed_cost,
        refined_cost,
        passes,
        "optimized stop order"
    );

    if refined_cost > original_cost {
        debug!("heuristic order is longer than input, keeping input order");
        return stops.to_vec();
    }

    let optimized: Vec<S> = order.into_iter().map(|i| stops[i].clone()).collect();
    debug!(
        order = ?optimized.iter().map(|stop| stop.id()).collect::<Vec<_>>(),
        "final stop order"
    );
    optimized
}

/// Sum of great-circle distances between consecutive stops, in meters.
pub fn tour_cost<S: Waypoint>(stops: &[S]) -> f64 {
    tour_cost_with(stops, &Haversine)
}

pub fn tour_cost_with<S: Waypoint, M: DistanceMetric>(stops: &[S], metric: &M) -> f64 {
    stops
        .windows(2)
        .map(|pair| metric.distance(pair[0].coordinate(), pair[1].coordinate()))
        .sum()
}

fn order_cost(order: &[usize], matrix: &[Vec<f64>]) -> f64 {
    order.windows(2).map(|pair| matrix[pair[0]][pair[1]]).sum()
}

// ============================================================================
// Construction
// ============================================================================

/// Greedy tour from index 0. Ties go to the earliest remaining index.
fn nearest_neighbor(matrix: &[Vec<f64>]) -> Vec<usize> {
    let n = matrix.len();
    let mut remaining: Vec<usize> = (1..n).collect();
    let mut order = Vec::with_capacity(n);
    order.push(0);

    while !remaining.is_empty() {
        let last = order[order.len() - 1];
        let mut best_pos = 0;
        let mut best_dist = f64::INFINITY;

        for (pos, &candidate) in remaining.iter().enumerate() {
            let d = matrix[last][candidate];
            if d < best_dist {
                best_dist = d;
                best_pos = pos;
            }
        }

        order.push(remaining.remove(best_pos));
    }

    order
}

// ============================================================================
// Refinement
// ============================================================================

/// Change in open-path cost from reversing `order[i..=k]`.
///
/// Requires `i >= 1`. The edge after `k` only exists when `k` is not the last
/// position.
fn reversal_delta(order: &[usize], matrix: &[Vec<f64>], i: usize, k: usize) -> f64 {
    let before = order[i - 1];
    let first = order[i];
    let last = order[k];

    let mut delta = matrix[before][last] - matrix[before][first];
    if let Some(&after) = order.get(k + 1) {
        delta += matrix[first][after] - matrix[last][after];
    }
    delta
}

/// Best-improvement 2-opt holding position 0 fixed. Returns the number of
/// passes that applied a move.
fn two_opt(order: &mut [usize], matrix: &[Vec<f64>], max_passes: usize) -> usize {
    let n = order.len();
    if n < 3 {
        return 0;
    }

    let mut applied = 0;
    for _ in 0..max_passes {
        let mut best: Option<(usize, usize)> = None;
        let mut best_delta = -IMPROVEMENT_EPSILON;

        for i in 1..n - 1 {
            for k in i + 1..n {
                let delta = reversal_delta(order, matrix, i, k);
                if delta < best_delta {
                    best_delta = delta;
                    best = Some((i, k));
                }
            }
        }

        let Some((i, k)) = best else {
            break;
        };
        order[i..=k].reverse();
        applied += 1;
    }

    applied
}
