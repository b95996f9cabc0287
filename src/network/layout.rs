// Force-directed (Fruchterman-Reingold) layout for the interaction graph.
//
// Every pair of nodes repels with force k²/d, every edge attracts with
// weight·d²/k, and each step's movement is capped by a temperature that
// cools linearly to zero. Heavy interactions therefore pull characters
// close together, which is what makes the rendered network readable.

use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::graph::InteractionGraph;

/// Distances and displacements below this are clamped, so coincident nodes
/// still push apart instead of dividing by zero.
const MIN_DISTANCE: f64 = 0.01;

/// A 2D position in layout space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Layout tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutParams {
    /// Optimal distance is `k_factor / sqrt(order)`
    pub k_factor: f64,
    pub iterations: usize,
    pub seed: u64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            k_factor: 24.0,
            iterations: 50,
            seed: 42,
        }
    }
}

/// Lay out every node, returning positions in node insertion order.
///
/// Positions are rescaled into the unit square `[0, 1]²` (a single node sits
/// in the middle). The layout is deterministic for a given seed.
pub fn spring_layout(graph: &InteractionGraph, params: &LayoutParams) -> Vec<Point> {
    let n = graph.order();
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![Point { x: 0.5, y: 0.5 }];
    }

    let mut rng = StdRng::seed_from_u64(params.seed);
    let mut pos: Vec<Point> = (0..n)
        .map(|_| Point {
            x: rng.random::<f64>(),
            y: rng.random::<f64>(),
        })
        .collect();

    // Dense weight matrix; the graph is at most a few hundred nodes
    let mut weights = vec![vec![0.0f64; n]; n];
    for (u, v, w) in graph.edges() {
        if let (Some(i), Some(j)) = (graph.index_of(u), graph.index_of(v)) {
            weights[i][j] = f64::from(w);
            weights[j][i] = f64::from(w);
        }
    }

    let k = params.k_factor / (n as f64).sqrt();
    let (min, max) = bounds(&pos);
    let mut temperature = (max.x - min.x).max(max.y - min.y) * 0.1;
    let cooling = temperature / (params.iterations as f64 + 1.0);

    let pb = ProgressBar::new(params.iterations as u64);
    pb.set_style(
        ProgressStyle::with_template("  Layout [{bar:30}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    for _ in 0..params.iterations {
        let mut displacement = vec![Point { x: 0.0, y: 0.0 }; n];
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let dx = pos[i].x - pos[j].x;
                let dy = pos[i].y - pos[j].y;
                let distance = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
                let force = k * k / (distance * distance) - weights[i][j] * distance / k;
                displacement[i].x += dx * force;
                displacement[i].y += dy * force;
            }
        }

        for (p, d) in pos.iter_mut().zip(&displacement) {
            let length = (d.x * d.x + d.y * d.y).sqrt().max(MIN_DISTANCE);
            p.x += d.x * temperature / length;
            p.y += d.y * temperature / length;
        }

        temperature -= cooling;
        pb.inc(1);
    }
    pb.finish_and_clear();

    normalize(&pos)
}

fn bounds(pos: &[Point]) -> (Point, Point) {
    let mut min = Point {
        x: f64::INFINITY,
        y: f64::INFINITY,
    };
    let mut max = Point {
        x: f64::NEG_INFINITY,
        y: f64::NEG_INFINITY,
    };
    for p in pos {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    (min, max)
}

/// Rescale positions into the unit square, preserving aspect ratio.
fn normalize(pos: &[Point]) -> Vec<Point> {
    let (min, max) = bounds(pos);
    let span = (max.x - min.x).max(max.y - min.y);
    if span <= f64::EPSILON {
        return vec![Point { x: 0.5, y: 0.5 }; pos.len()];
    }
    let off_x = (span - (max.x - min.x)) / 2.0;
    let off_y = (span - (max.y - min.y)) / 2.0;
    pos.iter()
        .map(|p| Point {
            x: (p.x - min.x + off_x) / span,
            y: (p.y - min.y + off_y) / span,
        })
        .collect()
}
