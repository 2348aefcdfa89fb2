//! Node placement.
//!
//! Positions live in layout space, a box of `[-scale, scale]` on both axes
//! with y pointing up. The renderer maps that box onto the canvas.

use crate::options::{LayoutKind, RenderOptions};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;
use tracing::debug;

/// Force-directed passes over the whole graph
pub const SPRING_ITERATIONS: usize = 50;

// Below this the repulsion term blows up
const MIN_DISTANCE: f64 = 0.01;

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    positions: Vec<(f64, f64)>,
    scale: f64,
}

impl Layout {
    pub fn compute<N, E>(graph: &DiGraph<N, E>, options: &RenderOptions) -> Self {
        match options.layout {
            LayoutKind::Spring => Self::spring(graph, options.scale, options.seed),
            LayoutKind::Circular => Self::circular(graph.node_count(), options.scale),
        }
    }

    /// Fruchterman-Reingold placement. Edge direction is ignored for the
    /// attraction term.
    pub fn spring<N, E>(graph: &DiGraph<N, E>, scale: f64, seed: Option<u64>) -> Self {
        let n = graph.node_count();
        if n <= 1 {
            return Self {
                positions: vec![(0.0, 0.0); n],
                scale,
            };
        }

        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut adjacent = vec![false; n * n];
        for edge in graph.edge_references() {
            let (a, b) = (edge.source().index(), edge.target().index());
            adjacent[a * n + b] = true;
            adjacent[b * n + a] = true;
        }

        let mut pos: Vec<[f64; 2]> = (0..n)
            .map(|_| [rng.random::<f64>(), rng.random::<f64>()])
            .collect();

        let k = (1.0 / n as f64).sqrt();
        let mut temperature = extent(&pos) * 0.1;
        let cooling = temperature / (SPRING_ITERATIONS as f64 + 1.0);

        for _ in 0..SPRING_ITERATIONS {
            let mut displacement = vec![[0.0f64; 2]; n];
            for i in 0..n {
                for j in 0..n {
                    if i == j {
                        continue;
                    }
                    let dx = pos[i][0] - pos[j][0];
                    let dy = pos[i][1] - pos[j][1];
                    let distance = dx.hypot(dy).max(MIN_DISTANCE);
                    let attraction = if adjacent[i * n + j] {
                        distance / k
                    } else {
                        0.0
                    };
                    let force = k * k / (distance * distance) - attraction;
                    displacement[i][0] += dx * force;
                    displacement[i][1] += dy * force;
                }
            }

            for (p, d) in pos.iter_mut().zip(&displacement) {
                let length = d[0].hypot(d[1]).max(MIN_DISTANCE);
                p[0] += d[0] * temperature / length;
                p[1] += d[1] * temperature / length;
            }
            temperature -= cooling;
        }

        rescale(&mut pos, scale);
        debug!("Spring layout placed {} nodes", n);

        Self {
            positions: pos.into_iter().map(|[x, y]| (x, y)).collect(),
            scale,
        }
    }

    /// Evenly spaced on a circle of radius `scale`, starting at 3 o'clock
    pub fn circular(node_count: usize, scale: f64) -> Self {
        let positions = if node_count == 1 {
            vec![(0.0, 0.0)]
        } else {
            (0..node_count)
                .map(|i| {
                    let angle = TAU * i as f64 / node_count as f64;
                    (scale * angle.cos(), scale * angle.sin())
                })
                .collect()
        };
        Self { positions, scale }
    }

    pub fn position(&self, node: NodeIndex) -> Option<(f64, f64)> {
        self.positions.get(node.index()).copied()
    }

    pub fn positions(&self) -> &[(f64, f64)] {
        &self.positions
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

fn extent(pos: &[[f64; 2]]) -> f64 {
    (0..2)
        .map(|axis| {
            let (lo, hi) = pos.iter().fold((f64::MAX, f64::MIN), |(lo, hi), p| {
                (lo.min(p[axis]), hi.max(p[axis]))
            });
            hi - lo
        })
        .fold(0.0, f64::max)
}

// Center on the origin and stretch so the largest coordinate is `scale`
fn rescale(pos: &mut [[f64; 2]], scale: f64) {
    let n = pos.len() as f64;
    for axis in 0..2 {
        let mean = pos.iter().map(|p| p[axis]).sum::<f64>() / n;
        for p in pos.iter_mut() {
            p[axis] -= mean;
        }
    }
    let limit = pos
        .iter()
        .flat_map(|p| [p[0].abs(), p[1].abs()])
        .fold(0.0, f64::max);
    if limit > 0.0 {
        for p in pos.iter_mut() {
            p[0] *= scale / limit;
            p[1] *= scale / limit;
        }
    }
}
