use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::f64::consts::TAU;

use crate::config::EngineConfig;
use crate::model::{GraphState, Node, NodeId};

pub const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

// Angular jitter is a fraction of the radial one.
const THETA_JITTER_SCALE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point2) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Source of layout jitter. Samples are uniform in `[-1, 1]`.
///
/// This is the only non-deterministic input of the layout; tests pin it with
/// [`NoJitter`] or a seeded [`SeededJitter`].
pub trait JitterSource: Send + Sync {
    fn sample(&mut self) -> f64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl JitterSource for NoJitter {
    fn sample(&mut self) -> f64 {
        0.0
    }
}

#[derive(Debug, Clone)]
pub struct SeededJitter {
    rng: StdRng,
}

impl SeededJitter {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl JitterSource for SeededJitter {
    fn sample(&mut self) -> f64 {
        self.rng.gen_range(-1.0..=1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub scale: f64,
    /// Relative radial jitter (0.2 = ±20%).
    pub jitter: f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            scale: 1.0,
            jitter: 0.2,
        }
    }
}

impl LayoutParams {
    pub fn from_config(cfg: &EngineConfig) -> Self {
        Self {
            scale: cfg.scale,
            jitter: cfg.jitter,
        }
    }
}

/// Position of one node: explicit coordinates when the snapshot has both,
/// otherwise a point on the sunflower spiral.
pub fn position(
    id: NodeId,
    node: &Node,
    total: usize,
    params: &LayoutParams,
    jitter: &mut dyn JitterSource,
) -> Point2 {
    match node.explicit_position() {
        Some((x, y)) => Point2::new((x * params.scale) as f32, (y * params.scale) as f32),
        None => spiral_position(id, total, params, jitter),
    }
}

/// Phyllotaxis placement: radius grows with `sqrt(id)`, angle advances by
/// `2π/φ` per id. Depends only on `id` and `total` apart from jitter.
/// Negative ids mirror the radius of their absolute value.
pub fn spiral_position(
    id: NodeId,
    total: usize,
    params: &LayoutParams,
    jitter: &mut dyn JitterSource,
) -> Point2 {
    let i = id as f64;
    let n = total.max(1) as f64;

    let mut r = (i.abs() / n).sqrt() * n.sqrt() * 2.0;
    let mut theta = i * TAU / GOLDEN_RATIO;

    r *= 1.0 + jitter.sample().clamp(-1.0, 1.0) * params.jitter;
    theta += jitter.sample().clamp(-1.0, 1.0) * params.jitter * THETA_JITTER_SCALE;

    let k = r * params.scale;
    Point2::new((theta.cos() * k) as f32, (theta.sin() * k) as f32)
}

/// Positions for the displayed [`GraphState`], refreshed when its version changes.
///
/// Spiral points already jittered for a node are kept while the node count is
/// unchanged, so an unchanged graph does not shimmer from tick to tick.
pub struct LayoutCache {
    params: LayoutParams,
    jitter: Box<dyn JitterSource>,
    version: Option<u64>,
    total: usize,
    positions: HashMap<NodeId, Point2>,
    spiral: HashMap<NodeId, Point2>,
}

impl LayoutCache {
    pub fn new(params: LayoutParams, jitter: Box<dyn JitterSource>) -> Self {
        Self {
            params,
            jitter,
            version: None,
            total: 0,
            positions: HashMap::new(),
            spiral: HashMap::new(),
        }
    }

    pub fn from_config(cfg: &EngineConfig) -> Self {
        let jitter: Box<dyn JitterSource> = match cfg.jitter_seed {
            Some(seed) => Box::new(SeededJitter::new(seed)),
            None => Box::new(SeededJitter::from_entropy()),
        };
        Self::new(LayoutParams::from_config(cfg), jitter)
    }

    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    /// Returns true when positions were recomputed.
    pub fn sync(&mut self, state: &GraphState) -> bool {
        if self.version == Some(state.version) {
            return false;
        }

        let total = state.nodes.len();
        let previous = if total == self.total {
            std::mem::take(&mut self.spiral)
        } else {
            self.spiral.clear();
            HashMap::new()
        };

        self.positions.clear();
        for (id, node) in &state.nodes {
            let p = if node.explicit_position().is_some() {
                position(*id, node, total, &self.params, self.jitter.as_mut())
            } else {
                let p = match previous.get(id) {
                    Some(p) => *p,
                    None => spiral_position(*id, total, &self.params, self.jitter.as_mut()),
                };
                self.spiral.insert(*id, p);
                p
            };
            self.positions.insert(*id, p);
        }

        self.version = Some(state.version);
        self.total = total;
        true
    }

    pub fn get(&self, id: NodeId) -> Option<Point2> {
        self.positions.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
