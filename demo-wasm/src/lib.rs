use verlet2d::{
    BoundaryPolicy, Chain, ChainConfig, Cloth, GridConfig, NoOpStepObserver, NodeDesc, NodeUpdate,
    PointerRepulsion, StepOptions, Vec2, World, WorldConfig,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wasm_bindgen::prelude::*;

/// Returns flat [x0, y0, x1, y1, ...]
fn flatten(positions: &[Vec2<f32>]) -> Vec<f32> {
    let mut out = Vec::with_capacity(positions.len() * 2);
    for p in positions {
        out.push(p.x);
        out.push(p.y);
    }
    out
}

// ---- Ball Pit Demo ----

#[wasm_bindgen]
pub struct BallPitDemo {
    world: World<f32>,
    pointer: PointerRepulsion<f32>,
    options: StepOptions,
    center: Vec2<f32>,
    arena_radius: f32,
}

#[wasm_bindgen]
impl BallPitDemo {
    /// A round arena filled with balls of three sizes. `seed` drives the
    /// initial scatter only.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, arena_radius: f32, seed: u32) -> Self {
        let center = Vec2::new(width * 0.5, height * 0.5);
        let config = WorldConfig::new()
            .with_gravity(Vec2::new(0.0, 3600.0))
            .with_seed(seed as u64);
        let mut world = World::new(config, BoundaryPolicy::radial(center, arena_radius));

        let mut rng = StdRng::seed_from_u64(seed as u64);
        for (count, radius) in [(5, 60.0f32), (70, 40.0), (20, 20.0)] {
            for _ in 0..count {
                let x = center.x + rng.gen_range(-20.0..=20.0);
                let y = center.y + rng.gen_range(-20.0..=20.0);
                world.create_node(NodeDesc::new(x, y).with_radius(radius));
            }
        }

        BallPitDemo {
            world,
            pointer: PointerRepulsion::new(200.0),
            options: StepOptions::new(),
            center,
            arena_radius,
        }
    }

    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer.set_pointer(x, y);
    }

    pub fn clear_pointer(&mut self) {
        self.pointer.clear_pointer();
    }

    pub fn update(&mut self) {
        self.world.step(&self.options, &mut self.pointer, &mut NoOpStepObserver);
    }

    /// Returns [cx, cy, radius] of the arena.
    pub fn arena(&self) -> Vec<f32> {
        vec![self.center.x, self.center.y, self.arena_radius]
    }

    /// Returns flat [x0, y0, r0, x1, y1, r1, ...]
    pub fn circles(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.world.node_count() * 3);
        for n in self.world.nodes() {
            out.push(n.pos.x);
            out.push(n.pos.y);
            out.push(n.radius);
        }
        out
    }

    pub fn node_count(&self) -> usize {
        self.world.node_count()
    }
}

// ---- Rope Demo ----

#[wasm_bindgen]
pub struct RopeDemo {
    world: World<f32>,
    chain: Chain,
    options: StepOptions,
}

#[wasm_bindgen]
impl RopeDemo {
    #[wasm_bindgen(constructor)]
    pub fn new(segments: usize) -> Result<RopeDemo, JsError> {
        let config = WorldConfig::new()
            .with_gravity(Vec2::new(0.0, 200.0))
            .without_collisions();
        let mut world = World::new(config, BoundaryPolicy::rectangular(600.0, 500.0));
        let chain_config = ChainConfig { rope: true, ..ChainConfig::default() };
        let chain = Chain::new(
            &mut world,
            Vec2::new(100.0f32, 50.0),
            Vec2::new(500.0, 50.0),
            segments,
            &chain_config,
        )?;
        world.configure_node(chain.first(), NodeUpdate::new().with_pinned(true))?;
        Ok(RopeDemo {
            world,
            chain,
            options: StepOptions::new().with_constraint_iterations(8),
        })
    }

    pub fn update(&mut self) {
        self.world.update(&self.options);
    }

    pub fn move_pin(&mut self, x: f32, y: f32) -> Result<(), JsError> {
        self.world.drag_node(self.chain.first(), x, y)?;
        Ok(())
    }

    /// Returns flat [x0, y0, x1, y1, ...] positions
    pub fn positions(&self) -> Vec<f32> {
        flatten(&self.chain.positions(&self.world))
    }

    pub fn node_count(&self) -> usize {
        self.chain.len()
    }
}

// ---- Cloth Demo ----

#[wasm_bindgen]
pub struct ClothDemo {
    world: World<f32>,
    cloth: Cloth,
    options: StepOptions,
}

#[wasm_bindgen]
impl ClothDemo {
    #[wasm_bindgen(constructor)]
    pub fn new(cols: usize, rows: usize, spacing: f32) -> Result<ClothDemo, JsError> {
        let grid_config = GridConfig {
            cols,
            rows,
            spacing,
            radius: 2.0,
            structural_stiffness: 1.0,
            shear_stiffness: 0.5,
            bend_stiffness: 0.3,
        };
        let config = WorldConfig::new()
            .with_gravity(Vec2::new(0.0, 180.0))
            .without_collisions();
        let mut world = World::new(config, BoundaryPolicy::Unbounded);
        let cloth = Cloth::new(&mut world, Vec2::new(140.0f32, 40.0), &grid_config)?;
        cloth.pin(&mut world, 0, 0)?;
        cloth.pin(&mut world, cols - 1, 0)?;

        Ok(ClothDemo {
            world,
            cloth,
            options: StepOptions::new().with_constraint_iterations(8),
        })
    }

    pub fn update(&mut self) {
        self.world.update(&self.options);
    }

    pub fn tear_at(&mut self, col: usize, row: usize) {
        self.cloth.tear_at(&mut self.world, col, row);
    }

    pub fn tear_patch(&mut self, col: usize, row: usize, radius: usize) {
        let (cols, rows) = (self.cloth.cols(), self.cloth.rows());
        let min_col = col.saturating_sub(radius);
        let max_col = col.saturating_add(radius).min(cols - 1);
        let min_row = row.saturating_sub(radius);
        let max_row = row.saturating_add(radius).min(rows - 1);
        for r in min_row..=max_row {
            if r == 0 {
                continue;
            }
            for c in min_col..=max_col {
                self.cloth.tear_at(&mut self.world, c, r);
            }
        }
    }

    /// Push every free node sideways. Pinned and torn-away nodes are skipped.
    pub fn apply_wind(&mut self, strength: f32) -> Result<(), JsError> {
        for &id in self.cloth.nodes() {
            if !self.world.node(id).is_some_and(|n| !n.pinned) {
                continue;
            }
            self.world.add_velocity(id, strength, 0.0)?;
        }
        Ok(())
    }

    /// Returns flat [x0, y0, x1, y1, ...] in row-major order
    pub fn positions(&self) -> Vec<f32> {
        flatten(&self.cloth.positions(&self.world))
    }

    /// Returns flat [ax0, ay0, bx0, by0, ...] for every intact constraint
    pub fn segments(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.world.constraint_count() * 4);
        for (a, b) in self.world.segments() {
            out.extend_from_slice(&[a.x, a.y, b.x, b.y]);
        }
        out
    }

    pub fn cols(&self) -> usize {
        self.cloth.cols()
    }
    pub fn rows(&self) -> usize {
        self.cloth.rows()
    }
}
