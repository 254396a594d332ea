/// All game entity types — plain data plus the per-frame updates and derived
/// queries that only touch a single entity.

use glam::Vec2;

use crate::config::SimConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    /// Lives ran out. The simulation is frozen from here on.
    Lost,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub lives: u32,
    pub gold: u32,
    pub level: u32,
}

impl Player {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            lives: config.starting_lives,
            gold: config.starting_gold,
            level: 1,
        }
    }
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    /// Top-left corner.
    pub pos: Vec2,
    /// Rightward distance per frame.
    pub vel: f32,
    pub max_health: i32,
    pub health: i32,
    pub width: f32,
    pub height: f32,
}

impl Enemy {
    pub fn new(pos: Vec2, max_health: i32, config: &SimConfig) -> Self {
        Self {
            pos,
            vel: config.enemy_speed,
            max_health,
            health: max_health,
            width: config.enemy_size,
            height: config.enemy_size,
        }
    }

    pub fn move_step(&mut self) {
        self.pos.x += self.vel;
    }

    pub fn reached_end(&self, playfield_width: f32) -> bool {
        self.pos.x >= playfield_width
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Remaining health in `[0, 1]`, for health bars.
    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0 {
            return 0.0;
        }
        (self.health as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }
}

// ── Tower ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Tower {
    /// Top-left corner, where the player clicked.
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub range: f32,
    /// Frames left before the tower is ready again. Always within
    /// `0..=cooldown_period`.
    pub cooldown: u32,
    pub cooldown_period: u32,
    pub can_shoot: bool,
    pub damage: i32,
}

impl Tower {
    pub fn new(pos: Vec2, config: &SimConfig) -> Self {
        Self {
            pos,
            width: config.tower_size,
            height: config.tower_size,
            range: config.tower_range,
            cooldown: config.tower_cooldown,
            cooldown_period: config.tower_cooldown,
            can_shoot: true,
            damage: config.tower_damage,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn is_within_range(&self, target: Vec2) -> bool {
        self.center().distance(target) <= self.range
    }

    /// Count down one frame. A ready tower is left untouched.
    pub fn update_cooldown(&mut self) {
        if self.can_shoot {
            return;
        }
        self.cooldown = self.cooldown.saturating_sub(1);
        if self.cooldown == 0 {
            self.can_shoot = true;
            self.cooldown = self.cooldown_period;
        }
    }
}

// ── Bullet ────────────────────────────────────────────────────────────────────

/// A straight-flying projectile. Its velocity is fixed at launch; it does
/// not follow the enemy it was aimed at.
#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub damage: i32,
}

impl Bullet {
    /// Launch from `from` toward `target` at `speed` per frame.
    ///
    /// Returns `None` if `target == from`: there is no direction to fly in.
    pub fn aimed(from: Vec2, target: Vec2, speed: f32, radius: f32, damage: i32) -> Option<Self> {
        let dir = (target - from).try_normalize()?;
        Some(Self {
            pos: from,
            vel: dir * speed,
            radius,
            damage,
        })
    }

    pub fn move_step(&mut self) {
        self.pos += self.vel;
    }

    /// Culling is horizontal only; the playfield has no vertical walls.
    pub fn is_off_screen(&self, playfield_width: f32) -> bool {
        self.pos.x > playfield_width || self.pos.x < 0.0
    }

    /// Circle against the enemy's anchor point, padded by the enemy width.
    pub fn hits(&self, enemy: &Enemy) -> bool {
        self.pos.distance(enemy.pos) <= self.radius + enemy.width
    }
}

// ── Master simulation state ───────────────────────────────────────────────────

/// The entire simulation state. `compute::step` takes it by value and hands
/// back the next frame's state; the renderer only ever reads it.
#[derive(Clone, Debug)]
pub struct SimulationState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub towers: Vec<Tower>,
    pub bullets: Vec<Bullet>,
    pub status: GameStatus,
    pub frame: u64,
    pub config: SimConfig,
}

impl SimulationState {
    pub fn is_lost(&self) -> bool {
        self.status == GameStatus::Lost
    }
}

/// Everything the player did during one frame.
#[derive(Clone, Debug, Default)]
pub struct FrameInput {
    /// Tower placement requests, in playfield coordinates.
    pub clicks: Vec<Vec2>,
}

impl FrameInput {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn click(at: Vec2) -> Self {
        Self { clicks: vec![at] }
    }
}
