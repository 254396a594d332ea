/// Gameplay tuning and policy selection.
///
/// Everything the simulation treats as a constant lives in `SimConfig`, so a
/// test can build a state with a smaller playfield or a faster tower without
/// touching the step logic.

use std::env;

use crate::error::ConfigError;

pub const WAVE_POLICY_VAR: &str = "TD_WAVE_POLICY";
pub const TARGETING_VAR: &str = "TD_TARGETING";

// ── Policies ──────────────────────────────────────────────────────────────────

/// How many enemies a wave holds and how tough they are.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WaveSpawnPolicy {
    /// One enemy per wave; health grows with the player's level.
    #[default]
    SingleScaled,
    /// `level` enemies per wave, each at base health.
    CountPerLevel,
}

impl WaveSpawnPolicy {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "single" | "single-scaled" => Ok(Self::SingleScaled),
            "count" | "count-per-level" => Ok(Self::CountPerLevel),
            _ => Err(ConfigError::UnknownValue {
                var: WAVE_POLICY_VAR,
                value: value.to_string(),
            }),
        }
    }
}

/// Which in-range enemy a ready tower shoots at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TargetingPolicy {
    /// First in-range enemy in collection order.
    #[default]
    First,
    /// In-range enemy closest to the tower centre; ties go to collection order.
    Nearest,
}

impl TargetingPolicy {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "first" => Ok(Self::First),
            "nearest" => Ok(Self::Nearest),
            _ => Err(ConfigError::UnknownValue {
                var: TARGETING_VAR,
                value: value.to_string(),
            }),
        }
    }
}

// ── Tuning ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    /// Playfield size in pixels.
    pub width: f32,
    pub height: f32,

    pub starting_lives: u32,
    pub starting_gold: u32,

    /// Gold deducted when a tower is placed.
    pub tower_cost: u32,
    /// Gold awarded per enemy killed.
    pub kill_reward: u32,

    pub tower_size: f32,
    pub tower_range: f32,
    /// Frames between two shots of the same tower.
    pub tower_cooldown: u32,
    pub tower_damage: i32,

    /// Distance travelled per frame.
    pub bullet_speed: f32,
    pub bullet_radius: f32,

    pub enemy_size: f32,
    /// Rightward distance travelled per frame.
    pub enemy_speed: f32,
    pub enemy_base_health: i32,
    /// Extra health per level above 1 (`SingleScaled` only).
    pub enemy_health_per_level: i32,

    pub wave_policy: WaveSpawnPolicy,
    pub targeting: TargetingPolicy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            starting_lives: 5,
            starting_gold: 100,
            tower_cost: 10,
            kill_reward: 50,
            tower_size: 50.0,
            tower_range: 150.0,
            tower_cooldown: 60,
            tower_damage: 1,
            bullet_speed: 5.0,
            bullet_radius: 5.0,
            enemy_size: 20.0,
            enemy_speed: 2.0,
            enemy_base_health: 10,
            enemy_health_per_level: 5,
            wave_policy: WaveSpawnPolicy::default(),
            targeting: TargetingPolicy::default(),
        }
    }
}

impl SimConfig {
    /// Defaults overridden by `TD_WAVE_POLICY` and `TD_TARGETING`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(value) = lookup(WAVE_POLICY_VAR) {
            config.wave_policy = WaveSpawnPolicy::parse(&value)?;
        }
        if let Some(value) = lookup(TARGETING_VAR) {
            config.targeting = TargetingPolicy::parse(&value)?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ConfigError::InvalidPlayfield {
                width: self.width,
                height: self.height,
            });
        }
        if self.tower_cooldown == 0 {
            return Err(ConfigError::ZeroCooldown);
        }
        if !(self.bullet_speed > 0.0) {
            return Err(ConfigError::InvalidBulletSpeed(self.bullet_speed));
        }
        if self.enemy_base_health <= 0 {
            return Err(ConfigError::InvalidEnemyHealth(self.enemy_base_health));
        }
        Ok(())
    }

    /// Max health of an enemy spawned at `level` under the active policy.
    pub fn enemy_health_for(&self, level: u32) -> i32 {
        match self.wave_policy {
            WaveSpawnPolicy::SingleScaled => {
                let extra_levels = level.saturating_sub(1) as i32;
                self.enemy_base_health + extra_levels * self.enemy_health_per_level
            }
            WaveSpawnPolicy::CountPerLevel => self.enemy_base_health,
        }
    }

    /// Number of enemies in the wave for `level` under the active policy.
    pub fn wave_size_for(&self, level: u32) -> usize {
        match self.wave_policy {
            WaveSpawnPolicy::SingleScaled => 1,
            WaveSpawnPolicy::CountPerLevel => level.max(1) as usize,
        }
    }
}
