/// Errors raised while building a `SimConfig`.
///
/// The simulation itself never fails; these only surface at startup.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("unknown value {value:?} for {var}")]
    UnknownValue { var: &'static str, value: String },
    #[error("playfield must have positive dimensions, got {width}x{height}")]
    InvalidPlayfield { width: f32, height: f32 },
    #[error("tower cooldown period must be at least one frame")]
    ZeroCooldown,
    #[error("bullet speed must be positive, got {0}")]
    InvalidBulletSpeed(f32),
    #[error("enemy base health must be positive, got {0}")]
    InvalidEnemyHealth(i32),
}
