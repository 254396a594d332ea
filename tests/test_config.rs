use std::collections::HashMap;

use tower_defense::config::*;
use tower_defense::error::ConfigError;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn defaults_match_reference_game() {
    let c = SimConfig::default();
    assert_eq!((c.width, c.height), (800.0, 600.0));
    assert_eq!(c.starting_lives, 5);
    assert_eq!(c.starting_gold, 100);
    assert_eq!(c.tower_cost, 10);
    assert_eq!(c.kill_reward, 50);
    assert_eq!(c.tower_cooldown, 60);
    assert_eq!(c.wave_policy, WaveSpawnPolicy::SingleScaled);
    assert_eq!(c.targeting, TargetingPolicy::First);
    assert!(c.validate().is_ok());
}

#[test]
fn lookup_without_overrides_gives_defaults() {
    let c = SimConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(c, SimConfig::default());
}

#[test]
fn lookup_selects_policies() {
    let c = SimConfig::from_lookup(lookup_from(&[
        (WAVE_POLICY_VAR, "count"),
        (TARGETING_VAR, " Nearest "),
    ]))
    .unwrap();
    assert_eq!(c.wave_policy, WaveSpawnPolicy::CountPerLevel);
    assert_eq!(c.targeting, TargetingPolicy::Nearest);
}

#[test]
fn lookup_rejects_unknown_policy() {
    let err = SimConfig::from_lookup(lookup_from(&[(WAVE_POLICY_VAR, "swarm")])).unwrap_err();
    assert_eq!(
        err,
        ConfigError::UnknownValue { var: WAVE_POLICY_VAR, value: "swarm".to_string() }
    );
    assert!(err.to_string().contains("TD_WAVE_POLICY"));
}

#[test]
fn validate_rejects_bad_tuning() {
    let mut c = SimConfig::default();
    c.width = 0.0;
    assert!(matches!(c.validate(), Err(ConfigError::InvalidPlayfield { .. })));

    let mut c = SimConfig::default();
    c.tower_cooldown = 0;
    assert_eq!(c.validate(), Err(ConfigError::ZeroCooldown));

    let mut c = SimConfig::default();
    c.bullet_speed = 0.0;
    assert_eq!(c.validate(), Err(ConfigError::InvalidBulletSpeed(0.0)));

    let mut c = SimConfig::default();
    c.enemy_base_health = 0;
    assert_eq!(c.validate(), Err(ConfigError::InvalidEnemyHealth(0)));
}

#[test]
fn single_scaled_waves() {
    let c = SimConfig::default();
    assert_eq!(c.wave_size_for(1), 1);
    assert_eq!(c.wave_size_for(7), 1);
    assert_eq!(c.enemy_health_for(1), 10);
    assert_eq!(c.enemy_health_for(4), 25);
}

#[test]
fn count_per_level_waves() {
    let c = SimConfig { wave_policy: WaveSpawnPolicy::CountPerLevel, ..SimConfig::default() };
    assert_eq!(c.wave_size_for(1), 1);
    assert_eq!(c.wave_size_for(5), 5);
    assert_eq!(c.enemy_health_for(5), 10);
}
