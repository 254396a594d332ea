use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use tower_defense::config::SimConfig;
use tower_defense::entities::*;

fn config() -> SimConfig {
    SimConfig::default()
}

// ── Tower cooldown ────────────────────────────────────────────────────────────

#[test]
fn new_tower_is_ready() {
    let t = Tower::new(Vec2::new(100.0, 100.0), &config());
    assert!(t.can_shoot);
    assert_eq!(t.cooldown, 60);
    assert_eq!(t.cooldown_period, 60);
    assert_eq!(t.center(), Vec2::new(125.0, 125.0));
}

#[test]
fn update_cooldown_on_ready_tower_is_noop() {
    let mut t = Tower::new(Vec2::ZERO, &config());
    let before = t.clone();
    for _ in 0..5 {
        t.update_cooldown();
    }
    assert_eq!(t, before);
}

#[test]
fn cooldown_takes_exactly_one_period() {
    let mut t = Tower::new(Vec2::ZERO, &config());
    t.can_shoot = false;
    for frame in 1..60 {
        t.update_cooldown();
        assert!(!t.can_shoot, "ready too early on frame {frame}");
        assert_eq!(t.cooldown, 60 - frame);
    }
    t.update_cooldown();
    assert!(t.can_shoot);
    assert_eq!(t.cooldown, 60);
}

#[test]
fn range_is_inclusive_and_measured_from_centre() {
    let t = Tower::new(Vec2::ZERO, &config()); // centre (25, 25), range 150
    assert!(t.is_within_range(Vec2::new(175.0, 25.0)));
    assert!(!t.is_within_range(Vec2::new(175.5, 25.0)));
    assert!(t.is_within_range(Vec2::new(25.0, 175.0)));
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[test]
fn enemy_moves_right_by_velocity() {
    let mut e = Enemy::new(Vec2::new(0.0, 300.0), 10, &config());
    e.move_step();
    e.move_step();
    assert_eq!(e.pos, Vec2::new(4.0, 300.0));
}

#[test]
fn enemy_reached_end_at_right_edge() {
    let mut e = Enemy::new(Vec2::new(799.9, 300.0), 10, &config());
    assert!(!e.reached_end(800.0));
    e.pos.x = 800.0;
    assert!(e.reached_end(800.0));
}

#[test]
fn enemy_health_fraction() {
    let mut e = Enemy::new(Vec2::ZERO, 20, &config());
    assert_eq!(e.health_fraction(), 1.0);
    e.health = 5;
    assert_eq!(e.health_fraction(), 0.25);
    e.health = -3;
    assert_eq!(e.health_fraction(), 0.0);
    assert!(e.is_dead());
}

// ── Bullet ────────────────────────────────────────────────────────────────────

#[test]
fn aimed_bullet_has_fixed_speed() {
    let b = Bullet::aimed(Vec2::ZERO, Vec2::new(3.0, 4.0), 5.0, 5.0, 1).unwrap();
    assert!((b.vel - Vec2::new(3.0, 4.0)).length() < 1e-4);
    assert_eq!(b.pos, Vec2::ZERO);
}

#[test]
fn aimed_at_own_position_yields_none() {
    let p = Vec2::new(125.0, 300.0);
    assert!(Bullet::aimed(p, p, 5.0, 5.0, 1).is_none());
}

#[test]
fn bullet_velocity_normalised_for_any_target() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let from = Vec2::new(rng.gen_range(0.0..800.0), rng.gen_range(0.0..600.0));
        let target = Vec2::new(rng.gen_range(0.0..800.0), rng.gen_range(0.0..600.0));
        if let Some(b) = Bullet::aimed(from, target, 5.0, 5.0, 1) {
            assert!((b.vel.length() - 5.0).abs() < 1e-3);
        }
    }
}

#[test]
fn bullet_position_is_linear_in_frames() {
    let from = Vec2::new(100.0, 100.0);
    let mut b = Bullet::aimed(from, Vec2::new(400.0, 500.0), 5.0, 5.0, 1).unwrap();
    let vel = b.vel;
    for _ in 0..40 {
        b.move_step();
    }
    assert!((b.pos - (from + vel * 40.0)).length() < 1e-3);
    // Still heading the same way; bullets do not steer
    assert_eq!(b.vel, vel);
}

#[test]
fn bullet_off_screen_horizontally_only() {
    let mut b = Bullet { pos: Vec2::new(800.0, 300.0), vel: Vec2::ZERO, radius: 5.0, damage: 1 };
    assert!(!b.is_off_screen(800.0));
    b.pos.x = 800.5;
    assert!(b.is_off_screen(800.0));
    b.pos = Vec2::new(-0.5, 300.0);
    assert!(b.is_off_screen(800.0));
    b.pos = Vec2::new(400.0, -50.0);
    assert!(!b.is_off_screen(800.0));
}

#[test]
fn bullet_reach_is_radius_plus_enemy_width() {
    let e = Enemy::new(Vec2::new(100.0, 100.0), 10, &config());
    let mut b = Bullet { pos: Vec2::new(125.0, 100.0), vel: Vec2::ZERO, radius: 5.0, damage: 1 };
    assert!(b.hits(&e));
    b.pos.x = 125.5;
    assert!(!b.hits(&e));
}

// ── Master state ──────────────────────────────────────────────────────────────

#[test]
fn simulation_state_clone_is_independent() {
    let config = config();
    let original = SimulationState {
        player: Player::new(&config),
        enemies: Vec::new(),
        towers: Vec::new(),
        bullets: Vec::new(),
        status: GameStatus::Playing,
        frame: 0,
        config,
    };
    let mut cloned = original.clone();

    cloned.player.gold = 0;
    cloned.towers.push(Tower::new(Vec2::ZERO, &cloned.config));
    cloned.status = GameStatus::Lost;

    assert_eq!(original.player.gold, 100);
    assert!(original.towers.is_empty());
    assert!(!original.is_lost());
}
