/// Pure game-logic functions.
///
/// `step` takes the current `SimulationState` by value together with the
/// frame's input and returns the next state. Nothing here touches the
/// terminal or the clock; one call is one fixed 1/60 s frame.
///
/// Collections are never edited while being scanned: each phase records
/// what to remove or add, then applies it once the scan is over.

use glam::Vec2;
use tracing::{debug, info};

use crate::config::{SimConfig, TargetingPolicy};
use crate::entities::{
    Bullet, Enemy, FrameInput, GameStatus, Player, SimulationState, Tower,
};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial state with the first wave already on the field.
pub fn init_state(config: SimConfig) -> SimulationState {
    let mut state = SimulationState {
        player: Player::new(&config),
        enemies: Vec::new(),
        towers: Vec::new(),
        bullets: Vec::new(),
        status: GameStatus::Playing,
        frame: 0,
        config,
    };
    start_new_level(&mut state);
    state
}

/// Append the wave for the player's current level.
pub fn start_new_level(state: &mut SimulationState) {
    let config = &state.config;
    let level = state.player.level;
    let count = config.wave_size_for(level);
    let health = config.enemy_health_for(level);
    let lane_y = config.height / 2.0;

    // Extra enemies queue up off the left edge and walk in one by one.
    let spacing = config.enemy_size * 2.0;
    state.enemies.extend((0..count).map(|i| {
        Enemy::new(Vec2::new(-(i as f32) * spacing, lane_y), health, config)
    }));

    info!(level, count, health, "wave started");
}

// ── Input-driven state transitions ───────────────────────────────────────────

/// Place a tower with its top-left corner at `at` if the player can afford
/// it. Returns whether the tower was placed.
pub fn place_tower(state: &mut SimulationState, at: Vec2) -> bool {
    let cost = state.config.tower_cost;
    if state.player.gold < cost {
        debug!(gold = state.player.gold, cost, "tower placement rejected");
        return false;
    }
    state.player.gold -= cost;
    state.towers.push(Tower::new(at, &state.config));
    debug!(x = at.x, y = at.y, gold = state.player.gold, "tower placed");
    true
}

// ── Targeting ────────────────────────────────────────────────────────────────

/// Index of the enemy `tower` should shoot at, if any is in range.
pub fn select_target(tower: &Tower, enemies: &[Enemy], policy: TargetingPolicy) -> Option<usize> {
    let mut in_range = enemies
        .iter()
        .enumerate()
        .filter(|(_, e)| !e.is_dead() && tower.is_within_range(e.pos));

    match policy {
        TargetingPolicy::First => in_range.next().map(|(i, _)| i),
        TargetingPolicy::Nearest => {
            let center = tower.center();
            let mut best: Option<(usize, f32)> = None;
            for (i, enemy) in in_range {
                let d = center.distance_squared(enemy.pos);
                if best.map_or(true, |(_, best_d)| d < best_d) {
                    best = Some((i, d));
                }
            }
            best.map(|(i, _)| i)
        }
    }
}

// ── Per-frame step ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame.
///
/// A lost game is returned untouched: no placement, movement or firing
/// happens once lives hit zero.
pub fn step(mut state: SimulationState, input: &FrameInput) -> SimulationState {
    if state.status == GameStatus::Lost {
        return state;
    }

    // ── 1. Tower placement ───────────────────────────────────────────────────
    for &click in &input.clicks {
        place_tower(&mut state, click);
    }

    // ── 2. Move enemies, sweep those that reached the end ───────────────────
    let width = state.config.width;
    for enemy in &mut state.enemies {
        enemy.move_step();
    }
    let before = state.enemies.len();
    state.enemies.retain(|e| !e.reached_end(width));
    let leaked = (before - state.enemies.len()) as u32;
    if leaked > 0 {
        state.player.lives = state.player.lives.saturating_sub(leaked);
        info!(leaked, lives = state.player.lives, "enemies reached the end");
    }

    if state.player.lives == 0 {
        state.status = GameStatus::Lost;
        state.frame += 1;
        info!(level = state.player.level, frame = state.frame, "game lost");
        return state;
    }

    // ── 3. Tower cooldowns & firing ─────────────────────────────────────────
    let policy = state.config.targeting;
    let (speed, radius) = (state.config.bullet_speed, state.config.bullet_radius);
    let mut fired: Vec<Bullet> = Vec::new();
    for tower in &mut state.towers {
        tower.update_cooldown();
        if !tower.can_shoot {
            continue;
        }
        let Some(target) = select_target(tower, &state.enemies, policy) else {
            continue;
        };
        // A zero-length shot is skipped; the tower stays ready.
        if let Some(bullet) =
            Bullet::aimed(tower.center(), state.enemies[target].pos, speed, radius, tower.damage)
        {
            fired.push(bullet);
            tower.can_shoot = false;
        }
    }
    state.bullets.extend(fired);

    // ── 4. Move bullets ──────────────────────────────────────────────────────
    for bullet in &mut state.bullets {
        bullet.move_step();
    }

    // ── 5. Collision: bullets ↔ enemies (mark, then sweep) ──────────────────
    let mut spent = vec![false; state.bullets.len()];
    for (bi, bullet) in state.bullets.iter().enumerate() {
        let hit = state
            .enemies
            .iter_mut()
            .find(|e| !e.is_dead() && bullet.hits(e));
        if let Some(enemy) = hit {
            enemy.health -= bullet.damage;
            spent[bi] = true;
        }
    }

    let mut spent_iter = spent.into_iter();
    state.bullets.retain(|_| !spent_iter.next().unwrap_or(false));

    let before = state.enemies.len();
    state.enemies.retain(|e| !e.is_dead());
    let killed = (before - state.enemies.len()) as u32;
    if killed > 0 {
        let reward = killed * state.config.kill_reward;
        state.player.gold += reward;
        info!(killed, reward, gold = state.player.gold, "enemies killed");
    }

    // ── 6. Cull bullets that left the playfield ─────────────────────────────
    state.bullets.retain(|b| !b.is_off_screen(width));

    // ── 7. Next wave once the field is clear ────────────────────────────────
    if state.enemies.is_empty() {
        state.player.level += 1;
        start_new_level(&mut state);
    }

    state.frame += 1;
    state
}
