/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// simulation state. No game logic is performed; this module only maps the
/// playfield onto terminal cells and queues the draw commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use glam::Vec2;
use tower_defense::entities::{Bullet, Enemy, SimulationState, Tower};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_LIVES: Color = Color::Red;
const C_HUD_GOLD: Color = Color::Yellow;
const C_HUD_LEVEL: Color = Color::Cyan;
const C_ENEMY: Color = Color::Red;
const C_HEALTH_FULL: Color = Color::Green;
const C_HEALTH_EMPTY: Color = Color::DarkGrey;
const C_TOWER: Color = Color::Green;
const C_BULLET: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;

const HEALTH_BAR_CELLS: usize = 4;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps playfield pixels onto the terminal cells between the HUD row (0)
/// and the hint row (last).
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    field_width: f32,
    field_height: f32,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, state: &SimulationState) -> Self {
        Self {
            cols,
            rows,
            field_width: state.config.width,
            field_height: state.config.height,
        }
    }

    fn play_rows(&self) -> u16 {
        self.rows.saturating_sub(2).max(1)
    }

    /// Terminal cell for a playfield point, or `None` when it falls outside
    /// the visible area.
    pub fn to_cell(&self, p: Vec2) -> Option<(u16, u16)> {
        if p.x < 0.0 || p.y < 0.0 || p.x >= self.field_width || p.y >= self.field_height {
            return None;
        }
        let col = (p.x / self.field_width * self.cols as f32) as u16;
        let row = 1 + (p.y / self.field_height * self.play_rows() as f32) as u16;
        Some((col.min(self.cols.saturating_sub(1)), row.min(self.play_rows())))
    }

    /// Playfield point under a terminal cell (its top-left corner).
    pub fn to_playfield(&self, col: u16, row: u16) -> Option<Vec2> {
        if row == 0 || row > self.play_rows() || col >= self.cols {
            return None;
        }
        let x = col as f32 / self.cols as f32 * self.field_width;
        let y = (row - 1) as f32 / self.play_rows() as f32 * self.field_height;
        Some(Vec2::new(x, y))
    }

    /// Width in cells of a playfield length, at least one.
    fn span(&self, length: f32) -> u16 {
        ((length / self.field_width * self.cols as f32).round() as u16).max(1)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &SimulationState, view: &Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_hud(out, state)?;
    draw_border(out, view)?;

    for tower in &state.towers {
        draw_tower(out, tower, view)?;
    }
    for enemy in &state.enemies {
        draw_enemy(out, enemy, view)?;
    }
    for bullet in &state.bullets {
        draw_bullet(out, bullet, view)?;
    }

    draw_controls_hint(out, state, view)?;

    if state.is_lost() {
        draw_lose_message(out, view)?;
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &SimulationState) -> std::io::Result<()> {
    let p = &state.player;
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(format!("Lives: {:<3}", p.lives)))?;
    out.queue(style::SetForegroundColor(C_HUD_GOLD))?;
    out.queue(Print(format!("  Gold: {:<6}", p.gold)))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(format!("  Level: {}", p.level)))?;
    Ok(())
}

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    // Only the goal line on the right edge; enemies walk off it.
    out.queue(style::SetForegroundColor(C_BORDER))?;
    let col = view.cols.saturating_sub(1);
    for row in 1..=view.play_rows() {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print("┃"))?;
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_tower<W: Write>(out: &mut W, tower: &Tower, view: &Viewport) -> std::io::Result<()> {
    let Some((col, row)) = view.to_cell(tower.pos) else {
        return Ok(());
    };
    let w = view.span(tower.width).min(view.cols.saturating_sub(col));
    out.queue(style::SetForegroundColor(C_TOWER))?;
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(Print("▓".repeat(w as usize)))?;
    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, enemy: &Enemy, view: &Viewport) -> std::io::Result<()> {
    let Some((col, row)) = view.to_cell(enemy.pos) else {
        return Ok(());
    };

    // Health bar one row above, when there is room under the HUD.
    if row > 1 {
        let filled = (enemy.health_fraction() * HEALTH_BAR_CELLS as f32).ceil() as usize;
        out.queue(cursor::MoveTo(col, row - 1))?;
        out.queue(style::SetForegroundColor(C_HEALTH_FULL))?;
        out.queue(Print("▬".repeat(filled)))?;
        out.queue(style::SetForegroundColor(C_HEALTH_EMPTY))?;
        out.queue(Print("▬".repeat(HEALTH_BAR_CELLS - filled.min(HEALTH_BAR_CELLS))))?;
    }

    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(C_ENEMY))?;
    out.queue(Print("■"))?;
    Ok(())
}

fn draw_bullet<W: Write>(out: &mut W, bullet: &Bullet, view: &Viewport) -> std::io::Result<()> {
    if let Some((col, row)) = view.to_cell(bullet.pos) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(C_BULLET))?;
        out.queue(Print("•"))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(
    out: &mut W,
    state: &SimulationState,
    view: &Viewport,
) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(format!(
        "Click : Build tower ({} gold)   Q : Quit",
        state.config.tower_cost
    )))?;
    Ok(())
}

// ── Lose overlay ──────────────────────────────────────────────────────────────

fn draw_lose_message<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Red),
        ("║     You lose!      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
        ("R - Play Again  Q - Quit", Color::White),
    ];

    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }
    Ok(())
}
