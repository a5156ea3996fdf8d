//! Rendering layer — all terminal I/O lives here.
//!
//! `render` receives a writer and an immutable view of the game state and
//! projects field coordinates onto the terminal grid.  No game logic is
//! performed; this module only translates state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::entities::{GameState, ProjectileOwner, Rect};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_SHIP: Color = Color::Red;
const C_PLAYER_PROJECTILE: Color = Color::White;
const C_ENEMY_PROJECTILE: Color = Color::Yellow;
const C_ENEMY: Color = Color::Green;
const C_GAME_OVER: Color = Color::White;

const GAME_OVER_TEXT: &str = "GAME OVER";

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Terminal area the field is scaled onto.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

/// Inclusive cell span covered by a field-space box, already clipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellSpan {
    pub col0: u16,
    pub row0: u16,
    pub col1: u16,
    pub row1: u16,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16) -> Self {
        Viewport { cols, rows }
    }

    /// Map a field-space box to the cells it touches.  `None` when the box is
    /// entirely off-screen.
    pub fn project(&self, rect: &Rect, field_w: f64, field_h: f64) -> Option<CellSpan> {
        if self.cols == 0 || self.rows == 0 {
            return None;
        }
        let sx = self.cols as f64 / field_w;
        let sy = self.rows as f64 / field_h;

        let left = (rect.x * sx).floor();
        let top = (rect.y * sy).floor();
        // Thin boxes still cover at least one cell.
        let right = ((rect.x + rect.w) * sx).ceil().max(left + 1.0) - 1.0;
        let bottom = ((rect.y + rect.h) * sy).ceil().max(top + 1.0) - 1.0;

        let max_col = (self.cols - 1) as f64;
        let max_row = (self.rows - 1) as f64;
        if right < 0.0 || bottom < 0.0 || left > max_col || top > max_row {
            return None;
        }
        Some(CellSpan {
            col0: left.max(0.0) as u16,
            row0: top.max(0.0) as u16,
            col1: right.min(max_col) as u16,
            row1: bottom.min(max_row) as u16,
        })
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState, view: Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    if !state.ship.alive {
        draw_game_over(out, view)?;
    } else {
        draw_ship(out, state, view)?;

        for p in state.player_projectiles.iter().chain(&state.enemy_projectiles) {
            fill(out, &p.bounds(), state, view, projectile_color(p.owner), "│")?;
        }
        for enemy in state.alive_enemies() {
            fill(out, &enemy.bounds(), state, view, C_ENEMY, "█")?;
        }
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_ship<W: Write>(out: &mut W, state: &GameState, view: Viewport) -> std::io::Result<()> {
    let ship = state.ship.bounds();
    fill(out, &ship, state, view, C_SHIP, "█")?;

    // Nose cone: one cell above the hull, centred.
    if let Some(span) = view.project(&ship, state.width, state.height) {
        if span.row0 > 0 {
            let mid = span.col0 + (span.col1 - span.col0) / 2;
            out.queue(cursor::MoveTo(mid, span.row0 - 1))?;
            out.queue(style::SetForegroundColor(C_SHIP))?;
            out.queue(Print("▲"))?;
        }
    }
    Ok(())
}

/// Player shots and enemy shots are told apart by colour.
pub fn projectile_color(owner: ProjectileOwner) -> Color {
    match owner {
        ProjectileOwner::Player => C_PLAYER_PROJECTILE,
        ProjectileOwner::Enemy => C_ENEMY_PROJECTILE,
    }
}

fn fill<W: Write>(
    out: &mut W,
    rect: &Rect,
    state: &GameState,
    view: Viewport,
    color: Color,
    glyph: &str,
) -> std::io::Result<()> {
    let Some(span) = view.project(rect, state.width, state.height) else {
        return Ok(());
    };
    let line = glyph.repeat((span.col1 - span.col0 + 1) as usize);
    out.queue(style::SetForegroundColor(color))?;
    for row in span.row0..=span.row1 {
        out.queue(cursor::MoveTo(span.col0, row))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    let col = (view.cols / 2).saturating_sub(GAME_OVER_TEXT.len() as u16 / 2);
    out.queue(cursor::MoveTo(col, view.rows / 2))?;
    out.queue(style::SetForegroundColor(C_GAME_OVER))?;
    out.queue(Print(GAME_OVER_TEXT))?;
    Ok(())
}
