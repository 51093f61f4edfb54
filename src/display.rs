//! Rendering layer — all terminal I/O lives here.
//!
//! `render` receives a writer, an immutable view of the world and the HUD
//! snapshot.  No game logic runs here; world units are scaled onto the
//! terminal grid and drawn.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use halloween_run::entities::{Entity, EntityKind, GameStatus, World};
use halloween_run::HudSnapshot;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_PUMPKIN: Color = Color::Rgb { r: 249, g: 115, b: 22 };
const C_BONE: Color = Color::Rgb { r: 229, g: 231, b: 235 };
const C_BAT: Color = Color::Rgb { r: 124, g: 58, b: 237 };
const C_CANDY: Color = Color::Rgb { r: 34, g: 197, b: 94 };
const C_GROUND: Color = Color::Rgb { r: 20, g: 30, b: 48 };
const C_GRAVE: Color = Color::Rgb { r: 31, g: 41, b: 55 };
const C_MOON: Color = Color::Rgb { r: 241, g: 245, b: 249 };
const C_LABEL: Color = Color::Rgb { r: 148, g: 163, b: 184 };
const C_HINT: Color = Color::Rgb { r: 226, g: 232, b: 240 };

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps world units onto terminal cells.  Row 0 is the HUD and the last row
/// is the hint line; the world fills the rows between.
struct Viewport {
    cols: u16,
    rows: u16,
    sx: f64,
    sy: f64,
}

impl Viewport {
    fn new(world: &World, cols: u16, rows: u16) -> Self {
        let play_rows = rows.saturating_sub(2).max(1);
        Self {
            cols,
            rows,
            sx: cols as f64 / world.width,
            sy: play_rows as f64 / world.height,
        }
    }

    fn col(&self, x: f64) -> i32 {
        (x * self.sx).floor() as i32
    }

    fn row(&self, y: f64) -> i32 {
        1 + (y * self.sy).floor() as i32
    }

    /// Queue `text` at a cell, skipping anything outside the play area.
    fn put<W: Write>(&self, out: &mut W, col: i32, row: i32, color: Color, text: &str) -> std::io::Result<()> {
        let last_row = self.rows.saturating_sub(2) as i32;
        if row < 1 || row > last_row || col < 0 || col >= self.cols as i32 {
            return Ok(());
        }
        out.queue(cursor::MoveTo(col as u16, row as u16))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(text))?;
        Ok(())
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, world: &World, hud: &HudSnapshot) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let view = Viewport::new(world, cols, rows);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_backdrop(out, world, &view)?;
    for entity in &world.entities {
        draw_entity(out, entity, &view)?;
    }
    draw_player(out, world, &view)?;
    draw_hud(out, hud, &view)?;
    draw_hint(out, world, &view)?;

    match hud.status {
        GameStatus::Idle => draw_overlay(out, hud, &view, "Halloween Run", "Press Space to Start")?,
        GameStatus::GameOver => draw_overlay(out, hud, &view, "Game Over", "Press Space to Restart")?,
        GameStatus::Playing => {}
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Backdrop ──────────────────────────────────────────────────────────────────

fn draw_backdrop<W: Write>(out: &mut W, world: &World, view: &Viewport) -> std::io::Result<()> {
    view.put(out, view.col(760.0), view.row(80.0), C_MOON, "◯")?;

    let ground_row = view.row(world.ground_y);
    let line = "▔".repeat(view.cols as usize);
    view.put(out, 0, ground_row, C_GROUND, &line)?;

    // Gravestones scroll left-to-right with the session clock.
    let drift = (world.clock_ms / 50.0) % 120.0;
    for i in 0..9 {
        let x = (i as f64 * 120.0 + 40.0 + drift) % world.width;
        view.put(out, view.col(x), ground_row - 1, C_GRAVE, "∏")?;
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_entity<W: Write>(out: &mut W, entity: &Entity, view: &Viewport) -> std::io::Result<()> {
    let col = view.col(entity.x);
    let row = view.row(entity.y + entity.h / 2.0);
    match entity.kind {
        EntityKind::GroundEnemy { .. } => view.put(out, col, row, C_BONE, "☠"),
        EntityKind::FlyingEnemy => view.put(out, col, row, C_BAT, "^o^"),
        EntityKind::Pickup => view.put(out, col, row, C_CANDY, "●"),
    }
}

fn draw_player<W: Write>(out: &mut W, world: &World, view: &Viewport) -> std::io::Result<()> {
    let p = &world.player;
    // Blink while invulnerable.
    if p.invuln_timer > 0.0 && (p.invuln_timer / 3.0).floor() as i64 % 2 == 0 {
        return Ok(());
    }
    let col = view.col(p.x);
    view.put(out, col, view.row(p.y + p.h * 0.25), C_CANDY, " ╻")?;
    view.put(out, col, view.row(p.y + p.h * 0.75), C_PUMPKIN, "(▾)")?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, hud: &HudSnapshot, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_LABEL))?;
    out.queue(Print("Score "))?;
    out.queue(style::SetForegroundColor(C_PUMPKIN))?;
    out.queue(Print(format!("{:<6}", hud.score)))?;

    out.queue(style::SetForegroundColor(C_LABEL))?;
    out.queue(Print("  Lives "))?;
    out.queue(style::SetForegroundColor(Color::Red))?;
    out.queue(Print("♥".repeat(hud.lives as usize)))?;

    let best = format!("Best {}", hud.best);
    let bx = view.cols.saturating_sub(best.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(bx, 0))?;
    out.queue(style::SetForegroundColor(C_BONE))?;
    out.queue(Print(&best))?;
    Ok(())
}

// ── Hint (last row) ───────────────────────────────────────────────────────────

fn draw_hint<W: Write>(out: &mut W, world: &World, view: &Viewport) -> std::io::Result<()> {
    let flash_on = (world.clock_ms / 800.0).floor() as i64 % 2 == 0;
    if world.status != GameStatus::Playing || world.score >= 30.0 || !flash_on {
        return Ok(());
    }
    let hint = "Tip: Jump with ↑ or Space";
    let col = (view.cols / 2).saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}

// ── Start / game-over overlay ─────────────────────────────────────────────────

fn draw_overlay<W: Write>(
    out: &mut W,
    hud: &HudSnapshot,
    view: &Viewport,
    title: &str,
    subtitle: &str,
) -> std::io::Result<()> {
    let best = format!("Best: {}", hud.best);
    let mut lines: Vec<(&str, Color)> = vec![
        ("╔══════════════════════════╗", C_PUMPKIN),
        (title, C_PUMPKIN),
        (subtitle, C_BONE),
    ];
    if hud.status == GameStatus::GameOver {
        lines.push((best.as_str(), C_LABEL));
    }
    lines.push(("╚══════════════════════════╝", C_PUMPKIN));

    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (text, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(text.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*text))?;
    }
    out.queue(cursor::MoveTo(cx.saturating_sub(14), start_row + lines.len() as u16 + 1))?;
    out.queue(style::SetForegroundColor(C_LABEL))?;
    out.queue(Print("← → : Move   ↑ / Space : Jump   Q : Quit"))?;
    Ok(())
}
