//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state.  No game logic is performed; this module only translates
//! state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use space_siege::compute::LEVEL_CAP;
use space_siege::entities::{
    BulletController, Enemy, EnemyKind, Faction, GameState, Phase, Rect,
};
use space_siege::menu::{self, MenuLayout};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_PLAYER: Color = Color::White;
const C_ENEMY_SPACECRAFT: Color = Color::Green;
const C_ENEMY_OCTOPUS: Color = Color::Red;
const C_BULLET_PLAYER: Color = Color::Red;
const C_BULLET_ENEMY: Color = Color::White;
const C_HUD: Color = Color::White;
const C_HEARTS: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;
const C_MENU_TITLE: Color = Color::White;
const C_BAR_SPEED: Color = Color::Rgb { r: 245, g: 173, b: 66 };
const C_BAR_HEALTH: Color = Color::Rgb { r: 0, g: 255, b: 8 };
const C_BAR_FIRE_RATE: Color = Color::Rgb { r: 234, g: 255, b: 3 };
const C_BUTTON: Color = Color::Rgb { r: 140, g: 140, b: 240 };
const C_BUTTON_MAXED: Color = Color::DarkGrey;
const C_NEXT_ROUND: Color = Color::Rgb { r: 40, g: 40, b: 240 };

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match state.phase {
        Phase::Playing => {
            draw_scene(out, state)?;
        }
        Phase::GameOver { won } => {
            draw_scene(out, state)?;
            if won {
                draw_round_clear(out, state)?;
            } else {
                draw_game_over(out, state)?;
            }
        }
        Phase::Menu => {
            draw_menu(out, state)?;
        }
    }

    // The stat readout is an every-frame overlay, whatever the phase.
    draw_stats(out, state)?;
    draw_controls_hint(out, state)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, state.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Play-field scene ──────────────────────────────────────────────────────────

fn draw_scene<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    for enemy in state.formation.rows.iter().flat_map(|r| r.enemies.iter()) {
        draw_enemy(out, enemy, state.height)?;
    }
    draw_bullets(out, &state.player_bullets, state)?;
    draw_bullets(out, &state.enemy_bullets, state)?;
    draw_player(out, state)?;
    Ok(())
}

fn draw_player<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    // Sprite (2 rows, 3 cols):
    //   ▲       ← row y      (tip)
    //  /█\      ← row y+1    (fuselage + wings)
    let p = &state.player;
    out.queue(style::SetForegroundColor(C_PLAYER))?;

    out.queue(cursor::MoveTo((p.x + 1) as u16, p.y as u16))?;
    out.queue(Print("▲"))?;

    let wing_y = p.y + 1;
    if wing_y < state.height as i32 - 1 {
        out.queue(cursor::MoveTo(p.x as u16, wing_y as u16))?;
        out.queue(Print("/█\\"))?;
    }

    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, enemy: &Enemy, height: u16) -> std::io::Result<()> {
    if enemy.y < 1 || enemy.y >= height as i32 || enemy.x < 0 {
        return Ok(());
    }
    let lx = enemy.x as u16;
    match enemy.kind {
        EnemyKind::Spacecraft => {
            //   «▼»    ← swept-back wings
            //   ╚═╝    ← engine block
            out.queue(style::SetForegroundColor(C_ENEMY_SPACECRAFT))?;
            out.queue(cursor::MoveTo(lx, enemy.y as u16))?;
            out.queue(Print("«▼»"))?;
            if enemy.y + 1 < height as i32 - 1 {
                out.queue(cursor::MoveTo(lx, (enemy.y + 1) as u16))?;
                out.queue(Print("╚═╝"))?;
            }
        }
        EnemyKind::Octopus => {
            //   (◎)    ← glowing eye
            //   ╰─╯    ← tentacle arc
            out.queue(style::SetForegroundColor(C_ENEMY_OCTOPUS))?;
            out.queue(cursor::MoveTo(lx, enemy.y as u16))?;
            out.queue(Print("(◎)"))?;
            if enemy.y + 1 < height as i32 - 1 {
                out.queue(cursor::MoveTo(lx, (enemy.y + 1) as u16))?;
                out.queue(Print("╰─╯"))?;
            }
        }
    }
    Ok(())
}

fn draw_bullets<W: Write>(
    out: &mut W,
    ctrl: &BulletController,
    state: &GameState,
) -> std::io::Result<()> {
    let (color, glyph) = match ctrl.faction {
        Faction::Player => (C_BULLET_PLAYER, "║"),
        Faction::Enemy => (C_BULLET_ENEMY, "↓"),
    };
    out.queue(style::SetForegroundColor(color))?;
    for bullet in &ctrl.bullets {
        if bullet.x < 0
            || bullet.x >= state.width as i32
            || bullet.y < 1
            || bullet.y >= state.height as i32
        {
            continue;
        }
        out.queue(cursor::MoveTo(bullet.x as u16, bullet.y as u16))?;
        out.queue(Print(glyph))?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_stats<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    // Hearts — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HEARTS))?;
    out.queue(Print("♥".repeat(state.player.health as usize)))?;

    // Stat readout — right-aligned
    let stats = &state.stats;
    let readout = format!(
        "Speed: {}  Health: {}  Fire Rate: {}  Tokens: {}",
        stats.speed_level, stats.health_level, stats.fire_rate_level, stats.tokens
    );
    let rx = state
        .width
        .saturating_sub(readout.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(&readout))?;

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let hint = match state.phase {
        Phase::Menu => "Click a button to upgrade, Next Round to play   Q : Quit",
        Phase::GameOver { won: false } => "R : Upgrade Menu   Q : Quit",
        _ => "← → : Move   SPACE : Shoot   Q : Quit",
    };
    out.queue(cursor::MoveTo(1, state.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}

// ── Upgrade menu ──────────────────────────────────────────────────────────────

fn draw_menu<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let layout = menu::layout(state.width, state.height);

    print_centered(out, state.width, 2, C_MENU_TITLE, "★  GAME  MENU  ★")?;

    draw_upgrade_line(
        out,
        &layout.speed_bar,
        &layout.speed_button,
        "Speed",
        state.stats.speed_level,
        C_BAR_SPEED,
    )?;
    draw_upgrade_line(
        out,
        &layout.health_bar,
        &layout.health_button,
        "Health",
        state.stats.health_level,
        C_BAR_HEALTH,
    )?;
    draw_upgrade_line(
        out,
        &layout.fire_rate_bar,
        &layout.fire_rate_button,
        "Fire Rate",
        state.stats.fire_rate_level,
        C_BAR_FIRE_RATE,
    )?;

    draw_next_round_button(out, &layout)?;
    Ok(())
}

/// One upgrade row: the level bar, then its button.  Both rectangles come
/// from the shared layout, so what is drawn is exactly what is clickable.
fn draw_upgrade_line<W: Write>(
    out: &mut W,
    bar: &Rect,
    button: &Rect,
    label: &str,
    level: u8,
    bar_color: Color,
) -> std::io::Result<()> {
    let filled = (menu::BAR_CELLS_PER_LEVEL * level as i32) as usize;
    let empty = bar.width as usize - filled;

    out.queue(cursor::MoveTo(bar.x as u16, bar.y as u16))?;
    out.queue(style::SetForegroundColor(bar_color))?;
    out.queue(Print("█".repeat(filled)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("░".repeat(empty)))?;

    let color = if level >= LEVEL_CAP {
        C_BUTTON_MAXED
    } else {
        C_BUTTON
    };
    out.queue(cursor::MoveTo(button.x as u16, button.y as u16))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(format!(
        "[{:^width$}]",
        label,
        width = (button.width - 2) as usize
    )))?;
    Ok(())
}

fn draw_next_round_button<W: Write>(out: &mut W, layout: &MenuLayout) -> std::io::Result<()> {
    let b = &layout.next_round_button;
    let inner = (b.width - 2) as usize;
    out.queue(style::SetForegroundColor(C_NEXT_ROUND))?;
    out.queue(cursor::MoveTo(b.x as u16, b.y as u16))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(inner))))?;
    out.queue(cursor::MoveTo(b.x as u16, (b.y + 1) as u16))?;
    out.queue(Print(format!("│{:^inner$}│", "Next Round")))?;
    out.queue(cursor::MoveTo(b.x as u16, (b.y + 2) as u16))?;
    out.queue(Print(format!("└{}┘", "─".repeat(inner))))?;
    Ok(())
}

// ── Round-end overlays ────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let lines = [
        "╔════════════════════╗",
        "║     GAME  OVER     ║",
        "╚════════════════════╝",
    ];
    let start_row = (state.height / 2).saturating_sub(2);
    for (i, msg) in lines.iter().enumerate() {
        print_centered(out, state.width, start_row + i as u16, Color::Red, msg)?;
    }
    print_centered(
        out,
        state.width,
        start_row + lines.len() as u16,
        Color::White,
        "R - Upgrade Menu   Q - Quit",
    )?;
    Ok(())
}

fn draw_round_clear<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let lines = [
        "╔════════════════════╗",
        "║    ROUND  CLEAR    ║",
        "╚════════════════════╝",
    ];
    let start_row = (state.height / 2).saturating_sub(2);
    for (i, msg) in lines.iter().enumerate() {
        print_centered(out, state.width, start_row + i as u16, Color::Yellow, msg)?;
    }
    print_centered(
        out,
        state.width,
        start_row + lines.len() as u16,
        Color::DarkGrey,
        "+1 token",
    )?;
    Ok(())
}

fn print_centered<W: Write>(
    out: &mut W,
    width: u16,
    row: u16,
    color: Color,
    text: &str,
) -> std::io::Result<()> {
    let col = (width / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}
