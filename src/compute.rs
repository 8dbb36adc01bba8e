//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (and, where needed, an RNG handle) and returns a brand-new
//! `GameState`.  Side effects are limited to the injected RNG.

use rand::Rng;

use crate::entities::{
    Bullet, BulletController, Enemy, EnemyKind, EnemyRow, Faction, Formation, GameState, Phase,
    Player, Rect, Stats, UpgradeKind,
};

// ── Tuning constants ─────────────────────────────────────────────────────────

/// Highest purchasable level for any stat.
pub const LEVEL_CAP: u8 = 5;

/// Frames between shots at fire-rate level 1; both factions start here.
pub const BASE_COOLDOWN: u32 = 10;

pub const PLAYER_MAX_BULLETS: usize = 10;
pub const ENEMY_MAX_BULLETS: usize = 4;

/// Vertical cells per frame; the sign encodes direction (negative = up).
pub const PLAYER_BULLET_VELOCITY: i32 = -1;
pub const ENEMY_BULLET_VELOCITY: i32 = 1;

pub const PLAYER_WIDTH: i32 = 3;
pub const PLAYER_HEIGHT: i32 = 2;
pub const ENEMY_WIDTH: i32 = 3;
pub const ENEMY_HEIGHT: i32 = 2;

/// Frames between formation march steps.
pub const MARCH_INTERVAL: u64 = 12;

/// Per-enemy odds (1 in N) of requesting a shot each frame.  The enemy
/// controller's cooldown and bullet cap still gate the actual fire rate.
const ENEMY_FIRE_ODDS: u32 = 300;

/// Frames the win screen stays up before the upgrade menu (≈1 s at 60 Hz).
pub const WIN_MENU_DELAY: u32 = 60;

const FORMATION_ROWS: usize = 4;
const FORMATION_MAX_COLS: i32 = 8;
/// Left edge of one enemy to the left edge of the next.
const FORMATION_SPACING: i32 = 5;
/// Top of one formation row to the top of the next.
const FORMATION_ROW_SPACING: i32 = 3;
/// Cells kept clear of the walls when the formation is built.
const FORMATION_MARGIN: i32 = 2;
/// Topmost formation row (row 0 is the HUD).
const FORMATION_TOP: i32 = 2;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state for the given terminal dimensions.
pub fn init_state(width: u16, height: u16) -> GameState {
    let stats = Stats {
        speed_level: 1,
        health_level: 1,
        fire_rate_level: 1,
        tokens: 0,
    };
    GameState {
        player: new_player(width, height, &stats),
        formation: new_formation(width),
        player_bullets: new_controller(Faction::Player, &stats),
        enemy_bullets: new_controller(Faction::Enemy, &stats),
        stats,
        phase: Phase::Playing,
        menu_delay: None,
        frame: 0,
        width,
        height,
    }
}

fn new_player(width: u16, height: u16, stats: &Stats) -> Player {
    let max_health = stats.health_level as u32;
    Player {
        x: (width as i32 - PLAYER_WIDTH) / 2,
        y: height as i32 - 4, // leaves room for the 2-row sprite above the hint line
        width: PLAYER_WIDTH,
        height: PLAYER_HEIGHT,
        velocity: stats.speed_level as i32,
        health: max_health,
        max_health,
        move_left: false,
        move_right: false,
        fire: false,
    }
}

fn new_controller(faction: Faction, stats: &Stats) -> BulletController {
    let (max_live, cooldown_max) = match faction {
        Faction::Player => (PLAYER_MAX_BULLETS, player_cooldown_max(stats)),
        Faction::Enemy => (ENEMY_MAX_BULLETS, BASE_COOLDOWN),
    };
    BulletController {
        faction,
        bullets: Vec::new(),
        max_live,
        cooldown: 0,
        cooldown_max,
    }
}

/// The player's shot cooldown shrinks one frame per fire-rate level; the
/// level cap keeps it well above zero.
fn player_cooldown_max(stats: &Stats) -> u32 {
    BASE_COOLDOWN - (stats.fire_rate_level as u32 - 1)
}

/// Build a fresh formation spanning the width: up to 8 columns in 4 rows,
/// sprite kinds alternating by rank.
fn new_formation(width: u16) -> Formation {
    let usable = width as i32 - 2 * FORMATION_MARGIN;
    let cols = (((usable - ENEMY_WIDTH) / FORMATION_SPACING) + 1).clamp(1, FORMATION_MAX_COLS);
    let rows = (0..FORMATION_ROWS)
        .map(|r| {
            let kind = if r % 2 == 0 {
                EnemyKind::Spacecraft
            } else {
                EnemyKind::Octopus
            };
            let y = FORMATION_TOP + r as i32 * FORMATION_ROW_SPACING;
            EnemyRow {
                enemies: (0..cols)
                    .map(|c| Enemy {
                        x: FORMATION_MARGIN + c * FORMATION_SPACING,
                        y,
                        kind: kind.clone(),
                    })
                    .collect(),
            }
        })
        .collect();
    Formation { rows, dir: 1 }
}

pub fn player_rect(player: &Player) -> Rect {
    Rect {
        x: player.x,
        y: player.y,
        width: player.width,
        height: player.height,
    }
}

pub fn enemy_rect(enemy: &Enemy) -> Rect {
    Rect {
        x: enemy.x,
        y: enemy.y,
        width: ENEMY_WIDTH,
        height: ENEMY_HEIGHT,
    }
}

// ── Bullet controller (shared by both factions) ──────────────────────────────

/// Request a shot.  Silently does nothing while the cooldown is running or
/// the faction is at its live-bullet cap.
pub fn shoot(ctrl: &BulletController, x: i32, y: i32, velocity: i32) -> BulletController {
    if ctrl.cooldown > 0 || ctrl.bullets.len() >= ctrl.max_live {
        return ctrl.clone();
    }
    let mut bullets = ctrl.bullets.clone();
    bullets.push(Bullet {
        x,
        y,
        width: 1,
        height: 1,
        velocity,
    });
    BulletController {
        bullets,
        cooldown: ctrl.cooldown_max,
        ..ctrl.clone()
    }
}

/// One frame of controller upkeep: drop bullets fully outside the vertical
/// play range, advance the survivors, run the cooldown toward 0.
pub fn update_bullets(ctrl: &BulletController, height: u16) -> BulletController {
    let bullets: Vec<Bullet> = ctrl
        .bullets
        .iter()
        .filter(|b| b.y < height as i32 && b.y + b.height > 0)
        .map(|b| Bullet {
            y: b.y + b.velocity,
            ..b.clone()
        })
        .collect();
    BulletController {
        bullets,
        cooldown: ctrl.cooldown.saturating_sub(1),
        ..ctrl.clone()
    }
}

/// Remove the first bullet (in firing order) whose box overlaps `target`.
/// At most one bullet is consumed per call.
pub fn collide_with(ctrl: &BulletController, target: &Rect) -> (BulletController, bool) {
    match ctrl.bullets.iter().position(|b| b.rect().overlaps(target)) {
        Some(i) => {
            let mut bullets = ctrl.bullets.clone();
            bullets.remove(i);
            (
                BulletController {
                    bullets,
                    ..ctrl.clone()
                },
                true,
            )
        }
        None => (ctrl.clone(), false),
    }
}

// ── Input-driven state transitions (pure) ────────────────────────────────────

/// Copy the held-key snapshot onto the player's input flags.  The flags are
/// interpreted on the next tick; holding a key keeps its flag set.
pub fn set_input_flags(state: &GameState, left: bool, right: bool, fire: bool) -> GameState {
    GameState {
        player: Player {
            move_left: left,
            move_right: right,
            fire,
            ..state.player.clone()
        },
        ..state.clone()
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ───────────────────────────

/// Advance the game by one frame, whatever the phase.  All randomness comes
/// through `rng` so callers control determinism (seeded RNG in tests).
pub fn tick(state: &GameState, rng: &mut impl Rng) -> GameState {
    match state.phase {
        Phase::Playing => tick_playing(state, rng),
        Phase::GameOver { won: true } => tick_win_delay(state),
        // The lost-round screen and the menu only advance the frame counter;
        // their exits are click/key driven.
        Phase::GameOver { won: false } | Phase::Menu => GameState {
            frame: state.frame + 1,
            ..state.clone()
        },
    }
}

/// Poll the deferred win → menu transition.  The token is awarded exactly
/// once, on the frame the menu takes over.
fn tick_win_delay(state: &GameState) -> GameState {
    let frame = state.frame + 1;
    match state.menu_delay {
        Some(n) if n > 0 => GameState {
            menu_delay: Some(n - 1),
            frame,
            ..state.clone()
        },
        _ => GameState {
            phase: Phase::Menu,
            menu_delay: None,
            stats: Stats {
                tokens: state.stats.tokens + 1,
                ..state.stats.clone()
            },
            frame,
            ..state.clone()
        },
    }
}

fn tick_playing(state: &GameState, rng: &mut impl Rng) -> GameState {
    let frame = state.frame + 1;

    // ── 1. Player: fire request, then movement, then wall clamp ──────────────
    let mut player = state.player.clone();
    let mut player_bullets = state.player_bullets.clone();
    if player.fire {
        player_bullets = shoot(
            &player_bullets,
            player.x + player.width / 2,
            player.y - 1,
            PLAYER_BULLET_VELOCITY,
        );
    }
    // Simultaneous press favours right
    if player.move_right {
        player.x += player.velocity;
    } else if player.move_left {
        player.x -= player.velocity;
    }
    player.x = player.x.clamp(0, state.width as i32 - player.width);

    // ── 2. Formation march + enemy fire ──────────────────────────────────────
    let formation = march_formation(&state.formation, frame, state.width);
    let mut enemy_bullets = state.enemy_bullets.clone();
    for enemy in formation.rows.iter().flat_map(|r| r.enemies.iter()) {
        if rng.gen_ratio(1, ENEMY_FIRE_ODDS) {
            enemy_bullets = shoot(
                &enemy_bullets,
                enemy.x + ENEMY_WIDTH / 2,
                enemy.y + ENEMY_HEIGHT,
                ENEMY_BULLET_VELOCITY,
            );
        }
    }

    // ── 3. Bullet upkeep: prune off-screen, advance, run cooldowns ───────────
    let mut player_bullets = update_bullets(&player_bullets, state.height);
    let mut enemy_bullets = update_bullets(&enemy_bullets, state.height);

    // ── 4. Player bullets vs the formation ───────────────────────────────────
    let mut rows: Vec<EnemyRow> = Vec::with_capacity(formation.rows.len());
    for row in &formation.rows {
        let mut survivors = Vec::with_capacity(row.enemies.len());
        for enemy in &row.enemies {
            let (next, hit) = collide_with(&player_bullets, &enemy_rect(enemy));
            if hit {
                player_bullets = next;
            } else {
                survivors.push(enemy.clone());
            }
        }
        if !survivors.is_empty() {
            rows.push(EnemyRow { enemies: survivors });
        }
    }
    let formation = Formation { rows, ..formation };

    // ── 5. Enemy bullets vs the player ───────────────────────────────────────
    let (next, hit) = collide_with(&enemy_bullets, &player_rect(&player));
    if hit {
        enemy_bullets = next;
        player.health = player.health.saturating_sub(1);
    }

    // ── 6. Round outcome ─────────────────────────────────────────────────────
    // Body contact or a breakthrough past the play area ends the round
    // outright; bullet hits only end it once health is spent.
    let overrun = formation_hits(&formation, &player_rect(&player))
        || formation_bottom(&formation) >= state.height as i32;
    let (phase, menu_delay) = if player.health == 0 || overrun {
        (Phase::GameOver { won: false }, None)
    } else if formation.rows.is_empty() {
        (Phase::GameOver { won: true }, Some(WIN_MENU_DELAY))
    } else {
        (Phase::Playing, None)
    };

    GameState {
        player,
        formation,
        player_bullets,
        enemy_bullets,
        phase,
        menu_delay,
        frame,
        ..state.clone()
    }
}

// ── Formation movement & queries ─────────────────────────────────────────────

/// Step the formation sideways on its interval; when the next step would
/// cross a wall the whole formation flips direction and drops one row.
fn march_formation(formation: &Formation, frame: u64, width: u16) -> Formation {
    if frame % MARCH_INTERVAL != 0 || formation.rows.is_empty() {
        return formation.clone();
    }
    let all = || formation.rows.iter().flat_map(|r| r.enemies.iter());
    let left = all().map(|e| e.x).min().unwrap_or(0);
    let right = all().map(|e| e.x).max().unwrap_or(0) + ENEMY_WIDTH;
    let at_wall = (formation.dir > 0 && right + 1 > width as i32)
        || (formation.dir < 0 && left - 1 < 0);

    let step = |row: &EnemyRow, dx: i32, dy: i32| EnemyRow {
        enemies: row
            .enemies
            .iter()
            .map(|e| Enemy {
                x: e.x + dx,
                y: e.y + dy,
                ..e.clone()
            })
            .collect(),
    };

    if at_wall {
        Formation {
            rows: formation.rows.iter().map(|r| step(r, 0, 1)).collect(),
            dir: -formation.dir,
        }
    } else {
        Formation {
            rows: formation
                .rows
                .iter()
                .map(|r| step(r, formation.dir, 0))
                .collect(),
            dir: formation.dir,
        }
    }
}

/// True if any enemy body overlaps `target`.
pub fn formation_hits(formation: &Formation, target: &Rect) -> bool {
    formation
        .rows
        .iter()
        .flat_map(|r| r.enemies.iter())
        .any(|e| enemy_rect(e).overlaps(target))
}

/// Bottom edge of the lowest enemy, or 0 for an empty formation.
fn formation_bottom(formation: &Formation) -> i32 {
    formation
        .rows
        .iter()
        .flat_map(|r| r.enemies.iter())
        .map(|e| e.y + ENEMY_HEIGHT)
        .max()
        .unwrap_or(0)
}

// ── Menu-phase transitions ───────────────────────────────────────────────────

/// Buy one level of `kind`.  Silently ignored at the level cap; each
/// successful purchase applies its paired stat effect exactly once.
pub fn apply_upgrade(state: &GameState, kind: UpgradeKind) -> GameState {
    let mut stats = state.stats.clone();
    let mut player = state.player.clone();
    let mut player_bullets = state.player_bullets.clone();
    match kind {
        UpgradeKind::Speed => {
            if stats.speed_level >= LEVEL_CAP {
                return state.clone();
            }
            stats.speed_level += 1;
            player.velocity += 1;
        }
        UpgradeKind::Health => {
            if stats.health_level >= LEVEL_CAP {
                return state.clone();
            }
            stats.health_level += 1;
            player.max_health += 1;
        }
        UpgradeKind::FireRate => {
            if stats.fire_rate_level >= LEVEL_CAP {
                return state.clone();
            }
            stats.fire_rate_level += 1;
            player_bullets.cooldown_max -= 1;
        }
    }
    GameState {
        stats,
        player,
        player_bullets,
        ..state.clone()
    }
}

/// Leave the menu: rebuild every per-round entity from the current stats
/// and resume play.
pub fn start_next_round(state: &GameState) -> GameState {
    GameState {
        player: new_player(state.width, state.height, &state.stats),
        formation: new_formation(state.width),
        player_bullets: new_controller(Faction::Player, &state.stats),
        enemy_bullets: new_controller(Faction::Enemy, &state.stats),
        phase: Phase::Playing,
        menu_delay: None,
        frame: 0,
        ..state.clone()
    }
}

/// The lost round's exit: back to the menu, no token awarded.
pub fn return_to_menu(state: &GameState) -> GameState {
    GameState {
        phase: Phase::Menu,
        menu_delay: None,
        ..state.clone()
    }
}
