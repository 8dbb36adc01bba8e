//! All game entity types — pure data, plus the rectangle geometry every
//! collision and click check shares.

// ── Geometry ─────────────────────────────────────────────────────────────────

/// Axis-aligned box in cell coordinates, top-left origin, y growing down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// AABB overlap test; touching edges count as contact.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.x + self.width < other.x
            || self.x > other.x + other.width
            || self.y + self.height < other.y
            || self.y > other.y + other.height)
    }

    /// True if the point lands on the rectangle (edges inclusive).
    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }
}

// ── Projectiles ──────────────────────────────────────────────────────────────

/// Which side a bullet controller fires for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Faction {
    Player,
    Enemy,
}

#[derive(Clone, Debug)]
pub struct Bullet {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// Cells moved per frame; the sign encodes direction (negative = up).
    pub velocity: i32,
}

impl Bullet {
    pub fn rect(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }
}

/// One faction's live bullets plus the fire-rate gate.
#[derive(Clone, Debug)]
pub struct BulletController {
    pub faction: Faction,
    /// Live bullets in firing order.
    pub bullets: Vec<Bullet>,
    /// Hard cap on simultaneously live bullets.
    pub max_live: usize,
    /// Frames until the next shot is allowed; 0 means ready.
    pub cooldown: u32,
    /// Value the cooldown resets to after each shot.
    /// Fire-rate upgrades lower it.
    pub cooldown_max: u32,
}

// ── Player & enemies ─────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum EnemyKind {
    Spacecraft,
    Octopus,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub x: i32,
    pub y: i32,
    pub kind: EnemyKind,
}

/// One rank of the descending formation.  Rows emptied by player fire are
/// dropped; a formation with no rows left signals the round is won.
#[derive(Clone, Debug)]
pub struct EnemyRow {
    pub enemies: Vec<Enemy>,
}

#[derive(Clone, Debug)]
pub struct Formation {
    pub rows: Vec<EnemyRow>,
    /// Horizontal march direction, +1 (right) or -1 (left).
    pub dir: i32,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// Cells moved per frame while a direction key is held.
    pub velocity: i32,
    /// Enemy-bullet hits the player can still absorb this round.
    pub health: u32,
    pub max_health: u32,
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
}

// ── Meta-progression ─────────────────────────────────────────────────────────

/// What a menu upgrade click buys.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UpgradeKind {
    Speed,
    Health,
    FireRate,
}

/// Upgrade levels and the token balance.  Survives across rounds
/// (in memory only — nothing is persisted).
#[derive(Clone, Debug, PartialEq)]
pub struct Stats {
    pub speed_level: u8,
    pub health_level: u8,
    pub fire_rate_level: u8,
    pub tokens: u32,
}

// ── Phase & master state ─────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Phase {
    Playing,
    GameOver { won: bool },
    Menu,
}

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub formation: Formation,
    pub player_bullets: BulletController,
    pub enemy_bullets: BulletController,
    pub stats: Stats,
    pub phase: Phase,
    /// Frames left on the win screen before the upgrade menu takes over.
    pub menu_delay: Option<u32>,
    pub frame: u64,
    pub width: u16,
    pub height: u16,
}
