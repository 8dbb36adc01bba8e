//! Upgrade-menu geometry.
//!
//! Every rectangle the menu draws is produced here, and the click handler
//! tests against the same rectangles, so the drawn buttons and the
//! clickable regions cannot drift apart.

use crate::compute::LEVEL_CAP;
use crate::entities::{Rect, UpgradeKind};

/// Cells of bar filled per upgrade level.
pub const BAR_CELLS_PER_LEVEL: i32 = 4;

pub const BAR_X: i32 = 4;
/// Row of the first upgrade line.
pub const BAR_TOP: i32 = 6;
/// Rows from one upgrade line to the next.
pub const BAR_SPACING: i32 = 3;
pub const BUTTON_WIDTH: i32 = 13;
const NEXT_ROUND_WIDTH: i32 = 16;

/// What a menu click resolves to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MenuAction {
    Upgrade(UpgradeKind),
    NextRound,
}

/// Positions of everything drawn and clickable on the menu screen.
#[derive(Clone, Copy, Debug)]
pub struct MenuLayout {
    pub speed_bar: Rect,
    pub health_bar: Rect,
    pub fire_rate_bar: Rect,
    pub speed_button: Rect,
    pub health_button: Rect,
    pub fire_rate_button: Rect,
    pub next_round_button: Rect,
}

pub fn layout(width: u16, height: u16) -> MenuLayout {
    let bar_width = BAR_CELLS_PER_LEVEL * LEVEL_CAP as i32;
    let button_x = BAR_X + bar_width + 3;
    let line = |i: i32| BAR_TOP + i * BAR_SPACING;
    let bar = |i: i32| Rect {
        x: BAR_X,
        y: line(i),
        width: bar_width,
        height: 1,
    };
    let button = |i: i32| Rect {
        x: button_x,
        y: line(i),
        width: BUTTON_WIDTH,
        height: 1,
    };
    MenuLayout {
        speed_bar: bar(0),
        health_bar: bar(1),
        fire_rate_bar: bar(2),
        speed_button: button(0),
        health_button: button(1),
        fire_rate_button: button(2),
        next_round_button: Rect {
            x: (width as i32 - NEXT_ROUND_WIDTH) / 2,
            y: height as i32 - 6,
            width: NEXT_ROUND_WIDTH,
            height: 3,
        },
    }
}

/// Map a click at cell (x, y) to the action it lands on.  Clicks outside
/// every interactive region resolve to `None` and are ignored.
pub fn hit_test(layout: &MenuLayout, x: i32, y: i32) -> Option<MenuAction> {
    if layout.speed_button.contains(x, y) {
        Some(MenuAction::Upgrade(UpgradeKind::Speed))
    } else if layout.health_button.contains(x, y) {
        Some(MenuAction::Upgrade(UpgradeKind::Health))
    } else if layout.fire_rate_button.contains(x, y) {
        Some(MenuAction::Upgrade(UpgradeKind::FireRate))
    } else if layout.next_round_button.contains(x, y) {
        Some(MenuAction::NextRound)
    } else {
        None
    }
}
