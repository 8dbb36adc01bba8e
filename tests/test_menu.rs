use space_siege::entities::UpgradeKind;
use space_siege::menu::{hit_test, layout, MenuAction};

const WIDTH: u16 = 60;
const HEIGHT: u16 = 24;

#[test]
fn upgrade_buttons_sit_beside_their_bars() {
    let l = layout(WIDTH, HEIGHT);
    for (bar, button) in [
        (l.speed_bar, l.speed_button),
        (l.health_bar, l.health_button),
        (l.fire_rate_bar, l.fire_rate_button),
    ] {
        assert_eq!(bar.y, button.y);
        assert!(button.x > bar.x + bar.width); // no overlap between bar and button
    }
    // the three lines are distinct rows
    assert!(l.speed_button.y < l.health_button.y);
    assert!(l.health_button.y < l.fire_rate_button.y);
}

#[test]
fn clicks_on_each_button_resolve_to_its_action() {
    let l = layout(WIDTH, HEIGHT);
    let centre = |r: space_siege::entities::Rect| (r.x + r.width / 2, r.y);
    let (x, y) = centre(l.speed_button);
    assert_eq!(
        hit_test(&l, x, y),
        Some(MenuAction::Upgrade(UpgradeKind::Speed))
    );
    let (x, y) = centre(l.health_button);
    assert_eq!(
        hit_test(&l, x, y),
        Some(MenuAction::Upgrade(UpgradeKind::Health))
    );
    let (x, y) = centre(l.fire_rate_button);
    assert_eq!(
        hit_test(&l, x, y),
        Some(MenuAction::Upgrade(UpgradeKind::FireRate))
    );
    let b = l.next_round_button;
    assert_eq!(
        hit_test(&l, b.x + b.width / 2, b.y + 1),
        Some(MenuAction::NextRound)
    );
}

#[test]
fn button_edges_are_clickable() {
    let l = layout(WIDTH, HEIGHT);
    let b = l.speed_button;
    assert_eq!(
        hit_test(&l, b.x, b.y),
        Some(MenuAction::Upgrade(UpgradeKind::Speed))
    );
    assert_eq!(
        hit_test(&l, b.x + b.width, b.y),
        Some(MenuAction::Upgrade(UpgradeKind::Speed))
    );
}

#[test]
fn clicks_on_bars_and_empty_space_are_ignored() {
    let l = layout(WIDTH, HEIGHT);
    // the bars show progress but are not buttons
    assert_eq!(hit_test(&l, l.speed_bar.x, l.speed_bar.y), None);
    // nowhere near anything
    assert_eq!(hit_test(&l, 1, 1), None);
    assert_eq!(hit_test(&l, WIDTH as i32 - 1, HEIGHT as i32 - 1), None);
}

#[test]
fn next_round_button_is_centred_near_the_bottom() {
    let l = layout(WIDTH, HEIGHT);
    let b = l.next_round_button;
    assert_eq!(b.x, (WIDTH as i32 - b.width) / 2);
    assert!(b.y + b.height < HEIGHT as i32);
    assert!(b.y > l.fire_rate_button.y);
}

#[test]
fn layout_is_deterministic_for_a_given_screen() {
    // draw code and click code both call layout(); same inputs, same boxes
    let a = layout(WIDTH, HEIGHT);
    let b = layout(WIDTH, HEIGHT);
    assert_eq!(a.speed_button, b.speed_button);
    assert_eq!(a.health_button, b.health_button);
    assert_eq!(a.fire_rate_button, b.fire_rate_button);
    assert_eq!(a.next_round_button, b.next_round_button);
}
