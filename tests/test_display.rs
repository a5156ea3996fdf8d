use rocket_defense::compute::init_state;
use rocket_defense::config::GameConfig;
use crossterm::style::{Color, SetForegroundColor};
use rocket_defense::display::{projectile_color, render, CellSpan, Viewport};
use rocket_defense::entities::{Projectile, ProjectileOwner, Rect};

fn render_to_string(state: &rocket_defense::GameState, view: Viewport) -> String {
    let mut buf: Vec<u8> = Vec::new();
    render(&mut buf, state, view).unwrap();
    String::from_utf8(buf).unwrap()
}

// ── Viewport projection ───────────────────────────────────────────────────────

#[test]
fn project_scales_field_to_cells() {
    let view = Viewport::new(60, 50); // 10 field units per cell
    let span = view.project(&Rect::new(80.0, 60.0, 40.0, 30.0), 600.0, 500.0);
    assert_eq!(span, Some(CellSpan { col0: 8, row0: 6, col1: 11, row1: 8 }));
}

#[test]
fn thin_box_covers_one_cell() {
    let view = Viewport::new(60, 50);
    let span = view.project(&Rect::new(297.0, 200.0, 6.0, 1.0), 600.0, 500.0).unwrap();
    assert!(span.col1 >= span.col0);
    assert_eq!(span.row0, span.row1);
}

#[test]
fn offscreen_box_is_skipped() {
    let view = Viewport::new(60, 50);
    assert_eq!(view.project(&Rect::new(10.0, -999.0, 6.0, 12.0), 600.0, 500.0), None);
    assert_eq!(view.project(&Rect::new(10.0, 510.0, 6.0, 12.0), 600.0, 500.0), None);
}

#[test]
fn partially_visible_box_is_clipped() {
    let view = Viewport::new(60, 50);
    let span = view.project(&Rect::new(590.0, -5.0, 40.0, 30.0), 600.0, 500.0).unwrap();
    assert_eq!((span.col1, span.row0), (59, 0));
}

#[test]
fn empty_viewport_draws_nothing() {
    let view = Viewport::new(0, 0);
    assert_eq!(view.project(&Rect::new(0.0, 0.0, 10.0, 10.0), 600.0, 500.0), None);
}

// ── Frames ────────────────────────────────────────────────────────────────────

#[test]
fn live_frame_draws_ship_enemies_and_projectiles() {
    let mut state = init_state(&GameConfig::default());
    state.player_projectiles.push(Projectile {
        x: 297.0,
        y: 300.0,
        w: 6.0,
        h: 12.0,
        owner: ProjectileOwner::Player,
    });
    let out = render_to_string(&state, Viewport::new(80, 40));
    assert!(out.contains("▲"));
    assert!(out.contains("█"));
    assert!(out.contains("│"));
    assert!(!out.contains("GAME OVER"));
}

#[test]
fn projectiles_coloured_by_owner() {
    assert_eq!(projectile_color(ProjectileOwner::Player), Color::White);
    assert_eq!(projectile_color(ProjectileOwner::Enemy), Color::Yellow);

    let mut state = init_state(&GameConfig::default());
    state.enemy_projectiles.push(Projectile {
        x: 297.0,
        y: 300.0,
        w: 6.0,
        h: 12.0,
        owner: ProjectileOwner::Enemy,
    });
    let out = render_to_string(&state, Viewport::new(80, 40));
    assert!(out.contains(&SetForegroundColor(Color::Yellow).to_string()));
    assert!(!out.contains(&SetForegroundColor(Color::White).to_string()));
}

#[test]
fn game_over_frame_draws_only_the_banner() {
    let mut state = init_state(&GameConfig::default());
    state.ship.alive = false;
    let out = render_to_string(&state, Viewport::new(80, 40));
    assert!(out.contains("GAME OVER"));
    assert!(!out.contains("█"));
    assert!(!out.contains("▲"));
}

#[test]
fn destroyed_enemies_are_not_drawn() {
    let mut state = init_state(&GameConfig::default());
    for e in &mut state.enemies {
        e.alive = false;
    }
    let with_dead = render_to_string(&state, Viewport::new(60, 50));
    // Only the ship hull remains: 4 cols × 4 rows
    assert_eq!(with_dead.matches("████").count(), 4);
    assert_eq!(with_dead.matches('█').count(), 16);
}

#[test]
fn render_does_not_mutate_state() {
    let state = init_state(&GameConfig::default());
    let before = state.clone();
    let _ = render_to_string(&state, Viewport::new(80, 40));
    assert_eq!(state, before);
}
