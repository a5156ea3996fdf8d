//! Pure game-logic functions.
//!
//! `tick` takes an immutable reference to the current `GameState`, the input
//! sampled for this frame, the current game time and an RNG handle, and returns
//! a brand-new `GameState`.  Side effects are limited to the injected RNG and
//! log output.  Game time is a monotonic `Duration` since the game started; the
//! engine never reads a clock itself.

use std::time::Duration;

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{
    Direction, Enemy, Formation, GameState, Projectile, ProjectileOwner, Ship,
};
use crate::input::TickInput;

/// Where a projectile is parked after hitting an enemy; the next prune pass
/// drops it.
pub const SPENT_PROJECTILE_Y: f64 = -999.0;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial world: ship centred near the bottom, full enemy grid,
/// formation heading right.
pub fn init_state(config: &GameConfig) -> GameState {
    let ship = Ship {
        x: config.ship_start_x(),
        y: config.field_height - config.ship_bottom_offset,
        w: config.ship_width,
        h: config.ship_height,
        speed: config.ship_speed,
        cooldown_until: None,
        alive: true,
    };

    let mut enemies = Vec::with_capacity(config.enemy_rows * config.enemy_cols);
    for r in 0..config.enemy_rows {
        for c in 0..config.enemy_cols {
            enemies.push(Enemy {
                x: config.grid_origin_x + c as f64 * config.grid_spacing_x,
                y: config.grid_origin_y + r as f64 * config.grid_spacing_y,
                w: config.enemy_width,
                h: config.enemy_height,
                alive: true,
            });
        }
    }

    log::info!(
        "new game: {}x{} field, {} enemies",
        config.field_width,
        config.field_height,
        enemies.len()
    );

    GameState {
        ship,
        player_projectiles: Vec::new(),
        enemy_projectiles: Vec::new(),
        enemies,
        formation: Formation {
            direction: Direction::Right,
            last_shot: Duration::ZERO,
        },
        width: config.field_width,
        height: config.field_height,
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one tick.  The step order below is observable
/// (collisions see post-movement positions) and must not be rearranged.
pub fn tick(
    state: &GameState,
    input: &TickInput,
    now: Duration,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> GameState {
    // ── 1. Frozen once the ship is gone ──────────────────────────────────────
    if !state.ship.alive {
        return state.clone();
    }

    let mut next = state.clone();

    release_cooldown(&mut next.ship, now);
    move_ship(&mut next.ship, input, next.width);
    if input.fire {
        ship_fire(&mut next, now, config);
    }
    advance_projectiles(&mut next, config);
    advance_formation(&mut next, config);
    enemy_fire(&mut next, now, config, rng);
    resolve_player_hits(&mut next);
    resolve_ship_hits(&mut next);

    next
}

// ── 2. Cooldown ──────────────────────────────────────────────────────────────

fn release_cooldown(ship: &mut Ship, now: Duration) {
    if matches!(ship.cooldown_until, Some(until) if until <= now) {
        ship.cooldown_until = None;
    }
}

// ── 3. Ship movement ─────────────────────────────────────────────────────────

fn move_ship(ship: &mut Ship, input: &TickInput, width: f64) {
    if input.left && ship.x > 0.0 {
        ship.x -= ship.speed;
    }
    if input.right && ship.x < width - ship.w {
        ship.x += ship.speed;
    }
}

// ── 4. Ship firing ───────────────────────────────────────────────────────────

fn ship_fire(state: &mut GameState, now: Duration, config: &GameConfig) {
    let ship = &mut state.ship;
    if ship.cooldown_active() {
        return;
    }
    state.player_projectiles.push(Projectile {
        x: ship.x + ship.w / 2.0 - config.projectile_width / 2.0,
        y: ship.y,
        w: config.projectile_width,
        h: config.projectile_height,
        owner: ProjectileOwner::Player,
    });
    ship.cooldown_until = Some(now + config.fire_cooldown());
}

// ── 5. Projectile advance + prune ────────────────────────────────────────────

fn advance_projectiles(state: &mut GameState, config: &GameConfig) {
    let top_limit = -config.prune_margin;
    for p in &mut state.player_projectiles {
        p.y -= config.player_projectile_speed;
    }
    state.player_projectiles.retain(|p| p.y > top_limit);

    let bottom_limit = state.height + config.prune_margin;
    for p in &mut state.enemy_projectiles {
        p.y += config.enemy_projectile_speed;
    }
    state.enemy_projectiles.retain(|p| p.y < bottom_limit);
}

// ── 6. Formation ─────────────────────────────────────────────────────────────

fn advance_formation(state: &mut GameState, config: &GameConfig) {
    let dx = config.formation_step * state.formation.direction.sign();
    let width = state.width;

    let mut hit_side = false;
    for enemy in state.enemies.iter_mut().filter(|e| e.alive) {
        enemy.x += dx;
        if enemy.x <= 0.0 || enemy.x + enemy.w >= width {
            hit_side = true;
        }
    }

    if hit_side {
        state.formation.direction = state.formation.direction.flipped();
        for enemy in state.enemies.iter_mut().filter(|e| e.alive) {
            enemy.y += config.formation_drop;
        }
        log::debug!(
            "formation reversed, now heading {:?}",
            state.formation.direction
        );
    }
}

// ── 7. Enemy firing ──────────────────────────────────────────────────────────

fn enemy_fire(state: &mut GameState, now: Duration, config: &GameConfig, rng: &mut impl Rng) {
    if now.saturating_sub(state.formation.last_shot) <= config.enemy_fire_interval() {
        return;
    }

    let shooters: Vec<&Enemy> = state.alive_enemies().collect();
    if !shooters.is_empty() {
        let shooter = shooters[rng.gen_range(0..shooters.len())];
        let projectile = Projectile {
            x: shooter.x + shooter.w / 2.0 - config.projectile_width / 2.0,
            y: shooter.y + shooter.h,
            w: config.projectile_width,
            h: config.projectile_height,
            owner: ProjectileOwner::Enemy,
        };
        log::trace!("enemy fired from ({:.1}, {:.1})", projectile.x, projectile.y);
        state.enemy_projectiles.push(projectile);
    }
    // Reset even when nobody could shoot.
    state.formation.last_shot = now;
}

// ── 8. Collision: player projectiles ↔ enemies ──────────────────────────────

/// Every (projectile, enemy) pair is checked with no early exit.  A hit parks
/// the projectile at `SPENT_PROJECTILE_Y` and the scan goes on with the parked
/// position.
fn resolve_player_hits(state: &mut GameState) {
    for projectile in &mut state.player_projectiles {
        for enemy in &mut state.enemies {
            if enemy.alive && projectile.bounds().overlaps(&enemy.bounds()) {
                enemy.alive = false;
                projectile.y = SPENT_PROJECTILE_Y;
                log::debug!("enemy destroyed at ({:.1}, {:.1})", enemy.x, enemy.y);
            }
        }
    }
}

// ── 9. Collision: enemy projectiles ↔ ship ──────────────────────────────────

fn resolve_ship_hits(state: &mut GameState) {
    let ship_box = state.ship.bounds();
    if state
        .enemy_projectiles
        .iter()
        .any(|p| p.bounds().overlaps(&ship_box))
    {
        state.ship.alive = false;
        log::info!("ship destroyed at x={:.1}", state.ship.x);
    }
}
