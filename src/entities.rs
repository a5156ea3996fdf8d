//! All game entity types — plain data plus bounding-box helpers.

use std::time::Duration;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned box in field coordinates (y grows downward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Rect { x, y, w, h }
    }

    /// Strict overlap: boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn sign(self) -> f64 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

// ── Ship ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub speed: f64,
    /// Game time at which the fire cooldown lifts; `None` when ready to fire.
    pub cooldown_until: Option<Duration>,
    pub alive: bool,
}

impl Ship {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    pub fn cooldown_active(&self) -> bool {
        self.cooldown_until.is_some()
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProjectileOwner {
    Player,
    Enemy,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub owner: ProjectileOwner,
}

impl Projectile {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub alive: bool,
}

impl Enemy {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

/// State shared by the whole enemy grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Formation {
    pub direction: Direction,
    /// Game time of the last enemy-fire check that crossed the interval.
    pub last_shot: Duration,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire world.  Owned by whoever drives the simulation and mutated only
/// through `compute::tick`.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub ship: Ship,
    pub player_projectiles: Vec<Projectile>,
    pub enemy_projectiles: Vec<Projectile>,
    /// Row-major rows×cols grid.  Its length never changes after creation.
    pub enemies: Vec<Enemy>,
    pub formation: Formation,
    pub width: f64,
    pub height: f64,
}

impl GameState {
    pub fn status(&self) -> GameStatus {
        if self.ship.alive {
            GameStatus::Playing
        } else {
            GameStatus::GameOver
        }
    }

    pub fn alive_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| e.alive)
    }
}
