//! The player avatar: movement, manual and automatic sword attacks,
//! and the experience/leveling curve.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, PI};

use super::collision::in_attack_cone;
use super::enemy::Enemy;
use super::state::Rect;
use super::tick::TickInput;
use crate::consts::*;
use crate::presets::PlayerColors;

/// Four-way facing; diagonals collapse to the last pressed axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Up,
    Down,
    Left,
    Right,
}

impl Facing {
    /// Canonical angle in screen coordinates (y down)
    pub fn angle(&self) -> f32 {
        match self {
            Facing::Right => 0.0,
            Facing::Down => FRAC_PI_2,
            Facing::Left => PI,
            Facing::Up => -FRAC_PI_2,
        }
    }
}

/// The player avatar. One per session, replaced wholesale on restart.
#[derive(Debug, Clone)]
pub struct Player {
    pub rect: Rect,
    pub speed: f32,
    pub facing: Facing,
    pub level: u32,
    pub exp: f32,
    pub exp_to_next_level: f32,
    pub attacking: bool,
    /// Milliseconds left in the current swing
    pub attack_timer_ms: f32,
    pub attack_range: f32,
    pub attack_power: f32,
    pub auto_attack_range: f32,
    pub auto_attack_cooldown_ms: f64,
    pub last_auto_attack_ms: f64,
    pub colors: PlayerColors,
    pub power_ups: u32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            rect: Rect::new(pos.x, pos.y, PLAYER_SIZE, PLAYER_SIZE),
            speed: PLAYER_SPEED,
            facing: Facing::Right,
            level: 1,
            exp: 0.0,
            exp_to_next_level: EXP_TO_FIRST_LEVEL,
            attacking: false,
            attack_timer_ms: 0.0,
            attack_range: ATTACK_RANGE,
            attack_power: 1.0,
            auto_attack_range: AUTO_ATTACK_RANGE,
            auto_attack_cooldown_ms: AUTO_ATTACK_COOLDOWN_MS,
            last_auto_attack_ms: 0.0,
            colors: PlayerColors::default(),
            power_ups: 0,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    /// One tick of movement, targeting, and attack bookkeeping
    pub fn update(
        &mut self,
        input: &TickInput,
        bounds: Vec2,
        enemies: &[Enemy],
        now_ms: f64,
        dt: f32,
    ) {
        let scale = dt * 60.0;

        // Axis-independent movement; the last processed axis wins the facing
        if input.left {
            self.rect.x -= self.speed * scale;
            self.facing = Facing::Left;
        }
        if input.right {
            self.rect.x += self.speed * scale;
            self.facing = Facing::Right;
        }
        if input.up {
            self.rect.y -= self.speed * scale;
            self.facing = Facing::Up;
        }
        if input.down {
            self.rect.y += self.speed * scale;
            self.facing = Facing::Down;
        }

        self.rect.x = self.rect.x.clamp(0.0, bounds.x - self.rect.width);
        self.rect.y = self.rect.y.clamp(0.0, bounds.y - self.rect.height);

        // Automatic targeting, once per cooldown window
        if !self.attacking && now_ms - self.last_auto_attack_ms >= self.auto_attack_cooldown_ms {
            if let Some((nearest, distance)) = self.nearest_enemy(enemies) {
                if distance <= self.auto_attack_range {
                    self.face_toward(nearest.center());
                    self.begin_attack(now_ms);
                }
            }
        }

        // Manual attack bypasses the cooldown but cannot interrupt a swing
        if input.attack && !self.attacking {
            self.begin_attack(now_ms);
        }

        if self.attacking {
            self.attack_timer_ms -= dt * 1000.0;
            if self.attack_timer_ms <= 0.0 {
                self.attacking = false;
            }
        }
    }

    fn nearest_enemy<'a>(&self, enemies: &'a [Enemy]) -> Option<(&'a Enemy, f32)> {
        let center = self.center();
        enemies
            .iter()
            .filter(|e| e.alive)
            .map(|e| (e, center.distance(e.center())))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Dominant axis determines the four-way facing
    fn face_toward(&mut self, target: Vec2) {
        let delta = target - self.center();
        self.facing = if delta.x.abs() > delta.y.abs() {
            if delta.x > 0.0 { Facing::Right } else { Facing::Left }
        } else if delta.y > 0.0 {
            Facing::Down
        } else {
            Facing::Up
        };
    }

    fn begin_attack(&mut self, now_ms: f64) {
        self.attacking = true;
        self.attack_timer_ms = ATTACK_DURATION_MS;
        self.last_auto_attack_ms = now_ms;
    }

    /// Hit test for one enemy. Only meaningful while a swing is in flight;
    /// the cone is 180° wide, centered on the facing.
    pub fn check_attack_collision(&self, enemy: &Enemy) -> bool {
        if !self.attacking {
            return false;
        }
        in_attack_cone(
            self.center(),
            enemy.center(),
            self.facing.angle(),
            self.attack_range,
        )
    }

    /// Accumulate experience, leveling as many times as the amount covers.
    /// Returns the number of levels gained.
    pub fn gain_exp(&mut self, amount: f32) -> u32 {
        self.exp += amount;
        let mut gained = 0;
        while self.exp >= self.exp_to_next_level {
            self.level_up();
            gained += 1;
        }
        gained
    }

    fn level_up(&mut self) {
        self.level += 1;
        self.exp -= self.exp_to_next_level;
        self.exp_to_next_level = (self.exp_to_next_level * EXP_CURVE_FACTOR).floor();

        self.speed += 0.2;
        self.attack_range += 10.0;
        self.auto_attack_range += 15.0;
        self.attack_power += 0.5;
        self.auto_attack_cooldown_ms =
            (self.auto_attack_cooldown_ms - 20.0).max(AUTO_ATTACK_COOLDOWN_FLOOR_MS);
    }

    /// Collectible-driven boost, independent of leveling
    pub fn power_up(&mut self) {
        self.power_ups += 1;
        self.attack_power = 1.0 + self.power_ups as f32 * 0.5;
        self.attack_range += 5.0;
    }
}
