//! Consumable items dropped by the companion.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::{
    ITEM_GRAVITY, ITEM_LIFETIME, ITEM_TOSS_VY, PICKUP_MAX_Z, PICKUP_RANGE_X, PICKUP_RANGE_Y,
};
use crate::feedback::{palette, Burst, Feedback, ParticleStyle};
use crate::player::Player;

/// Kind of dropped item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Useless manual (penalty).
    Manual,
    /// Useless compass (penalty).
    Compass,
    /// Large heal.
    Burger,
    /// Small heal.
    Fries,
}

impl ItemKind {
    /// Picks a kind from a uniform roll in `[0, 1)`, one quarter each.
    #[must_use]
    pub fn from_roll(roll: f32) -> Self {
        if roll < 0.25 {
            Self::Manual
        } else if roll < 0.5 {
            Self::Compass
        } else if roll < 0.75 {
            Self::Burger
        } else {
            Self::Fries
        }
    }

    /// Penalty items cancel the player's attacks instead of healing.
    #[must_use]
    pub const fn is_penalty(self) -> bool {
        matches!(self, Self::Manual | Self::Compass)
    }

    /// HP restored on pickup.
    #[must_use]
    pub const fn heal_amount(self) -> i32 {
        match self {
            Self::Burger => 25,
            Self::Fries => 15,
            Self::Manual | Self::Compass => 0,
        }
    }
}

/// Result of collecting an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pickup {
    /// HP actually restored.
    Healed(i32),
    /// Attacks were cancelled.
    Penalty,
}

/// An item lying (or landing) in the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    /// Kind
    pub kind: ItemKind,
    /// Ground position
    pub pos: Vec2,
    /// Tick the item was dropped on
    pub spawn_tick: u64,
    /// Vertical speed of the toss
    pub vy: f32,
    /// Toss finished
    pub landed: bool,
}

impl FoodItem {
    /// Creates a freshly tossed item.
    #[must_use]
    pub fn tossed(kind: ItemKind, pos: Vec2, tick: u64) -> Self {
        Self {
            kind,
            pos,
            spawn_tick: tick,
            vy: ITEM_TOSS_VY,
            landed: false,
        }
    }

    /// Advances the toss until the item lands.
    pub fn fall(&mut self) {
        if self.landed {
            return;
        }
        self.vy += ITEM_GRAVITY;
        self.pos.y += self.vy;
        if self.vy > 0.0 {
            self.landed = true;
            self.vy = 0.0;
        }
    }

    /// Whether the player is close enough and low enough to collect it.
    #[must_use]
    pub fn touches(&self, player: &Player) -> bool {
        (self.pos.x - player.pos.x).abs() < PICKUP_RANGE_X
            && (self.pos.y - player.pos.y).abs() < PICKUP_RANGE_Y
            && player.z < PICKUP_MAX_Z
    }

    /// Whether the item has outlived its lifetime at `tick`.
    #[must_use]
    pub fn expired(&self, tick: u64) -> bool {
        tick.saturating_sub(self.spawn_tick) > ITEM_LIFETIME
    }

    /// Applies the item to the player.
    pub fn apply(&self, player: &mut Player, fx: &mut Feedback) -> Pickup {
        if self.kind.is_penalty() {
            player.cancel_actions();
            fx.text(player.overhead(55.0), "💢 USELESS!", palette::PURPLE, 14.0);
            return Pickup::Penalty;
        }

        let amount = self.kind.heal_amount();
        let healed = player.heal(amount);
        fx.text(
            player.overhead(55.0),
            format!("+{amount} ❤"),
            palette::GREEN,
            16.0,
        );
        fx.burst(
            Vec2::new(self.pos.x, self.pos.y - 10.0),
            Burst::new(5, ParticleStyle::Spark, palette::GREEN)
                .with_spread(2.0)
                .with_life(15)
                .with_size(3.0),
        );
        Pickup::Healed(healed)
    }
}
