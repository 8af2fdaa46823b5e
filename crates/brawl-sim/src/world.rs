//! The world of one level attempt and its per-tick step.
//!
//! A [`World`] owns every entity of a session. [`World::step`] is its only
//! mutator: it runs the player, the companion, each enemy, items, the
//! spawner and feedback in a fixed order, and stops for good once a
//! terminal [`Signal`] has been raised.

use brawl_common::{EntityId, Facing, IdAllocator};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::ai::{AiContext, AiOutcome, EnemyAi};
use crate::attack::update_attacks;
use crate::combat::{death_effects, resolve_player_hits};
use crate::companion::Companion;
use crate::constants::{COMBO_BONUS_THRESHOLD, KILL_SCORE, KILL_SCORE_COMBO};
use crate::enemy::{Enemy, EnemyKind};
use crate::events::{Signal, SimEvent, StepReport};
use crate::feedback::Feedback;
use crate::input::InputState;
use crate::item::{FoodItem, ItemKind, Pickup};
use crate::kinematics::{JumpEvent, Kinematics};
use crate::level::LevelId;
use crate::player::Player;
use crate::rng::SimRng;
use crate::spawner::Spawner;
use crate::store::Store;

const FEEDBACK_RNG_SALT: u64 = 0xfeed;

/// Complete simulation state of one level attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    level: LevelId,
    tick: u64,
    score: u32,
    player: Player,
    companion: Companion,
    enemies: Store<Enemy>,
    items: Store<FoodItem>,
    fx: Feedback,
    spawner: Spawner,
    kinematics: Kinematics,
    ids: IdAllocator,
    rng: SimRng,
    outcome: Option<Signal>,
}

impl World {
    /// Creates a fresh level attempt with score 0 and a full-health player.
    #[must_use]
    pub fn new(level: LevelId, seed: u64) -> Self {
        let rng = SimRng::with_seed(seed);
        Self {
            level,
            tick: 0,
            score: 0,
            player: Player::default(),
            companion: Companion::default(),
            enemies: Store::new(),
            items: Store::new(),
            fx: Feedback::new(rng.fork(FEEDBACK_RNG_SALT)),
            spawner: Spawner::new(0),
            kinematics: Kinematics::default(),
            ids: IdAllocator::new(),
            rng,
            outcome: None,
        }
    }

    /// Starts the level with a carried score; the boss threshold counts
    /// from here.
    #[must_use]
    pub fn with_score(mut self, score: u32) -> Self {
        self.score = score;
        self.spawner = Spawner::new(score);
        self
    }

    /// Starts the level with the given player HP.
    #[must_use]
    pub fn with_player_hp(mut self, hp: i32) -> Self {
        self.player = self.player.with_hp(hp);
        self
    }

    /// Grants the player invincibility for the first ticks.
    #[must_use]
    pub fn with_spawn_invincibility(mut self, ticks: u32) -> Self {
        self.player = self.player.with_invincibility(ticks);
        self
    }

    // ========================================================================
    // Read access
    // ========================================================================

    /// Level being played.
    #[must_use]
    pub const fn level(&self) -> LevelId {
        self.level
    }

    /// Ticks stepped so far (hitstop ticks excluded).
    #[must_use]
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Session score.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// The player.
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// The companion.
    #[must_use]
    pub const fn companion(&self) -> &Companion {
        &self.companion
    }

    /// Live enemies in spawn order.
    pub fn enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().map(|(_, e)| e)
    }

    /// Number of live enemies.
    #[must_use]
    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    /// Live enemy by id.
    #[must_use]
    pub fn enemy(&self, id: EntityId) -> Option<&Enemy> {
        self.enemies.get(id)
    }

    /// The level boss, once it has arrived and while it lives.
    #[must_use]
    pub fn boss(&self) -> Option<&Enemy> {
        self.enemies().find(|e| e.kind().is_boss())
    }

    /// Items lying around.
    pub fn items(&self) -> impl Iterator<Item = &FoodItem> {
        self.items.iter().map(|(_, i)| i)
    }

    /// Particles, texts and screen shake.
    #[must_use]
    pub const fn feedback(&self) -> &Feedback {
        &self.fx
    }

    /// Spawn bookkeeping.
    #[must_use]
    pub const fn spawner(&self) -> &Spawner {
        &self.spawner
    }

    /// Terminal signal, once raised.
    #[must_use]
    pub const fn outcome(&self) -> Option<Signal> {
        self.outcome
    }

    /// Whether stepping has stopped for good.
    #[must_use]
    pub const fn is_halted(&self) -> bool {
        self.outcome.is_some()
    }

    // ========================================================================
    // Setup helpers
    // ========================================================================

    /// Places an enemy facing the player. Returns its id.
    pub fn spawn_enemy(&mut self, kind: EnemyKind, pos: Vec2) -> EntityId {
        let facing = Facing::toward(self.player.pos.x - pos.x);
        self.insert_enemy(kind, pos, facing)
    }

    /// Tosses an item into the world at `pos`. Returns its id.
    pub fn drop_item(&mut self, kind: ItemKind, pos: Vec2) -> EntityId {
        let id = self.ids.next_id();
        self.items.insert(id, FoodItem::tossed(kind, pos, self.tick));
        id
    }

    /// Mutable access to a live enemy, for scripted setups.
    pub fn enemy_mut(&mut self, id: EntityId) -> Option<&mut Enemy> {
        self.enemies.get_mut(id)
    }

    /// Mutable access to the player, for scripted setups.
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    fn insert_enemy(&mut self, kind: EnemyKind, pos: Vec2, facing: Facing) -> EntityId {
        let id = self.ids.next_id();
        self.enemies.insert(id, Enemy::spawn(id, kind, pos, facing));
        id
    }

    // ========================================================================
    // Step
    // ========================================================================

    /// Advances the world by one tick.
    pub fn step(&mut self, input: &InputState) -> StepReport {
        if self.is_halted() {
            return StepReport::default();
        }
        if self.player.hitstop > 0 {
            self.player.hitstop -= 1;
            return StepReport::frozen();
        }

        self.tick += 1;
        self.fx.begin_tick(self.tick);
        let mut events = Vec::new();

        self.update_player(input, &mut events);
        self.update_companion(&mut events);

        if let Some(signal) = self.update_enemies(&mut events) {
            return self.finish(signal, events);
        }
        self.enemies.compact();

        self.update_items(&mut events);
        self.update_spawner(&mut events);
        self.fx.update();

        StepReport {
            signal: None,
            events,
            frozen: false,
        }
    }

    fn update_player(&mut self, input: &InputState, events: &mut Vec<SimEvent>) {
        if self.player.update_idle(input, &mut self.fx) {
            events.push(SimEvent::StartedEating);
        }

        self.kinematics.step_planar(&mut self.player, input.intent());
        match self
            .kinematics
            .step_jump(&mut self.player, input.jump, &mut self.fx)
        {
            Some(JumpEvent::TookOff) => events.push(SimEvent::Jumped),
            Some(JumpEvent::Landed) => events.push(SimEvent::Landed),
            None => {},
        }

        if let Some(attack) = update_attacks(&mut self.player, input, &mut self.fx) {
            for enemy in self.enemies.values_mut() {
                enemy.body.hit_this_swing = false;
            }
            events.push(SimEvent::AttackStarted { attack });
        }
    }

    fn update_companion(&mut self, events: &mut Vec<SimEvent>) {
        let threats: Vec<Vec2> = self.enemies().map(|e| e.body.pos).collect();
        self.companion.update_movement(&self.player, &threats);

        if let Some(drop) = self.companion.update_throw(&mut self.rng) {
            let item = self.drop_item(drop.kind, drop.pos);
            events.push(SimEvent::ItemDropped {
                item,
                kind: drop.kind,
            });
        }
    }

    /// Runs every enemy: knockback recovery or behaviour, then the player's
    /// hits on it. Returns a terminal signal as soon as one is raised.
    fn update_enemies(&mut self, events: &mut Vec<SimEvent>) -> Option<Signal> {
        let Self {
            level,
            tick,
            score,
            player,
            companion,
            enemies,
            fx,
            ..
        } = self;

        for slot in enemies.live_mut() {
            let id = slot.id();
            let enemy = &mut slot.value;
            if enemy.body.recover_knockback() {
                continue;
            }

            let mut ctx = AiContext {
                player: &mut *player,
                companion: &mut *companion,
                fx: &mut *fx,
                events: &mut *events,
                tick: *tick,
            };
            if enemy.brain.advance(&mut enemy.body, &mut ctx) == AiOutcome::PlayerKilled {
                return Some(Signal::GameOver { score: *score });
            }

            let Some(hit) = resolve_player_hits(&mut enemy.body, player, fx) else {
                continue;
            };
            let kind = enemy.kind();
            events.push(SimEvent::EnemyHit {
                enemy: id,
                kind,
                attack: hit.attack,
                damage: hit.damage,
            });
            if !hit.killed {
                enemy.brain.on_damaged(&enemy.body, fx, events);
                continue;
            }

            death_effects(&enemy.body, fx);
            slot.kill();
            if kind.is_boss() {
                events.push(SimEvent::EnemyKilled {
                    enemy: id,
                    kind,
                    score: 0,
                });
                return Some(level.boss_defeated(*score, player.hp));
            }

            let bonus = if player.combo >= COMBO_BONUS_THRESHOLD {
                KILL_SCORE_COMBO
            } else {
                KILL_SCORE
            };
            *score += bonus;
            events.push(SimEvent::EnemyKilled {
                enemy: id,
                kind,
                score: bonus,
            });
        }
        None
    }

    fn update_items(&mut self, events: &mut Vec<SimEvent>) {
        let tick = self.tick;
        for slot in self.items.live_mut() {
            let item = slot.id();
            slot.value.fall();
            if slot.value.touches(&self.player) {
                let healed = match slot.value.apply(&mut self.player, &mut self.fx) {
                    Pickup::Healed(amount) => amount,
                    Pickup::Penalty => 0,
                };
                events.push(SimEvent::ItemPickedUp {
                    item,
                    kind: slot.value.kind,
                    healed,
                });
                slot.kill();
            } else if slot.value.expired(tick) {
                events.push(SimEvent::ItemExpired { item });
                slot.kill();
            }
        }
        self.items.compact();
    }

    fn update_spawner(&mut self, events: &mut Vec<SimEvent>) {
        let config = self.level.config();
        let Some(order) = self.spawner.tick(
            config,
            self.score,
            self.player.pos,
            self.enemies.len(),
            &mut self.rng,
        ) else {
            return;
        };

        let enemy = self.insert_enemy(order.kind, order.pos, order.facing);
        if !order.is_boss() {
            events.push(SimEvent::EnemySpawned {
                enemy,
                kind: order.kind,
            });
            return;
        }

        self.fx.shake(config.boss_shake);
        self.fx.text(
            self.player.pos + Vec2::new(200.0, -100.0),
            config.boss_announce,
            config.announce_color,
            18.0,
        );
        info!(
            "{} arrived in {} at tick {} (score {})",
            order.kind, self.level, self.tick, self.score
        );
        events.push(SimEvent::BossSpawned {
            enemy,
            kind: order.kind,
        });
    }

    fn finish(&mut self, signal: Signal, events: Vec<SimEvent>) -> StepReport {
        self.enemies.compact();
        self.outcome = Some(signal);
        match signal {
            Signal::GameOver { .. } => info!("Player down in {} at tick {}: {}", self.level, self.tick, signal),
            _ => info!("Boss down in {} at tick {}: {}", self.level, self.tick, signal),
        }
        debug!("{} events in the final tick", events.len());
        StepReport {
            signal: Some(signal),
            events,
            frozen: false,
        }
    }
}
