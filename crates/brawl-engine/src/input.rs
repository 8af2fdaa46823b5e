//! Input sources for the headless runner.
//!
//! Real keyboard and touch capture live outside this workspace; the runner
//! only needs something that turns a world view into an [`InputState`].

use brawl_sim::{Brain, Enemy, InputState, JuggernautState, World};

/// Horizontal distance at which the autopilot swings.
const PUNCH_REACH: f32 = 70.0;
/// Depth misalignment the autopilot tolerates before stepping up or down.
const DEPTH_SLOP: f32 = 12.0;
/// Enemies this close count toward a crowd.
const CROWD_RADIUS: f32 = 140.0;
/// Crowd size that triggers the buff.
const CROWD_SIZE: usize = 3;
/// Distance at which an incoming charge is hopped over.
const DODGE_DISTANCE: f32 = 160.0;

/// Produces one input state per simulation tick.
pub trait InputSource {
    /// Input for the next tick of `world`.
    fn poll(&mut self, world: &World) -> InputState;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Never presses anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdleInput;

impl InputSource for IdleInput {
    fn poll(&mut self, _world: &World) -> InputState {
        InputState::idle()
    }

    fn name(&self) -> &'static str {
        "idle"
    }
}

/// Scripted player: chases the nearest enemy, punches in reach, buffs into
/// crowds and hops over boss charges.
#[derive(Debug, Default, Clone)]
pub struct AutoPilot {
    ticks: u64,
}

impl AutoPilot {
    /// Creates the autopilot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn charge_incoming(world: &World) -> bool {
        let player = world.player().pos;
        world.enemies().any(|enemy| match &enemy.brain {
            Brain::Juggernaut(ai) => {
                let near = (enemy.body.pos.x - player.x).abs() < DODGE_DISTANCE;
                near && matches!(
                    ai.state(),
                    JuggernautState::WindUp { .. } | JuggernautState::Charging { .. }
                )
            },
            _ => false,
        })
    }

    fn nearest(world: &World) -> Option<&Enemy> {
        let player = world.player().pos;
        world
            .enemies()
            .min_by(|a, b| {
                a.body
                    .pos
                    .distance(player)
                    .total_cmp(&b.body.pos.distance(player))
            })
    }
}

impl InputSource for AutoPilot {
    fn poll(&mut self, world: &World) -> InputState {
        self.ticks += 1;
        let player = world.player();

        if Self::charge_incoming(world) {
            return InputState::idle().with_jump(player.is_grounded());
        }

        let Some(target) = Self::nearest(world) else {
            return InputState::idle();
        };

        let crowd = world
            .enemies()
            .filter(|e| e.body.pos.distance(player.pos) < CROWD_RADIUS)
            .count();
        if crowd >= CROWD_SIZE {
            return InputState::idle().with_buff(true);
        }

        let delta = target.body.pos - player.pos;
        let aligned = delta.y.abs() < DEPTH_SLOP;
        let in_reach = delta.x.abs() < PUNCH_REACH && aligned;
        let facing_target = delta.x * player.facing.sign() >= 0.0;

        let mut input = InputState::idle()
            .with_vertical(delta.y < -DEPTH_SLOP, delta.y > DEPTH_SLOP);
        if in_reach && facing_target {
            // Tap rather than hold so each swing is a fresh press
            return input.with_punch(self.ticks % 2 == 0);
        }
        // Close the gap, or turn around when the target is behind
        if in_reach || delta.x.abs() >= PUNCH_REACH * 0.6 {
            input = input.with_horizontal(delta.x < 0.0, delta.x > 0.0);
        }
        input
    }

    fn name(&self) -> &'static str {
        "autopilot"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brawl_sim::{EnemyAi, EnemyKind, LevelId};
    use glam::Vec2;

    #[test]
    fn test_idle_presses_nothing() {
        let world = World::new(LevelId::Street, 1);
        assert_eq!(IdleInput.poll(&world), InputState::idle());
    }

    #[test]
    fn test_autopilot_walks_to_enemy() {
        let mut world = World::new(LevelId::Street, 1);
        world.spawn_enemy(EnemyKind::Thug, Vec2::new(600.0, 380.0));

        let input = AutoPilot::new().poll(&world);
        assert!(input.right);
        assert!(!input.left);
        assert!(!input.punch);
    }

    #[test]
    fn test_autopilot_punches_in_reach() {
        let mut world = World::new(LevelId::Street, 1);
        let pos = world.player().pos + Vec2::new(40.0, 0.0);
        world.spawn_enemy(EnemyKind::Runner, pos);

        let mut pilot = AutoPilot::new();
        let punches = (0..4).filter(|_| pilot.poll(&world).punch).count();
        assert_eq!(punches, 2);
    }

    #[test]
    fn test_autopilot_buffs_into_crowd() {
        let mut world = World::new(LevelId::Factory, 1);
        let base = world.player().pos;
        for dx in [-60.0, 50.0, 90.0] {
            world.spawn_enemy(EnemyKind::Guard, base + Vec2::new(dx, 5.0));
        }

        assert!(AutoPilot::new().poll(&world).buff);
    }

    #[test]
    fn test_autopilot_hops_wound_up_charge() {
        let mut world = World::new(LevelId::Factory, 1);
        let pos = world.player().pos + Vec2::new(130.0, 0.0);
        let boss = world.spawn_enemy(EnemyKind::Juggernaut, pos);
        world.enemy_mut(boss).expect("boss").brain.set_cooldown(0);
        world.step(&InputState::idle());

        let brain = &world.enemy(boss).expect("boss").brain;
        assert!(matches!(
            brain,
            Brain::Juggernaut(ai) if matches!(ai.state(), JuggernautState::WindUp { .. })
        ));
        assert!(AutoPilot::new().poll(&world).jump);
    }
}
