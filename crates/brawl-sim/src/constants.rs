//! Tuning constants shared by the two levels.
//!
//! Every duration is in simulation ticks (one tick per display frame at
//! 60 Hz). Distances are world pixels.

// ============================================================================
// Player
// ============================================================================

/// Maximum (and starting) player HP.
pub const MAX_HP: i32 = 100;

/// Player spawn position.
pub const PLAYER_SPAWN: (f32, f32) = (200.0, 380.0);

/// Planar acceleration per tick while input is held.
pub const PLAYER_ACCEL: f32 = 0.55;

/// Velocity multiplier per tick without input.
pub const PLAYER_DECEL: f32 = 0.78;

/// Horizontal speed cap.
pub const PLAYER_MAX_SPEED: f32 = 4.0;

/// Depth-axis speed and acceleration scale relative to horizontal.
pub const PLAYER_DEPTH_FACTOR: f32 = 0.65;

/// Below this speed the decaying velocity snaps to zero.
pub const VELOCITY_EPSILON: f32 = 0.1;

/// Component scale applied to diagonal intent (√2/2).
pub const DIAGONAL_FACTOR: f32 = 0.707;

/// Elevation gravity per tick.
pub const GRAVITY: f32 = 0.65;

/// Take-off vertical speed.
pub const JUMP_FORCE: f32 = 9.0;

/// Upward speed multiplier applied while the jump input is released.
pub const JUMP_CUT: f32 = 0.4;

/// Elevation ceiling.
pub const MAX_JUMP_Z: f32 = 50.0;

/// Grace ticks after leaving the ground during which a jump still registers.
pub const COYOTE_TICKS: u32 = 6;

/// Cosmetic squash duration after landing.
pub const LAND_SQUASH_TICKS: u32 = 6;

/// Ticks without input before the player starts eating.
pub const IDLE_EAT_TICKS: u32 = 120;

/// How long one eating bout lasts.
pub const EAT_DURATION_TICKS: u32 = 90;

/// Ticks without a landed hit before the combo resets.
pub const COMBO_TIMEOUT: u32 = 90;

/// Combo count at which grunt kills pay the bonus score.
pub const COMBO_BONUS_THRESHOLD: u32 = 5;

// ============================================================================
// Player attacks
// ============================================================================

/// Horizontal reach of the punch.
pub const PUNCH_RANGE: f32 = 85.0;

/// Depth reach of the punch.
pub const PUNCH_DEPTH: f32 = 45.0;

/// Punch damage.
pub const PUNCH_DAMAGE: i32 = 1;

/// Total punch duration.
pub const PUNCH_DURATION: u32 = 18;

/// First and last elapsed tick on which the punch can land.
pub const PUNCH_ACTIVE: (u32, u32) = (4, 12);

/// Targets this far behind the player's back still count as in front.
pub const FACING_MARGIN: f32 = 10.0;

/// Horizontal reach of the buff attack.
pub const BUFF_RANGE: f32 = 170.0;

/// Depth reach of the buff attack.
pub const BUFF_DEPTH: f32 = 85.0;

/// Buff damage against grunts.
pub const BUFF_DAMAGE_GRUNT: i32 = 3;

/// Buff damage against bosses.
pub const BUFF_DAMAGE_BOSS: i32 = 5;

/// Total buff duration.
pub const BUFF_DURATION: u32 = 50;

/// Elapsed ticks after which the buff starts hitting.
pub const BUFF_ACTIVE_START: u32 = 12;

/// Screen shake when the buff starts.
pub const BUFF_SHAKE: u32 = 8;

/// Hitstop applied by a punch hit (buff adds two).
pub const HITSTOP_TICKS: u32 = 4;

/// Enemy knockback velocity multiplier per tick.
pub const KNOCKBACK_DECAY: f32 = 0.82;

// ============================================================================
// Enemies
// ============================================================================

/// Base walking speed of enemies.
pub const ENEMY_SPEED: f32 = 1.3;

/// Distance under which grunts stop walking and swing.
pub const CONTACT_RADIUS: f32 = 50.0;

/// Grunt depth-axis speed relative to horizontal.
pub const GRUNT_DEPTH_FACTOR: f32 = 0.7;

/// Elevation at or above which melee swings miss.
pub const MELEE_MAX_Z: f32 = 10.0;

/// Player hurt flash after a regular hit.
pub const HURT_TICKS: u32 = 15;

/// Player invincibility after a regular hit.
pub const INVINCIBLE_TICKS: u32 = 30;

/// Enemy punch animation length.
pub const PUNCH_ANIM_TICKS: u32 = 15;

/// Cooldown freshly spawned grunts start with.
pub const GRUNT_SPAWN_COOLDOWN: u32 = 30;

/// Score for a grunt kill.
pub const KILL_SCORE: u32 = 100;

/// Score for a grunt kill while the combo is at least [`COMBO_BONUS_THRESHOLD`].
pub const KILL_SCORE_COMBO: u32 = 150;

/// Live enemy cap for normal spawning.
pub const MAX_ENEMIES: usize = 7;

/// Milliseconds per display frame, used to turn spawn intervals into ticks.
pub const MS_PER_TICK: f32 = 16.67;

/// Boss spawn distance ahead of the player.
pub const BOSS_SPAWN_OFFSET: f32 = 400.0;

/// Grunt spawn distance to either side of the player.
pub const GRUNT_SPAWN_OFFSET: f32 = brawl_common::VIEW_WIDTH * 0.6;

// ============================================================================
// Companion
// ============================================================================

/// Companion spawn position.
pub const COMPANION_SPAWN: (f32, f32) = (100.0, 380.0);

/// Nearest-enemy distance that scares the companion.
pub const SCARED_ENTER: f32 = 130.0;

/// Nearest-enemy distance that calms it down again.
pub const SCARED_EXIT: f32 = 220.0;

/// Flee speed.
pub const FLEE_SPEED: f32 = 2.5;

/// Fraction of the remaining follow distance covered per tick.
pub const FOLLOW_LERP: f32 = 0.08;

/// Follow distance below which the companion stands still.
pub const FOLLOW_DEAD_ZONE: f32 = 6.0;

/// Per-axis distance at which the companion snaps onto its target.
pub const FOLLOW_SNAP: f32 = 2.0;

/// How far behind the player the companion trails.
pub const FOLLOW_OFFSET: f32 = 90.0;

/// Throw timer value after which the companion shows its throwing pose.
pub const THROW_WINDUP_TICKS: u32 = 210;

/// Throw timer value after which an item is dropped.
pub const THROW_RELEASE_TICKS: u32 = 240;

/// Horizontal offset of a dropped item in front of the companion.
pub const THROW_OFFSET: f32 = 40.0;

// ============================================================================
// Items
// ============================================================================

/// Initial vertical speed of a dropped item.
pub const ITEM_TOSS_VY: f32 = -3.0;

/// Item gravity per tick.
pub const ITEM_GRAVITY: f32 = 0.3;

/// Horizontal pickup reach.
pub const PICKUP_RANGE_X: f32 = 32.0;

/// Depth pickup reach.
pub const PICKUP_RANGE_Y: f32 = 28.0;

/// Player elevation at or above which items cannot be collected.
pub const PICKUP_MAX_Z: f32 = 15.0;

/// Ticks an uncollected item stays in the world.
pub const ITEM_LIFETIME: u64 = 600;

// ============================================================================
// Feedback
// ============================================================================

/// Particle pool capacity.
pub const MAX_PARTICLES: usize = 60;

/// Downward acceleration of dust and hit particles.
pub const PARTICLE_GRAVITY: f32 = 0.15;

/// Velocity multiplier per tick for sparks.
pub const SPARK_DRAG: f32 = 0.92;

/// Floating text lifetime.
pub const TEXT_LIFETIME: u64 = 55;
