//! Simulation constants and tuning parameters.
//!
//! Distances are in scene units (the central body has radius ~0.55),
//! times in seconds.

/// Nominal host tick rate (Hz). The engine itself accepts any delta time.
pub const TICK_RATE: u32 = 60;

/// Seconds per nominal tick.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

/// Largest delta time a single tick will integrate.
pub const MAX_FRAME_DT: f32 = 0.25;

/// Below this length a direction is treated as undefined.
pub const DIRECTION_EPSILON: f32 = 1e-5;

// --- Projectile pool ---

/// Number of projectile slots.
pub const POOL_CAPACITY: usize = 3;

/// Maximum ambient projectiles active at once.
pub const MAX_AMBIENT_ACTIVE: usize = 2;

// --- Projectile physics ---

/// Strength of the inverse-square pull toward the origin.
pub const GRAVITY_K: f32 = 2.0;

/// Projectiles farther than this from the origin are retired as misses.
pub const OUTER_BOUND: f32 = 20.0;

/// Projectiles closer than this to the origin are retired as misses.
pub const INNER_BOUND: f32 = 0.1;

/// Duration of the IMPACTING phase.
pub const IMPACT_DURATION_SECS: f32 = 0.5;

/// Radius growth rate while impacting (fraction per second).
pub const IMPACT_GROWTH_RATE: f32 = 5.0;

/// Opacity lost per second while fading.
pub const FADE_RATE: f32 = 2.0;

// --- Spawning ---

/// Ambient spawn interval at intensity 1.0.
pub const AMBIENT_BASE_INTERVAL_SECS: f32 = 12.0;

/// Intensity clamp range.
pub const MIN_INTENSITY: f32 = 0.1;
pub const MAX_INTENSITY: f32 = 5.0;

/// Power multiplier clamp range (ambient speed boost).
pub const MIN_POWER_MULTIPLIER: f32 = 0.5;
pub const MAX_POWER_MULTIPLIER: f32 = 3.0;

/// Radius of the sphere ambient projectiles spawn on.
pub const AMBIENT_SPAWN_RADIUS: f32 = 15.0;

/// Max per-axis offset of the ambient aim point around the origin.
pub const AMBIENT_AIM_JITTER: f32 = 0.5;

/// Ambient speed range before the power multiplier.
pub const AMBIENT_MIN_SPEED: f32 = 0.8;
pub const AMBIENT_MAX_SPEED: f32 = 2.0;

/// Smallest and largest projectile radius a spawn roll can produce.
pub const MIN_SPAWN_SIZE: f32 = 0.02;
pub const MAX_SPAWN_SIZE: f32 = 0.12;

/// Launch point of player-aimed shots.
pub const AIMED_LAUNCH_POSITION: [f32; 3] = [0.0, -3.0, 4.0];

/// Player-aimed speed: base + power * gain.
pub const AIMED_BASE_SPEED: f32 = 5.0;
pub const AIMED_SPEED_GAIN: f32 = 10.0;

/// Player-aimed size factor: base + power * gain.
pub const AIMED_SIZE_BASE: f32 = 0.8;
pub const AIMED_SIZE_GAIN: f32 = 0.4;

/// Screen-directed interval range.
pub const SCREEN_MIN_INTERVAL_SECS: f32 = 30.0;
pub const SCREEN_MAX_INTERVAL_SECS: f32 = 60.0;

/// Screen-directed projectiles are slower and larger.
pub const SCREEN_METEOR_SPEED: f32 = 1.6;
pub const SCREEN_METEOR_SIZE: f32 = 0.15;

/// Max per-axis jitter applied to a screen template start point.
pub const SCREEN_TEMPLATE_JITTER: f32 = 0.5;

/// Distance to the camera eye at which a screen-directed projectile "hits".
pub const SCREEN_PROXIMITY: f32 = 1.2;

// --- Targets ---

/// Shield sphere radius around the origin.
pub const SHIELD_RADIUS: f32 = 1.2;

/// Default shield hit points.
pub const SHIELD_MAX_HP: u32 = 50;

/// Impact ring capacity on the shield.
pub const SHIELD_IMPACT_SLOTS: usize = 16;

/// Ring slot intensity lost per second.
pub const SHIELD_IMPACT_FADE_RATE: f32 = 1.5;

/// Central body radius.
pub const BODY_RADIUS: f32 = 0.55;

/// Default central body hit points.
pub const BODY_MAX_HP: u32 = 20;

/// Bonus awarded once when the central body is destroyed.
pub const TARGET_DESTROYED_BONUS: u64 = 1000;

/// Orbiting body nominal orbit radius and containment radius.
pub const ORBITER_ORBIT_RADIUS: f32 = 3.2;
pub const ORBITER_RADIUS: f32 = 0.18;

/// Orbiting body angular speed (radians per second).
pub const ORBITER_ANGULAR_SPEED: f32 = 0.15;

// --- Impact intensity bands ---

pub const SHIELD_INTENSITY_MIN: f32 = 0.2;
pub const SHIELD_INTENSITY_MAX: f32 = 0.4;
pub const BODY_INTENSITY_MIN: f32 = 0.3;
pub const BODY_INTENSITY_MAX: f32 = 0.5;
pub const ORBITER_INTENSITY_MIN: f32 = 0.1;
pub const ORBITER_INTENSITY_MAX: f32 = 0.2;

/// Screen-directed cracks always fire at full strength.
pub const SCREEN_CRACK_INTENSITY: f32 = 1.0;

// --- Projection ---

/// NDC clamp applied to every projected point.
pub const SCREEN_CLAMP: f32 = 0.95;

/// Guard for near-zero clip w.
pub const CLIP_W_EPSILON: f32 = 1e-6;

/// World half-extents remapped to screen for screen-directed impacts.
pub const SCREEN_X_DOMAIN: f32 = 6.0;
pub const SCREEN_Y_DOMAIN: f32 = 4.0;

// --- Targeting ---

/// Candidate distance window.
pub const LOCK_MAX_DISTANCE: f32 = 8.0;
pub const LOCK_MIN_DISTANCE: f32 = 0.5;

/// Nominal lock cone half-angle (degrees).
pub const LOCK_ANGLE_DEG: f32 = 35.0;

/// Coarse filter: candidates beyond LOCK_ANGLE_DEG * this are rejected.
pub const LOCK_ANGLE_FILTER_FACTOR: f32 = 3.0;

/// Score weight of the angular offset.
pub const LOCK_ANGLE_WEIGHT: f32 = 0.1;

/// Time to reach a full lock.
pub const LOCK_TIME_SECS: f32 = 0.5;

/// Grace period before a lost target is dropped.
pub const LOCK_LOST_GRACE_SECS: f32 = 0.3;

/// How long FIRING is displayed before returning to NO_TARGET.
pub const FIRING_DISPLAY_SECS: f32 = 0.5;

/// Screen radius around the locked target that counts as a fire tap.
pub const TOUCH_RADIUS: f32 = 0.15;
pub const TOUCH_MARGIN: f32 = 0.1;

/// Max screen distance when picking an enemy by tap.
pub const TAP_PICK_RADIUS: f32 = 0.25;

// --- Special weapon ---

pub const WEAPON_CHARGE_SECS: f32 = 0.4;
pub const WEAPON_TRAVEL_SECS: f32 = 0.3;
pub const WEAPON_IMPACT_SECS: f32 = 0.6;

/// Number of damage hits applied per special shot.
pub const SPECIAL_DAMAGE_MULTIPLIER: u32 = 3;

/// Cooldown after the weapon timeline completes.
pub const SPECIAL_WEAPON_COOLDOWN_SECS: f32 = 1.5;

// --- Enemies ---

/// Enemy hit points.
pub const ENEMY_MAX_HP: u32 = 5;

/// Delay before a destroyed enemy returns.
pub const ENEMY_RESPAWN_SECS: f32 = 8.0;

/// Damage immunity after respawning.
pub const RESPAWN_INVULNERABILITY_SECS: f32 = 2.0;

// --- Combo / scoring ---

/// Gap after which a running combo decays to zero.
pub const COMBO_TIMEOUT_SECS: f32 = 5.0;

/// Hard ceiling on the length of one combo.
pub const MAX_COMBO_DURATION_SECS: f32 = 10.0;

/// Window after a forced expiry during which combos cannot build.
pub const COMBO_COOLDOWN_SECS: f32 = 2.0;

/// Points per impact by combo tier.
pub const POINTS_BASE: u64 = 10;
pub const POINTS_TIER_MID: u64 = 25;
pub const POINTS_TIER_HIGH: u64 = 50;

/// Combo thresholds for the tiers above.
pub const COMBO_TIER_MID: u32 = 3;
pub const COMBO_TIER_HIGH: u32 = 5;

// --- Persistence ---

/// Minimum gap between local writes.
pub const LOCAL_SAVE_INTERVAL_SECS: f32 = 5.0;

/// Minimum gap between remote pushes.
pub const REMOTE_SYNC_INTERVAL_SECS: f32 = 60.0;
