use glam::Vec3;
use proptest::prelude::*;

use starfall_core::constants::*;
use starfall_core::enums::{FireRejection, LockPhase};
use starfall_core::types::ScreenPoint;

use crate::fsm::{LockOn, LockTransition};
use crate::scoring::*;

const TICK: f32 = 1.0 / 60.0;

fn origin() -> LockOrigin {
    LockOrigin {
        position: Vec3::new(0.0, 0.0, 4.0),
        heading_deg: 180.0,
    }
}

fn candidate(handle: u32, world: Vec3) -> Candidate<u32> {
    Candidate {
        handle,
        world,
        screen: ScreenPoint::new(world.x * 0.1, world.y * 0.1),
    }
}

/// Run `update` for `secs` with a fixed candidate list.
fn run(lock: &mut LockOn<u32>, secs: f32, candidates: &[Candidate<u32>]) -> Vec<LockTransition<u32>> {
    let mut transitions = Vec::new();
    let steps = (secs / TICK).round() as usize;
    for _ in 0..steps {
        lock.update(TICK, &origin(), candidates, &mut transitions);
    }
    transitions
}

#[test]
fn test_score_rejects_out_of_range() {
    let o = origin();
    assert!(score(&o, Vec3::new(0.0, 0.0, 3.8)).is_none(), "Too close");
    assert!(score(&o, Vec3::new(0.0, 0.0, -10.0)).is_none(), "Too far");
    assert!(score(&o, Vec3::new(0.0, 0.0, 0.0)).is_some());
}

#[test]
fn test_score_rejects_behind() {
    // Heading 180 looks down -z; a target at +z is 180 degrees off.
    let o = origin();
    assert!(score(&o, Vec3::new(0.0, 0.0, 8.0)).is_none());
}

#[test]
fn test_score_prefers_closer_and_centered() {
    let o = origin();
    let near = score(&o, Vec3::new(0.0, 0.0, 2.0)).unwrap();
    let far = score(&o, Vec3::new(0.0, 0.0, -1.0)).unwrap();
    let off_axis = score(&o, Vec3::new(1.5, 0.0, 2.5)).unwrap();
    assert!(near < far);
    assert!(near < off_axis);
}

#[test]
fn test_angle_between_wraps() {
    assert!((angle_between_deg(170.0, -170.0) - 20.0).abs() < 1e-4);
    assert!((angle_between_deg(-90.0, 90.0) - 180.0).abs() < 1e-4);
    assert!(angle_between_deg(45.0, 45.0).abs() < 1e-4);
}

#[test]
fn test_facing_center_heading() {
    let o = LockOrigin::facing_center(Vec3::new(0.0, -3.0, 4.0));
    assert!((angle_between_deg(o.heading_deg, 180.0)).abs() < 1e-3);
}

#[test]
fn test_select_best_picks_lowest_score() {
    let candidates = [
        candidate(1, Vec3::new(0.0, 0.0, -2.0)),
        candidate(2, Vec3::new(0.0, 0.0, 1.0)),
        candidate(3, Vec3::new(0.0, 0.0, 20.0)),
    ];
    let best = select_best(&origin(), &candidates).unwrap();
    assert_eq!(best.handle, 2);
}

#[test]
fn test_pick_by_screen_within_radius() {
    let candidates = [
        Candidate { handle: 1, world: Vec3::ZERO, screen: ScreenPoint::new(0.5, 0.5) },
        Candidate { handle: 2, world: Vec3::ZERO, screen: ScreenPoint::new(-0.5, 0.0) },
    ];
    let picked = pick_by_screen(ScreenPoint::new(0.45, 0.55), &candidates).unwrap();
    assert_eq!(picked.handle, 1);
    assert!(pick_by_screen(ScreenPoint::new(0.0, -0.9), &candidates).is_none());
}

#[test]
fn test_lock_builds_over_lock_time() {
    let mut lock = LockOn::new();
    let targets = [candidate(7, Vec3::ZERO)];

    let transitions = run(&mut lock, 0.25, &targets);
    assert_eq!(lock.phase(), LockPhase::Searching);
    assert!((lock.progress() - 0.5).abs() < 0.05);
    assert_eq!(transitions, vec![LockTransition::Acquired(7)]);

    let transitions = run(&mut lock, 0.3, &targets);
    assert_eq!(lock.phase(), LockPhase::Locked);
    assert_eq!(lock.progress(), 1.0);
    assert_eq!(transitions, vec![LockTransition::Locked(7)]);
}

#[test]
fn test_lock_survives_brief_gap() {
    let mut lock = LockOn::new();
    let targets = [candidate(7, Vec3::ZERO)];
    run(&mut lock, 0.6, &targets);
    assert_eq!(lock.phase(), LockPhase::Locked);

    // Shorter than the grace period.
    run(&mut lock, 0.2, &[]);
    assert_eq!(lock.phase(), LockPhase::Locked, "Lock should survive a 0.2s gap");

    run(&mut lock, 0.1, &targets);
    assert_eq!(lock.target(), Some(7));
    assert_eq!(lock.phase(), LockPhase::Locked);
}

#[test]
fn test_lock_lost_after_grace() {
    let mut lock = LockOn::new();
    let targets = [candidate(7, Vec3::ZERO)];
    run(&mut lock, 0.6, &targets);

    let transitions = run(&mut lock, LOCK_LOST_GRACE_SECS + 0.05, &[]);
    assert_eq!(lock.phase(), LockPhase::NoTarget);
    assert_eq!(lock.target(), None);
    assert!(transitions.contains(&LockTransition::Lost(7)));
}

#[test]
fn test_switching_target_restarts_progress() {
    let mut lock = LockOn::new();
    run(&mut lock, 0.6, &[candidate(1, Vec3::new(0.0, 0.0, -1.0))]);
    assert_eq!(lock.phase(), LockPhase::Locked);

    // A better candidate appears.
    let transitions = run(
        &mut lock,
        TICK,
        &[candidate(1, Vec3::new(0.0, 0.0, -1.0)), candidate(2, Vec3::new(0.0, 0.0, 2.0))],
    );
    assert_eq!(lock.target(), Some(2));
    assert_eq!(lock.phase(), LockPhase::Searching);
    assert!(lock.progress() < 0.1);
    assert_eq!(transitions, vec![LockTransition::Acquired(2)]);
}

#[test]
fn test_manual_target_locks_immediately_and_holds() {
    let mut lock = LockOn::new();
    let far_off = candidate(9, Vec3::new(0.0, 0.0, -3.0));
    lock.set_manual(far_off);
    assert_eq!(lock.phase(), LockPhase::Locked);
    assert_eq!(lock.progress(), 1.0);

    // A better-scoring candidate does not steal a manual lock.
    run(&mut lock, 0.5, &[far_off, candidate(2, Vec3::new(0.0, 0.0, 2.0))]);
    assert_eq!(lock.target(), Some(9));
    assert_eq!(lock.phase(), LockPhase::Locked);
}

#[test]
fn test_fire_requires_lock() {
    let mut lock: LockOn<u32> = LockOn::new();
    assert_eq!(lock.try_fire(), Err(FireRejection::NotLocked));

    run(&mut lock, 0.2, &[candidate(1, Vec3::ZERO)]);
    assert_eq!(lock.try_fire(), Err(FireRejection::NotLocked), "Searching is not enough");
}

#[test]
fn test_fire_enters_firing_then_clears() {
    let mut lock = LockOn::new();
    let targets = [candidate(1, Vec3::ZERO)];
    run(&mut lock, 0.6, &targets);

    assert_eq!(lock.try_fire(), Ok(1));
    assert_eq!(lock.phase(), LockPhase::Firing);

    let transitions = run(&mut lock, FIRING_DISPLAY_SECS + 0.05, &targets);
    assert!(transitions.contains(&LockTransition::FiringEnded));
    // Re-acquired on the tick after FIRING ended.
    assert_ne!(lock.phase(), LockPhase::Firing);
}

#[test]
fn test_cooldown_blocks_fire_and_reselection() {
    let mut lock = LockOn::new();
    let targets = [candidate(1, Vec3::ZERO)];
    lock.set_manual(targets[0]);
    lock.start_cooldown(1.0);
    assert_eq!(lock.try_fire(), Err(FireRejection::CoolingDown));

    lock.clear();
    run(&mut lock, 0.5, &targets);
    assert_eq!(lock.phase(), LockPhase::NoTarget, "No reselection while cooling down");

    run(&mut lock, 0.6, &targets);
    assert!(lock.cooldown_remaining() == 0.0);
    assert_ne!(lock.phase(), LockPhase::NoTarget);
}

#[test]
fn test_tap_on_target() {
    let mut lock = LockOn::new();
    lock.set_manual(Candidate {
        handle: 3u32,
        world: Vec3::ZERO,
        screen: ScreenPoint::new(0.2, 0.2),
    });
    assert!(lock.is_tap_on_target(ScreenPoint::new(0.3, 0.25)));
    assert!(!lock.is_tap_on_target(ScreenPoint::new(0.8, 0.8)));
}

proptest! {
    #[test]
    fn prop_locked_implies_full_progress(
        gaps in proptest::collection::vec((any::<bool>(), 0.0f32..0.2), 1..200)
    ) {
        let mut lock = LockOn::new();
        let mut transitions = Vec::new();
        let present = [candidate(1, Vec3::ZERO)];
        for (visible, dt) in gaps {
            let list: &[Candidate<u32>] = if visible { &present } else { &[] };
            lock.update(dt, &origin(), list, &mut transitions);
            if lock.phase() == LockPhase::Locked {
                prop_assert_eq!(lock.progress(), 1.0);
            }
            prop_assert!(lock.progress() >= 0.0 && lock.progress() <= 1.0);
        }
    }
}
