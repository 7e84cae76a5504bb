//! End-to-end gaze scenarios driven at the fixed tick rate.

use gazekit_camera::Camera;
use gazekit_core::{InteractorId, ObjectId, SimClock, SimTime, DEFAULT_TICK_RATE};
use gazekit_interaction::{
    Interactable, InteractableConfig, InteractableSet, Interactor, InteractorConfig, TickOutcome,
};
use gazekit_physics::{Aabb, Collider, ColliderSet, LayerMask, Ray};
use gazekit_testkit::{
    frame_at, run_ticks, EventJournal, JournalKind, RecordingProvider, RecordingReticle,
};
use glam::Vec3;
use std::cell::Cell;
use std::time::Duration;

const A: ObjectId = ObjectId(1);
const B: ObjectId = ObjectId(2);
const WALL: ObjectId = ObjectId(3);
const GAZE: InteractorId = InteractorId(0);

struct World {
    colliders: ColliderSet,
    targets: InteractableSet,
    interactor: Interactor,
    reticle: RecordingReticle,
    journal: EventJournal,
}

impl World {
    /// A ahead along -Z, B to the right along +X, a bare wall overhead.
    fn new(interactor: InteractorConfig, interactable: InteractableConfig) -> Self {
        let mut colliders = ColliderSet::new();
        colliders.insert(
            A,
            Collider::new(Aabb::from_center_size(Vec3::new(0.0, 0.0, -4.0), Vec3::ONE)),
        );
        colliders.insert(
            B,
            Collider::new(Aabb::from_center_size(Vec3::new(4.0, 0.0, 0.0), Vec3::ONE)),
        );
        colliders.insert(
            WALL,
            Collider::new(Aabb::from_center_size(
                Vec3::new(0.0, 6.0, 0.0),
                Vec3::new(10.0, 1.0, 10.0),
            )),
        );

        let journal = EventJournal::new();
        let mut targets = InteractableSet::new();
        for object in [A, B] {
            let mut target =
                Interactable::attach(object, &interactable, &colliders).expect("collider exists");
            journal.attach(&mut target);
            targets.insert(target);
        }

        let provider = RecordingProvider::with_assets(["reticle"]);
        let interactor = Interactor::new(GAZE, interactor, &provider).expect("valid interactor");
        Self {
            colliders,
            targets,
            interactor,
            reticle: provider.reticle().clone(),
            journal,
        }
    }

    fn look(&mut self, now: SimTime, direction: Vec3) -> TickOutcome {
        let outcome = self.interactor.tick(
            now,
            &Ray::new(Vec3::ZERO, direction),
            &self.colliders,
            &mut self.targets,
        );
        self.targets.update(now);
        outcome
    }
}

fn secs(s: f64) -> SimTime {
    SimTime::from_secs_f64(s)
}

fn one_second() -> InteractorConfig {
    InteractorConfig::default().with_time_to_activate(Duration::from_secs(1))
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    outcome: TickOutcome,
    progress: f32,
    activations: usize,
}

#[test]
fn dwell_reaches_activation_at_one_second() {
    let mut world = World::new(one_second(), InteractableConfig::default());
    let mut clock = SimClock::with_rate(DEFAULT_TICK_RATE);
    let last = Cell::new(TickOutcome::Miss);

    let frames = run_ticks(
        &mut clock,
        31,
        &mut world,
        |_, now, world| last.set(world.look(now, Vec3::NEG_Z)),
        |_, world| Frame {
            outcome: last.get(),
            progress: world.interactor.progress(),
            activations: world.journal.count(A, JournalKind::Activated),
        },
    );

    let start = frame_at(&frames, secs(0.0)).expect("t=0");
    assert_eq!(start.snapshot.outcome, TickOutcome::Entered);
    assert_eq!(start.snapshot.progress, 0.0);

    let half = frame_at(&frames, secs(0.5)).expect("t=0.5");
    assert!((half.snapshot.progress - 0.5).abs() < 1e-6);
    assert_eq!(half.snapshot.activations, 0);

    let done = frame_at(&frames, secs(1.0)).expect("t=1.0");
    assert_eq!(done.snapshot.outcome, TickOutcome::Activated);
    assert_eq!(done.snapshot.progress, 1.0);
    assert_eq!(done.snapshot.activations, 1);

    let later = frame_at(&frames, secs(1.5)).expect("t=1.5");
    assert_eq!(later.snapshot.outcome, TickOutcome::Stayed);
    assert_eq!(later.snapshot.activations, 1);

    let progress = world.reticle.progress_values();
    assert!(progress.windows(2).all(|pair| pair[1] >= pair[0]));
}

#[test]
fn direct_switch_exits_old_target_and_enters_new() {
    let mut world = World::new(
        one_second(),
        InteractableConfig::default().with_exit_delay(Duration::ZERO),
    );
    world.look(secs(0.0), Vec3::NEG_Z);
    world.journal.clear();

    assert_eq!(world.look(secs(0.05), Vec3::X), TickOutcome::Entered);
    assert_eq!(world.interactor.current_target(), Some(B));
    assert_eq!(world.journal.transitions(A), vec![JournalKind::Exit, JournalKind::ToggleOff]);
    assert_eq!(world.journal.transitions(B), vec![JournalKind::Enter, JournalKind::ToggleOn]);
}

#[test]
fn switch_away_from_inactive_host_exits_before_entering() {
    let mut world = World::new(one_second(), InteractableConfig::default());
    world.look(secs(0.0), Vec3::NEG_Z);
    world
        .targets
        .get_mut(A)
        .expect("A")
        .set_active_in_hierarchy(false);
    world.journal.clear();

    world.look(secs(0.05), Vec3::X);
    let order: Vec<_> = world
        .journal
        .entries()
        .into_iter()
        .filter(|entry| matches!(entry.kind, JournalKind::Exit | JournalKind::Enter))
        .map(|entry| (entry.object, entry.kind))
        .collect();
    assert_eq!(order, vec![(A, JournalKind::Exit), (B, JournalKind::Enter)]);
}

#[test]
fn reentry_within_grace_window_cancels_exit() {
    let mut world = World::new(
        one_second(),
        InteractableConfig::default().with_exit_delay(Duration::from_secs(1)),
    );
    world.look(secs(0.0), Vec3::NEG_Z);
    world.look(secs(1.0), Vec3::NEG_Z);
    assert!(world.targets.get(A).expect("A").is_activated());

    assert_eq!(world.look(secs(1.0), Vec3::NEG_Y), TickOutcome::Miss);
    assert!(world.targets.get(A).expect("A").has_pending_exit());

    assert_eq!(world.look(secs(1.5), Vec3::NEG_Z), TickOutcome::Entered);
    for t in [2.0, 2.5, 3.0] {
        world.look(secs(t), Vec3::NEG_Z);
    }

    assert_eq!(world.journal.count(A, JournalKind::Exit), 0);
    assert_eq!(world.journal.count(A, JournalKind::Activated), 1);
    assert!(world.targets.get(A).expect("A").is_activated());
}

#[test]
fn losing_gaze_exits_exactly_once_after_delay() {
    let mut world = World::new(
        one_second(),
        InteractableConfig::default().with_exit_delay(Duration::from_millis(100)),
    );
    world.look(secs(0.0), Vec3::NEG_Z);
    assert_eq!(world.reticle.is_enabled(), Some(true));
    world.look(secs(0.05), Vec3::NEG_Y);
    assert_eq!(world.interactor.current_target(), None);
    assert_eq!(world.reticle.is_enabled(), Some(false));
    assert_eq!(world.journal.count(A, JournalKind::Exit), 0);

    for t in [0.1, 0.15, 0.2, 0.25] {
        assert_eq!(world.look(secs(t), Vec3::NEG_Y), TickOutcome::Miss);
    }
    assert_eq!(world.journal.count(A, JournalKind::Exit), 1);
}

#[test]
fn deactivated_host_exits_immediately_and_stops_hits() {
    let mut world = World::new(one_second(), InteractableConfig::default());
    world.look(secs(0.0), Vec3::NEG_Z);

    assert!(world.targets.set_object_active(A, false, &mut world.colliders));
    assert_eq!(world.look(secs(0.05), Vec3::NEG_Z), TickOutcome::Miss);
    assert_eq!(world.journal.count(A, JournalKind::Exit), 1);

    for t in [0.1, 0.5, 1.0] {
        world.look(secs(t), Vec3::NEG_Z);
    }
    assert_eq!(world.journal.count(A, JournalKind::Exit), 1);
    assert_eq!(world.journal.count(A, JournalKind::Activated), 0);
}

#[test]
fn deactivating_during_grace_window_flushes_exit() {
    let mut world = World::new(
        one_second(),
        InteractableConfig::default().with_exit_delay(Duration::from_secs(1)),
    );
    world.look(secs(0.0), Vec3::NEG_Z);
    world.look(secs(0.05), Vec3::NEG_Y);
    assert_eq!(world.journal.count(A, JournalKind::Exit), 0);

    world.targets.set_object_active(A, false, &mut world.colliders);
    assert_eq!(world.journal.count(A, JournalKind::Exit), 1);

    world.targets.set_object_active(A, true, &mut world.colliders);
    world.look(secs(2.0), Vec3::NEG_Y);
    assert_eq!(world.journal.count(A, JournalKind::Exit), 1);
}

#[test]
fn repeated_reset_without_target_is_silent() {
    let mut world = World::new(
        one_second(),
        InteractableConfig::default().with_exit_delay(Duration::ZERO),
    );
    world.look(secs(0.0), Vec3::NEG_Z);
    world.interactor.reset(secs(0.05), &mut world.targets);
    world.interactor.reset(secs(0.05), &mut world.targets);
    world.targets.update(secs(0.05));
    world.interactor.reset(secs(0.1), &mut world.targets);
    world.targets.update(secs(0.1));

    assert_eq!(world.journal.count(A, JournalKind::Exit), 1);
    assert_eq!(world.reticle.last_progress(), Some(0.0));
}

#[test]
fn non_interactable_hit_shows_reticle_without_target() {
    let mut world = World::new(one_second(), InteractableConfig::default());
    assert_eq!(world.look(secs(0.0), Vec3::Y), TickOutcome::NotInteractable);
    assert_eq!(world.interactor.current_target(), None);
    assert_eq!(world.reticle.last_target(), Some(WALL));
    assert_eq!(world.reticle.is_enabled(), Some(true));
    assert!(world.journal.entries().is_empty());
}

#[test]
fn too_close_hides_reticle() {
    let mut world = World::new(
        one_second().with_range(5.0, 100.0),
        InteractableConfig::default(),
    );
    assert_eq!(world.look(secs(0.0), Vec3::NEG_Z), TickOutcome::TooClose);
    assert_eq!(world.reticle.is_enabled(), Some(false));
    assert!(world.journal.entries().is_empty());
}

#[test]
fn ignored_layer_is_transparent_to_gaze() {
    let mut world = World::new(one_second(), InteractableConfig::default());
    if let Some(collider) = world.colliders.get_mut(A) {
        collider.layer = LayerMask::IGNORE_RAYCAST;
    }
    assert_eq!(world.look(secs(0.0), Vec3::NEG_Z), TickOutcome::Miss);
    assert_eq!(world.journal.count(A, JournalKind::Enter), 0);
}

#[test]
fn camera_gaze_drives_the_interactor() {
    let mut world = World::new(one_second(), InteractableConfig::default());
    let mut camera = Camera::new(Vec3::ZERO);
    camera.look_at(Vec3::new(0.0, 0.0, -4.0));

    let outcome = world.interactor.tick(
        SimTime::ZERO,
        &camera.gaze_ray(),
        &world.colliders,
        &mut world.targets,
    );
    assert_eq!(outcome, TickOutcome::Entered);
    assert_eq!(world.interactor.current_target(), Some(A));
}
