use gazekit_core::{InteractorId, JsonlSink, ObjectId, SimClock, SimTick};
use gazekit_interaction::{
    Interactable, InteractableConfig, InteractableSet, Interactor, InteractorConfig, NullReticle,
};
use gazekit_physics::{Aabb, Collider, ColliderSet, Ray};
use gazekit_testkit::{run_ticks, EventJournal};
use glam::Vec3;
use std::time::Duration;

const PANEL: ObjectId = ObjectId(1);

struct Scene {
    colliders: ColliderSet,
    targets: InteractableSet,
    interactor: Interactor,
    journal: EventJournal,
    sink: JsonlSink,
    written: usize,
}

#[test]
fn short_gaze_run_streams_its_journal_to_jsonl() {
    let path = std::env::temp_dir().join(format!("gazekit-smoke-{}.jsonl", std::process::id()));

    let mut colliders = ColliderSet::new();
    colliders.insert(
        PANEL,
        Collider::new(Aabb::from_center_size(Vec3::new(0.0, 0.0, -3.0), Vec3::ONE)),
    );
    let journal = EventJournal::new();
    let mut panel = Interactable::attach(PANEL, &InteractableConfig::default(), &colliders)
        .expect("panel has a collider");
    journal.attach(&mut panel);
    let mut targets = InteractableSet::new();
    targets.insert(panel);

    let config = InteractorConfig::default().with_time_to_activate(Duration::from_millis(500));
    let mut scene = Scene {
        colliders,
        targets,
        interactor: Interactor::with_reticle(InteractorId(0), config, Box::new(NullReticle))
            .expect("valid config"),
        journal,
        sink: JsonlSink::create(&path).expect("can create temp log"),
        written: 0,
    };

    // Look at the panel for 15 ticks, then away for 5.
    let mut clock = SimClock::default();
    run_ticks(
        &mut clock,
        20,
        &mut scene,
        |tick: SimTick, now, scene: &mut Scene| {
            let direction = if tick.0 < 15 { Vec3::NEG_Z } else { Vec3::Z };
            scene.interactor.tick(
                now,
                &Ray::new(Vec3::ZERO, direction),
                &scene.colliders,
                &mut scene.targets,
            );
            scene.targets.update(now);
            scene.written += scene
                .journal
                .write_journal(&mut scene.sink, tick)
                .expect("can write events");
        },
        |_, scene| scene.written,
    );
    scene.sink.flush().expect("can flush");

    let contents = std::fs::read_to_string(&path).expect("log readable");
    let kinds: Vec<_> = contents
        .lines()
        .filter(|line| !line.contains(r#""kind":"stay""#))
        .map(|line| {
            let start = line.find(r#""kind":""#).expect("kind field") + 8;
            let end = start + line[start..].find('"').expect("closing quote");
            line[start..end].to_string()
        })
        .collect();
    assert_eq!(
        kinds,
        vec!["enter", "toggle_on", "activated", "exit", "toggle_off"]
    );
    assert_eq!(contents.lines().count(), scene.written);
    let _ = std::fs::remove_file(&path);
}
