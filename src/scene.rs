//! Headless demo scene: a row of gaze panels swept by a jittery camera.

use crate::config::GazeConfig;
use anyhow::{Context, Result};
use gazekit_camera::Camera;
use gazekit_core::{
    scoped_rng, EventRecord, InteractorId, JsonlSink, ObjectId, SimClock, SimTick,
    DEFAULT_TICK_RATE,
};
use gazekit_interaction::{
    GazeEvent, Interactable, InteractableSet, InteractionError, Interactor, ReticleProvider,
    ReticleSink, TickOutcome,
};
use gazekit_physics::{Aabb, Collider, ColliderSet, LayerMask, RayHit};
use glam::Vec3;
use rand::Rng;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;
use tracing::{debug, info, trace};

pub const PANEL_LEFT: ObjectId = ObjectId(1);
pub const PANEL_CENTER: ObjectId = ObjectId(2);
pub const PANEL_RIGHT: ObjectId = ObjectId(3);
pub const BACK_WALL: ObjectId = ObjectId(10);
pub const HIDDEN_PANEL: ObjectId = ObjectId(20);

/// Ticks spent looking at each sweep target.
const PHASE_TICKS: u64 = 40;
/// Tick at which the right panel's host object is deactivated.
pub const DEACTIVATE_TICK: u64 = 100;
/// Max offset of the look target per axis, in metres.
const JITTER: f32 = 0.05;
const JITTER_SALT: u64 = 0x6761_7a65;

const RETICLE_ASSETS: &[&str] = &["reticle"];

/// Reticle that reports its state through `tracing` instead of drawing.
#[derive(Debug, Default)]
struct LogReticle {
    enabled: bool,
}

impl ReticleSink for LogReticle {
    fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            trace!(enabled, "reticle visibility");
        }
        self.enabled = enabled;
    }

    fn set_target(&mut self, hit: &RayHit) {
        trace!(object = %hit.object, distance = hit.distance, "reticle target");
    }

    fn set_progress(&mut self, progress: f32) {
        trace!(progress, "reticle progress");
    }
}

struct LogReticleProvider;

impl ReticleProvider for LogReticleProvider {
    fn create(&self, asset: &str) -> Result<Box<dyn ReticleSink>, InteractionError> {
        if RETICLE_ASSETS.contains(&asset) {
            Ok(Box::new(LogReticle::default()))
        } else {
            Err(InteractionError::MissingReticleAsset {
                name: asset.to_string(),
            })
        }
    }
}

/// One notification raised during the demo.
#[derive(Debug, Clone)]
pub struct DemoEvent {
    pub tick: SimTick,
    pub kind: &'static str,
    pub event: GazeEvent,
}

/// Aggregate results of a demo run.
#[derive(Debug, Default)]
pub struct DemoSummary {
    pub ticks: u64,
    pub outcomes: HashMap<TickOutcome, u64>,
    pub events: Vec<DemoEvent>,
}

impl DemoSummary {
    /// How many `kind` events `object` raised.
    pub fn count(&self, object: ObjectId, kind: &str) -> usize {
        self.events
            .iter()
            .filter(|event| event.event.object == object && event.kind == kind)
            .count()
    }

    /// Write every event as newline-delimited JSON.
    pub fn write_events(&self, path: &Path) -> Result<()> {
        let mut sink = JsonlSink::create(path)
            .with_context(|| format!("create event log {}", path.display()))?;
        for event in &self.events {
            sink.write(&EventRecord {
                tick: event.tick,
                kind: event.kind,
                payload: &event.event,
            })?;
        }
        sink.flush()?;
        Ok(())
    }
}

type EventLog = Rc<RefCell<Vec<(&'static str, GazeEvent)>>>;

/// Everything the demo steps each tick.
pub struct DemoScene {
    clock: SimClock,
    colliders: ColliderSet,
    targets: InteractableSet,
    interactor: Interactor,
    camera: Camera,
    log: EventLog,
}

impl DemoScene {
    /// Lay out the scene and wire the interactor.
    pub fn build(config: &GazeConfig) -> Result<Self> {
        let mut colliders = ColliderSet::new();
        let panel_size = Vec3::new(1.0, 1.0, 0.1);
        for (object, x) in [(PANEL_LEFT, -2.0), (PANEL_CENTER, 0.0), (PANEL_RIGHT, 2.0)] {
            colliders.insert(
                object,
                Collider::new(Aabb::from_center_size(Vec3::new(x, 1.6, -4.0), panel_size)),
            );
        }
        colliders.insert(
            HIDDEN_PANEL,
            Collider::new(Aabb::from_center_size(Vec3::new(4.0, 1.6, -4.0), panel_size))
                .with_layer(LayerMask::IGNORE_RAYCAST),
        );
        colliders.insert(
            BACK_WALL,
            Collider::new(Aabb::from_center_size(
                Vec3::new(0.0, 1.6, -8.0),
                Vec3::new(12.0, 6.0, 0.2),
            )),
        );

        let log: EventLog = Rc::new(RefCell::new(Vec::new()));
        let mut targets = InteractableSet::new();
        for object in [PANEL_LEFT, PANEL_CENTER, PANEL_RIGHT, HIDDEN_PANEL] {
            let mut interactable = Interactable::attach(object, &config.interactable, &colliders)
                .with_context(|| format!("attach interactable to {object}"))?;
            subscribe(&mut interactable, &log);
            targets.insert(interactable);
        }

        let interactor = Interactor::new(
            InteractorId(0),
            config.interactor.clone(),
            &LogReticleProvider,
        )
        .context("create interactor")?;

        Ok(Self {
            clock: SimClock::with_rate(DEFAULT_TICK_RATE),
            colliders,
            targets,
            interactor,
            camera: Camera::default(),
            log,
        })
    }

    /// Step `ticks` times, jittering the look target with `seed`.
    pub fn run(&mut self, ticks: u64, seed: u64) -> DemoSummary {
        let mut summary = DemoSummary {
            ticks,
            ..Default::default()
        };
        for _ in 0..ticks {
            let tick = self.clock.tick();
            let outcome = self.step(tick, seed);
            *summary.outcomes.entry(outcome).or_default() += 1;
            summary
                .events
                .extend(self.log.borrow_mut().drain(..).map(|(kind, event)| DemoEvent {
                    tick,
                    kind,
                    event,
                }));
            self.clock.step();
        }
        summary
    }

    fn step(&mut self, tick: SimTick, seed: u64) -> TickOutcome {
        if tick.0 == DEACTIVATE_TICK {
            debug!(object = %PANEL_RIGHT, "deactivating panel");
            self.targets
                .set_object_active(PANEL_RIGHT, false, &mut self.colliders);
        }

        let mut rng = scoped_rng(seed, JITTER_SALT, tick);
        let jitter = Vec3::new(
            rng.gen_range(-JITTER..=JITTER),
            rng.gen_range(-JITTER..=JITTER),
            0.0,
        );
        self.camera.look_at(sweep_target(tick) + jitter);

        let now = self.clock.now();
        let outcome = self.interactor.tick(
            now,
            &self.camera.gaze_ray(),
            &self.colliders,
            &mut self.targets,
        );
        self.targets.update(now);
        outcome
    }
}

/// Point the camera aims at during `tick`, cycling through the scene.
fn sweep_target(tick: SimTick) -> Vec3 {
    match (tick.0 / PHASE_TICKS) % 5 {
        0 => Vec3::new(-2.0, 1.6, -4.0),
        1 => Vec3::new(0.0, 1.6, -4.0),
        2 => Vec3::new(2.0, 1.6, -4.0),
        // Above the panels, onto the wall.
        3 => Vec3::new(0.0, 3.5, -8.0),
        _ => Vec3::new(4.0, 1.6, -4.0),
    }
}

fn subscribe(interactable: &mut Interactable, log: &EventLog) {
    let events = interactable.events_mut();
    let channels = [
        (&mut events.enter, "enter"),
        (&mut events.exit, "exit"),
        (&mut events.activated, "activated"),
    ];
    for (signal, kind) in channels {
        let log = Rc::clone(log);
        signal.connect(move |event: &GazeEvent| log.borrow_mut().push((kind, *event)));
    }
}

/// Build the scene, run it and log a summary.
pub fn run_demo(config: &GazeConfig, ticks: u64, seed: u64) -> Result<DemoSummary> {
    let mut scene = DemoScene::build(config)?;
    let summary = scene.run(ticks, seed);
    for object in [PANEL_LEFT, PANEL_CENTER, PANEL_RIGHT, HIDDEN_PANEL] {
        info!(
            %object,
            enters = summary.count(object, "enter"),
            exits = summary.count(object, "exit"),
            activations = summary.count(object, "activated"),
            "panel summary"
        );
    }
    Ok(summary)
}
