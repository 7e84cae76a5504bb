//! Ordered log of everything an interactable reports.

use gazekit_core::{EventLogError, EventRecord, InteractorId, JsonlSink, ObjectId, SimTick};
use gazekit_interaction::{GazeEvent, Interactable};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

/// Which channel produced a [`JournalEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalKind {
    /// `enter`
    Enter,
    /// `stay`
    Stay,
    /// `exit`
    Exit,
    /// `activated`
    Activated,
    /// `on_toggle(true)`
    ToggleOn,
    /// `on_toggle(false)`
    ToggleOff,
}

impl JournalKind {
    /// Stable label used in JSONL logs.
    pub fn label(self) -> &'static str {
        match self {
            JournalKind::Enter => "enter",
            JournalKind::Stay => "stay",
            JournalKind::Exit => "exit",
            JournalKind::Activated => "activated",
            JournalKind::ToggleOn => "toggle_on",
            JournalKind::ToggleOff => "toggle_off",
        }
    }
}

/// One recorded notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JournalEntry {
    /// Interactable that emitted it.
    pub object: ObjectId,
    /// Channel.
    pub kind: JournalKind,
    /// Interactor carried by the payload, if any.
    pub interactor: Option<InteractorId>,
}

/// Shared, append-only log fed by any number of interactables.
#[derive(Debug, Clone, Default)]
pub struct EventJournal {
    entries: Rc<RefCell<Vec<JournalEntry>>>,
}

impl EventJournal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to the gaze and toggle channels of `interactable`.
    pub fn attach(&self, interactable: &mut Interactable) {
        let object = interactable.object();
        let events = interactable.events_mut();

        let channels = [
            (&mut events.enter, JournalKind::Enter),
            (&mut events.stay, JournalKind::Stay),
            (&mut events.exit, JournalKind::Exit),
            (&mut events.activated, JournalKind::Activated),
        ];
        for (signal, kind) in channels {
            let entries = Rc::clone(&self.entries);
            signal.connect(move |event: &GazeEvent| {
                entries.borrow_mut().push(JournalEntry {
                    object: event.object,
                    kind,
                    interactor: event.interactor,
                });
            });
        }

        let entries = Rc::clone(&self.entries);
        events.on_toggle.connect(move |on: &bool| {
            entries.borrow_mut().push(JournalEntry {
                object,
                kind: if *on {
                    JournalKind::ToggleOn
                } else {
                    JournalKind::ToggleOff
                },
                interactor: None,
            });
        });
    }

    /// Every entry so far.
    pub fn entries(&self) -> Vec<JournalEntry> {
        self.entries.borrow().clone()
    }

    /// Take every entry, leaving the journal empty.
    pub fn drain(&self) -> Vec<JournalEntry> {
        std::mem::take(&mut *self.entries.borrow_mut())
    }

    /// Channels hit for `object`, in order, skipping `stay` noise.
    pub fn transitions(&self, object: ObjectId) -> Vec<JournalKind> {
        self.entries
            .borrow()
            .iter()
            .filter(|entry| entry.object == object && entry.kind != JournalKind::Stay)
            .map(|entry| entry.kind)
            .collect()
    }

    /// How many times `kind` fired for `object`.
    pub fn count(&self, object: ObjectId, kind: JournalKind) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|entry| entry.object == object && entry.kind == kind)
            .count()
    }

    /// Forget all entries.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    /// Move every entry into `sink` as records stamped with `tick`.
    ///
    /// Returns how many records were written.
    pub fn write_journal(&self, sink: &mut JsonlSink, tick: SimTick) -> Result<usize, EventLogError> {
        let entries = self.drain();
        for entry in &entries {
            sink.write(&EventRecord {
                tick,
                kind: entry.kind.label(),
                payload: entry,
            })?;
        }
        Ok(entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gazekit_interaction::{Interactable, InteractableConfig};
    use gazekit_physics::{Aabb, Collider, ColliderSet};
    use glam::Vec3;

    #[test]
    fn journal_records_in_emission_order() {
        let mut colliders = ColliderSet::new();
        colliders.insert(
            ObjectId(3),
            Collider::new(Aabb::from_center_size(Vec3::ZERO, Vec3::ONE)),
        );
        let mut target = Interactable::attach(ObjectId(3), &InteractableConfig::default(), &colliders)
            .expect("collider exists");
        let journal = EventJournal::new();
        journal.attach(&mut target);

        target.gaze_enter(InteractorId(0), Vec3::ZERO);
        target.gaze_stay(InteractorId(0), Vec3::ZERO);
        target.activate();

        assert_eq!(
            journal.transitions(ObjectId(3)),
            vec![JournalKind::Enter, JournalKind::ToggleOn, JournalKind::Activated]
        );
        assert_eq!(journal.count(ObjectId(3), JournalKind::Stay), 1);
        assert_eq!(journal.drain().len(), 4);
        assert!(journal.entries().is_empty());
    }
}
