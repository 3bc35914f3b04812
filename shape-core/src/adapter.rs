//! Scene adapter - the rendering side of the editor.
//!
//! The core never talks to a rendering engine directly. It asks a
//! [`SceneAdapter`] to create and destroy visuals, and receives pick and
//! drag notifications back as [`SceneEvent`]s over a channel:
//!
//! ```text
//! ┌──────────────┐ create/destroy ┌──────────────┐
//! │ ShapeRegistry│ ─────────────▶ │ SceneAdapter │
//! └──────────────┘                └──────────────┘
//!        ▲                               │
//!        │ pump_events     SceneInput    │ pick / drag
//! ┌──────────────┐ ◀──── SceneEvents ◀───┘
//! │ EditorSession│
//! └──────────────┘
//! ```

use std::collections::HashMap;

use thiserror::Error;
use tokio::sync::mpsc;

use crate::{Color, Position, ShapeKind, VisualHandle};

/// Errors raised by a scene adapter.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The engine has no room for another visual.
    #[error("visual capacity exhausted ({0} live)")]
    CapacityExhausted(usize),

    /// Any other engine-side failure.
    #[error("{0}")]
    Engine(String),
}

/// Capability surface of the rendering engine.
pub trait SceneAdapter {
    /// Create a visual primitive for `kind` at `position` with `color`.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot allocate the visual.
    fn create_visual(
        &mut self,
        kind: ShapeKind,
        position: Position,
        color: Color,
    ) -> Result<VisualHandle, AdapterError>;

    /// Release a visual. Unknown handles are ignored.
    fn destroy_visual(&mut self, handle: VisualHandle);

    /// Number of visuals currently alive in the engine.
    fn live_visuals(&self) -> usize;
}

/// Notifications from the scene adapter's own interaction mechanics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneEvent {
    /// The user picked (clicked) a visual.
    Picked(VisualHandle),
    /// A drag of `handle` finished at `position`.
    Moved {
        /// The dragged visual.
        handle: VisualHandle,
        /// Final position of the drag.
        position: Position,
    },
}

/// Create a connected pair of scene event sender and receiver.
#[must_use]
pub fn scene_channel() -> (SceneInput, SceneEvents) {
    let (tx, rx) = mpsc::unbounded_channel();
    (SceneInput { tx }, SceneEvents { rx })
}

/// Sending half of the scene event channel, held by the adapter's input layer.
#[derive(Debug, Clone)]
pub struct SceneInput {
    tx: mpsc::UnboundedSender<SceneEvent>,
}

impl SceneInput {
    /// Report that `handle` was picked.
    pub fn pick(&self, handle: VisualHandle) {
        self.send(SceneEvent::Picked(handle));
    }

    /// Report that a drag of `handle` ended at `position`.
    pub fn drag(&self, handle: VisualHandle, position: Position) {
        self.send(SceneEvent::Moved { handle, position });
    }

    fn send(&self, event: SceneEvent) {
        // The editor session may already be gone
        if self.tx.send(event).is_err() {
            tracing::debug!("Dropping scene event {event:?}: no receiver");
        }
    }
}

/// Receiving half of the scene event channel, drained by the editor session.
#[derive(Debug)]
pub struct SceneEvents {
    rx: mpsc::UnboundedReceiver<SceneEvent>,
}

impl SceneEvents {
    /// Take the next queued event without waiting.
    pub fn try_next(&mut self) -> Option<SceneEvent> {
        self.rx.try_recv().ok()
    }
}

/// An in-memory scene adapter with no rendering.
///
/// Used by the command-line host and by tests. An optional capacity makes
/// visual creation fail once that many visuals are alive.
#[derive(Debug, Default)]
pub struct HeadlessScene {
    visuals: HashMap<VisualHandle, ShapeKind>,
    next_handle: u64,
    capacity: Option<usize>,
}

impl HeadlessScene {
    /// Create an unbounded headless scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the number of simultaneously live visuals.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Check whether `handle` refers to a live visual.
    #[must_use]
    pub fn contains(&self, handle: VisualHandle) -> bool {
        self.visuals.contains_key(&handle)
    }

    /// Kind of primitive behind a live visual.
    #[must_use]
    pub fn kind_of(&self, handle: VisualHandle) -> Option<ShapeKind> {
        self.visuals.get(&handle).copied()
    }
}

impl SceneAdapter for HeadlessScene {
    fn create_visual(
        &mut self,
        kind: ShapeKind,
        position: Position,
        _color: Color,
    ) -> Result<VisualHandle, AdapterError> {
        if let Some(capacity) = self.capacity {
            if self.visuals.len() >= capacity {
                return Err(AdapterError::CapacityExhausted(self.visuals.len()));
            }
        }
        self.next_handle += 1;
        let handle = VisualHandle::from_raw(self.next_handle);
        self.visuals.insert(handle, kind);
        tracing::trace!("Created {kind} {handle} at {position:?}");
        Ok(handle)
    }

    fn destroy_visual(&mut self, handle: VisualHandle) {
        if self.visuals.remove(&handle).is_none() {
            tracing::debug!("Ignoring destroy of unknown {handle}");
        }
    }

    fn live_visuals(&self) -> usize {
        self.visuals.len()
    }
}
