//! Editor session - the user-triggered edit operations.
//!
//! An [`EditorSession`] is created once at startup and owns everything the
//! edit operations touch: the shape registry (and through it the scene
//! adapter), the placement policy, the configuration, and the receiving end
//! of the scene event channel. Hosts dispatch one event at a time into it.

use crate::document::{self, EntryError};
use crate::{
    Color, DocumentStore, EditorConfig, EditorResult, PlacementPolicy, Position,
    SceneAdapter, SceneEvent, SceneEvents, Shape, ShapeId, ShapeKind, ShapeRegistry, VisualHandle,
};

/// Key that deletes the current selection.
pub const DELETE_KEY: &str = "Delete";

/// Outcome of an import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Shapes created from the document.
    pub imported: usize,
    /// Entries skipped because they failed validation.
    pub skipped: Vec<EntryError>,
    /// Valid entries whose visual could not be created.
    pub failed: usize,
}

/// A running editor session.
#[derive(Debug)]
pub struct EditorSession<A: SceneAdapter, P: PlacementPolicy> {
    registry: ShapeRegistry<A>,
    placement: P,
    events: SceneEvents,
    config: EditorConfig,
}

impl<A: SceneAdapter, P: PlacementPolicy> EditorSession<A, P> {
    /// Create a session over `adapter`, consuming scene events from `events`.
    #[must_use]
    pub fn new(adapter: A, events: SceneEvents, placement: P, config: EditorConfig) -> Self {
        Self {
            registry: ShapeRegistry::new(adapter),
            placement,
            events,
            config,
        }
    }

    /// The shape registry.
    #[must_use]
    pub fn registry(&self) -> &ShapeRegistry<A> {
        &self.registry
    }

    /// The session configuration.
    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Add a shape at a position and color chosen by the placement policy.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EditorError::CreationFailed`] if the visual cannot be created.
    pub fn add_shape(&mut self, kind: ShapeKind) -> EditorResult<ShapeId> {
        let position = self.placement.position();
        let color = self.placement.color();
        self.add_shape_at(kind, position, color)
    }

    /// Add a shape at an explicit position and color.
    ///
    /// The new shape is not selected.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EditorError::InvalidPosition`] for a non-finite
    /// position, or [`crate::EditorError::CreationFailed`] if the visual
    /// cannot be created.
    pub fn add_shape_at(
        &mut self,
        kind: ShapeKind,
        position: Position,
        color: Color,
    ) -> EditorResult<ShapeId> {
        self.registry.add(kind, position, color).map(|shape| shape.id)
    }

    /// Select the shape owning a picked visual.
    ///
    /// Picks on visuals that belong to no shape are ignored. Returns the
    /// newly selected shape ID.
    pub fn select_shape(&mut self, handle: VisualHandle) -> Option<ShapeId> {
        let Some(id) = self.registry.shape_for_visual(handle) else {
            tracing::debug!("Ignoring pick on unowned {handle}");
            return None;
        };
        match self.registry.select(id) {
            Ok(()) => {
                tracing::debug!("Selected {id}");
                Some(id)
            }
            Err(e) => {
                tracing::debug!("Stale pick on {handle}: {e}");
                None
            }
        }
    }

    /// Delete the selected shape, if any.
    pub fn delete_selected(&mut self) -> Option<Shape> {
        let id = self.registry.selection()?;
        self.registry.delete_one(id)
    }

    /// Delete every shape. Returns how many were removed.
    pub fn delete_all(&mut self) -> usize {
        self.registry.delete_all()
    }

    /// Serialize the scene to a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn export(&self) -> EditorResult<String> {
        let entries = document::export_all(self.registry.list());
        document::to_json(&entries, self.config.pretty_export)
    }

    /// Export the scene and hand it to `store` under the configured file name.
    ///
    /// Returns the number of shapes exported.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or saving fails.
    pub async fn export_to<S>(&self, store: &S) -> EditorResult<usize>
    where
        S: DocumentStore + ?Sized,
    {
        let json = self.export()?;
        let count = self.registry.len();
        store
            .save_document(json.as_bytes(), &self.config.export_filename)
            .await?;
        tracing::info!("Exported {count} shapes");
        Ok(count)
    }

    /// Replace the scene with the contents of a JSON document.
    ///
    /// The document is parsed before anything is touched. Once it parses,
    /// every existing shape is deleted and the valid entries are added in
    /// document order. Entries are added one by one: if one fails to get a
    /// visual, the shapes already added stay and the rest are still tried.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EditorError::MalformedDocument`] if the payload is not a JSON
    /// array. The scene is unchanged in that case.
    pub fn import(&mut self, bytes: &[u8]) -> EditorResult<ImportSummary> {
        let report = document::import_all(bytes)?;

        self.registry.delete_all();
        let mut summary = ImportSummary {
            skipped: report.rejected,
            ..ImportSummary::default()
        };
        for entry in report.entries {
            match self.registry.add(entry.kind, entry.position, entry.color) {
                Ok(_) => summary.imported += 1,
                Err(e) => {
                    tracing::warn!("Failed to import {}: {e}", entry.kind);
                    summary.failed += 1;
                }
            }
        }

        tracing::info!(
            "Imported {} shapes ({} skipped, {} failed)",
            summary.imported,
            summary.skipped.len(),
            summary.failed
        );
        Ok(summary)
    }

    /// Read a document from `store` and import it.
    ///
    /// The scene is not touched until the whole document has been read.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or the document is malformed.
    pub async fn import_from<S>(&mut self, store: &S) -> EditorResult<ImportSummary>
    where
        S: DocumentStore + ?Sized,
    {
        let bytes = store.open_document().await?;
        self.import(&bytes)
    }

    /// Apply every queued scene event. Returns how many were processed.
    pub fn pump_events(&mut self) -> usize {
        let mut processed = 0;
        while let Some(event) = self.events.try_next() {
            self.apply_event(event);
            processed += 1;
        }
        processed
    }

    fn apply_event(&mut self, event: SceneEvent) {
        match event {
            SceneEvent::Picked(handle) => {
                self.select_shape(handle);
            }
            SceneEvent::Moved { handle, position } => {
                let Some(id) = self.registry.shape_for_visual(handle) else {
                    tracing::debug!("Ignoring move of unowned {handle}");
                    return;
                };
                if let Err(e) = self.registry.move_shape(id, position) {
                    tracing::debug!("Ignoring move on {handle}: {e}");
                }
            }
        }
    }

    /// Handle a key press. Returns `true` if the key did something.
    pub fn handle_key(&mut self, key: &str) -> bool {
        if key == DELETE_KEY {
            self.delete_selected().is_some()
        } else {
            false
        }
    }
}
