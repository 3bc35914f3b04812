//! Shape registry - the live shapes of a session and the current selection.

use std::collections::HashMap;

use crate::{
    Color, EditorError, EditorResult, Position, SceneAdapter, Shape, ShapeId, ShapeKind,
    VisualHandle,
};

/// The authoritative collection of live shapes.
///
/// The registry is the only component that creates or destroys visuals
/// through the scene adapter. Every shape it holds has exactly one live
/// visual, and the selection is either empty or names a live shape.
#[derive(Debug)]
pub struct ShapeRegistry<A: SceneAdapter> {
    /// All shapes, indexed by ID.
    shapes: HashMap<ShapeId, Shape>,
    /// Shape IDs in insertion order.
    order: Vec<ShapeId>,
    /// Reverse index from visual to owning shape.
    visuals: HashMap<VisualHandle, ShapeId>,
    /// Currently selected shape, if any.
    selection: Option<ShapeId>,
    adapter: A,
}

impl<A: SceneAdapter> ShapeRegistry<A> {
    /// Create an empty registry backed by `adapter`.
    #[must_use]
    pub fn new(adapter: A) -> Self {
        Self {
            shapes: HashMap::new(),
            order: Vec::new(),
            visuals: HashMap::new(),
            selection: None,
            adapter,
        }
    }

    /// Place a new shape.
    ///
    /// The new shape is appended to the end of the registry and is not
    /// selected.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidPosition`] if a coordinate is not
    /// finite, or [`EditorError::CreationFailed`] if the adapter cannot
    /// create the visual. The registry is left unchanged.
    pub fn add(
        &mut self,
        kind: ShapeKind,
        position: Position,
        color: Color,
    ) -> EditorResult<&Shape> {
        if !position.is_finite() {
            return Err(EditorError::InvalidPosition(position));
        }
        let visual = self
            .adapter
            .create_visual(kind, position, color)
            .map_err(|e| EditorError::CreationFailed(e.to_string()))?;

        let shape = Shape {
            id: ShapeId::new(),
            kind,
            position,
            color,
            visual,
        };
        let id = shape.id;
        tracing::debug!("Added {kind} {id} at {position:?}");

        debug_assert!(!self.shapes.contains_key(&id), "shape id reused: {id}");
        self.order.push(id);
        self.visuals.insert(visual, id);
        self.shapes.insert(id, shape);
        self.shapes.get(&id).ok_or(EditorError::NotFound(id))
    }

    /// Remove a shape and release its visual.
    ///
    /// Clears the selection if it pointed at the removed shape. Returns the
    /// removed shape, or `None` if no shape has that ID.
    pub fn delete_one(&mut self, id: ShapeId) -> Option<Shape> {
        let shape = self.shapes.remove(&id)?;
        self.adapter.destroy_visual(shape.visual);
        self.visuals.remove(&shape.visual);
        self.order.retain(|&sid| sid != id);
        if self.selection == Some(id) {
            self.selection = None;
        }
        tracing::debug!("Deleted {} {id}", shape.kind);
        Some(shape)
    }

    /// Remove every shape, release every visual, and clear the selection.
    ///
    /// Returns the number of shapes removed.
    pub fn delete_all(&mut self) -> usize {
        self.selection = None;
        let count = self.order.len();
        for id in self.order.drain(..) {
            if let Some(shape) = self.shapes.remove(&id) {
                self.adapter.destroy_visual(shape.visual);
            }
        }
        self.shapes.clear();
        self.visuals.clear();
        if count > 0 {
            tracing::debug!("Deleted all {count} shapes");
        }
        count
    }

    /// Select a shape.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NotFound`] if the shape does not exist. The
    /// existing selection is kept.
    pub fn select(&mut self, id: ShapeId) -> EditorResult<()> {
        if self.shapes.contains_key(&id) {
            self.selection = Some(id);
            Ok(())
        } else {
            Err(EditorError::NotFound(id))
        }
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// ID of the selected shape.
    #[must_use]
    pub fn selection(&self) -> Option<ShapeId> {
        self.selection
    }

    /// The selected shape.
    #[must_use]
    pub fn selected(&self) -> Option<&Shape> {
        self.selection.and_then(|id| self.shapes.get(&id))
    }

    /// Record a new position for a shape after the adapter moved its visual.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidPosition`] if a coordinate is not
    /// finite, or [`EditorError::NotFound`] if the shape does not exist.
    pub fn move_shape(&mut self, id: ShapeId, position: Position) -> EditorResult<()> {
        if !position.is_finite() {
            return Err(EditorError::InvalidPosition(position));
        }
        let shape = self.shapes.get_mut(&id).ok_or(EditorError::NotFound(id))?;
        shape.position = position;
        Ok(())
    }

    /// Get a shape by ID.
    #[must_use]
    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// Find the shape that owns a visual.
    #[must_use]
    pub fn shape_for_visual(&self, handle: VisualHandle) -> Option<ShapeId> {
        self.visuals.get(&handle).copied()
    }

    /// All shapes in insertion order.
    pub fn list(&self) -> impl Iterator<Item = &Shape> {
        self.order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// Number of live shapes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check whether the registry holds no shapes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The scene adapter, for read-only inspection.
    #[must_use]
    pub fn adapter(&self) -> &A {
        &self.adapter
    }
}

impl<A: SceneAdapter> Drop for ShapeRegistry<A> {
    fn drop(&mut self) {
        self.delete_all();
    }
}
