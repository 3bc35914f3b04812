//! # Shape Core
//!
//! Core logic for the shape editor: which shapes exist, where they are,
//! what color they are, which one is selected, and how the whole scene
//! round-trips through a JSON document.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                EditorSession                │
//! │  add / select / delete / export / import    │
//! ├──────────────────────┬──────────────────────┤
//! │  ShapeRegistry       │  document            │
//! │  - Shapes (ordered)  │  - export_all        │
//! │  - Selection         │  - import_all        │
//! ├──────────────────────┼──────────────────────┤
//! │  SceneAdapter        │  DocumentStore       │
//! │  - Visuals           │  - save / open       │
//! │  - Pick/drag events  │                      │
//! └──────────────────────┴──────────────────────┘
//! ```
//!
//! The rendering engine and the file picker sit behind the [`SceneAdapter`]
//! and [`DocumentStore`] traits; [`HeadlessScene`] and
//! [`FileDocumentStore`] are the in-tree implementations.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod adapter;
pub mod config;
pub mod document;
pub mod editor;
pub mod error;
pub mod persistence;
pub mod placement;
pub mod registry;
pub mod shape;

pub use adapter::{
    scene_channel, AdapterError, HeadlessScene, SceneAdapter, SceneEvent, SceneEvents, SceneInput,
};
pub use config::EditorConfig;
pub use document::{EntryError, ImportReport, ShapeDocument};
pub use editor::{EditorSession, ImportSummary};
pub use error::{EditorError, EditorResult};
pub use persistence::{DocumentStore, FileDocumentStore};
pub use placement::{PlacementPolicy, RandomPlacement};
pub use registry::ShapeRegistry;
pub use shape::{Color, Position, Shape, ShapeId, ShapeKind, UnknownShapeKind, VisualHandle};

/// Shape core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
