//! Command host driving an editor session over a headless scene.

use std::io::Write;

use anyhow::Result;
use rand::rngs::StdRng;
use shape_core::{
    scene_channel, EditorError, EditorSession, FileDocumentStore, HeadlessScene, ImportSummary,
    RandomPlacement, SceneInput,
};

use crate::command::{Command, HELP};
use crate::HostConfig;

/// Whether the host should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep going.
    Continue,
    /// The user asked to quit.
    Quit,
}

/// The editor host: one session, its input channel, and the document store.
pub struct EditorHost {
    session: EditorSession<HeadlessScene, RandomPlacement<StdRng>>,
    input: SceneInput,
    store: FileDocumentStore,
}

impl EditorHost {
    /// Build the session described by `config`.
    #[must_use]
    pub fn new(config: &HostConfig) -> Self {
        let mut scene = HeadlessScene::new();
        if let Some(max) = config.max_visuals {
            scene = scene.with_capacity(max);
        }
        let placement = match config.seed {
            Some(seed) => RandomPlacement::seeded(seed),
            None => RandomPlacement::from_entropy(),
        }
        .with_extent(config.editor.placement_extent);

        let (input, events) = scene_channel();
        let session = EditorSession::new(scene, events, placement, config.editor.clone());
        let store = FileDocumentStore::new(&config.data_dir)
            .with_filename(config.editor.export_filename.clone());

        Self {
            session,
            input,
            store,
        }
    }

    /// The editor session.
    #[must_use]
    pub fn session(&self) -> &EditorSession<HeadlessScene, RandomPlacement<StdRng>> {
        &self.session
    }

    /// Run one command, writing any output to `out`.
    ///
    /// Recoverable editor errors are reported to `out`; only output failures
    /// are returned.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub async fn execute(&mut self, command: Command, out: &mut impl Write) -> Result<Flow> {
        match command {
            Command::Add { kind, at } => {
                let result = match at {
                    Some((position, color)) => self.session.add_shape_at(kind, position, color),
                    None => self.session.add_shape(kind),
                };
                match result {
                    Ok(id) => writeln!(out, "added {kind} {id}")?,
                    Err(e) => report(out, &e)?,
                }
            }
            Command::List => self.list(out)?,
            Command::Pick(index) => match self.visual_at(index) {
                Some(handle) => self.input.pick(handle),
                None => writeln!(out, "no shape at index {index}")?,
            },
            Command::Drag(index, position) => match self.visual_at(index) {
                Some(handle) => self.input.drag(handle, position),
                None => writeln!(out, "no shape at index {index}")?,
            },
            Command::Key(key) => {
                // Let pending picks land before the key is handled
                self.session.pump_events();
                if !self.session.handle_key(&key) {
                    tracing::debug!("Key {key} had no effect");
                }
            }
            Command::Delete => match self.session.delete_selected() {
                Some(shape) => writeln!(out, "deleted {} {}", shape.kind, shape.id)?,
                None => writeln!(out, "nothing selected")?,
            },
            Command::Clear => {
                let count = self.session.delete_all();
                writeln!(out, "deleted {count} shapes")?;
            }
            Command::Export => match self.session.export_to(&self.store).await {
                Ok(count) => writeln!(
                    out,
                    "exported {count} shapes to {}",
                    self.store
                        .data_dir()
                        .join(&self.session.config().export_filename)
                        .display()
                )?,
                Err(e) => report(out, &e)?,
            },
            Command::Import(path) => {
                let store = match path {
                    Some(path) => self.store.clone().with_source(path),
                    None => self.store.clone(),
                };
                match self.session.import_from(&store).await {
                    Ok(summary) => print_summary(out, &summary)?,
                    Err(e) => report(out, &e)?,
                }
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
        }
        self.session.pump_events();
        Ok(Flow::Continue)
    }

    /// Import a document before the first command is read.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read or is malformed.
    pub async fn import_startup(&mut self, path: &std::path::Path) -> Result<ImportSummary> {
        let store = self.store.clone().with_source(path);
        Ok(self.session.import_from(&store).await?)
    }

    fn visual_at(&self, index: usize) -> Option<shape_core::VisualHandle> {
        self.session.registry().list().nth(index).map(|s| s.visual)
    }

    fn list(&mut self, out: &mut impl Write) -> Result<()> {
        self.session.pump_events();
        let registry = self.session.registry();
        if registry.is_empty() {
            writeln!(out, "(empty)")?;
            return Ok(());
        }
        let selected = registry.selection();
        for (i, shape) in registry.list().enumerate() {
            let marker = if Some(shape.id) == selected { '*' } else { ' ' };
            let p = shape.position;
            let c = shape.color;
            writeln!(
                out,
                "{marker}{i:>3} {:<6} ({:.3}, {:.3}, {:.3}) rgb({:.3}, {:.3}, {:.3}) {}",
                shape.kind,
                p.x,
                p.y,
                p.z,
                c.r(),
                c.g(),
                c.b(),
                shape.id
            )?;
        }
        Ok(())
    }
}

fn print_summary(out: &mut impl Write, summary: &ImportSummary) -> Result<()> {
    writeln!(
        out,
        "imported {} shapes ({} skipped, {} failed)",
        summary.imported,
        summary.skipped.len(),
        summary.failed
    )?;
    for skipped in &summary.skipped {
        writeln!(out, "  skipped {skipped}")?;
    }
    Ok(())
}

fn report(out: &mut impl Write, err: &EditorError) -> Result<()> {
    tracing::warn!("{err}");
    writeln!(out, "error: {err}")?;
    Ok(())
}
