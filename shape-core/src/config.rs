//! Editor session configuration.

use crate::placement::DEFAULT_EXTENT;

/// Default file name suggested when saving an export.
pub const DEFAULT_EXPORT_FILENAME: &str = "shapes.json";

/// Configuration for an editor session.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    /// Half-width of the square randomly placed shapes land in.
    pub placement_extent: f64,
    /// File name suggested to the persistence collaborator on export.
    pub export_filename: String,
    /// Whether exports are indented for readability.
    pub pretty_export: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            placement_extent: DEFAULT_EXTENT,
            export_filename: DEFAULT_EXPORT_FILENAME.to_string(),
            pretty_export: true,
        }
    }
}

impl EditorConfig {
    /// Set the placement extent.
    #[must_use]
    pub fn with_placement_extent(mut self, extent: f64) -> Self {
        self.placement_extent = extent;
        self
    }

    /// Set the suggested export file name.
    #[must_use]
    pub fn with_export_filename(mut self, filename: impl Into<String>) -> Self {
        self.export_filename = filename.into();
        self
    }

    /// Enable or disable indented exports.
    #[must_use]
    pub fn with_pretty_export(mut self, pretty: bool) -> Self {
        self.pretty_export = pretty;
        self
    }
}
