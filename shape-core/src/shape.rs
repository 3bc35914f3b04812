//! Shapes - the building blocks of an editor scene.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a shape.
///
/// Generated from a random v4 UUID, so an id is never handed out twice
/// within (or across) editor sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeId(Uuid);

impl ShapeId {
    /// Create a new unique shape ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a shape ID from its string form.
    ///
    /// # Errors
    ///
    /// Returns an error if `s` is not a valid UUID.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s).map(Self)
    }
}

impl Default for ShapeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of primitive a shape renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    /// A flat rectangle.
    #[serde(rename = "rect")]
    Rectangle,
    /// A flat disc.
    #[serde(rename = "circle")]
    Circle,
    /// A line segment.
    #[serde(rename = "line")]
    Line,
}

impl ShapeKind {
    /// All shape kinds, in toolbar order.
    pub const ALL: [Self; 3] = [Self::Rectangle, Self::Circle, Self::Line];

    /// The literal used for this kind in scene documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rectangle => "rect",
            Self::Circle => "circle",
            Self::Line => "line",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known shape kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown shape kind: {0}")]
pub struct UnknownShapeKind(pub String);

impl FromStr for ShapeKind {
    type Err = UnknownShapeKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rect" | "rectangle" => Ok(Self::Rectangle),
            "circle" => Ok(Self::Circle),
            "line" => Ok(Self::Line),
            other => Err(UnknownShapeKind(other.to_string())),
        }
    }
}

/// A point in scene space. The editor keeps shapes on the z = 0 plane,
/// but z is carried through unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Position {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
}

impl Position {
    /// Create a position from its components.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Check that every component is a finite number.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f64; 3]> for Position {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Position> for [f64; 3] {
    fn from(p: Position) -> Self {
        [p.x, p.y, p.z]
    }
}

/// An RGB color with each channel in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "[f64; 3]")]
pub struct Color {
    r: f64,
    g: f64,
    b: f64,
}

impl Color {
    /// Create a color, clamping each channel into `[0.0, 1.0]`.
    ///
    /// NaN channels become 0.
    #[must_use]
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        let clamp = |c: f64| if c.is_nan() { 0.0 } else { c.clamp(0.0, 1.0) };
        Self {
            r: clamp(r),
            g: clamp(g),
            b: clamp(b),
        }
    }

    /// Create a color from channels that must already be in range.
    ///
    /// Returns `None` if any channel is outside `[0.0, 1.0]` or NaN.
    #[must_use]
    pub fn try_from_array(channels: [f64; 3]) -> Option<Self> {
        if channels.iter().all(|c| (0.0..=1.0).contains(c)) {
            let [r, g, b] = channels;
            Some(Self { r, g, b })
        } else {
            None
        }
    }

    /// Red channel.
    #[must_use]
    pub const fn r(&self) -> f64 {
        self.r
    }

    /// Green channel.
    #[must_use]
    pub const fn g(&self) -> f64 {
        self.g
    }

    /// Blue channel.
    #[must_use]
    pub const fn b(&self) -> f64 {
        self.b
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }
}

impl From<Color> for [f64; 3] {
    fn from(c: Color) -> Self {
        [c.r, c.g, c.b]
    }
}

/// Opaque reference to a primitive rendered by the scene adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VisualHandle(u64);

impl VisualHandle {
    /// Wrap a raw adapter handle.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw adapter handle.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for VisualHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "visual#{}", self.0)
    }
}

/// A placed shape.
///
/// The shape owns its visual: the registry releases it through the scene
/// adapter when the shape is removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    /// Unique identifier.
    pub id: ShapeId,
    /// Primitive kind, fixed at creation.
    pub kind: ShapeKind,
    /// Current position.
    pub position: Position,
    /// Fill (or stroke, for lines) color.
    pub color: Color,
    /// The rendered primitive backing this shape.
    pub visual: VisualHandle,
}
