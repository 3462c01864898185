//! Polygon rasterization mode.

use gl::types::*;
use std::fmt;

/// Defines how polygons get rasterized.
///
/// The usual value is `Fill`, which fills the content of polygons with the fragment color. The
/// other modes are mostly useful to look at the geometry being sent down the pipeline.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PolygonMode {
  /// Fill the content of the polygon. This is the default mode.
  Fill,
  /// Only draw the boundaries of each polygon.
  Line,
  /// Only draw a single point at each vertex.
  Point,
}

impl Default for PolygonMode {
  fn default() -> Self {
    PolygonMode::Fill
  }
}

impl PolygonMode {
  /// Next mode in the fill → line → point round-robin.
  pub fn next(self) -> Self {
    match self {
      PolygonMode::Fill => PolygonMode::Line,
      PolygonMode::Line => PolygonMode::Point,
      PolygonMode::Point => PolygonMode::Fill,
    }
  }

  pub(crate) fn to_glenum(self) -> GLenum {
    match self {
      PolygonMode::Fill => gl::FILL,
      PolygonMode::Line => gl::LINE,
      PolygonMode::Point => gl::POINT,
    }
  }

  pub(crate) fn from_glenum(mode: GLenum) -> Option<Self> {
    match mode {
      gl::FILL => Some(PolygonMode::Fill),
      gl::LINE => Some(PolygonMode::Line),
      gl::POINT => Some(PolygonMode::Point),
      _ => None,
    }
  }
}

impl fmt::Display for PolygonMode {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      PolygonMode::Fill => f.write_str("fill"),
      PolygonMode::Line => f.write_str("line"),
      PolygonMode::Point => f.write_str("point"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_is_fill() {
    assert_eq!(PolygonMode::default(), PolygonMode::Fill);
  }

  #[test]
  fn round_robin() {
    assert_eq!(PolygonMode::Fill.next(), PolygonMode::Line);
    assert_eq!(PolygonMode::Line.next(), PolygonMode::Point);
    assert_eq!(PolygonMode::Point.next(), PolygonMode::Fill);
  }

  #[test]
  fn three_steps_come_back() {
    for mode in [PolygonMode::Fill, PolygonMode::Line, PolygonMode::Point] {
      assert_eq!(mode.next().next().next(), mode);
    }
  }

  #[test]
  fn glenum_mapping() {
    for mode in [PolygonMode::Fill, PolygonMode::Line, PolygonMode::Point] {
      assert_eq!(PolygonMode::from_glenum(mode.to_glenum()), Some(mode));
    }

    assert_eq!(PolygonMode::Line.to_glenum(), gl::LINE);
    assert_eq!(PolygonMode::from_glenum(gl::TRIANGLES), None);
  }

  #[test]
  fn display() {
    assert_eq!(PolygonMode::Fill.to_string(), "fill");
    assert_eq!(PolygonMode::Line.to_string(), "line");
    assert_eq!(PolygonMode::Point.to_string(), "point");
  }
}
