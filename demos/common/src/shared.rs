//! Bits shared by all exercises.

use crate::InputAction;
use glstart_gl::{Gl, Program, ProgramError, VertexAttrib};

/// Color the window is cleared with before drawing.
pub const CLEAR_COLOR: [f32; 4] = [0.2, 0.3, 0.2, 1.];

/// Name of the vertex position input in the vertex shaders.
pub const POSITION_NAME: &str = "aPos";

/// Vertex positions: three tightly packed floats, bound at index 0.
pub const POSITION: VertexAttrib = VertexAttrib::new(0, 3);

/// Build a program out of a vertex and a fragment shader sources, binding the position input.
pub fn position_program(gl: &mut Gl, vs: &str, fs: &str) -> Result<Program, ProgramError> {
  Program::from_strings(gl, vs, fs, &[(POSITION.index(), POSITION_NAME)])
}

/// Handle the actions every exercise reacts to the same way.
///
/// Returns `false` if the exercise must stop.
pub fn handle_common_action(action: &InputAction, gl: &mut Gl) -> bool {
  match *action {
    InputAction::Quit => return false,
    InputAction::Resized { width, height } => gl.set_viewport(0, 0, width, height),
    _ => (),
  }

  true
}

/// Clear the color buffer before drawing a new frame.
pub fn clear(gl: &mut Gl) {
  gl.set_clear_color(CLEAR_COLOR);
  gl.clear();
}

#[cfg(test)]
pub mod tests {
  use super::*;

  /// Every coordinate must be in normalized device coordinates, or it gets clipped.
  pub fn assert_ndc(vertices: &[f32]) {
    for c in vertices {
      assert!((-1. ..=1.).contains(c), "{} is out of NDC", c);
    }
  }

  #[test]
  fn vertex_shaders_declare_position() {
    for vs in [
      include_str!("solid-vs.glsl"),
      include_str!("clip-space-vs.glsl"),
    ] {
      assert!(vs.starts_with("#version 130\n"));
      assert!(vs.contains(&format!("in vec3 {};", POSITION_NAME)));
    }
  }

  #[test]
  fn fragment_shaders_output_color() {
    for fs in [
      include_str!("solid-fs.glsl"),
      include_str!("clip-space-fs.glsl"),
    ] {
      assert!(fs.starts_with("#version 130\n"));
      assert!(fs.contains("out vec4 FragColor;"));
    }
  }

  #[test]
  fn clip_space_stages_agree_on_varying() {
    assert!(include_str!("clip-space-vs.glsl").contains("out vec4 colour;"));
    assert!(include_str!("clip-space-fs.glsl").contains("in vec4 colour;"));
  }

  #[test]
  fn position_layout() {
    assert_eq!(POSITION.index(), 0);
    assert_eq!(POSITION.stride_bytes(), 12);
  }

  #[test]
  fn clear_color_is_opaque() {
    assert_eq!(CLEAR_COLOR[3], 1.);
  }
}
