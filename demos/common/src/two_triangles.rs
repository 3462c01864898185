//! Two triangles, each in its own vertex array, drawn one after the other.
//!
//! The vertex shader hands its clip-space position over to the fragment shader, which uses the
//! absolute horizontal coordinate as a gray level: the further from the center, the brighter.
//!
//! Press <escape> to quit or close the window.

use crate::{
  shared::{self, POSITION},
  Exercise, ExerciseError, InputAction, LoopFeedback,
};
use glstart_gl::{Gl, Mode, Program, VertexArray};

const VS: &str = include_str!("clip-space-vs.glsl");
const FS: &str = include_str!("clip-space-fs.glsl");

#[rustfmt::skip]
const LEFT_TRIANGLE: [f32; 9] = [
  -0.75, -0.5, 0.0,
  -0.25, -0.5, 0.0,
  -0.5,   0.0, 0.0,
];

#[rustfmt::skip]
const RIGHT_TRIANGLE: [f32; 9] = [
  0.75,  0.0, 0.0,
  0.25,  0.0, 0.0,
  0.5,  -0.5, 0.0,
];

pub struct LocalExercise {
  program: Program,
  left: VertexArray,
  right: VertexArray,
}

impl Exercise for LocalExercise {
  fn bootstrap(gl: &mut Gl) -> Result<Self, ExerciseError> {
    let left = VertexArray::new(gl, &LEFT_TRIANGLE, None, POSITION)?;
    let right = VertexArray::new(gl, &RIGHT_TRIANGLE, None, POSITION)?;
    let program = shared::position_program(gl, VS, FS)?;

    Ok(Self {
      program,
      left,
      right,
    })
  }

  fn render_frame(
    self,
    _: f32,
    actions: impl Iterator<Item = InputAction>,
    gl: &mut Gl,
  ) -> LoopFeedback<Self> {
    for action in actions {
      if !shared::handle_common_action(&action, gl) {
        return LoopFeedback::Exit;
      }
    }

    shared::clear(gl);
    gl.use_program(&self.program);
    gl.draw(&self.left, Mode::Triangle);
    gl.draw(&self.right, Mode::Triangle);

    LoopFeedback::Continue(self)
  }
}
