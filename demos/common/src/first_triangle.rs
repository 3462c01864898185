//! The first triangle: a single vertex array drawn with `glDrawArrays`.
//!
//! Press <escape> to quit or close the window.

use crate::{
  shared::{self, POSITION},
  Exercise, ExerciseError, InputAction, LoopFeedback,
};
use glstart_gl::{Gl, Mode, Program, VertexArray};

const VS: &str = include_str!("solid-vs.glsl");
const FS: &str = include_str!("solid-fs.glsl");

// Normalized device coordinates: anything outside [-1, 1] gets clipped. (0, 0) is the center of
// the window, not a corner.
#[rustfmt::skip]
const TRIANGLE: [f32; 9] = [
  -0.5, -0.5, 0.0,
   0.5, -0.5, 0.0,
   0.0,  0.5, 0.0,
];

pub struct LocalExercise {
  program: Program,
  triangle: VertexArray,
}

impl Exercise for LocalExercise {
  fn bootstrap(gl: &mut Gl) -> Result<Self, ExerciseError> {
    let triangle = VertexArray::new(gl, &TRIANGLE, None, POSITION)?;
    let program = shared::position_program(gl, VS, FS)?;

    Ok(Self { program, triangle })
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
    gl.draw(&self.triangle, Mode::Triangle);

    LoopFeedback::Continue(self)
  }
}
