//! A rectangle made of two triangles sharing two vertices, drawn with `glDrawElements`.
//!
//! Indexing lets the four corners be uploaded once instead of six times.
//!
//! Press the <main action> to cycle the polygon mode: fill, line, point, fill…
//! Press <escape> to quit or close the window.

use crate::{
  shared::{self, POSITION},
  Exercise, ExerciseError, InputAction, LoopFeedback,
};
use glstart_gl::{Gl, Mode, PolygonMode, Program, VertexArray};

const VS: &str = include_str!("solid-vs.glsl");
const FS: &str = include_str!("solid-fs.glsl");

#[rustfmt::skip]
const RECTANGLE: [f32; 12] = [
   0.5,  0.5, 0.0, // top right
   0.5, -0.5, 0.0, // bottom right
  -0.5, -0.5, 0.0, // bottom left
  -0.5,  0.5, 0.0, // top left
];

#[rustfmt::skip]
const INDICES: [u32; 6] = [
  0, 1, 3,
  1, 2, 3,
];

pub struct LocalExercise {
  program: Program,
  rectangle: VertexArray,
  polygon_mode: PolygonMode,
}

impl Exercise for LocalExercise {
  fn bootstrap(gl: &mut Gl) -> Result<Self, ExerciseError> {
    let rectangle = VertexArray::new(gl, &RECTANGLE, Some(&INDICES), POSITION)?;
    let program = shared::position_program(gl, VS, FS)?;

    let polygon_mode = PolygonMode::default();
    gl.set_polygon_mode(polygon_mode);
    log::debug!("polygon mode: {}", gl.polygon_mode());

    println!("Press enter and see!");

    Ok(Self {
      program,
      rectangle,
      polygon_mode,
    })
  }

  fn render_frame(
    mut self,
    _: f32,
    actions: impl Iterator<Item = InputAction>,
    gl: &mut Gl,
  ) -> LoopFeedback<Self> {
    for action in actions {
      if !shared::handle_common_action(&action, gl) {
        return LoopFeedback::Exit;
      }

      if action == InputAction::MainToggle {
        self.polygon_mode = self.polygon_mode.next();
        log::info!("polygon mode: {}", self.polygon_mode);
      }
    }

    gl.set_polygon_mode(self.polygon_mode);

    shared::clear(gl);
    gl.use_program(&self.program);
    gl.draw(&self.rectangle, Mode::Triangle);

    LoopFeedback::Continue(self)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::shared::tests::assert_ndc;

  #[test]
  fn rectangle_in_ndc() {
    assert_ndc(&RECTANGLE);
  }

  #[test]
  fn indices_form_two_triangles() {
    let vert_nb = RECTANGLE.len() / POSITION.components();

    assert_eq!(vert_nb, 4);
    assert_eq!(INDICES.len(), 6);
    assert!(INDICES.iter().all(|&i| (i as usize) < vert_nb));
  }

  #[test]
  fn triangles_share_the_diagonal() {
    let (first, second) = INDICES.split_at(3);
    let shared = first.iter().filter(|i| second.contains(i)).count();

    assert_eq!(shared, 2);
  }
}
