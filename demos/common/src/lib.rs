//! glstart exercises.
//!
//! This project provides a sequence of introductory OpenGL exercises. Each one opens a window,
//! compiles and links a pair of shaders, uploads a small fixed set of vertices and draws one or two
//! primitives every frame.
//!
//! # Exercise architecture
//!
//! Exercises are simple modules exposed from this crate. They do not depend on any
//! platform-specific concepts, such as system events or system window capacities. For that reason,
//! whenever an exercise requires user interaction, an abstract type ([`InputAction`]) is used from
//! this crate, which is produced by the platform code running the exercise.
//!
//! Exercises are responsible for allocating their OpenGL resources and drawing each frame by
//! implementing the [`Exercise`] trait. Resources are released when the exercise is dropped.

use glstart_gl::{Gl, ProgramError, VertexArrayError};
use std::{error, fmt};

pub mod ebo_rectangle;
pub mod first_triangle;
mod shared;
pub mod two_triangles;

/// Exercise interface.
pub trait Exercise: Sized {
  /// Bootstrap the exercise: upload the geometry, compile and link the shaders.
  fn bootstrap(gl: &mut Gl) -> Result<Self, ExerciseError>;

  /// Render a frame of the exercise.
  fn render_frame(
    self,
    time: f32,
    actions: impl Iterator<Item = InputAction>,
    gl: &mut Gl,
  ) -> LoopFeedback<Self>;
}

/// A type used to pass “inputs” to exercises.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InputAction {
  /// Quit the application.
  Quit,

  /// Main action. Typically used to switch an effect on and off or to cycle through it.
  MainToggle,

  /// Framebuffer size changed.
  Resized { width: u32, height: u32 },
}

/// Whether the render loop should go on, with the stepped exercise, or stop.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum LoopFeedback<T> {
  Continue(T),
  Exit,
}

/// Errors that can occur while bootstrapping an exercise.
#[non_exhaustive]
#[derive(Debug)]
pub enum ExerciseError {
  /// The shader program could not be built.
  Program(ProgramError),
  /// The geometry could not be uploaded.
  VertexArray(VertexArrayError),
}

impl fmt::Display for ExerciseError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      ExerciseError::Program(ref e) => write!(f, "cannot build shader program: {}", e),
      ExerciseError::VertexArray(ref e) => write!(f, "cannot upload geometry: {}", e),
    }
  }
}

impl error::Error for ExerciseError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      ExerciseError::Program(e) => Some(e),
      ExerciseError::VertexArray(e) => Some(e),
    }
  }
}

impl From<ProgramError> for ExerciseError {
  fn from(source: ProgramError) -> Self {
    Self::Program(source)
  }
}

impl From<VertexArrayError> for ExerciseError {
  fn from(source: VertexArrayError) -> Self {
    Self::VertexArray(source)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use glstart_gl::{StageError, StageType};

  #[test]
  fn compile_error_carries_info_log() {
    let stage = StageError::CompilationFailed(
      StageType::FragmentShader,
      "0:5(3): error: `FragColour' undeclared".to_owned(),
    );
    let e = ExerciseError::from(ProgramError::from(stage));
    let msg = e.to_string();

    assert!(msg.starts_with("cannot build shader program: "));
    assert!(msg.contains("fragment shader compilation error"));
    assert!(msg.ends_with("0:5(3): error: `FragColour' undeclared"));
  }

  #[test]
  fn geometry_error() {
    let e = ExerciseError::from(VertexArrayError::IndexOutOfBounds {
      index: 4,
      vert_nb: 4,
    });

    assert_eq!(
      e.to_string(),
      "cannot upload geometry: index 4 is out of bounds (4 vertices)"
    );
    assert!(error::Error::source(&e).is_some());
  }
}
