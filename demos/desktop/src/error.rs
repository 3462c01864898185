//! Errors ending the desktop runner.

use glstart_exercises::ExerciseError;
use glstart_glfw::GlfwSurfaceError;
use std::{error::Error, fmt};

#[derive(Debug)]
pub enum DesktopError {
  /// No exercise name was passed on the command line.
  NoExercise,
  /// The exercise name doesn’t match any exercise.
  UnknownExercise(String),
  /// The window or its OpenGL context could not be set up.
  Surface(GlfwSurfaceError),
  /// The exercise failed to bootstrap.
  Exercise(ExerciseError),
}

impl fmt::Display for DesktopError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      DesktopError::NoExercise => f.write_str("no exercise to run"),
      DesktopError::UnknownExercise(ref name) => write!(f, "no exercise named {}", name),
      DesktopError::Surface(ref e) => write!(f, "cannot create surface: {}", e),
      DesktopError::Exercise(ref e) => write!(f, "cannot bootstrap exercise: {}", e),
    }
  }
}

impl Error for DesktopError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    match self {
      DesktopError::Surface(e) => Some(e),
      DesktopError::Exercise(e) => Some(e),
      _ => None,
    }
  }
}

impl From<GlfwSurfaceError> for DesktopError {
  fn from(source: GlfwSurfaceError) -> Self {
    Self::Surface(source)
  }
}

impl From<ExerciseError> for DesktopError {
  fn from(source: ExerciseError) -> Self {
    Self::Exercise(source)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use glstart_gl::{ProgramError, StageError, StageType};

  #[test]
  fn unknown_exercise() {
    let e = DesktopError::UnknownExercise("hello-world".to_owned());

    assert_eq!(e.to_string(), "no exercise named hello-world");
    assert!(e.source().is_none());
  }

  #[test]
  fn shader_log_reaches_the_top() {
    let stage = StageError::CompilationFailed(StageType::VertexShader, "0:2(1): error".to_owned());
    let e = DesktopError::from(ExerciseError::from(ProgramError::from(stage)));

    assert!(e.to_string().starts_with("cannot bootstrap exercise: cannot build shader program"));
    assert!(e.to_string().ends_with("0:2(1): error"));
    assert!(e.source().is_some());
  }
}
