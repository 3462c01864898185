//! Shader stages and programs.
//!
//! A [`Stage`] is a single compiled GLSL source (vertex or fragment). Stages are linked together
//! into a [`Program`], which is what gets used when drawing. Once a program is linked, its stages
//! are not needed anymore and can be dropped.

use crate::{state::GlState, Gl};
use gl::types::*;
use std::{
  cell::RefCell,
  error,
  ffi::CString,
  fmt,
  marker::PhantomData,
  ptr::{null, null_mut},
  rc::Rc,
};

/// A shader stage type.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum StageType {
  /// Vertex shader.
  VertexShader,
  /// Fragment shader.
  FragmentShader,
}

impl StageType {
  fn to_glenum(self) -> GLenum {
    match self {
      StageType::VertexShader => gl::VERTEX_SHADER,
      StageType::FragmentShader => gl::FRAGMENT_SHADER,
    }
  }
}

impl fmt::Display for StageType {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StageType::VertexShader => f.write_str("vertex shader"),
      StageType::FragmentShader => f.write_str("fragment shader"),
    }
  }
}

/// Errors that shader stages can emit.
#[non_exhaustive]
#[derive(Debug, Eq, PartialEq)]
pub enum StageError {
  /// The driver refused to hand out a new shader object.
  CreationFailed(StageType),
  /// The source contains an interior NUL byte and cannot be passed to the driver.
  InvalidSource(StageType),
  /// Occurs when a shader fails to compile. The `String` is the driver’s info log.
  CompilationFailed(StageType, String),
}

impl StageError {
  /// Type of the stage that failed.
  pub fn stage_type(&self) -> StageType {
    match *self {
      StageError::CreationFailed(ty)
      | StageError::InvalidSource(ty)
      | StageError::CompilationFailed(ty, _) => ty,
    }
  }
}

impl fmt::Display for StageError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StageError::CreationFailed(ty) => write!(f, "unable to create {}", ty),
      StageError::InvalidSource(ty) => write!(f, "{} source contains a NUL byte", ty),
      StageError::CompilationFailed(ty, ref log) => write!(f, "{} compilation error:\n{}", ty, log),
    }
  }
}

impl error::Error for StageError {}

/// Errors that a [`Program`] can generate.
#[non_exhaustive]
#[derive(Debug, Eq, PartialEq)]
pub enum ProgramError {
  /// A shader stage failed to compile.
  StageError(StageError),
  /// An attribute name to bind contains an interior NUL byte.
  InvalidAttribName(String),
  /// Program link failed. You can inspect the reason by looking at the contained `String`.
  LinkFailed(String),
}

impl fmt::Display for ProgramError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      ProgramError::StageError(ref e) => write!(f, "shader program has stage error: {}", e),
      ProgramError::InvalidAttribName(ref name) => {
        write!(f, "invalid vertex attribute name: {:?}", name)
      }
      ProgramError::LinkFailed(ref s) => write!(f, "shader program failed to link:\n{}", s),
    }
  }
}

impl error::Error for ProgramError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      ProgramError::StageError(e) => Some(e),
      _ => None,
    }
  }
}

impl From<StageError> for ProgramError {
  fn from(e: StageError) -> Self {
    ProgramError::StageError(e)
  }
}

/// A compiled shader stage.
#[derive(Debug)]
pub struct Stage {
  handle: GLuint,
  _a: PhantomData<*const ()>,
}

impl Stage {
  /// Create and compile a new stage from its GLSL source.
  pub fn new(_: &mut Gl, ty: StageType, src: impl AsRef<str>) -> Result<Self, StageError> {
    let c_src = CString::new(src.as_ref().as_bytes()).map_err(|_| StageError::InvalidSource(ty))?;

    unsafe {
      let handle = gl::CreateShader(ty.to_glenum());

      if handle == 0 {
        return Err(StageError::CreationFailed(ty));
      }

      gl::ShaderSource(handle, 1, [c_src.as_ptr()].as_ptr(), null());
      gl::CompileShader(handle);

      let mut compiled: GLint = gl::FALSE.into();
      gl::GetShaderiv(handle, gl::COMPILE_STATUS, &mut compiled);

      if compiled == gl::TRUE.into() {
        log::debug!("compiled {} {}", ty, handle);
        Ok(Stage {
          handle,
          _a: PhantomData,
        })
      } else {
        let mut log_len: GLint = 0;
        gl::GetShaderiv(handle, gl::INFO_LOG_LENGTH, &mut log_len);

        let mut log = vec![0u8; log_len.max(0) as usize];
        gl::GetShaderInfoLog(handle, log_len, null_mut(), log.as_mut_ptr() as *mut GLchar);

        gl::DeleteShader(handle);

        Err(StageError::CompilationFailed(ty, info_log_to_string(log)))
      }
    }
  }
}

impl Drop for Stage {
  fn drop(&mut self) {
    unsafe {
      gl::DeleteShader(self.handle);
    }
  }
}

/// A linked shader program.
#[derive(Debug)]
pub struct Program {
  handle: GLuint,
  state: Rc<RefCell<GlState>>,
}

impl Program {
  /// Link a vertex and a fragment stage together.
  ///
  /// `attribs` maps vertex attribute indices to input names in the vertex shader. They are bound
  /// before linking, as GLSL 1.30 cannot declare locations itself.
  pub fn from_stages(
    gl: &mut Gl,
    vertex: &Stage,
    fragment: &Stage,
    attribs: &[(GLuint, &str)],
  ) -> Result<Self, ProgramError> {
    let c_attribs = attribs
      .iter()
      .map(|&(index, name)| {
        CString::new(name)
          .map(|c_name| (index, c_name))
          .map_err(|_| ProgramError::InvalidAttribName(name.to_owned()))
      })
      .collect::<Result<Vec<_>, _>>()?;

    unsafe {
      let handle = gl::CreateProgram();

      gl::AttachShader(handle, vertex.handle);
      gl::AttachShader(handle, fragment.handle);

      for (index, c_name) in &c_attribs {
        gl::BindAttribLocation(handle, *index, c_name.as_ptr() as *const GLchar);
      }

      // wrap right away so that the handle gets deleted on failure
      let program = Program {
        handle,
        state: gl.state().clone(),
      };

      let linked = program.link();

      gl::DetachShader(handle, vertex.handle);
      gl::DetachShader(handle, fragment.handle);

      linked.map(move |_| program)
    }
  }

  /// Compile both stages from their sources and link them.
  ///
  /// The stages are deleted once the program is linked.
  pub fn from_strings(
    gl: &mut Gl,
    vertex: &str,
    fragment: &str,
    attribs: &[(GLuint, &str)],
  ) -> Result<Self, ProgramError> {
    let vertex = Stage::new(gl, StageType::VertexShader, vertex)?;
    let fragment = Stage::new(gl, StageType::FragmentShader, fragment)?;

    Self::from_stages(gl, &vertex, &fragment, attribs)
  }

  pub(crate) fn handle(&self) -> GLuint {
    self.handle
  }

  fn link(&self) -> Result<(), ProgramError> {
    let handle = self.handle;

    unsafe {
      gl::LinkProgram(handle);

      let mut linked: GLint = gl::FALSE.into();
      gl::GetProgramiv(handle, gl::LINK_STATUS, &mut linked);

      if linked == gl::TRUE.into() {
        log::debug!("linked program {}", handle);
        Ok(())
      } else {
        let mut log_len: GLint = 0;
        gl::GetProgramiv(handle, gl::INFO_LOG_LENGTH, &mut log_len);

        let mut log = vec![0u8; log_len.max(0) as usize];
        gl::GetProgramInfoLog(handle, log_len, null_mut(), log.as_mut_ptr() as *mut GLchar);

        Err(ProgramError::LinkFailed(info_log_to_string(log)))
      }
    }
  }
}

impl Drop for Program {
  fn drop(&mut self) {
    self.state.borrow_mut().unuse_program(self.handle);

    unsafe {
      gl::DeleteProgram(self.handle);
    }
  }
}

// Drivers report logs as NUL-terminated, sometimes newline-terminated, and not always valid UTF-8.
pub(crate) fn info_log_to_string(mut log: Vec<u8>) -> String {
  if let Some(nul) = log.iter().position(|&b| b == 0) {
    log.truncate(nul);
  }

  String::from_utf8_lossy(&log).trim_end().to_owned()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn info_log_stops_at_nul() {
    let log = b"0:3(1): error: syntax error\n\0garbage".to_vec();
    assert_eq!(info_log_to_string(log), "0:3(1): error: syntax error");
  }

  #[test]
  fn info_log_empty() {
    assert_eq!(info_log_to_string(Vec::new()), "");
    assert_eq!(info_log_to_string(vec![0; 8]), "");
  }

  #[test]
  fn info_log_invalid_utf8() {
    let log = vec![b'o', b'k', 0xff, b'!', 0];
    assert_eq!(info_log_to_string(log), "ok\u{fffd}!");
  }

  #[test]
  fn stage_type_display() {
    assert_eq!(StageType::VertexShader.to_string(), "vertex shader");
    assert_eq!(StageType::FragmentShader.to_string(), "fragment shader");
  }

  #[test]
  fn stage_error_knows_its_stage() {
    let e = StageError::CompilationFailed(StageType::FragmentShader, "oops".to_owned());
    assert_eq!(e.stage_type(), StageType::FragmentShader);
    assert_eq!(
      StageError::InvalidSource(StageType::VertexShader).stage_type(),
      StageType::VertexShader
    );
  }

  #[test]
  fn program_error_wraps_stage_error() {
    let stage = StageError::CompilationFailed(StageType::VertexShader, "0:1: bad".to_owned());
    let e = ProgramError::from(stage);

    assert_eq!(
      e.to_string(),
      "shader program has stage error: vertex shader compilation error:\n0:1: bad"
    );
    assert!(error::Error::source(&e).is_some());
  }

  #[test]
  fn link_error_message() {
    let e = ProgramError::LinkFailed("unresolved symbol".to_owned());

    assert_eq!(
      e.to_string(),
      "shader program failed to link:\nunresolved symbol"
    );
    assert!(error::Error::source(&e).is_none());
  }
}
