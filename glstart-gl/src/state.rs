//! Graphics state.

use crate::polygon::PolygonMode;
use gl::types::*;
use std::{cell::RefCell, error, fmt, marker::PhantomData};

// TLS synchronization barrier for `GlState`.
thread_local!(static TLS_ACQUIRE_GFX_STATE: RefCell<Option<()>> = RefCell::new(Some(())));

/// Cached value.
///
/// A cached value is used to prevent issuing GPU commands if we know the target value is already
/// set to what the command tries to set. Once a value is cached, asking to set it again is a no-op
/// until a different value is asked for.
#[derive(Debug)]
pub(crate) struct Cached<T>(Option<T>)
where
  T: PartialEq;

impl<T> Cached<T>
where
  T: PartialEq,
{
  /// Cache a value.
  pub(crate) fn new(initial: T) -> Self {
    Cached(Some(initial))
  }

  pub(crate) fn set(&mut self, value: T) {
    self.0 = Some(value);
  }

  pub(crate) fn get(&self) -> Option<&T> {
    self.0.as_ref()
  }

  /// Check if the cached value is invalid regarding a value.
  ///
  /// A non-cached value (i.e. empty) is always invalid whatever compared value. If a value is
  /// already cached, then it’s invalid if it’s not equal ([`PartialEq`]) to the input value.
  pub(crate) fn is_invalid(&self, new_val: &T) -> bool {
    match &self.0 {
      Some(ref t) => t != new_val,
      _ => true,
    }
  }
}

/// Whether a binding should go through the cache or be forced onto the GPU.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Bind {
  Forced,
  Cached,
}

/// The graphics state.
///
/// Forward-gate to the few pieces of the OpenGL state the exercises touch, with a small cache
/// layer over it so that per-frame calls setting the same value are not issued twice.
#[derive(Debug)]
pub(crate) struct GlState {
  _a: PhantomData<*const ()>, // !Send and !Sync

  viewport: Cached<[GLint; 4]>,
  clear_color: Cached<[GLfloat; 4]>,
  polygon_mode: Cached<PolygonMode>,

  bound_array_buffer: GLuint,
  bound_vertex_array: GLuint,
  current_program: GLuint,
}

impl GlState {
  /// Create a new `GlState`.
  ///
  /// > Note: keep in mind you can create only one per thread.
  pub(crate) fn new() -> Result<Self, StateQueryError> {
    acquire_after(|| unsafe { Self::get_from_context() })
  }

  /// Query the current OpenGL context for the initial values.
  unsafe fn get_from_context() -> Result<Self, StateQueryError> {
    let viewport = Cached::new(get_ctx_viewport()?);
    let clear_color = Cached::new(get_ctx_clear_color()?);
    let polygon_mode = Cached::new(get_ctx_polygon_mode()?);

    Ok(GlState {
      _a: PhantomData,
      viewport,
      clear_color,
      polygon_mode,
      bound_array_buffer: 0,
      bound_vertex_array: 0,
      current_program: 0,
    })
  }

  pub(crate) unsafe fn set_viewport(&mut self, viewport: [GLint; 4]) {
    if self.viewport.is_invalid(&viewport) {
      gl::Viewport(viewport[0], viewport[1], viewport[2], viewport[3]);
      self.viewport.set(viewport);
    }
  }

  pub(crate) unsafe fn set_clear_color(&mut self, clear_color: [GLfloat; 4]) {
    if self.clear_color.is_invalid(&clear_color) {
      gl::ClearColor(
        clear_color[0],
        clear_color[1],
        clear_color[2],
        clear_color[3],
      );
      self.clear_color.set(clear_color);
    }
  }

  pub(crate) unsafe fn set_polygon_mode(&mut self, mode: PolygonMode) {
    if self.polygon_mode.is_invalid(&mode) {
      gl::PolygonMode(gl::FRONT_AND_BACK, mode.to_glenum());
      self.polygon_mode.set(mode);
    }
  }

  pub(crate) fn polygon_mode(&self) -> Option<PolygonMode> {
    self.polygon_mode.get().copied()
  }

  pub(crate) unsafe fn bind_array_buffer(&mut self, handle: GLuint, bind: Bind) {
    if bind == Bind::Forced || self.bound_array_buffer != handle {
      gl::BindBuffer(gl::ARRAY_BUFFER, handle);
      self.bound_array_buffer = handle;
    }
  }

  // Forget about a buffer that is about to be deleted; OpenGL unbinds it on deletion and might
  // hand the same name out again later.
  pub(crate) fn unbind_buffer(&mut self, handle: GLuint) {
    if self.bound_array_buffer == handle {
      self.bound_array_buffer = 0;
    }
  }

  pub(crate) unsafe fn bind_vertex_array(&mut self, handle: GLuint, bind: Bind) {
    if bind == Bind::Forced || self.bound_vertex_array != handle {
      gl::BindVertexArray(handle);
      self.bound_vertex_array = handle;
    }
  }

  pub(crate) fn unbind_vertex_array(&mut self, handle: GLuint) {
    if self.bound_vertex_array == handle {
      self.bound_vertex_array = 0;
    }
  }

  pub(crate) unsafe fn use_program(&mut self, handle: GLuint) {
    if self.current_program != handle {
      gl::UseProgram(handle);
      self.current_program = handle;
    }
  }

  pub(crate) fn unuse_program(&mut self, handle: GLuint) {
    if self.current_program == handle {
      self.current_program = 0;
    }
  }
}

/// Run `query`, then take the graphics state token of the current thread.
///
/// A failing query leaves the token in place.
fn acquire_after<T>(
  query: impl FnOnce() -> Result<T, StateQueryError>,
) -> Result<T, StateQueryError> {
  let t = query()?;
  acquire_thread_state()?;
  Ok(t)
}

/// Take the graphics state token of the current thread.
///
/// Only the first call on a given thread succeeds.
fn acquire_thread_state() -> Result<(), StateQueryError> {
  TLS_ACQUIRE_GFX_STATE.with(|rc| {
    let mut inner = rc.borrow_mut();

    match *inner {
      Some(_) => {
        inner.take();
        Ok(())
      }

      None => Err(StateQueryError::UnavailableGLState),
    }
  })
}

/// An error that might happen when the context is queried.
#[non_exhaustive]
#[derive(Debug, Eq, PartialEq)]
pub enum StateQueryError {
  /// The graphics state is unavailable.
  ///
  /// That might occur if the current thread doesn’t support allocating a new graphics state. It
  /// might happen if you try to have more than one state on the same thread, for instance.
  UnavailableGLState,
  /// Corrupted polygon mode.
  UnknownPolygonMode(GLenum),
  /// The loader didn’t provide an OpenGL function the crate calls.
  FunctionNotLoaded(&'static str),
}

impl fmt::Display for StateQueryError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StateQueryError::UnavailableGLState => write!(f, "unavailable graphics state"),
      StateQueryError::UnknownPolygonMode(ref m) => write!(f, "unknown polygon mode: {}", m),
      StateQueryError::FunctionNotLoaded(name) => write!(f, "OpenGL function not loaded: {}", name),
    }
  }
}

impl error::Error for StateQueryError {}

// Every OpenGL function called from this crate.
const REQUIRED_FUNCTIONS: &[(&str, fn() -> bool)] = &[
  ("glGetIntegerv", gl::GetIntegerv::is_loaded),
  ("glGetFloatv", gl::GetFloatv::is_loaded),
  ("glViewport", gl::Viewport::is_loaded),
  ("glClearColor", gl::ClearColor::is_loaded),
  ("glClear", gl::Clear::is_loaded),
  ("glPolygonMode", gl::PolygonMode::is_loaded),
  ("glGenBuffers", gl::GenBuffers::is_loaded),
  ("glBindBuffer", gl::BindBuffer::is_loaded),
  ("glBufferData", gl::BufferData::is_loaded),
  ("glDeleteBuffers", gl::DeleteBuffers::is_loaded),
  ("glGenVertexArrays", gl::GenVertexArrays::is_loaded),
  ("glBindVertexArray", gl::BindVertexArray::is_loaded),
  ("glDeleteVertexArrays", gl::DeleteVertexArrays::is_loaded),
  ("glVertexAttribPointer", gl::VertexAttribPointer::is_loaded),
  ("glEnableVertexAttribArray", gl::EnableVertexAttribArray::is_loaded),
  ("glCreateShader", gl::CreateShader::is_loaded),
  ("glShaderSource", gl::ShaderSource::is_loaded),
  ("glCompileShader", gl::CompileShader::is_loaded),
  ("glGetShaderiv", gl::GetShaderiv::is_loaded),
  ("glGetShaderInfoLog", gl::GetShaderInfoLog::is_loaded),
  ("glDeleteShader", gl::DeleteShader::is_loaded),
  ("glCreateProgram", gl::CreateProgram::is_loaded),
  ("glAttachShader", gl::AttachShader::is_loaded),
  ("glDetachShader", gl::DetachShader::is_loaded),
  ("glBindAttribLocation", gl::BindAttribLocation::is_loaded),
  ("glLinkProgram", gl::LinkProgram::is_loaded),
  ("glGetProgramiv", gl::GetProgramiv::is_loaded),
  ("glGetProgramInfoLog", gl::GetProgramInfoLog::is_loaded),
  ("glUseProgram", gl::UseProgram::is_loaded),
  ("glDeleteProgram", gl::DeleteProgram::is_loaded),
  ("glDrawArrays", gl::DrawArrays::is_loaded),
  ("glDrawElements", gl::DrawElements::is_loaded),
];

/// Check that the loader found every function the crate calls.
pub(crate) fn check_functions_loaded() -> Result<(), StateQueryError> {
  match REQUIRED_FUNCTIONS.iter().find(|(_, is_loaded)| !is_loaded()) {
    Some(&(name, _)) => Err(StateQueryError::FunctionNotLoaded(name)),
    None => Ok(()),
  }
}

unsafe fn get_ctx_viewport() -> Result<[GLint; 4], StateQueryError> {
  let mut data = [0; 4];
  gl::GetIntegerv(gl::VIEWPORT, data.as_mut_ptr());
  Ok(data)
}

unsafe fn get_ctx_clear_color() -> Result<[GLfloat; 4], StateQueryError> {
  let mut data = [0.; 4];
  gl::GetFloatv(gl::COLOR_CLEAR_VALUE, data.as_mut_ptr());
  Ok(data)
}

unsafe fn get_ctx_polygon_mode() -> Result<PolygonMode, StateQueryError> {
  // front and back faces
  let mut data = [0; 2];
  gl::GetIntegerv(gl::POLYGON_MODE, data.as_mut_ptr());

  let mode = data[0] as GLenum;
  PolygonMode::from_glenum(mode).ok_or(StateQueryError::UnknownPolygonMode(mode))
}
