//! [GLFW](https://crates.io/crates/glfw) surface for the glstart exercises.
//!
//! Opening a window, creating an OpenGL 3.0 context for it and loading the OpenGL functions is
//! the same handful of calls for every exercise, so it lives here.

#![deny(missing_docs)]

mod window;

pub use window::WindowOpt;

use glfw::{Context as _, InitError, OpenGlProfileHint, Window, WindowEvent, WindowHint, WindowMode};
use glstart_gl::{Gl, StateQueryError};
use std::{error, fmt, os::raw::c_void, sync::mpsc::Receiver};

/// Whether GLFW errors are logged, letting [`GlfwSurface::new_gl30`] report them as
/// [`GlfwSurfaceError`].
///
/// Without the `log-errors` feature, GLFW errors panic from within the GLFW callback, which aborts
/// the process.
pub const LOG_ERRORS: bool = cfg!(feature = "log-errors");

/// Error that can be risen while creating a surface.
#[non_exhaustive]
#[derive(Debug)]
pub enum GlfwSurfaceError {
  /// Initialization of the surface went wrong.
  ///
  /// This variant exposes a **glfw** error for further information about what went wrong.
  InitError(InitError),

  /// The window (and its OpenGL context) could not be created.
  WindowCreationFailed,

  /// The graphics state is not available.
  ///
  /// This error is generated when the initialization code is called on a thread on which the
  /// graphics state has already been acquired.
  GraphicsStateError(StateQueryError),
}

impl fmt::Display for GlfwSurfaceError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      GlfwSurfaceError::InitError(ref e) => write!(f, "initialization error: {}", e),
      GlfwSurfaceError::WindowCreationFailed => f.write_str("failed to create GLFW window"),
      GlfwSurfaceError::GraphicsStateError(ref e) => {
        write!(f, "failed to get graphics state: {}", e)
      }
    }
  }
}

impl From<InitError> for GlfwSurfaceError {
  fn from(e: InitError) -> Self {
    GlfwSurfaceError::InitError(e)
  }
}

impl From<StateQueryError> for GlfwSurfaceError {
  fn from(e: StateQueryError) -> Self {
    GlfwSurfaceError::GraphicsStateError(e)
  }
}

impl error::Error for GlfwSurfaceError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      GlfwSurfaceError::InitError(e) => Some(e),
      GlfwSurfaceError::WindowCreationFailed => None,
      GlfwSurfaceError::GraphicsStateError(e) => Some(e),
    }
  }
}

/// GLFW surface.
///
/// This type exposes the GLFW window, the GLFW event receiver that you can use to poll events and
/// the [`Gl`] context used to render into the window.
#[derive(Debug)]
pub struct GlfwSurface {
  /// Wrapped GLFW window.
  pub window: Window,

  /// Wrapped GLFW events queue.
  pub events_rx: Receiver<(f64, WindowEvent)>,

  /// OpenGL context of the window.
  pub gl: Gl,
}

impl GlfwSurface {
  /// Initialize GLFW, open a window with an OpenGL 3.0 context (any profile) and load the OpenGL
  /// functions.
  ///
  /// Key, framebuffer size and close events are polled.
  pub fn new_gl30(title: &str, opt: WindowOpt) -> Result<Self, GlfwSurfaceError> {
    #[cfg(feature = "log-errors")]
    let error_cbk = glfw::LOG_ERRORS;
    #[cfg(not(feature = "log-errors"))]
    let error_cbk = glfw::FAIL_ON_ERRORS;

    let mut glfw = glfw::init(error_cbk)?;

    // OpenGL hints
    glfw.window_hint(WindowHint::ContextVersion(3, 0));
    glfw.window_hint(WindowHint::OpenGlProfile(OpenGlProfileHint::Any));
    glfw.window_hint(WindowHint::Samples(opt.num_samples()));

    let [width, height] = opt.dim();
    let (mut window, events_rx) = glfw
      .create_window(width, height, title, WindowMode::Windowed)
      .ok_or(GlfwSurfaceError::WindowCreationFailed)?;

    window.make_current();
    window.set_key_polling(true);
    window.set_framebuffer_size_polling(true);
    window.set_close_polling(true);

    // init OpenGL
    let gl = Gl::load_with(|s| window.get_proc_address(s) as *const c_void)?;

    log::info!("opened {}×{} window “{}”", width, height, title);

    Ok(GlfwSurface {
      window,
      events_rx,
      gl,
    })
  }

  /// Size of the window’s framebuffer, in pixels.
  pub fn framebuffer_size(&self) -> [u32; 2] {
    let (w, h) = self.window.get_framebuffer_size();
    [w.max(0) as u32, h.max(0) as u32]
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::error::Error as _;

  #[test]
  fn window_creation_error() {
    let e = GlfwSurfaceError::WindowCreationFailed;

    assert_eq!(e.to_string(), "failed to create GLFW window");
    assert!(e.source().is_none());
  }

  #[test]
  fn errors_logged_by_default() {
    assert!(LOG_ERRORS);
  }

  #[test]
  fn graphics_state_error() {
    let e = GlfwSurfaceError::from(StateQueryError::UnavailableGLState);

    assert_eq!(
      e.to_string(),
      "failed to get graphics state: unavailable graphics state"
    );
    assert!(e.source().is_some());
  }
}
