//! Thin OpenGL 3.0 wrappers.
//!
//! This crate is a small, safe layer over the raw [gl](https://crates.io/crates/gl) bindings, just
//! large enough for the exercises: shader stages and programs, vertex and index buffers, vertex
//! arrays, polygon mode and the two draw calls. Every object is created from a [`Gl`] and deletes
//! its OpenGL counterpart when dropped.
//!
//! A [`Gl`] is obtained once per thread with [`Gl::load_with`], after a context has been made
//! current by the windowing code.

pub mod buffer;
pub mod polygon;
pub mod shader;
mod state;
pub mod vertex_array;

pub use buffer::{Buffer, BufferKind};
pub use polygon::PolygonMode;
pub use shader::{Program, ProgramError, Stage, StageError, StageType};
pub use state::StateQueryError;
pub use vertex_array::{Mode, VertexArray, VertexArrayError, VertexAttrib};

use gl::types::*;
use state::{Bind, GlState};
use std::{cell::RefCell, os::raw::c_void, ptr, rc::Rc};

/// An OpenGL 3.0 context.
///
/// Owning one means the OpenGL functions are loaded and the graphics state of the current thread
/// is tracked by this value.
#[derive(Debug)]
pub struct Gl {
  state: Rc<RefCell<GlState>>,
}

impl Gl {
  /// Load the OpenGL functions with `loader` and acquire the graphics state of the current thread.
  ///
  /// The context the functions are loaded from must be current on this thread. Fails with
  /// [`StateQueryError::FunctionNotLoaded`] if the loader misses a function this crate calls.
  pub fn load_with<F>(loader: F) -> Result<Self, StateQueryError>
  where
    F: FnMut(&'static str) -> *const c_void,
  {
    gl::load_with(loader);
    state::check_functions_loaded()?;

    GlState::new().map(|state| Gl {
      state: Rc::new(RefCell::new(state)),
    })
  }

  pub(crate) fn state(&self) -> &Rc<RefCell<GlState>> {
    &self.state
  }

  /// Set the viewport, in window coordinates ((0, 0) is the lower-left corner).
  pub fn set_viewport(&mut self, x: i32, y: i32, width: u32, height: u32) {
    unsafe {
      self
        .state
        .borrow_mut()
        .set_viewport([x, y, width as GLint, height as GLint]);
    }
  }

  /// Set the color used to clear the color buffer.
  pub fn set_clear_color(&mut self, rgba: [f32; 4]) {
    unsafe { self.state.borrow_mut().set_clear_color(rgba) }
  }

  /// Clear the color buffer with the clear color.
  pub fn clear(&mut self) {
    unsafe { gl::Clear(gl::COLOR_BUFFER_BIT) }
  }

  /// Set how front and back facing polygons get rasterized.
  pub fn set_polygon_mode(&mut self, mode: PolygonMode) {
    unsafe { self.state.borrow_mut().set_polygon_mode(mode) }
  }

  /// Current polygon mode.
  pub fn polygon_mode(&self) -> PolygonMode {
    self.state.borrow().polygon_mode().unwrap_or_default()
  }

  /// Make `program` the program used by subsequent draw calls.
  pub fn use_program(&mut self, program: &Program) {
    unsafe { self.state.borrow_mut().use_program(program.handle()) }
  }

  /// Draw the whole vertex array.
  ///
  /// Indexed vertex arrays are drawn with `glDrawElements` over all their indices, the others with
  /// `glDrawArrays` over all their vertices.
  pub fn draw(&mut self, vertex_array: &VertexArray, mode: Mode) {
    unsafe {
      self
        .state
        .borrow_mut()
        .bind_vertex_array(vertex_array.handle(), Bind::Cached);

      match vertex_array.index_nb() {
        Some(index_nb) => gl::DrawElements(
          mode.to_glenum(),
          index_nb as GLsizei,
          gl::UNSIGNED_INT,
          ptr::null(),
        ),

        None => gl::DrawArrays(mode.to_glenum(), 0, vertex_array.vert_nb() as GLsizei),
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_functions_are_reported() {
    let loaded = std::thread::spawn(|| Gl::load_with(|_| ptr::null()).map(|_| ()))
      .join()
      .unwrap();

    assert_eq!(
      loaded,
      Err(StateQueryError::FunctionNotLoaded("glGetIntegerv"))
    );
  }
}
