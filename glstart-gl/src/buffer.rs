//! OpenGL buffer implementation.

use crate::{
  state::{Bind, GlState},
  Gl,
};
use gl::types::*;
use std::{cell::RefCell, marker::PhantomData, mem, rc::Rc};

/// What a buffer stores, which is also where it gets bound.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BufferKind {
  /// Vertex data (`GL_ARRAY_BUFFER`).
  Array,
  /// Vertex indices (`GL_ELEMENT_ARRAY_BUFFER`).
  ///
  /// The element binding is part of the vertex array state: binding one while a vertex array is
  /// bound attaches it to that vertex array.
  ElementArray,
}

impl BufferKind {
  pub(crate) fn target(self) -> GLenum {
    match self {
      BufferKind::Array => gl::ARRAY_BUFFER,
      BufferKind::ElementArray => gl::ELEMENT_ARRAY_BUFFER,
    }
  }
}

/// OpenGL buffer, filled once and deleted when dropped.
#[derive(Debug)]
pub struct Buffer<T> {
  handle: GLuint,
  len: usize,
  state: Rc<RefCell<GlState>>,
  _t: PhantomData<T>,
}

impl<T> Buffer<T>
where
  T: Copy,
{
  /// Create a buffer, bind it and upload `data` into it.
  ///
  /// The data is expected to be uploaded once and drawn many times (`GL_STATIC_DRAW`).
  pub fn from_slice(gl: &mut Gl, kind: BufferKind, data: &[T]) -> Self {
    let mut handle: GLuint = 0;
    let state = gl.state().clone();

    unsafe {
      gl::GenBuffers(1, &mut handle);

      match kind {
        BufferKind::Array => state.borrow_mut().bind_array_buffer(handle, Bind::Forced),
        BufferKind::ElementArray => gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, handle),
      }

      gl::BufferData(
        kind.target(),
        mem::size_of_val(data) as GLsizeiptr,
        data.as_ptr() as _,
        gl::STATIC_DRAW,
      );
    }

    Buffer {
      handle,
      len: data.len(),
      state,
      _t: PhantomData,
    }
  }
}

impl<T> Buffer<T> {
  /// Length of the buffer (number of elements).
  #[inline]
  pub fn len(&self) -> usize {
    self.len
  }

  /// Whether the buffer holds no element.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  /// Size of the buffer in bytes.
  #[inline]
  pub fn byte_len(&self) -> usize {
    self.len * mem::size_of::<T>()
  }
}

impl<T> Drop for Buffer<T> {
  fn drop(&mut self) {
    self.state.borrow_mut().unbind_buffer(self.handle);

    unsafe {
      gl::DeleteBuffers(1, &self.handle);
    }
  }
}
