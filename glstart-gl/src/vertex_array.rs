//! Vertex arrays.
//!
//! A [`VertexArray`] bundles a vertex buffer, an optional index buffer and the description of how
//! the vertex attributes are laid out in the vertex buffer. Drawing only requires binding it.

use crate::{
  buffer::{Buffer, BufferKind},
  state::{Bind, GlState},
  Gl,
};
use gl::types::*;
use std::{cell::RefCell, error, fmt, mem, ptr, rc::Rc};

/// Primitive to assemble vertices into.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Mode {
  /// A triangle every three vertices.
  Triangle,
}

impl Mode {
  pub(crate) fn to_glenum(self) -> GLenum {
    match self {
      Mode::Triangle => gl::TRIANGLES,
    }
  }
}

/// Layout of the `f32` vertex attribute stored in a vertex buffer.
///
/// This abstracts over the arguments of `glVertexAttribPointer`. The attribute is tightly packed:
/// `components` floats per vertex, starting at the beginning of the buffer.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct VertexAttrib {
  index: GLuint,
  components: usize,
}

impl VertexAttrib {
  /// An attribute of `components` floats per vertex, bound at `index`.
  pub const fn new(index: GLuint, components: usize) -> Self {
    VertexAttrib { index, components }
  }

  /// Attribute index, as bound in the shader program.
  pub fn index(&self) -> GLuint {
    self.index
  }

  /// Number of floats per vertex.
  pub fn components(&self) -> usize {
    self.components
  }

  /// Stride in bytes, as expected by OpenGL.
  pub fn stride_bytes(&self) -> GLsizei {
    (self.components * mem::size_of::<f32>()) as GLsizei
  }

  unsafe fn set_pointer(&self) {
    gl::VertexAttribPointer(
      self.index,
      self.components as GLint,
      gl::FLOAT,
      gl::FALSE,
      self.stride_bytes(),
      ptr::null(),
    );
    gl::EnableVertexAttribArray(self.index);
  }
}

/// Errors that can happen while describing a vertex array.
#[non_exhaustive]
#[derive(Debug, Eq, PartialEq)]
pub enum VertexArrayError {
  /// The attribute has no component.
  EmptyAttrib(VertexAttrib),
  /// The number of floats is not a multiple of the number of components.
  LengthIncoherency {
    /// Number of floats in the vertex data.
    len: usize,
    /// Number of floats per vertex.
    components: usize,
  },
  /// An index refers to a vertex that doesn’t exist.
  IndexOutOfBounds {
    /// Faulty index.
    index: u32,
    /// Number of vertices.
    vert_nb: usize,
  },
}

impl fmt::Display for VertexArrayError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      VertexArrayError::EmptyAttrib(ref attrib) => {
        write!(f, "attribute {} has no component", attrib.index)
      }
      VertexArrayError::LengthIncoherency { len, components } => write!(
        f,
        "{} floats cannot be split into vertices of {} floats",
        len, components
      ),
      VertexArrayError::IndexOutOfBounds { index, vert_nb } => write!(
        f,
        "index {} is out of bounds ({} vertices)",
        index, vert_nb
      ),
    }
  }
}

impl error::Error for VertexArrayError {}

/// Compute the number of vertices described by `len` floats laid out as `attrib`, checking that
/// every index (if any) refers to one of them.
pub(crate) fn vertex_count(
  len: usize,
  attrib: &VertexAttrib,
  indices: Option<&[u32]>,
) -> Result<usize, VertexArrayError> {
  let components = attrib.components;

  if components == 0 {
    return Err(VertexArrayError::EmptyAttrib(*attrib));
  }

  if len % components != 0 {
    return Err(VertexArrayError::LengthIncoherency { len, components });
  }

  let vert_nb = len / components;

  if let Some(&index) = indices
    .into_iter()
    .flatten()
    .find(|&&i| i as usize >= vert_nb)
  {
    return Err(VertexArrayError::IndexOutOfBounds { index, vert_nb });
  }

  Ok(vert_nb)
}

/// A vertex array object along with the buffers it references.
#[derive(Debug)]
pub struct VertexArray {
  handle: GLuint,
  attrib: VertexAttrib,
  // kept alive for the vertex array to reference them
  vertex_buffer: Buffer<f32>,
  index_buffer: Option<Buffer<u32>>,
  state: Rc<RefCell<GlState>>,
}

impl VertexArray {
  /// Create a vertex array, upload `vertices` (and `indices`, if any) and configure `attrib`.
  ///
  /// The vertex array is left bound.
  pub fn new(
    gl: &mut Gl,
    vertices: &[f32],
    indices: Option<&[u32]>,
    attrib: VertexAttrib,
  ) -> Result<Self, VertexArrayError> {
    let vert_nb = vertex_count(vertices.len(), &attrib, indices)?;
    let state = gl.state().clone();
    let mut handle: GLuint = 0;

    unsafe {
      gl::GenVertexArrays(1, &mut handle);

      // force binding the vertex array so that previously bound vertex arrays (possibly the same
      // handle) don’t prevent us from binding here
      state.borrow_mut().bind_vertex_array(handle, Bind::Forced);
    }

    let vertex_buffer = Buffer::from_slice(gl, BufferKind::Array, vertices);
    let index_buffer =
      indices.map(|indices| Buffer::from_slice(gl, BufferKind::ElementArray, indices));

    unsafe {
      attrib.set_pointer();
    }

    log::debug!(
      "vertex array {}: {} vertices ({} bytes), {} indices",
      handle,
      vert_nb,
      vertex_buffer.byte_len(),
      index_buffer.as_ref().map_or(0, Buffer::len)
    );

    Ok(VertexArray {
      handle,
      attrib,
      vertex_buffer,
      index_buffer,
      state,
    })
  }

  pub(crate) fn handle(&self) -> GLuint {
    self.handle
  }

  /// Number of vertices in the vertex buffer.
  pub fn vert_nb(&self) -> usize {
    self.vertex_buffer.len() / self.attrib.components
  }

  /// Number of indices, if the vertex array is indexed.
  pub fn index_nb(&self) -> Option<usize> {
    self.index_buffer.as_ref().map(Buffer::len)
  }
}

impl Drop for VertexArray {
  fn drop(&mut self) {
    self.state.borrow_mut().unbind_vertex_array(self.handle);

    unsafe {
      gl::DeleteVertexArrays(1, &self.handle);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const POS: VertexAttrib = VertexAttrib::new(0, 3);

  #[test]
  fn attrib_layout() {
    assert_eq!(POS.index(), 0);
    assert_eq!(POS.components(), 3);
    assert_eq!(POS.stride_bytes(), 12);
  }

  #[test]
  fn count_direct() {
    assert_eq!(vertex_count(9, &POS, None), Ok(3));
    assert_eq!(vertex_count(0, &POS, None), Ok(0));
  }

  #[test]
  fn count_indexed() {
    let indices = [0, 1, 3, 1, 2, 3];
    assert_eq!(vertex_count(12, &POS, Some(&indices)), Ok(4));
  }

  #[test]
  fn empty_attrib() {
    let empty = VertexAttrib::new(1, 0);
    assert_eq!(
      vertex_count(9, &empty, None),
      Err(VertexArrayError::EmptyAttrib(empty))
    );
  }

  #[test]
  fn incoherent_length() {
    assert_eq!(
      vertex_count(10, &POS, None),
      Err(VertexArrayError::LengthIncoherency {
        len: 10,
        components: 3
      })
    );
  }

  #[test]
  fn index_out_of_bounds() {
    let indices = [0, 1, 4];
    assert_eq!(
      vertex_count(12, &POS, Some(&indices)),
      Err(VertexArrayError::IndexOutOfBounds {
        index: 4,
        vert_nb: 4
      })
    );
  }

  #[test]
  fn error_messages() {
    assert_eq!(
      VertexArrayError::LengthIncoherency {
        len: 10,
        components: 3
      }
      .to_string(),
      "10 floats cannot be split into vertices of 3 floats"
    );
    assert_eq!(
      VertexArrayError::IndexOutOfBounds {
        index: 7,
        vert_nb: 4
      }
      .to_string(),
      "index 7 is out of bounds (4 vertices)"
    );
    assert_eq!(
      VertexArrayError::EmptyAttrib(VertexAttrib::new(2, 0)).to_string(),
      "attribute 2 has no component"
    );
  }

  #[test]
  fn modes() {
    assert_eq!(Mode::Triangle.to_glenum(), gl::TRIANGLES);
  }
}
