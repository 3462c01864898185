//! Window options.

/// Different window options.
///
/// Feel free to look at the different methods available to tweak the options. You may want to start
/// with `default()` though.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WindowOpt {
  width: u32,
  height: u32,
  num_samples: Option<u32>,
}

impl Default for WindowOpt {
  /// Defaults:
  ///
  /// - `800×600` windowed.
  /// - `num_samples` set to `None`.
  fn default() -> Self {
    WindowOpt {
      width: 800,
      height: 600,
      num_samples: None,
    }
  }
}

impl WindowOpt {
  /// Set the dimension of the window, in screen coordinates.
  #[inline]
  pub fn set_dim(self, width: u32, height: u32) -> Self {
    WindowOpt {
      width,
      height,
      ..self
    }
  }

  /// Get the dimension of the window, as `[width, height]`.
  #[inline]
  pub fn dim(&self) -> [u32; 2] {
    [self.width, self.height]
  }

  /// Set the number of samples to use for multisampling.
  ///
  /// Pass `None` to disable multisampling.
  #[inline]
  pub fn set_num_samples<S>(self, samples: S) -> Self
  where
    S: Into<Option<u32>>,
  {
    WindowOpt {
      num_samples: samples.into(),
      ..self
    }
  }

  /// Get the number of samples to use in multisampling, if any.
  #[inline]
  pub fn num_samples(&self) -> Option<u32> {
    self.num_samples
  }
}
