//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and display operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`Error`] - Runtime errors during display operations
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level bus errors
//!
//! Drawing outside the panel is not an error: out-of-range pixels are dropped.
//!
//! ## Example
//!
//! ```
//! use ssd1306_page::{Builder, Dimensions, BuilderError};
//!
//! // Missing dimensions
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingDimensions)));
//!
//! // Invalid dimensions
//! let result = Dimensions::new(128, 128); // Too tall
//! assert!(result.is_err());
//! ```

use crate::command::FrameOverflow;
use crate::interface::DisplayInterface;

/// Maximum columns addressable by the supported controllers
///
/// The SSD1306 drives 128 segments; the SH1106 has 132 columns of RAM.
pub const MAX_WIDTH: u16 = 132;

/// Maximum rows (the multiplex ratio tops out at 64)
pub const MAX_HEIGHT: u16 = 64;

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// Bus transport error
    ///
    /// Wraps the underlying error from the [`DisplayInterface`] implementation.
    Interface(I::Error),
    /// No COM pin / contrast profile is known for this panel geometry
    UnsupportedGeometry {
        /// Panel width
        width: u16,
        /// Panel height
        height: u16,
    },
    /// Framebuffer storage is too small for the display
    ///
    /// The provided buffer must be at least `dimensions.buffer_size()` bytes.
    BufferTooSmall {
        /// Required buffer size in bytes
        required: usize,
        /// Provided buffer size in bytes
        provided: usize,
    },
    /// The framebuffer could not be allocated
    OutOfMemory,
    /// `begin` has not run yet, so the controller is not configured
    NotInitialized,
    /// A transmission exceeded its fixed frame capacity
    FrameOverflow {
        /// Frame capacity in bytes
        capacity: usize,
        /// Requested length in bytes
        len: usize,
    },
}

impl<I: DisplayInterface> From<FrameOverflow> for Error<I> {
    fn from(err: FrameOverflow) -> Self {
        Self::FrameOverflow {
            capacity: err.capacity,
            len: err.len,
        }
    }
}

impl<I: DisplayInterface> From<BufferTooSmall> for Error<I> {
    fn from(err: BufferTooSmall) -> Self {
        Self::BufferTooSmall {
            required: err.required,
            provided: err.provided,
        }
    }
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(_) => write!(f, "Interface error"),
            Self::UnsupportedGeometry { width, height } => {
                write!(f, "Unsupported panel geometry: {width}x{height}")
            }
            Self::BufferTooSmall { required, provided } => {
                write!(
                    f,
                    "Buffer too small: required {required} bytes, provided {provided}"
                )
            }
            Self::OutOfMemory => write!(f, "Framebuffer allocation failed"),
            Self::NotInitialized => write!(f, "Display not initialized"),
            Self::FrameOverflow { capacity, len } => {
                write!(f, "Frame overflow: {len} bytes exceed capacity {capacity}")
            }
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Returned when framebuffer storage is shorter than the panel needs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BufferTooSmall {
    /// Required buffer size in bytes
    pub required: usize,
    /// Provided buffer size in bytes
    pub provided: usize,
}

impl core::fmt::Display for BufferTooSmall {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Buffer too small: required {} bytes, provided {}",
            self.required, self.provided
        )
    }
}

impl core::error::Error for BufferTooSmall {}

/// Errors that can occur when building configuration
#[derive(Debug)]
pub enum BuilderError {
    /// Dimensions were not specified
    ///
    /// [`Builder::dimensions()`](crate::config::Builder::dimensions) must be called before building.
    MissingDimensions,
    /// Invalid dimensions provided
    ///
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for constraints.
    InvalidDimensions {
        /// Width requested
        width: u16,
        /// Height requested
        height: u16,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingDimensions => write!(f, "Dimensions must be specified"),
            Self::InvalidDimensions { width, height } => write!(
                f,
                "Invalid dimensions {width}x{height} (max {MAX_WIDTH}x{MAX_HEIGHT})"
            ),
        }
    }
}

impl core::error::Error for BuilderError {}
