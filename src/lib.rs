//! Fit-or-crop resize geometry for raster images.
//!
//! Pure geometry: no pixel operations and no allocations in the core.
//! `no_std` compatible.
//!
//! # Modules
//!
//! - [`resolve`]: Output and intermediate dimensions for fit and crop resizes
//! - [`focus`]: Gravity, focus points, and crop window placement
//! - [`plan`]: Combined resize plan handed to a processing backend
//! - `backend`: Decode/render seam and the `resize` orchestration (`alloc`)
//! - `query`: Option string parsing (`query` feature)
//!
//! # Example
//!
//! ```
//! use cropfit::{Defaults, Focus, RenderOptions, ResizeRequest, Size, plan};
//!
//! let request = ResizeRequest::new(300, 200)
//!     .crop(true)
//!     .focus(Focus::new(0.7, 0.7));
//! let plan = plan(Size::new(1000, 1000), &request, &RenderOptions::default(), &Defaults::default())
//!     .unwrap();
//!
//! assert_eq!(plan.intermediate, Size::new(300, 300));
//! assert_eq!(plan.output, Size::new(300, 200));
//! assert_eq!(plan.crop.unwrap().y, 100);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "alloc")]
pub mod backend;
pub mod focus;
pub mod plan;
#[cfg(feature = "query")]
pub mod query;
pub mod resolve;

// Re-exports: core types
pub use focus::{Anchor, Focus, Gravity, Rect, crop_offset, crop_window, resolve_crop_offset};
pub use plan::{Defaults, Extend, Interpolator, RenderOptions, ResizePlan, plan};
pub use resolve::{ResizeRequest, Resolution, ResolveError, Size, resolve_dimensions};

#[cfg(feature = "alloc")]
pub use backend::{Backend, Canvas, ImageFormat, ResizeError, resize};
