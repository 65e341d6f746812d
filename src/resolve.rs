//! Output and intermediate dimensions for fit and crop resizes.
//!
//! Given source dimensions and a [`ResizeRequest`], computes the size the
//! source is scaled to (the intermediate canvas) and the final output size.
//! In fit mode the two are identical. In crop mode the intermediate canvas
//! covers the requested box and the output is cut from it.
//!
//! # Example
//!
//! ```
//! use cropfit::{ResizeRequest, Size};
//!
//! let fit = ResizeRequest::new(200, 150).resolve(200, 250).unwrap();
//! assert_eq!(fit.output, Size::new(120, 150));
//!
//! let crop = ResizeRequest::new(200, 150)
//!     .crop(true)
//!     .resolve(200, 250)
//!     .unwrap();
//! assert_eq!(crop.intermediate, Size::new(200, 250));
//! assert_eq!(crop.output, Size::new(200, 150));
//! ```

use crate::focus::{Anchor, Focus, Gravity};

/// Width × height dimensions in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether either axis is zero.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether `other` fits inside `self` on both axes.
    pub const fn contains(&self, other: Size) -> bool {
        other.width <= self.width && other.height <= self.height
    }
}

/// Geometry resolution error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Source (or canvas) has zero width or height.
    #[error("source dimensions must be non-zero")]
    InvalidRequest,
    /// Crop window has zero width or height.
    #[error("crop window dimensions must be non-zero")]
    DegenerateWindow,
    /// [`Gravity::Smart`] reached crop placement without a focus point.
    #[error("smart gravity requires a caller-supplied focus point")]
    UnresolvedSmartGravity,
}

/// Requested output geometry.
///
/// A zero `width` or `height` leaves that axis unconstrained; it is derived
/// from the source aspect ratio. Both zero means no resize.
///
/// # Example
///
/// ```
/// use cropfit::{Gravity, ResizeRequest, Size};
///
/// let request = ResizeRequest::new(100, 80)
///     .crop(true)
///     .enlarge(true)
///     .gravity(Gravity::North);
/// let resolution = request.resolve(40, 40).unwrap();
/// assert_eq!(resolution.intermediate, Size::new(100, 100));
/// assert_eq!(resolution.output, Size::new(100, 80));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ResizeRequest {
    /// Maximum (fit) or exact (crop) output width. `0` = unconstrained.
    pub width: u32,
    /// Maximum (fit) or exact (crop) output height. `0` = unconstrained.
    pub height: u32,
    /// Cover the box and cut the overflow instead of fitting inside it.
    pub crop: bool,
    /// Allow scaling above the source size.
    pub enlarge: bool,
    /// Crop anchor. `None` defers to the configured default gravity.
    pub anchor: Option<Anchor>,
}

impl ResizeRequest {
    /// Fit request for the given box. Shrink-only, no crop.
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            crop: false,
            enlarge: false,
            anchor: None,
        }
    }

    /// Constrain only width (height derived from source aspect ratio).
    pub const fn width_only(width: u32) -> Self {
        Self::new(width, 0)
    }

    /// Constrain only height (width derived from source aspect ratio).
    pub const fn height_only(height: u32) -> Self {
        Self::new(0, height)
    }

    /// Switch between fit (`false`) and crop (`true`) mode.
    pub fn crop(mut self, crop: bool) -> Self {
        self.crop = crop;
        self
    }

    /// Allow or forbid upscaling.
    pub fn enlarge(mut self, enlarge: bool) -> Self {
        self.enlarge = enlarge;
        self
    }

    /// Anchor the crop window with a named gravity. Replaces any focus point.
    pub fn gravity(mut self, gravity: Gravity) -> Self {
        self.anchor = Some(Anchor::Gravity(gravity));
        self
    }

    /// Anchor the crop window on a focus point. Replaces any gravity.
    pub fn focus(mut self, focus: Focus) -> Self {
        self.anchor = Some(Anchor::Focus(focus));
        self
    }

    /// Compute output and intermediate dimensions for a source image.
    pub fn resolve(&self, source_w: u32, source_h: u32) -> Result<Resolution, ResolveError> {
        let source = Size::new(source_w, source_h);
        if source.is_empty() {
            return Err(ResolveError::InvalidRequest);
        }

        let resolution = match (self.width, self.height) {
            (0, 0) => Resolution::uncropped(source),
            // Single-axis requests preserve aspect ratio; there is nothing to crop.
            (w, 0) => Resolution::uncropped(self.scale_to_width(source, w)),
            (0, h) => Resolution::uncropped(self.scale_to_height(source, h)),
            (w, h) if self.crop => self.cover(source, w, h),
            (w, h) => Resolution::uncropped(self.fit(source, w, h)),
        };

        log::debug!(
            "resolve {}x{} -> {}x{} (intermediate {}x{}, crop={}, enlarge={})",
            source.width,
            source.height,
            resolution.output.width,
            resolution.output.height,
            resolution.intermediate.width,
            resolution.intermediate.height,
            self.crop,
            self.enlarge,
        );
        Ok(resolution)
    }

    fn scale_to_width(&self, source: Size, w: u32) -> Size {
        if !self.enlarge && w > source.width {
            return source;
        }
        Size::new(w, proportional(source.height, w, source.width))
    }

    fn scale_to_height(&self, source: Size, h: u32) -> Size {
        if !self.enlarge && h > source.height {
            return source;
        }
        Size::new(proportional(source.width, h, source.height), h)
    }

    /// Scale by `min(tw/sw, th/sh)`. The constraining axis lands exactly on target.
    fn fit(&self, source: Size, tw: u32, th: u32) -> Size {
        if width_ratio_le(source, tw, th) {
            self.scale_to_width(source, tw)
        } else {
            self.scale_to_height(source, th)
        }
    }

    /// Scale by `max(tw/sw, th/sh)` and cut the overflow.
    fn cover(&self, source: Size, tw: u32, th: u32) -> Resolution {
        let width_covers = !width_ratio_le(source, tw, th) || ratios_equal(source, tw, th);
        let upscales = if width_covers {
            tw > source.width
        } else {
            th > source.height
        };

        if upscales && !self.enlarge {
            // Crop straight from the untouched source, capped at its own size.
            return Resolution {
                intermediate: source,
                output: Size::new(tw.min(source.width), th.min(source.height)),
            };
        }

        let intermediate = if width_covers {
            Size::new(tw, proportional(source.height, tw, source.width))
        } else {
            Size::new(proportional(source.width, th, source.height), th)
        };
        Resolution {
            intermediate,
            output: Size::new(tw, th),
        }
    }
}

/// Compute output and intermediate dimensions for a source image.
///
/// Free-function form of [`ResizeRequest::resolve`].
pub fn resolve_dimensions(
    source_w: u32,
    source_h: u32,
    request: &ResizeRequest,
) -> Result<Resolution, ResolveError> {
    request.resolve(source_w, source_h)
}

/// Resolved dimensions for one resize.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Resolution {
    /// Size the whole source is scaled to before any crop.
    pub intermediate: Size,
    /// Final output size. Equal to `intermediate` unless cropping.
    pub output: Size,
}

impl Resolution {
    fn uncropped(size: Size) -> Self {
        Self {
            intermediate: size,
            output: size,
        }
    }

    /// Whether the output is cut from a larger intermediate canvas.
    pub fn needs_crop(&self) -> bool {
        self.intermediate != self.output
    }
}

// ============================================================================
// Internal geometry
// ============================================================================

/// `tw/sw <= th/sh`, by cross-multiplication.
fn width_ratio_le(source: Size, tw: u32, th: u32) -> bool {
    u64::from(tw) * u64::from(source.height) <= u64::from(th) * u64::from(source.width)
}

fn ratios_equal(source: Size, tw: u32, th: u32) -> bool {
    u64::from(tw) * u64::from(source.height) == u64::from(th) * u64::from(source.width)
}

/// `round(value × num / den)` with ties rounding up, never below 1.
///
/// Exact integer arithmetic: `(2·v·n + d) / 2d`.
fn proportional(value: u32, num: u32, den: u32) -> u32 {
    let scaled = u128::from(value) * u128::from(num) * 2 + u128::from(den);
    let rounded = scaled / (u128::from(den) * 2);
    u32::try_from(rounded).unwrap_or(u32::MAX).max(1)
}
