//! Crop window placement: gravity, focus points, and offset clamping.
//!
//! A crop window is placed by centering it on a normalized focus point and
//! then clamping it into the canvas. Named gravities are fixed focus points.
//!
//! ```text
//!     NorthWest (0,0)    North (0.5,0)    NorthEast (1,0)
//!     West (0,0.5)       Center           East (1,0.5)
//!     SouthWest (0,1)    South (0.5,1)    SouthEast (1,1)
//! ```
//!
//! # Example
//!
//! ```
//! use cropfit::{Focus, Size, crop_offset};
//!
//! // A 200×200 window on a 1000×400 canvas is evaluated as the 400×400
//! // region of the same aspect ratio, then pushed toward the focus point.
//! let offset = crop_offset(Size::new(1000, 400), Size::new(200, 200), Focus::new(0.7, 0.7));
//! assert_eq!(offset, Ok((500, 0)));
//! ```

use num_traits::float::FloatCore;
use strum_macros::{AsRefStr, Display, EnumString};

use crate::resolve::{ResolveError, Size};

/// Normalized point of interest. `(0.0, 0.0)` = top-left, `(1.0, 1.0)` = bottom-right.
///
/// Coordinates are fractions of the original image, so the same focus
/// applies to any uniformly scaled canvas.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Focus {
    pub x: f32,
    pub y: f32,
}

impl Focus {
    /// Center of the image.
    pub const CENTER: Self = Self { x: 0.5, y: 0.5 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Clamp both coordinates into `0.0..=1.0`. `NaN` becomes `0.5`.
    pub fn clamped(self) -> Self {
        Self {
            x: clamp_unit(self.x),
            y: clamp_unit(self.y),
        }
    }
}

impl Default for Focus {
    fn default() -> Self {
        Self::CENTER
    }
}

fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() { 0.5 } else { v.clamp(0.0, 1.0) }
}

/// Named crop anchor.
///
/// Parses case-insensitively from its lowercase name (`"northeast"`);
/// `"centre"` is accepted for [`Center`](Self::Center).
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Gravity {
    #[default]
    #[strum(to_string = "center", serialize = "centre")]
    Center,
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
    /// Content-aware placement. The focus point comes from an external
    /// saliency or face-detection step and must be supplied as
    /// [`Anchor::Focus`].
    Smart,
}

impl Gravity {
    /// The fixed focus point for this gravity. `None` for [`Smart`](Self::Smart).
    pub const fn focus(self) -> Option<Focus> {
        let (x, y) = match self {
            Self::Center => (0.5, 0.5),
            Self::North => (0.5, 0.0),
            Self::South => (0.5, 1.0),
            Self::East => (1.0, 0.5),
            Self::West => (0.0, 0.5),
            Self::NorthEast => (1.0, 0.0),
            Self::NorthWest => (0.0, 0.0),
            Self::SouthEast => (1.0, 1.0),
            Self::SouthWest => (0.0, 1.0),
            Self::Smart => return None,
        };
        Some(Focus::new(x, y))
    }
}

/// Where the crop window is anchored: a named gravity or an explicit point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Anchor {
    Gravity(Gravity),
    Focus(Focus),
}

impl Anchor {
    /// Resolve to a focus point.
    ///
    /// Fails with [`ResolveError::UnresolvedSmartGravity`] for
    /// `Gravity(Smart)`; callers replace it with the detected focus first.
    pub fn resolve(self) -> Result<Focus, ResolveError> {
        match self {
            Self::Gravity(g) => g.focus().ok_or(ResolveError::UnresolvedSmartGravity),
            Self::Focus(f) => Ok(f),
        }
    }
}

impl Default for Anchor {
    fn default() -> Self {
        Self::Gravity(Gravity::Center)
    }
}

impl From<Gravity> for Anchor {
    fn from(gravity: Gravity) -> Self {
        Self::Gravity(gravity)
    }
}

impl From<Focus> for Anchor {
    fn from(focus: Focus) -> Self {
        Self::Focus(focus)
    }
}

/// Axis-aligned rectangle in pixel coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Whether this rect lies entirely inside `(0, 0, canvas.width, canvas.height)`.
    pub fn fits_within(&self, canvas: Size) -> bool {
        u64::from(self.x) + u64::from(self.width) <= u64::from(canvas.width)
            && u64::from(self.y) + u64::from(self.height) <= u64::from(canvas.height)
    }

    /// Whether this rect covers the full canvas (no actual crop).
    pub fn is_full(&self, canvas: Size) -> bool {
        self.x == 0 && self.y == 0 && self.size() == canvas
    }
}

/// Place a crop window on a canvas so it keeps `focus` in view.
///
/// A window that fits inside the canvas is first expanded to the largest
/// region of the same aspect ratio that fits; the returned rect has that
/// region's size. When the window already spans one canvas axis (as it does
/// on a canvas from [`ResizeRequest::resolve`](crate::ResizeRequest::resolve))
/// the region is the window itself.
///
/// A window that overflows the canvas on an axis gets offset 0 there and is
/// clipped to the canvas; the other axis is placed with the window's own size.
pub fn crop_window(canvas: Size, window: Size, focus: Focus) -> Result<Rect, ResolveError> {
    if canvas.is_empty() {
        return Err(ResolveError::InvalidRequest);
    }
    if window.is_empty() {
        return Err(ResolveError::DegenerateWindow);
    }

    let focus = focus.clamped();
    let region = if canvas.contains(window) {
        fit_aspect(canvas, window)
    } else {
        Size::new(
            window.width.min(canvas.width),
            window.height.min(canvas.height),
        )
    };
    let rect = Rect {
        x: offset_1d(canvas.width, region.width, focus.x),
        y: offset_1d(canvas.height, region.height, focus.y),
        width: region.width,
        height: region.height,
    };
    log::trace!(
        "crop window {}x{} on {}x{} at ({}, {}) -> {rect:?}",
        window.width,
        window.height,
        canvas.width,
        canvas.height,
        focus.x,
        focus.y,
    );
    Ok(rect)
}

/// Top-left offset of the crop window. See [`crop_window`].
pub fn crop_offset(canvas: Size, window: Size, focus: Focus) -> Result<(u32, u32), ResolveError> {
    crop_window(canvas, window, focus).map(|r| (r.x, r.y))
}

/// Top-left offset of the crop window, from bare dimensions.
pub fn resolve_crop_offset(
    canvas_w: u32,
    canvas_h: u32,
    window_w: u32,
    window_h: u32,
    focus: Focus,
) -> Result<(u32, u32), ResolveError> {
    crop_offset(
        Size::new(canvas_w, canvas_h),
        Size::new(window_w, window_h),
        focus,
    )
}

// ============================================================================
// Internal geometry
// ============================================================================

/// Largest size with the window's aspect ratio inside the canvas.
/// The binding axis spans the canvas; the other is floored, at least 1.
fn fit_aspect(canvas: Size, window: Size) -> Size {
    let (cw, ch) = (u64::from(canvas.width), u64::from(canvas.height));
    let (ww, wh) = (u64::from(window.width), u64::from(window.height));
    if cw * wh <= ch * ww {
        let h = (wh * cw / ww).clamp(1, ch);
        Size::new(canvas.width, h as u32)
    } else {
        let w = (ww * ch / wh).clamp(1, cw);
        Size::new(w as u32, canvas.height)
    }
}

/// Center a span of `span` pixels on `pct × canvas`, clamped into `[0, canvas - span]`.
fn offset_1d(canvas: u32, span: u32, pct: f32) -> u32 {
    if span >= canvas {
        return 0;
    }
    let center = round_half_up(f64::from(pct) * f64::from(canvas));
    let ideal = center - i64::from(span / 2);
    ideal.clamp(0, i64::from(canvas - span)) as u32
}

fn round_half_up(v: f64) -> i64 {
    FloatCore::floor(v + 0.5) as i64
}
