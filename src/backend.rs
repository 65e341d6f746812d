//! Processing backend seam and the decode → plan → render orchestration.
//!
//! Pixel work (decoding, resampling, encoding) lives outside this crate.
//! A [`Backend`] reports what it decoded and renders a [`ResizePlan`];
//! [`resize`] wires the two together with the layout computation.

use alloc::vec::Vec;

use strum_macros::{AsRefStr, Display, EnumString};

use crate::plan::{Defaults, RenderOptions, ResizePlan, plan};
use crate::resolve::{ResizeRequest, ResolveError, Size};

/// Container format of a source or output image.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ImageFormat {
    #[strum(to_string = "jpeg", serialize = "jpg")]
    Jpeg,
    Png,
    Gif,
    Webp,
}

impl ImageFormat {
    /// Detect the format from leading magic bytes.
    pub fn detect(data: &[u8]) -> Option<Self> {
        match data {
            [0xFF, 0xD8, 0xFF, ..] => Some(Self::Jpeg),
            [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some(Self::Png),
            [b'G', b'I', b'F', b'8', b'7' | b'9', b'a', ..] => Some(Self::Gif),
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some(Self::Webp),
            _ => None,
        }
    }
}

/// What a backend decoded: pixel dimensions and container format.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Canvas {
    pub size: Size,
    pub format: ImageFormat,
}

impl Canvas {
    pub const fn new(width: u32, height: u32, format: ImageFormat) -> Self {
        Self {
            size: Size::new(width, height),
            format,
        }
    }
}

/// External image processing backend.
///
/// Takes `&self` so one backend can serve concurrent resizes.
pub trait Backend {
    type Error;

    /// Read enough of `source` to report its dimensions and format.
    fn decode(&self, source: &[u8]) -> Result<Canvas, Self::Error>;

    /// Scale, crop, and encode `source` as described by `plan`.
    fn render(&self, source: &[u8], plan: &ResizePlan) -> Result<Vec<u8>, Self::Error>;
}

/// Resize failure: bad geometry or a backend error.
#[derive(Debug, thiserror::Error)]
pub enum ResizeError<E> {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("backend failed: {0}")]
    Backend(E),
}

/// Decode `source`, plan the resize, and render it.
pub fn resize<B: Backend + ?Sized>(
    backend: &B,
    source: &[u8],
    request: &ResizeRequest,
    options: &RenderOptions,
    defaults: &Defaults,
) -> Result<Vec<u8>, ResizeError<B::Error>> {
    let canvas = backend.decode(source).map_err(ResizeError::Backend)?;
    log::debug!(
        "decoded {} {}x{}",
        canvas.format,
        canvas.size.width,
        canvas.size.height
    );
    let plan = plan(canvas.size, request, options, defaults)?;
    backend.render(source, &plan).map_err(ResizeError::Backend)
}
