//! Resize planning: everything a processing backend needs for one resize.
//!
//! [`plan`] runs the dimension resolver, resolves the crop anchor, places
//! the crop window on the intermediate canvas, and fills rendering options
//! from an explicit [`Defaults`] value.

use strum_macros::{AsRefStr, Display, EnumString};

use crate::focus::{Anchor, Gravity, Rect, crop_window};
use crate::resolve::{ResizeRequest, ResolveError, Size};

/// Resampling kernel the backend should use.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Interpolator {
    #[default]
    Bicubic,
    Bilinear,
    Nohalo,
}

/// How the backend fills canvas area not covered by source pixels.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Extend {
    #[default]
    Black,
    White,
}

/// Configured fallbacks for anything a request leaves unset.
///
/// Passed explicitly to [`plan`]; there is no global configuration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Defaults {
    /// Crop anchor for requests that carry none.
    pub gravity: Gravity,
    pub interpolator: Interpolator,
    pub extend: Extend,
}

impl Defaults {
    pub fn gravity(mut self, gravity: Gravity) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn interpolator(mut self, interpolator: Interpolator) -> Self {
        self.interpolator = interpolator;
        self
    }

    pub fn extend(mut self, extend: Extend) -> Self {
        self.extend = extend;
        self
    }
}

/// Per-request rendering overrides. `None` falls back to [`Defaults`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RenderOptions {
    pub interpolator: Option<Interpolator>,
    pub extend: Option<Extend>,
}

/// Complete geometry for one resize.
///
/// The backend scales the whole source to `intermediate`, then extracts
/// `crop` (in intermediate coordinates) when present. The result is `output`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResizePlan {
    /// Original source dimensions.
    pub source: Size,
    /// Size the source is scaled to.
    pub intermediate: Size,
    /// Region of the intermediate canvas to keep. `None` = all of it.
    pub crop: Option<Rect>,
    /// Final output dimensions.
    pub output: Size,
    pub interpolator: Interpolator,
    pub extend: Extend,
}

impl ResizePlan {
    /// Whether resampling is needed (dimensions change).
    pub fn needs_resize(&self) -> bool {
        self.intermediate != self.source
    }

    /// Whether a crop is applied after scaling.
    pub fn needs_crop(&self) -> bool {
        self.crop.is_some()
    }

    /// Whether the plan leaves the source untouched.
    pub fn is_identity(&self) -> bool {
        !self.needs_resize() && !self.needs_crop()
    }
}

/// Plan a resize of a `source`-sized image.
///
/// # Example
///
/// ```
/// use cropfit::{Defaults, Gravity, Rect, RenderOptions, ResizeRequest, Size, plan};
///
/// let plan = plan(
///     Size::new(320, 240),
///     &ResizeRequest::new(100, 80).crop(true),
///     &RenderOptions::default(),
///     &Defaults::default().gravity(Gravity::East),
/// )
/// .unwrap();
///
/// assert_eq!(plan.intermediate, Size::new(107, 80));
/// assert_eq!(plan.crop, Some(Rect::new(7, 0, 100, 80)));
/// ```
pub fn plan(
    source: Size,
    request: &ResizeRequest,
    options: &RenderOptions,
    defaults: &Defaults,
) -> Result<ResizePlan, ResolveError> {
    let resolution = request.resolve(source.width, source.height)?;

    let crop = if resolution.needs_crop() {
        let anchor = request.anchor.unwrap_or(Anchor::Gravity(defaults.gravity));
        let focus = anchor.resolve()?;
        let rect = crop_window(resolution.intermediate, resolution.output, focus)?;
        (!rect.is_full(resolution.intermediate)).then_some(rect)
    } else {
        None
    };

    let plan = ResizePlan {
        source,
        intermediate: resolution.intermediate,
        crop,
        output: resolution.output,
        interpolator: options.interpolator.unwrap_or(defaults.interpolator),
        extend: options.extend.unwrap_or(defaults.extend),
    };
    log::debug!("plan {plan:?}");
    Ok(plan)
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use crate::focus::Focus;

    fn plan_default(sw: u32, sh: u32, request: ResizeRequest) -> ResizePlan {
        plan(
            Size::new(sw, sh),
            &request,
            &RenderOptions::default(),
            &Defaults::default(),
        )
        .unwrap()
    }

    #[test_log::test]
    fn fit_plan_has_no_crop() {
        let p = plan_default(200, 250, ResizeRequest::new(200, 150));
        assert_eq!(p.output, Size::new(120, 150));
        assert_eq!(p.intermediate, p.output);
        assert!(p.needs_resize());
        assert!(!p.needs_crop());
    }

    #[test_log::test]
    fn identity_plan() {
        let p = plan_default(5, 5, ResizeRequest::new(10, 10));
        assert!(p.is_identity());
        assert_eq!(p.output, Size::new(5, 5));
    }

    #[test_log::test]
    fn unconstrained_crop_request_is_identity() {
        // No window to cut: 0×0 with crop set leaves the source alone.
        let p = plan_default(640, 480, ResizeRequest::new(0, 0).crop(true));
        assert!(p.is_identity());
        assert_eq!(p.output, Size::new(640, 480));
        assert_eq!(p.crop, None);
    }

    #[test_log::test]
    fn crop_plan_centers_by_default() {
        let p = plan_default(320, 240, ResizeRequest::new(100, 80).crop(true));
        assert_eq!(p.intermediate, Size::new(107, 80));
        // round(53.5) = 54, minus half the window.
        assert_eq!(p.crop, Some(Rect::new(4, 0, 100, 80)));
        assert_eq!(p.output, Size::new(100, 80));
    }

    #[test_log::test]
    fn crop_window_matches_output() {
        for &(sw, sh) in &[(320, 240), (240, 320), (1000, 17), (17, 1000), (640, 640)] {
            let p = plan_default(sw, sh, ResizeRequest::new(100, 80).crop(true).enlarge(true));
            let full = Rect::new(0, 0, p.intermediate.width, p.intermediate.height);
            let crop = p.crop.unwrap_or(full);
            assert_eq!(crop.size(), p.output, "{sw}x{sh}");
            assert!(crop.fits_within(p.intermediate), "{sw}x{sh}");
        }
    }

    #[test_log::test]
    fn request_gravity_overrides_default() {
        let p = plan(
            Size::new(320, 240),
            &ResizeRequest::new(100, 80).crop(true).gravity(Gravity::West),
            &RenderOptions::default(),
            &Defaults::default().gravity(Gravity::East),
        )
        .unwrap();
        assert_eq!(p.crop, Some(Rect::new(0, 0, 100, 80)));
    }

    #[test_log::test]
    fn focus_places_crop() {
        let p = plan_default(
            1000,
            1000,
            ResizeRequest::new(300, 200).crop(true).focus(Focus::new(0.7, 0.7)),
        );
        assert_eq!(p.intermediate, Size::new(300, 300));
        assert_eq!(p.crop, Some(Rect::new(0, 100, 300, 200)));
    }

    #[test_log::test]
    fn shrink_only_crop_cuts_from_source() {
        let p = plan_default(
            200,
            400,
            ResizeRequest::new(300, 100).crop(true).gravity(Gravity::South),
        );
        assert!(!p.needs_resize());
        assert_eq!(p.crop, Some(Rect::new(0, 300, 200, 100)));
        assert_eq!(p.output, Size::new(200, 100));
    }

    #[test_log::test]
    fn smart_gravity_without_focus_fails_only_when_cropping() {
        let request = ResizeRequest::new(100, 80).crop(true).gravity(Gravity::Smart);
        assert_eq!(
            plan(
                Size::new(320, 240),
                &request,
                &RenderOptions::default(),
                &Defaults::default()
            ),
            Err(ResolveError::UnresolvedSmartGravity)
        );

        // Same aspect ratio: nothing to place.
        let p = plan_default(500, 400, request);
        assert!(!p.needs_crop());
    }

    #[test_log::test]
    fn render_options_fall_back_to_defaults() {
        let defaults = Defaults::default()
            .interpolator(Interpolator::Nohalo)
            .extend(Extend::White);
        let p = plan(
            Size::new(10, 10),
            &ResizeRequest::new(5, 5),
            &RenderOptions::default(),
            &defaults,
        )
        .unwrap();
        assert_eq!(p.interpolator, Interpolator::Nohalo);
        assert_eq!(p.extend, Extend::White);

        let p = plan(
            Size::new(10, 10),
            &ResizeRequest::new(5, 5),
            &RenderOptions {
                interpolator: Some(Interpolator::Bilinear),
                extend: None,
            },
            &defaults,
        )
        .unwrap();
        assert_eq!(p.interpolator, Interpolator::Bilinear);
        assert_eq!(p.extend, Extend::White);
    }

    #[test]
    fn default_configuration() {
        let d = Defaults::default();
        assert_eq!(d.gravity, Gravity::Center);
        assert_eq!(d.interpolator, Interpolator::Bicubic);
        assert_eq!(d.extend, Extend::Black);
    }

    #[test]
    fn option_names() {
        assert_eq!("NOHALO".parse::<Interpolator>(), Ok(Interpolator::Nohalo));
        assert_eq!("white".parse::<Extend>(), Ok(Extend::White));
        assert_eq!(Interpolator::Bilinear.as_ref(), "bilinear");
        assert!("lanczos".parse::<Interpolator>().is_err());
    }

    #[test]
    fn invalid_source_propagates() {
        assert_eq!(
            plan(
                Size::new(0, 10),
                &ResizeRequest::new(5, 5),
                &RenderOptions::default(),
                &Defaults::default()
            ),
            Err(ResolveError::InvalidRequest)
        );
    }
}
