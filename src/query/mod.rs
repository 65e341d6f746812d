//! Option string parsing.
//!
//! Parses URL query strings like `?w=800&h=600&crop=true&gravity=north`
//! into a [`ResizeRequest`] and [`RenderOptions`] for [`plan`](crate::plan()).
//!
//! # Example
//!
//! ```
//! use cropfit::{Anchor, Defaults, Focus, Size, plan, query};
//!
//! let result = query::parse("w=300&h=200&crop=1&focus=0.7,0.7");
//! assert!(result.warnings.is_empty());
//! assert_eq!(result.request.anchor, Some(Anchor::Focus(Focus::new(0.7, 0.7))));
//!
//! let plan = plan(Size::new(1000, 1000), &result.request, &result.options, &Defaults::default())
//!     .expect("valid plan");
//! assert_eq!(plan.output, Size::new(300, 200));
//! ```
//!
//! # Recognized keys
//!
//! | Key | Value |
//! |---|---|
//! | `w`, `width` | target width, `0` = unconstrained |
//! | `h`, `height` | target height, `0` = unconstrained |
//! | `crop` | boolean |
//! | `enlarge` | boolean |
//! | `gravity` | `center`, `north`, …, `southwest`, `smart` |
//! | `focus` | `x,y` fractions; wins over `gravity` |
//! | `interpolator` | `bicubic`, `bilinear`, `nohalo` |
//! | `extend` | `black`, `white` |

mod parse;

use alloc::string::String;
use alloc::vec::Vec;

use crate::plan::RenderOptions;
use crate::resolve::ResizeRequest;

/// Result of parsing an option string.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    /// Geometry request.
    pub request: ResizeRequest,
    /// Rendering overrides.
    pub options: RenderOptions,
    /// Non-fatal parse warnings.
    pub warnings: Vec<ParseWarning>,
}

/// Non-fatal warning from option string parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A key appeared more than once (last value wins).
    DuplicateKey { key: String, value: String },
    /// A key was not recognized.
    KeyNotRecognized { key: String, value: String },
    /// A key was recognized but its value could not be parsed.
    ValueInvalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Parse an option string (with or without leading `?`).
///
/// Returns the parsed request and options along with any non-fatal warnings.
pub fn parse(query: &str) -> ParseResult {
    let (request, options, warnings) = parse::parse_query(query);
    ParseResult {
        request,
        options,
        warnings,
    }
}
