//! Query string tokenizer and value parsers.
//!
//! Minimal percent-decoding and key-value extraction without external dependencies.

use alloc::string::String;
use alloc::vec::Vec;

use super::ParseWarning;
use crate::focus::{Focus, Gravity};
use crate::plan::{Extend, Interpolator, RenderOptions};
use crate::resolve::ResizeRequest;

/// Raw values as they appear in the query, before anchor precedence is applied.
#[derive(Default)]
struct Fields {
    width: Option<u32>,
    height: Option<u32>,
    crop: Option<bool>,
    enlarge: Option<bool>,
    gravity: Option<Gravity>,
    focus: Option<Focus>,
    interpolator: Option<Interpolator>,
    extend: Option<Extend>,
}

/// Parse a query string into a request, render options, and warnings.
pub(crate) fn parse_query(query: &str) -> (ResizeRequest, RenderOptions, Vec<ParseWarning>) {
    let mut fields = Fields::default();
    let mut warnings = Vec::new();

    for pair in split_query(query) {
        let (raw_key, raw_value) = split_pair(pair);
        let key = percent_decode(raw_key);
        let value = percent_decode(raw_value);
        let key_lower = key.to_ascii_lowercase();

        dispatch_key(&key_lower, &value, &mut fields, &mut warnings);
    }

    let mut request = ResizeRequest::new(fields.width.unwrap_or(0), fields.height.unwrap_or(0))
        .crop(fields.crop.unwrap_or(false))
        .enlarge(fields.enlarge.unwrap_or(false));
    // A focus point wins over gravity regardless of order.
    if let Some(gravity) = fields.gravity {
        request = request.gravity(gravity);
    }
    if let Some(focus) = fields.focus {
        request = request.focus(focus);
    }

    let options = RenderOptions {
        interpolator: fields.interpolator,
        extend: fields.extend,
    };
    log::trace!("parsed {query:?} -> {request:?}, {options:?}");
    (request, options, warnings)
}

fn dispatch_key(key: &str, value: &str, fields: &mut Fields, warnings: &mut Vec<ParseWarning>) {
    match key {
        // Dimensions
        "w" | "width" => set_or_warn(
            &mut fields.width,
            parse_u32(value),
            "w",
            value,
            "expected a non-negative integer",
            warnings,
        ),
        "h" | "height" => set_or_warn(
            &mut fields.height,
            parse_u32(value),
            "h",
            value,
            "expected a non-negative integer",
            warnings,
        ),

        // Mode flags
        "crop" => set_or_warn(
            &mut fields.crop,
            parse_bool(value),
            "crop",
            value,
            "expected true|false|1|0|yes|no|on|off",
            warnings,
        ),
        "enlarge" => set_or_warn(
            &mut fields.enlarge,
            parse_bool(value),
            "enlarge",
            value,
            "expected true|false|1|0|yes|no|on|off",
            warnings,
        ),

        // Anchor
        "gravity" => set_or_warn(
            &mut fields.gravity,
            value.trim().parse().ok(),
            "gravity",
            value,
            "expected center|north|south|east|west|northeast|northwest|southeast|southwest|smart",
            warnings,
        ),
        "focus" => set_or_warn(
            &mut fields.focus,
            parse_focus(value),
            "focus",
            value,
            "expected x,y fractions",
            warnings,
        ),

        // Rendering
        "interpolator" => set_or_warn(
            &mut fields.interpolator,
            value.trim().parse().ok(),
            "interpolator",
            value,
            "expected bicubic|bilinear|nohalo",
            warnings,
        ),
        "extend" => set_or_warn(
            &mut fields.extend,
            value.trim().parse().ok(),
            "extend",
            value,
            "expected black|white",
            warnings,
        ),

        _ => warnings.push(ParseWarning::KeyNotRecognized {
            key: String::from(key),
            value: String::from(value),
        }),
    }
}

/// Set a field, warning on duplicate or unparseable values.
fn set_or_warn<T>(
    field: &mut Option<T>,
    parsed: Option<T>,
    key: &'static str,
    value: &str,
    reason: &'static str,
    warnings: &mut Vec<ParseWarning>,
) {
    match parsed {
        Some(v) => {
            if field.is_some() {
                warnings.push(ParseWarning::DuplicateKey {
                    key: String::from(key),
                    value: String::from(value),
                });
            }
            *field = Some(v);
        }
        None => warnings.push(ParseWarning::ValueInvalid {
            key,
            value: String::from(value),
            reason,
        }),
    }
}

// ---- Value parsers ----

fn parse_u32(s: &str) -> Option<u32> {
    s.trim().parse::<u32>().ok()
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// `"x,y"` as two fractions. Range is not checked; placement clamps.
fn parse_focus(s: &str) -> Option<Focus> {
    let (x, y) = s.split_once(',')?;
    let x: f32 = x.trim().parse().ok()?;
    let y: f32 = y.trim().parse().ok()?;
    (x.is_finite() && y.is_finite()).then_some(Focus::new(x, y))
}

// ---- Query string tokenizer ----

/// Split query string on '&'.
fn split_query(query: &str) -> impl Iterator<Item = &str> {
    // Strip leading '?' if present (caller may or may not have stripped it)
    let query = query.strip_prefix('?').unwrap_or(query);
    query.split('&').filter(|s| !s.is_empty())
}

/// Split a single "key=value" pair on the first '='.
fn split_pair(pair: &str) -> (&str, &str) {
    pair.split_once('=').unwrap_or((pair, ""))
}

/// Percent-decode a URL component. Also handles '+' as space.
///
/// Decoded bytes that do not form valid UTF-8 are replaced with U+FFFD.
fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                if let (Some(hi), Some(lo)) = (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                    out.push(hi << 4 | lo);
                    i += 3;
                } else {
                    out.push(b'%');
                    i += 1;
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::focus::Anchor;

    #[test]
    fn parse_dimensions() {
        let (req, _, warnings) = parse_query("w=800&h=600");
        assert!(warnings.is_empty());
        assert_eq!((req.width, req.height), (800, 600));
        assert!(!req.crop);
        assert!(!req.enlarge);
        assert_eq!(req.anchor, None);
    }

    #[test]
    fn parse_long_names_and_leading_question_mark() {
        let (req, _, warnings) = parse_query("?width=120&height=0");
        assert!(warnings.is_empty());
        assert_eq!((req.width, req.height), (120, 0));
    }

    #[test]
    fn parse_flags() {
        let (req, _, _) = parse_query("crop=true&enlarge=1");
        assert!(req.crop);
        assert!(req.enlarge);

        let (req, _, _) = parse_query("crop=off&enlarge=no");
        assert!(!req.crop);
        assert!(!req.enlarge);
    }

    #[test]
    fn parse_gravity_names() {
        let (req, _, _) = parse_query("gravity=NorthEast");
        assert_eq!(req.anchor, Some(Anchor::Gravity(Gravity::NorthEast)));

        let (req, _, _) = parse_query("gravity=centre");
        assert_eq!(req.anchor, Some(Anchor::Gravity(Gravity::Center)));
    }

    #[test]
    fn focus_wins_over_gravity_in_any_order() {
        let (req, _, _) = parse_query("focus=0.25,0.75&gravity=south");
        assert_eq!(req.anchor, Some(Anchor::Focus(Focus::new(0.25, 0.75))));

        let (req, _, _) = parse_query("gravity=south&focus=0.25,0.75");
        assert_eq!(req.anchor, Some(Anchor::Focus(Focus::new(0.25, 0.75))));
    }

    #[test]
    fn parse_render_options() {
        let (_, opts, warnings) = parse_query("interpolator=nohalo&extend=WHITE");
        assert!(warnings.is_empty());
        assert_eq!(opts.interpolator, Some(Interpolator::Nohalo));
        assert_eq!(opts.extend, Some(Extend::White));
    }

    #[test]
    fn invalid_values_warn_and_keep_defaults() {
        let (req, opts, warnings) =
            parse_query("w=-5&crop=maybe&gravity=up&focus=0.5&interpolator=lanczos");
        assert_eq!(req, ResizeRequest::default());
        assert_eq!(opts, RenderOptions::default());
        assert_eq!(warnings.len(), 5);
        assert!(warnings.iter().all(|w| matches!(w, ParseWarning::ValueInvalid { .. })));
        assert!(matches!(
            &warnings[0],
            ParseWarning::ValueInvalid { key: "w", value, .. } if value == "-5"
        ));
    }

    #[test]
    fn non_finite_focus_is_invalid() {
        let (req, _, warnings) = parse_query("focus=NaN,0.5");
        assert_eq!(req.anchor, None);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn duplicate_key_last_wins() {
        let (req, _, warnings) = parse_query("w=100&width=200");
        assert_eq!(req.width, 200);
        assert_eq!(
            warnings,
            [ParseWarning::DuplicateKey {
                key: String::from("w"),
                value: String::from("200"),
            }]
        );
    }

    #[test]
    fn unknown_key_warns() {
        let (_, _, warnings) = parse_query("w=10&quality=90");
        assert_eq!(
            warnings,
            [ParseWarning::KeyNotRecognized {
                key: String::from("quality"),
                value: String::from("90"),
            }]
        );
    }

    #[test]
    fn keys_are_case_insensitive() {
        let (req, _, warnings) = parse_query("W=10&Crop=1");
        assert!(warnings.is_empty());
        assert_eq!(req.width, 10);
        assert!(req.crop);
    }

    #[test]
    fn percent_decoding() {
        assert_eq!(percent_decode("0.3%2C0.7"), "0.3,0.7");
        assert_eq!(percent_decode("a+b"), "a b");
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("%zz"), "%zz");
        assert_eq!(percent_decode("%C3%A9"), "\u{e9}");

        let (req, _, _) = parse_query("focus=0.3%2C0.7");
        assert_eq!(req.anchor, Some(Anchor::Focus(Focus::new(0.3, 0.7))));
    }

    #[test]
    fn empty_pairs_are_skipped() {
        let (req, _, warnings) = parse_query("&&w=5&&");
        assert!(warnings.is_empty());
        assert_eq!(req.width, 5);
    }
}
