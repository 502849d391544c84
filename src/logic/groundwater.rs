//! Parser for free-text groundwater depth descriptors.
//!
//! Reference tables describe depth below ground level in forms such as
//! `"5-10 m bgl"`, `"3.5"` or `"2-5 & 10-20 mbgl"`. A descriptor is a list
//! of fragments separated by `&`; each fragment is either a single depth or
//! a `shallow-deep` range, optionally followed by unit text. Unit text is
//! matched case-insensitively, so `"5-10 M BGL"` reads the same as
//! `"5-10 m bgl"`.

/// A depth interval in meters below ground level. Point depths have
/// equal bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthRange {
    pub shallow_m: f64,
    pub deep_m: f64,
}

impl DepthRange {
    pub fn point(depth_m: f64) -> Self {
        Self {
            shallow_m: depth_m,
            deep_m: depth_m,
        }
    }

    pub fn midpoint(&self) -> f64 {
        (self.shallow_m + self.deep_m) / 2.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DepthFragment {
    Range(DepthRange),
    /// Fragment text that could not be read as a depth
    Unparsed(String),
}

const FRAGMENT_SEPARATOR: char = '&';
const RANGE_SEPARATOR: char = '-';
const UNIT_TOKENS: [&str; 2] = ["bgl", "m"];

pub fn parse_descriptor(descriptor: &str) -> Vec<DepthFragment> {
    descriptor
        .split(FRAGMENT_SEPARATOR)
        .map(parse_fragment)
        .collect()
}

pub fn parse_fragment(fragment: &str) -> DepthFragment {
    let cleaned = strip_units(fragment);

    let range = if cleaned.contains(RANGE_SEPARATOR) {
        let bounds: Vec<&str> = cleaned.split(RANGE_SEPARATOR).collect();
        match bounds.as_slice() {
            [shallow, deep] => match (parse_depth(shallow), parse_depth(deep)) {
                (Some(shallow_m), Some(deep_m)) => Some(DepthRange { shallow_m, deep_m }),
                _ => None,
            },
            _ => None,
        }
    } else {
        parse_depth(&cleaned).map(DepthRange::point)
    };

    match range {
        Some(r) => DepthFragment::Range(r),
        None => DepthFragment::Unparsed(fragment.trim().to_string()),
    }
}

/// Mean of the fragment midpoints, ignoring unparsed fragments.
/// `None` when nothing parsed.
pub fn average_depth(fragments: &[DepthFragment]) -> Option<f64> {
    let midpoints: Vec<f64> = fragments
        .iter()
        .filter_map(|f| match f {
            DepthFragment::Range(r) => Some(r.midpoint()),
            DepthFragment::Unparsed(_) => None,
        })
        .collect();

    if midpoints.is_empty() {
        None
    } else {
        Some(midpoints.iter().sum::<f64>() / midpoints.len() as f64)
    }
}

/// Average depth (m) described by a reference-table cell
pub fn groundwater_depth(descriptor: &str) -> Option<f64> {
    let fragments = parse_descriptor(descriptor);

    for fragment in &fragments {
        if let DepthFragment::Unparsed(text) = fragment {
            tracing::debug!("Skipping unparseable groundwater depth fragment '{}'", text);
        }
    }

    average_depth(&fragments)
}

fn strip_units(fragment: &str) -> String {
    let mut cleaned = fragment.trim().to_lowercase();
    for token in UNIT_TOKENS {
        cleaned = cleaned.replace(token, "");
    }
    cleaned.trim().to_string()
}

fn parse_depth(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
