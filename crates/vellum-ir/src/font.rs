//! Font-family and font-size resolution over resolved styles.

use serde::{Deserialize, Serialize};

use crate::css::ResolvedStyle;

/// Step constant for the seven absolute size keywords and for
/// `smaller`/`larger`, in points.
const FONT_SCALE_STEP: f32 = 4.0;

/// Family used when neither the style nor the caller's table names one.
pub const BUILTIN_FAMILY: &str = "Helvetica";

/// One selectable font face within a family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontDescriptor {
    pub bold: bool,
    pub italic: bool,
    pub weight: Option<f32>,
    /// Backend font-resource name handed to `PageRenderer::set_font`.
    pub source: String,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            bold: false,
            italic: false,
            weight: None,
            source: BUILTIN_FAMILY.to_string(),
        }
    }
}

/// A named, ordered list of faces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FontFamily {
    pub name: String,
    pub faces: Vec<FontDescriptor>,
}

/// Caller-registered families. This is a small ordered lookup, not a font
/// matching engine: the first family acts as the preferred fallback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontTable {
    pub families: Vec<FontFamily>,
}

impl FontTable {
    pub fn family(&self, name: &str) -> Option<&FontFamily> {
        self.families.iter().find(|family| family.name == name)
    }
}

/// The face shape requested for a text run, combining explicit style with
/// semantic tag ancestry (`b`/`strong`, `i`/`em`).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FaceRequest {
    pub bold: bool,
    pub italic: bool,
    pub weight: Option<f32>,
}

/// Derive the requested face shape from a resolved style plus tag semantics.
/// Either source may set an attribute.
pub fn face_request(style: &ResolvedStyle, bold_tag: bool, italic_tag: bool) -> FaceRequest {
    let weight_value = style.get("font-weight").map(|w| w.trim());
    FaceRequest {
        bold: bold_tag || matches!(weight_value, Some("bold" | "bolder")),
        italic: italic_tag || style.get("font-style").map(|s| s.trim()) == Some("italic"),
        weight: weight_value.and_then(|w| w.parse::<f32>().ok()),
    }
}

/// Pick a concrete face for `request`.
///
/// Match passes: exact (bold, italic, weight) in the selected family, then
/// (bold, italic) ignoring weight, then the same two passes against the
/// built-in Helvetica family, then the built-in regular face. Never fails.
pub fn resolve_font(request: FaceRequest, style: &ResolvedStyle, table: &FontTable) -> FontDescriptor {
    let family_name = resolve_family_name(style, table);
    let family_faces: &[FontDescriptor] = table
        .family(&family_name)
        .map(|family| family.faces.as_slice())
        .unwrap_or(&[]);
    let builtin = builtin_faces();
    find_face(family_faces, request, true)
        .or_else(|| find_face(family_faces, request, false))
        .or_else(|| find_face(&builtin, request, true))
        .or_else(|| find_face(&builtin, request, false))
        .cloned()
        .unwrap_or_else(|| builtin[0].clone())
}

/// Resolve a family name from the `font-family` value: comma-separated,
/// quotes stripped, first entry present in the table wins. Falls back to the
/// table's first family, then to the built-in one.
fn resolve_family_name(style: &ResolvedStyle, table: &FontTable) -> String {
    if let Some(value) = style.get("font-family") {
        for name in value.split(',') {
            let name = name.trim().trim_matches(|c| c == '\'' || c == '"').trim();
            if table.family(name).is_some() {
                return name.to_string();
            }
        }
    }
    table
        .families
        .first()
        .map(|family| family.name.clone())
        .unwrap_or_else(|| BUILTIN_FAMILY.to_string())
}

fn find_face<'a>(
    faces: &'a [FontDescriptor],
    request: FaceRequest,
    match_weight: bool,
) -> Option<&'a FontDescriptor> {
    faces.iter().find(|face| {
        face.bold == request.bold
            && face.italic == request.italic
            && (!match_weight || face.weight == request.weight)
    })
}

fn builtin_faces() -> [FontDescriptor; 4] {
    let face = |bold: bool, italic: bool, source: &str| FontDescriptor {
        bold,
        italic,
        weight: None,
        source: source.to_string(),
    };
    [
        face(false, false, "Helvetica"),
        face(true, false, "Helvetica-Bold"),
        face(false, true, "Helvetica-Oblique"),
        face(true, true, "Helvetica-BoldOblique"),
    ]
}

/// Resolve the effective font size in points.
///
/// `base` is the size resolved for the previously rendered node: sizes
/// cascade along document text order, not tree ancestry, and callers thread
/// the previous size through the walk. `root` is the configured root size.
pub fn resolve_font_size(style: &ResolvedStyle, base: f32, root: f32) -> f32 {
    let size = resolve_font_size_value(style.get("font-size").map(String::as_str), base, root);
    // Ceiling at 1e-4 resolution keeps repeated relative scaling from
    // accumulating float drift across a long document.
    (size * 10_000.0).ceil() / 10_000.0
}

fn resolve_font_size_value(value: Option<&str>, base: f32, root: f32) -> f32 {
    let Some(value) = value else {
        return base;
    };
    let value = value.trim();
    if let Ok(n) = value.parse::<f32>() {
        return n;
    }
    if let Some(size) = keyword_size(value) {
        return size;
    }
    match value {
        "smaller" => return base - FONT_SCALE_STEP,
        "larger" => return base + FONT_SCALE_STEP,
        _ => {}
    }
    if let Some(n) = strip_unit(value, "rem") {
        return n * root;
    }
    if let Some(n) = strip_unit(value, "em") {
        return n * base;
    }
    if let Some(n) = strip_unit(value, "px") {
        // px is taken as points at this layer; unit conversion is the
        // backend's concern.
        return n;
    }
    if let Some(n) = strip_unit(value, "%") {
        return n / 100.0 * base;
    }
    root
}

/// The seven absolute keywords map to fixed multiples of the step constant,
/// independent of the inherited base.
fn keyword_size(value: &str) -> Option<f32> {
    let steps = match value {
        "xx-small" => 1.0,
        "x-small" => 2.0,
        "small" => 3.0,
        "medium" => 4.0,
        "large" => 5.0,
        "x-large" => 6.0,
        "xx-large" => 7.0,
        _ => return None,
    };
    Some(steps * FONT_SCALE_STEP)
}

pub(crate) fn strip_unit(value: &str, unit: &str) -> Option<f32> {
    value.strip_suffix(unit)?.trim_end().parse::<f32>().ok()
}
