//! Setting the fill of an SVG's top-level elements.
//!
//! The document is parsed with roxmltree (the XML parser usvg itself uses)
//! only to check that it is well-formed and to find where things are.  The
//! result is the original text with the `fill` attributes of the direct
//! children of the root spliced in, so everything else (the declaration,
//! doctype and internal subset, comments, entity references, quoting and
//! whitespace) is kept byte for byte and the input is never modified.
//!
//! Only UTF-8 input is accepted, which is also all that the renderer reads.

use std::ops::Range;

use resvg::usvg::roxmltree;
use thiserror::Error;

const BYTE_ORDER_MARK: char = '\u{feff}';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XmlError {
    #[error("the file is not valid UTF-8; only UTF-8 encoded SVGs are supported")]
    NotUtf8,

    #[error("{0}")]
    Parse(#[from] roxmltree::Error),

    #[error("<{0}> is produced by an entity reference and cannot be recolored")]
    FromEntity(String),
}

/// Same as [`recolor`], for data read straight from a file.
pub fn recolor_bytes(svg: &[u8], fill: &str) -> Result<String, XmlError> {
    let svg = std::str::from_utf8(svg).map_err(|_| XmlError::NotUtf8)?;
    recolor(svg, fill)
}

/// Returns a copy of `svg` where every direct child element of the root has
/// `fill="<fill>"`.  An existing `fill` is replaced where it stands; otherwise
/// the attribute is appended to the start tag.  A leading byte order mark is
/// dropped.
pub fn recolor(svg: &str, fill: &str) -> Result<String, XmlError> {
    let svg = svg.strip_prefix(BYTE_ORDER_MARK).unwrap_or(svg);

    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };

    let doc = roxmltree::Document::parse_with_options(svg, options)?;
    let root = doc.root_element();
    let root_range = root.range();

    let mut value = String::new();
    escape_attribute_into(&mut value, fill);

    let mut edits = Vec::new();

    for child in root.children().filter(|n| n.is_element()) {
        let range = child.range();

        // Elements expanded from an entity point into the doctype.
        if range.start < root_range.start || range.end > root_range.end {
            return Err(XmlError::FromEntity(child.tag_name().name().to_string()));
        }

        edits.push(fill_edit(svg, &child, &value));
    }

    crate::convert_log!("setting fill on {} top-level element(s)", edits.len());

    Ok(apply_edits(svg, edits))
}

/// A piece of `svg` to replace, and its replacement.
struct Edit {
    range: Range<usize>,
    text: String,
}

fn fill_edit(svg: &str, element: &roxmltree::Node, value: &str) -> Edit {
    let existing = element
        .attributes()
        .find(|a| a.namespace().is_none() && a.name() == "fill");

    if let Some(attr) = existing {
        return Edit {
            range: attr.range_value(),
            text: value.to_string(),
        };
    }

    // After the last attribute, or after the tag name when there are none.
    let at = element
        .attributes()
        .map(|a| a.range().end)
        .fold(tag_name_end(svg, element.range().start), usize::max);

    Edit {
        range: at..at,
        text: format!(" fill=\"{value}\""),
    }
}

fn tag_name_end(svg: &str, tag_start: usize) -> usize {
    let name_start = tag_start + 1;

    svg[name_start..]
        .find(|c: char| c.is_ascii_whitespace() || c == '/' || c == '>')
        .map(|n| name_start + n)
        .unwrap_or(svg.len())
}

fn apply_edits(svg: &str, mut edits: Vec<Edit>) -> String {
    edits.sort_by_key(|e| e.range.start);

    let mut out = String::with_capacity(svg.len() + edits.len() * 16);
    let mut pos = 0;

    for edit in edits {
        out.push_str(&svg[pos..edit.range.start]);
        out.push_str(&edit.text);
        pos = edit.range.end;
    }

    out.push_str(&svg[pos..]);
    out
}

fn escape_attribute_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
}
