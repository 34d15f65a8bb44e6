//! Symbology model and style resolution.
//!
//! A renderer description is a closed tagged union: either one symbol for
//! the whole layer or one symbol per category value. Resolution turns it
//! into the flat [`StyleDef`] list the document builder and the archive
//! packager consume.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Error, Result};
use crate::layer::GeometryKind;

/// Icon raster size in pixels (square).
pub const ICON_SIZE: u32 = 30;

/// Style key used when the layer has a single symbol for all features.
pub const SINGLE_STYLE_KEY: &str = "style";

/// Renders a point symbol to a raster image file. Implemented by the
/// renderer collaborator; this crate only chooses the path and size.
pub trait IconRenderer {
    fn render_icon(&self, path: &Path, size: u32) -> io::Result<()>;
}

/// Visual attributes of one symbol, as the renderer describes them.
/// Colors are 8 hex digits in Alpha-Red-Green-Blue order.
pub enum Symbol {
    /// Point marker, rasterized on demand.
    Marker(Box<dyn IconRenderer>),
    /// Line stroke.
    Stroke { color: String, width: f64 },
    /// Polygon fill with border stroke.
    Fill {
        fill: String,
        border: String,
        outline: f64,
    },
}

/// One class of a categorized renderer.
pub struct Category {
    /// The attribute value this category matches.
    pub value: String,
    /// Whether the category is displayed on the map. Invisible categories
    /// produce no style and their features are excluded from the export.
    pub visible: bool,
    pub symbol: Symbol,
}

/// Renderer description for a layer.
pub enum Symbology {
    Single(Symbol),
    Categorized {
        /// Attribute field the categories classify on.
        field: String,
        categories: Vec<Category>,
    },
    /// Any renderer this exporter does not understand.
    Unsupported(String),
}

/// Visual attributes of a resolved style, shaped by geometry kind.
/// Colors are 8 hex digits in KML's Alpha-Blue-Green-Red order.
#[derive(Debug, Clone, PartialEq)]
pub enum Visual {
    Icon { file_name: String, data: Vec<u8> },
    Line { color: String, width: f64 },
    Polygon {
        fill: String,
        border: String,
        outline: f64,
    },
}

/// A named style ready for KML emission.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleDef {
    /// Unique within a run; referenced by placemarks via `styleUrl`.
    pub key: String,
    pub kind: GeometryKind,
    pub visual: Visual,
    pub show_label: bool,
}

impl StyleDef {
    /// Icon file name and bytes, for point styles.
    pub fn icon(&self) -> Option<(&str, &[u8])> {
        match &self.visual {
            Visual::Icon { file_name, data } => Some((file_name, data)),
            _ => None,
        }
    }
}

/// Convert an 8-hex-digit color from Alpha-Red-Green-Blue order to KML's
/// Alpha-Blue-Green-Red order by swapping the red and blue digit pairs.
pub fn argb_to_abgr(color: &str) -> String {
    if color.len() != 8 {
        return color.to_string();
    }
    format!("{}{}{}{}", &color[0..2], &color[6..8], &color[4..6], &color[2..4])
}

/// Resolve a symbology into the ordered style list.
///
/// Returns the styles plus the category field name when the symbology is
/// categorized (the collector filters features on it). Point icons are
/// rendered into `icon_dir` at [`ICON_SIZE`] and their bytes captured in
/// the returned [`StyleDef`]s.
pub fn resolve_styles(
    symbology: &Symbology,
    kind: GeometryKind,
    show_labels: bool,
    icon_dir: &Path,
) -> Result<(Vec<StyleDef>, Option<String>)> {
    match symbology {
        Symbology::Single(symbol) => {
            let style = resolve_symbol(SINGLE_STYLE_KEY, symbol, kind, show_labels, icon_dir)?;
            Ok((vec![style], None))
        }
        Symbology::Categorized { field, categories } => {
            let mut styles = Vec::new();
            for category in categories {
                if !category.visible {
                    continue;
                }
                styles.push(resolve_symbol(
                    &category.value,
                    &category.symbol,
                    kind,
                    show_labels,
                    icon_dir,
                )?);
            }
            Ok((styles, Some(field.clone())))
        }
        Symbology::Unsupported(name) => Err(Error::UnsupportedSymbology(name.clone())),
    }
}

fn resolve_symbol(
    key: &str,
    symbol: &Symbol,
    kind: GeometryKind,
    show_labels: bool,
    icon_dir: &Path,
) -> Result<StyleDef> {
    let visual = match (kind, symbol) {
        (GeometryKind::Point, Symbol::Marker(renderer)) => {
            let file_name = format!("color_{key}.png");
            let path = icon_dir.join(&file_name);
            renderer.render_icon(&path, ICON_SIZE)?;
            let data = fs::read(&path)?;
            Visual::Icon { file_name, data }
        }
        (GeometryKind::Line, Symbol::Stroke { color, width }) => Visual::Line {
            color: argb_to_abgr(color),
            width: *width,
        },
        (GeometryKind::Polygon, Symbol::Fill { fill, border, outline }) => Visual::Polygon {
            fill: argb_to_abgr(fill),
            border: argb_to_abgr(border),
            outline: *outline,
        },
        _ => {
            return Err(Error::UnsupportedSymbology(format!(
                "symbol does not match {} geometry",
                kind.name()
            )));
        }
    };
    Ok(StyleDef {
        key: key.to_string(),
        kind,
        visual,
        show_label: show_labels,
    })
}
