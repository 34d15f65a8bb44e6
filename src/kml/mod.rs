//! In-memory KML document model.
//!
//! A [`Document`] aggregates the schema, the resolved styles, and the
//! placemarks grouped into folders. Folders are an emergent grouping: a
//! folder exists only as the set of placemarks sharing a name, in
//! first-seen order, and a later placemark reusing an earlier folder name
//! rejoins that folder rather than opening a duplicate.

mod writer;

use crate::layer::Geometry;
use crate::style::StyleDef;

/// Declares the exported fields once; placemark extended data references
/// it by name. Field order is authoritative for extended-data emission.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    pub name: String,
    /// `(field name, field type)` pairs; all types are `"string"` here.
    pub fields: Vec<(String, String)>,
}

/// A single named geographic entry.
#[derive(Debug, Clone)]
pub struct Placemark {
    pub name: String,
    /// Key of the style this placemark references.
    pub style_key: String,
    pub geometry: Geometry,
    /// `(field name, text value)` pairs in schema order.
    pub values: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
pub struct Folder {
    pub name: String,
    pub placemarks: Vec<Placemark>,
}

/// The whole document, built once per run and rendered once.
#[derive(Default)]
pub struct Document {
    name: String,
    schema: Schema,
    styles: Vec<StyleDef>,
    folders: Vec<Folder>,
}

impl Document {
    pub fn new(name: impl Into<String>) -> Self {
        Document {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Declare the schema. All field types are text in this exporter.
    pub fn set_schema(&mut self, name: impl Into<String>, fields: &[String]) {
        self.schema = Schema {
            name: name.into(),
            fields: fields
                .iter()
                .map(|f| (f.clone(), "string".to_string()))
                .collect(),
        };
    }

    /// Append a style selector. Order of addition is emission order.
    pub fn add_style(&mut self, style: StyleDef) {
        self.styles.push(style);
    }

    /// Add a placemark under `folder`, creating the folder on first
    /// encounter of the name and rejoining it on any later one.
    pub fn add_placemark(&mut self, folder: &str, placemark: Placemark) {
        match self.folders.iter_mut().find(|f| f.name == folder) {
            Some(existing) => existing.placemarks.push(placemark),
            None => self.folders.push(Folder {
                name: folder.to_string(),
                placemarks: vec![placemark],
            }),
        }
    }

    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    pub fn styles(&self) -> &[StyleDef] {
        &self.styles
    }

    pub fn placemark_count(&self) -> usize {
        self.folders.iter().map(|f| f.placemarks.len()).sum()
    }

    /// Render the document to KML markup.
    pub fn to_kml(&self) -> String {
        writer::generate_kml(self)
    }
}
