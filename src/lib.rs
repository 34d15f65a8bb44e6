//! # layer2kmz
//!
//! Build a KMZ archive from a layer of spatial points, lines or polygons.
//!
//! The exporter turns a feature layer plus a renderer description into a
//! single KML document (schema, style selectors, placemarks grouped into
//! folders) and packages it with any referenced icon rasters into a
//! zip-compressed `.kmz` file.
//!
//! The surrounding application supplies three collaborators:
//!
//! - a [`Layer`] yielding features with geometry and attribute values,
//! - a [`Symbology`] describing either one symbol or one symbol per
//!   category (with an [`IconRenderer`] for point markers),
//! - a [`Reporter`] receiving progress percentages and terminal messages.
//!
//! ## Quick start
//!
//! ```no_run
//! use layer2kmz::{ExportConfig, Reporter, Severity, Symbology, Symbol, export_layer};
//! # use layer2kmz::{GeometryKind, Layer, LayerFeature};
//! # struct MyLayer;
//! # impl Layer for MyLayer {
//! #     fn name(&self) -> &str { "trails" }
//! #     fn geometry_kind(&self) -> GeometryKind { GeometryKind::Line }
//! #     fn feature_count(&self) -> usize { 0 }
//! #     fn field_names(&self) -> Vec<String> { vec![] }
//! #     fn features(&self) -> Box<dyn Iterator<Item = LayerFeature> + '_> {
//! #         Box::new(std::iter::empty())
//! #     }
//! # }
//!
//! struct Console;
//!
//! impl Reporter for Console {
//!     fn report_progress(&mut self, percent: u8) {
//!         println!("{percent}%");
//!     }
//!     fn report_message(&mut self, text: &str, severity: Severity) {
//!         println!("{severity:?}: {text}");
//!     }
//! }
//!
//! let layer = MyLayer;
//! let symbology = Symbology::Single(Symbol::Stroke {
//!     color: "ffaabbcc".into(),
//!     width: 2.0,
//! });
//! let config = ExportConfig {
//!     label_field: "name".into(),
//!     folder_field: "region".into(),
//!     export_fields: vec!["name".into(), "length".into()],
//!     show_labels: true,
//! };
//! export_layer(&layer, &symbology, &config, "trails.kmz", &mut Console)?;
//! # Ok::<(), layer2kmz::Error>(())
//! ```

pub mod collect;
pub mod error;
pub mod export;
pub mod kml;
pub mod kmz;
pub mod layer;
pub mod report;
pub mod style;

pub use error::{Error, Result};
pub use export::{ExportConfig, export_layer};
pub use kml::{Document, Placemark, Schema};
pub use layer::{Geometry, GeometryKind, Layer, LayerFeature, Value};
pub use report::{Reporter, Severity};
pub use style::{Category, IconRenderer, StyleDef, Symbol, Symbology, Visual};
