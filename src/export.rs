//! Export orchestration: resolve styles, collect features, build the
//! document, and package the archive, with the failure and cleanup
//! semantics the run guarantees.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use crate::collect::{Feature, FieldConfig, collect_features};
use crate::error::Result;
use crate::kml::{Document, Placemark};
use crate::kmz::{DOC_NAME, write_kmz};
use crate::layer::Layer;
use crate::report::{Progress, Reporter, Severity};
use crate::style::{SINGLE_STYLE_KEY, Symbology, resolve_styles};

/// Fields and options for one export run.
pub struct ExportConfig {
    /// Field whose value becomes each placemark's name.
    pub label_field: String,
    /// Field whose value groups placemarks into folders.
    pub folder_field: String,
    /// Fields emitted as extended data, in this order.
    pub export_fields: Vec<String>,
    /// Whether placemark labels are visible in the output.
    pub show_labels: bool,
}

/// Export a layer to a KMZ archive at `out_path`.
///
/// Runs the full pipeline synchronously. Progress is reported through
/// `reporter` after every unit of work and reaches exactly 100 on both
/// success and fatal abort; one terminal message is reported either way.
/// Intermediate files (the rendered `doc.kml` and any icon rasters) live
/// in a run-scoped temporary directory removed on every exit path.
pub fn export_layer<P: AsRef<Path>>(
    layer: &dyn Layer,
    symbology: &Symbology,
    config: &ExportConfig,
    out_path: P,
    reporter: &mut dyn Reporter,
) -> Result<()> {
    let out_path = out_path.as_ref();
    let mut progress = Progress::new();

    match run(layer, symbology, config, out_path, &mut progress, reporter) {
        Ok(()) => {
            progress.finish(reporter);
            reporter.report_message(
                &format!("KMZ file written to {}", out_path.display()),
                Severity::Info,
            );
            Ok(())
        }
        Err(e) => {
            progress.finish(reporter);
            reporter.report_message(&e.to_string(), Severity::Error);
            Err(e)
        }
    }
}

fn run(
    layer: &dyn Layer,
    symbology: &Symbology,
    config: &ExportConfig,
    out_path: &Path,
    progress: &mut Progress,
    reporter: &mut dyn Reporter,
) -> Result<()> {
    // Dropped on every exit path, taking icons and the intermediate
    // doc.kml with it.
    let tmp_dir = TempDir::new()?;

    let (styles, category_field) = resolve_styles(
        symbology,
        layer.geometry_kind(),
        config.show_labels,
        tmp_dir.path(),
    )?;
    let active_keys: Vec<String> = styles.iter().map(|s| s.key.clone()).collect();

    let field_config = FieldConfig {
        label_field: &config.label_field,
        folder_field: &config.folder_field,
        export_fields: &config.export_fields,
        category: category_field.as_deref().map(|f| (f, active_keys.as_slice())),
    };
    let features = collect_features(layer, &field_config, progress, reporter)?;

    let mut doc = Document::new(layer.name());
    doc.set_schema(layer.name(), &config.export_fields);
    for style in &styles {
        doc.add_style(style.clone());
    }

    for feature in features {
        progress.step(reporter);
        let Feature { geometry, folder, label, values, style_key } = feature;
        let style_key = if style_key.is_empty() {
            SINGLE_STYLE_KEY.to_string()
        } else {
            style_key
        };
        doc.add_placemark(
            &folder,
            Placemark {
                name: label,
                style_key,
                geometry,
                values,
            },
        );
    }

    let kml_path = tmp_dir.path().join(DOC_NAME);
    fs::write(&kml_path, doc.to_kml())?;

    write_kmz(out_path, &kml_path, &styles)
}
