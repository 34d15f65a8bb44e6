//! Feature collection: iterate the layer, filter against active styles,
//! and extract everything the document builder needs.

use crate::error::{Error, Result};
use crate::layer::{Geometry, Layer};
use crate::report::{Progress, Reporter};

/// One accepted feature, ready for placemark emission. Owned by value and
/// handed to the document builder after collection.
#[derive(Debug, Clone)]
pub struct Feature {
    pub geometry: Geometry,
    pub folder: String,
    pub label: String,
    /// Exported `(field name, text value)` pairs in schema order.
    pub values: Vec<(String, String)>,
    /// Style key, or empty when the layer uses a single default style.
    pub style_key: String,
}

/// Field configuration for a collection run.
pub(crate) struct FieldConfig<'a> {
    pub label_field: &'a str,
    pub folder_field: &'a str,
    pub export_fields: &'a [String],
    /// Category field plus active style keys; `None` for single-symbol
    /// layers.
    pub category: Option<(&'a str, &'a [String])>,
}

fn field_index(fields: &[String], name: &str) -> Result<usize> {
    fields
        .iter()
        .position(|f| f == name)
        .ok_or_else(|| Error::MissingField(name.to_string()))
}

/// Collect the features of `layer`, filtering out those whose category is
/// not among the active style keys.
///
/// The progress total is fixed to twice the feature count before
/// iteration; every feature advances the counter once here, and every
/// rejected feature gives back the emission unit it will never use.
pub(crate) fn collect_features(
    layer: &dyn Layer,
    config: &FieldConfig,
    progress: &mut Progress,
    reporter: &mut dyn Reporter,
) -> Result<Vec<Feature>> {
    progress.set_total(layer.feature_count() * 2);

    let field_names = layer.field_names();
    let export_indices = config
        .export_fields
        .iter()
        .map(|f| field_index(&field_names, f))
        .collect::<Result<Vec<_>>>()?;
    let folder_index = field_index(&field_names, config.folder_field)?;
    let label_index = field_index(&field_names, config.label_field)?;
    let category = match config.category {
        Some((field, keys)) => Some((field_index(&field_names, field)?, keys)),
        None => None,
    };

    let expected_kind = layer.geometry_kind();
    let mut features = Vec::new();

    for feature in layer.features() {
        progress.step(reporter);

        if feature.geometry.kind() != expected_kind {
            return Err(Error::UnsupportedGeometry(format!(
                "expected {}, found {}",
                expected_kind.name(),
                feature.geometry.kind().name()
            )));
        }

        let style_key = match category {
            Some((index, keys)) => {
                let value = feature.attributes[index].to_text();
                // Only features with an active style are exported.
                if !keys.iter().any(|k| *k == value) {
                    progress.drop_unit();
                    continue;
                }
                value
            }
            None => String::new(),
        };

        let values = export_indices
            .iter()
            .zip(config.export_fields)
            .map(|(&i, name)| (name.clone(), feature.attributes[i].to_text()))
            .collect();

        features.push(Feature {
            folder: feature.attributes[folder_index].to_text(),
            label: feature.attributes[label_index].to_text(),
            values,
            style_key,
            geometry: feature.geometry,
        });
    }

    Ok(features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{GeometryKind, LayerFeature, Value};
    use crate::report::Severity;

    struct TestLayer {
        kind: GeometryKind,
        fields: Vec<String>,
        features: Vec<LayerFeature>,
    }

    impl Layer for TestLayer {
        fn name(&self) -> &str {
            "test"
        }
        fn geometry_kind(&self) -> GeometryKind {
            self.kind
        }
        fn feature_count(&self) -> usize {
            self.features.len()
        }
        fn field_names(&self) -> Vec<String> {
            self.fields.clone()
        }
        fn features(&self) -> Box<dyn Iterator<Item = LayerFeature> + '_> {
            Box::new(self.features.iter().cloned())
        }
    }

    struct NullReporter;

    impl Reporter for NullReporter {
        fn report_progress(&mut self, _percent: u8) {}
        fn report_message(&mut self, _text: &str, _severity: Severity) {}
    }

    fn point(x: f64, attrs: Vec<Value>) -> LayerFeature {
        LayerFeature {
            geometry: Geometry::Point((x, 0.0)),
            attributes: attrs,
        }
    }

    fn layer() -> TestLayer {
        TestLayer {
            kind: GeometryKind::Point,
            fields: vec!["id".into(), "site".into(), "class".into()],
            features: vec![
                point(1.0, vec![Value::Int(1), Value::Text("north".into()), Value::Text("a".into())]),
                point(2.0, vec![Value::Int(2), Value::Text("south".into()), Value::Text("b".into())]),
                point(3.0, vec![Value::Int(3), Value::Text("north".into()), Value::Text("a".into())]),
            ],
        }
    }

    #[test]
    fn collects_all_features_without_category_filter() {
        let layer = layer();
        let exports = vec!["id".to_string()];
        let config = FieldConfig {
            label_field: "id",
            folder_field: "site",
            export_fields: &exports,
            category: None,
        };
        let mut progress = Progress::new();
        let features =
            collect_features(&layer, &config, &mut progress, &mut NullReporter).unwrap();
        assert_eq!(features.len(), 3);
        assert_eq!(features[0].folder, "north");
        assert_eq!(features[0].label, "1");
        assert_eq!(features[0].values, vec![("id".to_string(), "1".to_string())]);
        assert_eq!(features[0].style_key, "");
    }

    #[test]
    fn rejects_features_with_inactive_category() {
        let layer = layer();
        let exports = vec!["id".to_string()];
        let active = vec!["a".to_string()];
        let config = FieldConfig {
            label_field: "id",
            folder_field: "site",
            export_fields: &exports,
            category: Some(("class", &active)),
        };
        let mut progress = Progress::new();
        let features =
            collect_features(&layer, &config, &mut progress, &mut NullReporter).unwrap();
        assert_eq!(features.len(), 2);
        assert!(features.iter().all(|f| f.style_key == "a"));
    }

    #[test]
    fn missing_field_is_detected_before_iteration() {
        let layer = layer();
        let exports = vec!["nope".to_string()];
        let config = FieldConfig {
            label_field: "id",
            folder_field: "site",
            export_fields: &exports,
            category: None,
        };
        let mut progress = Progress::new();
        let err = collect_features(&layer, &config, &mut progress, &mut NullReporter)
            .unwrap_err();
        assert!(matches!(err, Error::MissingField(name) if name == "nope"));
    }

    #[test]
    fn geometry_kind_mismatch_aborts_collection() {
        let mut layer = layer();
        layer.features[1].geometry = Geometry::Line(vec![(0.0, 0.0), (1.0, 1.0)]);
        let exports = vec!["id".to_string()];
        let config = FieldConfig {
            label_field: "id",
            folder_field: "site",
            export_fields: &exports,
            category: None,
        };
        let mut progress = Progress::new();
        let err = collect_features(&layer, &config, &mut progress, &mut NullReporter)
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedGeometry(_)));
    }
}
