use quick_xml::escape::escape;

use crate::layer::Geometry;
use crate::style::{StyleDef, Visual};

use super::{Document, Placemark};

/// Render a [`Document`] to KML markup.
pub(super) fn generate_kml(doc: &Document) -> String {
    let mut kml = String::new();

    kml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    kml.push_str("<kml xmlns=\"http://www.opengis.net/kml/2.2\">\n<Document>\n");
    kml.push_str(&format!("  <name>{}</name>\n", escape(&doc.name)));

    write_schema(&mut kml, doc);

    for style in &doc.styles {
        write_style(&mut kml, style);
    }

    for folder in &doc.folders {
        kml.push_str(&format!(
            "  <Folder>\n    <name>{}</name>\n",
            escape(&folder.name)
        ));
        for placemark in &folder.placemarks {
            write_placemark(&mut kml, doc, placemark);
        }
        kml.push_str("  </Folder>\n");
    }

    kml.push_str("</Document>\n</kml>\n");
    kml
}

fn write_schema(kml: &mut String, doc: &Document) {
    kml.push_str(&format!(
        "  <Schema name=\"{}\" id=\"{}\">\n",
        escape(&doc.schema.name),
        escape(&doc.schema.name)
    ));
    for (name, field_type) in &doc.schema.fields {
        kml.push_str(&format!(
            "    <SimpleField type=\"{}\" name=\"{}\"/>\n",
            escape(field_type),
            escape(name)
        ));
    }
    kml.push_str("  </Schema>\n");
}

fn write_style(kml: &mut String, style: &StyleDef) {
    kml.push_str(&format!("  <Style id=\"{}\">\n", escape(&style.key)));

    match &style.visual {
        Visual::Icon { file_name, .. } => {
            kml.push_str(&format!(
                "    <IconStyle>\n      <Icon>\n        <href>{}</href>\n      </Icon>\n    </IconStyle>\n",
                escape(file_name)
            ));
        }
        Visual::Line { color, width } => {
            kml.push_str(&format!(
                "    <LineStyle>\n      <color>{}</color>\n      <width>{}</width>\n    </LineStyle>\n",
                escape(color),
                width
            ));
        }
        Visual::Polygon { fill, border, outline } => {
            kml.push_str(&format!(
                "    <PolyStyle>\n      <color>{}</color>\n    </PolyStyle>\n",
                escape(fill)
            ));
            kml.push_str(&format!(
                "    <LineStyle>\n      <color>{}</color>\n      <width>{}</width>\n    </LineStyle>\n",
                escape(border),
                outline
            ));
        }
    }

    // Label visibility is a numeric scale, not a boolean keyword.
    kml.push_str(&format!(
        "    <LabelStyle>\n      <scale>{}</scale>\n    </LabelStyle>\n",
        if style.show_label { 1 } else { 0 }
    ));
    kml.push_str("  </Style>\n");
}

fn write_placemark(kml: &mut String, doc: &Document, placemark: &Placemark) {
    kml.push_str("    <Placemark>\n");
    kml.push_str(&format!("      <name>{}</name>\n", escape(&placemark.name)));
    kml.push_str(&format!(
        "      <styleUrl>#{}</styleUrl>\n",
        escape(&placemark.style_key)
    ));

    kml.push_str("      <ExtendedData>\n");
    kml.push_str(&format!(
        "        <SchemaData schemaUrl=\"#{}\">\n",
        escape(&doc.schema.name)
    ));
    for (name, value) in &placemark.values {
        kml.push_str(&format!(
            "          <SimpleData name=\"{}\">{}</SimpleData>\n",
            escape(name),
            escape(value)
        ));
    }
    kml.push_str("        </SchemaData>\n      </ExtendedData>\n");

    write_geometry(kml, &placemark.geometry);
    kml.push_str("    </Placemark>\n");
}

fn write_geometry(kml: &mut String, geometry: &Geometry) {
    match geometry {
        Geometry::Point((x, y)) => {
            kml.push_str(&format!(
                "      <Point>\n        <coordinates>{x},{y}</coordinates>\n      </Point>\n"
            ));
        }
        Geometry::Line(points) => {
            kml.push_str(&format!(
                "      <LineString>\n        <coordinates>{}</coordinates>\n      </LineString>\n",
                coordinate_string(points)
            ));
        }
        Geometry::Polygon(rings) => {
            kml.push_str("      <Polygon>\n");
            for (i, ring) in rings.iter().enumerate() {
                let boundary = if i == 0 { "outerBoundaryIs" } else { "innerBoundaryIs" };
                kml.push_str(&format!(
                    "        <{boundary}>\n          <LinearRing>\n            <coordinates>{}</coordinates>\n          </LinearRing>\n        </{boundary}>\n",
                    coordinate_string(ring)
                ));
            }
            kml.push_str("      </Polygon>\n");
        }
    }
}

/// Space-separated `x,y` pairs, in collected order.
fn coordinate_string(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{x},{y}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::GeometryKind;

    #[test]
    fn coordinates_are_space_separated_pairs() {
        assert_eq!(
            coordinate_string(&[(0.5, 1.0), (2.0, 3.25)]),
            "0.5,1 2,3.25"
        );
    }

    #[test]
    fn document_renders_schema_styles_and_placemarks() {
        let mut doc = Document::new("sites");
        doc.set_schema("sites", &["name".to_string()]);
        doc.add_style(StyleDef {
            key: "style".into(),
            kind: GeometryKind::Line,
            visual: Visual::Line { color: "ffccbbaa".into(), width: 2.0 },
            show_label: true,
        });
        doc.add_placemark(
            "trails",
            Placemark {
                name: "T1".into(),
                style_key: "style".into(),
                geometry: Geometry::Line(vec![(0.0, 0.0), (1.0, 1.0)]),
                values: vec![("name".into(), "val".into())],
            },
        );

        let kml = doc.to_kml();
        assert!(kml.contains("<Schema name=\"sites\" id=\"sites\">"));
        assert!(kml.contains("<SimpleField type=\"string\" name=\"name\"/>"));
        assert!(kml.contains("<Style id=\"style\">"));
        assert!(kml.contains("<color>ffccbbaa</color>"));
        assert!(kml.contains("<width>2</width>"));
        assert!(kml.contains("<scale>1</scale>"));
        assert!(kml.contains("<styleUrl>#style</styleUrl>"));
        assert!(kml.contains("<coordinates>0,0 1,1</coordinates>"));
        assert!(kml.contains("<SimpleData name=\"name\">val</SimpleData>"));
    }

    #[test]
    fn markup_escapes_attribute_text() {
        let mut doc = Document::new("a<b");
        doc.set_schema("a<b", &[]);
        doc.add_placemark(
            "f&f",
            Placemark {
                name: "<tag>".into(),
                style_key: "style".into(),
                geometry: Geometry::Point((0.0, 0.0)),
                values: vec![],
            },
        );
        let kml = doc.to_kml();
        assert!(kml.contains("<name>a&lt;b</name>"));
        assert!(kml.contains("<name>f&amp;f</name>"));
        assert!(kml.contains("<name>&lt;tag&gt;</name>"));
        assert!(!kml.contains("<name><tag></name>"));
    }

    #[test]
    fn polygon_rings_become_outer_and_inner_boundaries() {
        let mut kml = String::new();
        write_geometry(
            &mut kml,
            &Geometry::Polygon(vec![
                vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 0.0)],
                vec![(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 1.0)],
            ]),
        );
        assert_eq!(kml.matches("<outerBoundaryIs>").count(), 1);
        assert_eq!(kml.matches("<innerBoundaryIs>").count(), 1);
    }
}
