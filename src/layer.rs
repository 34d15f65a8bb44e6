//! Feature layer abstraction: geometry, attribute values, and the `Layer`
//! trait implemented by feature sources.

/// The geometry families this crate can export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryKind {
    Point,
    Line,
    Polygon,
}

impl GeometryKind {
    pub fn name(&self) -> &'static str {
        match self {
            GeometryKind::Point => "point",
            GeometryKind::Line => "line",
            GeometryKind::Polygon => "polygon",
        }
    }
}

/// Single-part feature geometry. Coordinates are (x, y) pairs in the
/// layer's coordinate reference system; no altitude component.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point((f64, f64)),
    Line(Vec<(f64, f64)>),
    /// Rings of a polygon. The first ring is the outer boundary; any
    /// following rings are holes.
    Polygon(Vec<Vec<(f64, f64)>>),
}

impl Geometry {
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::Line(_) => GeometryKind::Line,
            Geometry::Polygon(_) => GeometryKind::Polygon,
        }
    }
}

/// An attribute value as yielded by a layer.
///
/// Text conversion never fails: values that have no clean textual form
/// fall back to a best-effort representation instead of aborting the run.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Text(String),
    Int(i64),
    Real(f64),
    Bool(bool),
    /// Bytes that are not guaranteed to be valid UTF-8.
    Raw(Vec<u8>),
}

impl Value {
    /// Convert to text, falling back to a lossy representation when the
    /// value is not cleanly text-encodable.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Text(s) => s.clone(),
            Value::Int(i) => i.to_string(),
            Value::Real(r) => r.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Raw(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        }
    }
}

/// One feature as yielded by a [`Layer`], before collection.
///
/// `attributes` is positional and must align with [`Layer::field_names`].
#[derive(Debug, Clone)]
pub struct LayerFeature {
    pub geometry: Geometry,
    pub attributes: Vec<Value>,
}

/// A source of features. Implemented by whatever holds the actual spatial
/// data; the exporter only ever reads through this interface.
pub trait Layer {
    /// Display name of the layer; used as the KML document and schema name.
    fn name(&self) -> &str;

    /// The geometry kind every feature in this layer is expected to carry.
    fn geometry_kind(&self) -> GeometryKind;

    /// Number of features the iterator will yield.
    fn feature_count(&self) -> usize;

    /// Ordered attribute field names.
    fn field_names(&self) -> Vec<String>;

    /// Iterate over all features in layer order.
    fn features(&self) -> Box<dyn Iterator<Item = LayerFeature> + '_>;
}
