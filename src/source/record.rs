use crate::error::BufferError;
use geo_types::Geometry;
use serde_json::{Map, Value};

/// One feature from a boundary dataset, in geographic coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaRecord {
    /// `None` when the source row carries a null or blank geometry.
    pub geometry: Option<Geometry<f64>>,
    pub properties: Map<String, Value>,
}

impl AreaRecord {
    pub fn new(geometry: Option<Geometry<f64>>, properties: Map<String, Value>) -> Self {
        Self {
            geometry,
            properties,
        }
    }

    /// Text value of an attribute. Numbers are rendered as text.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.properties.get(key)? {
            Value::String(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| s.to_string())
            }
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Numeric value of an attribute. Numeric strings are parsed.
    pub fn number(&self, key: &str) -> Option<f64> {
        let value = match self.properties.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        value.filter(|v| v.is_finite())
    }

    pub fn require_text(&self, key: &str) -> Result<String, BufferError> {
        self.text(key)
            .ok_or_else(|| BufferError::InvalidAttribute(format!("Missing attribute '{}'", key)))
    }

    pub fn require_number(&self, key: &str) -> Result<f64, BufferError> {
        self.number(key).ok_or_else(|| {
            BufferError::InvalidAttribute(format!("Missing or non-numeric attribute '{}'", key))
        })
    }

    pub fn require_geometry(&self) -> Result<&Geometry<f64>, BufferError> {
        self.geometry
            .as_ref()
            .ok_or_else(|| BufferError::InvalidGeometry("Record has no geometry".to_string()))
    }
}
