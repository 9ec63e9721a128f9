use serde::Serialize;

use super::schema::FeatureSchema;

/// A single feature cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Int(i64),
    Float(f64),
    Category(&'static str),
}

impl FeatureValue {
    pub fn flag(on: bool) -> Self {
        Self::Int(i64::from(on))
    }

    /// Numeric view; categories have none
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Category(_) => None,
        }
    }
}

impl std::fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{:.1}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Category(v) => f.write_str(v),
        }
    }
}

/// Fixed-order feature values for one URL.
///
/// `degraded` marks a vector that holds the schema defaults because the
/// input was blank or could not be parsed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    pub schema: FeatureSchema,
    pub values: Vec<FeatureValue>,
    pub degraded: bool,
}

impl FeatureVector {
    pub(crate) fn new(schema: FeatureSchema, values: Vec<FeatureValue>) -> Self {
        debug_assert_eq!(values.len(), schema.arity());
        Self {
            schema,
            values,
            degraded: false,
        }
    }

    pub(crate) fn degraded(schema: FeatureSchema, values: Vec<FeatureValue>) -> Self {
        Self {
            degraded: true,
            ..Self::new(schema, values)
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn names(&self) -> &'static [&'static str] {
        self.schema.feature_names()
    }

    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.names()
            .iter()
            .position(|n| *n == name)
            .and_then(|idx| self.values.get(idx))
    }

    /// `(name, value)` pairs in schema order
    pub fn named(&self) -> impl Iterator<Item = (&'static str, &FeatureValue)> + '_ {
        self.names().iter().copied().zip(self.values.iter())
    }

    pub fn to_map(&self) -> serde_json::Map<String, serde_json::Value> {
        self.named()
            .map(|(name, value)| {
                let value = serde_json::to_value(value).unwrap_or(serde_json::Value::Null);
                (name.to_string(), value)
            })
            .collect()
    }

    /// Values rendered as CSV cells
    pub fn to_record(&self) -> Vec<String> {
        self.values.iter().map(ToString::to_string).collect()
    }
}
