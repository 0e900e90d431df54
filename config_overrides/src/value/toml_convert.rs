//! Conversion from `toml` values.

use serde_json::Number;
use toml::Value as TomlValue;

use super::{Scalar, ValueTree};

impl From<TomlValue> for ValueTree {
    fn from(value: TomlValue) -> Self {
        match value {
            TomlValue::String(text) => Self::Scalar(Scalar::String(text)),
            TomlValue::Integer(number) => Self::Scalar(Scalar::Number(number.into())),
            // JSON numbers cannot hold NaN or infinities; keep their TOML spelling.
            TomlValue::Float(number) => Number::from_f64(number).map_or_else(
                || Self::Scalar(Scalar::String(number.to_string())),
                |n| Self::Scalar(Scalar::Number(n)),
            ),
            TomlValue::Boolean(flag) => Self::Scalar(Scalar::Bool(flag)),
            TomlValue::Datetime(stamp) => Self::Scalar(Scalar::String(stamp.to_string())),
            TomlValue::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            TomlValue::Table(table) => Self::Node(
                table
                    .into_iter()
                    .map(|(key, child)| (key, Self::from(child)))
                    .collect(),
            ),
        }
    }
}
