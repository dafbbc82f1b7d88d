//! Galaxy candidate records and the sentinel-decoding ingestion boundary.
//!
//! Upstream catalogs mark a missing shape parameter either with a large
//! negative sentinel (`-999`, anything below `-990`) or with NaN. Both are
//! decoded here, once, into `Option<f64>`; nothing downstream ever sees a
//! sentinel.
//!
//! Raw records arrive as JSON objects:
//!
//! ```json
//! {"id": "CGCG 146-027 NED02", "ra": 107.00420833333, "dec": 31.66327777778,
//!  "a": 0.0245556, "b2a": 0.5, "pa": 80, "type": "G"}
//! ```
//!
//! `id`, `ra`, `dec`, `a`, `b2a` and `pa` are required keys. Shape keys may
//! hold `null` or the string `"NaN"` as the not-a-number marker. Every other
//! key is carried through untouched.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{CrossmatchError, Result};
use crate::geometry::SkyPoint;

/// Shape values at or below this are "missing" sentinels.
pub const MISSING_SENTINEL: f64 = -990.0;

/// Decodes a raw, possibly sentinel-encoded shape value.
///
/// NaN, infinities and anything below [`MISSING_SENTINEL`] map to `None`.
#[inline]
pub fn shape_value(raw: f64) -> Option<f64> {
    if !raw.is_finite() || raw < MISSING_SENTINEL {
        None
    } else {
        Some(raw)
    }
}

/// One galaxy returned by the coarse cone search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalaxyRecord {
    /// Opaque catalog identifier.
    pub id: String,
    /// Center right ascension, in degrees.
    pub ra: f64,
    /// Center declination, in degrees.
    pub dec: f64,
    /// Semi-major axis in degrees, if catalogued.
    pub a: Option<f64>,
    /// Minor-to-major axis ratio, if catalogued.
    pub b2a: Option<f64>,
    /// Position angle in degrees, if catalogued.
    pub pa: Option<f64>,
    /// Pass-through fields (names, types, magnitudes, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GalaxyRecord {
    /// Builds a record from sentinel-encoded shape values.
    pub fn from_raw(id: impl Into<String>, ra: f64, dec: f64, a: f64, b2a: f64, pa: f64) -> Self {
        Self {
            id: id.into(),
            ra,
            dec,
            a: shape_value(a),
            b2a: shape_value(b2a),
            pa: shape_value(pa),
            extra: Map::new(),
        }
    }

    /// Attaches a pass-through field.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn center(&self) -> SkyPoint {
        SkyPoint::new(self.ra, self.dec)
    }

    /// Parses the `index`-th raw record of a candidate list.
    ///
    /// # Errors
    /// [`CrossmatchError::InvalidRecord`] if the value is not an object, a
    /// required key is absent, or a value has the wrong type. Sentinel or
    /// NaN shape values are not errors.
    pub fn from_json(index: usize, value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            CrossmatchError::invalid_record(index, "<record>", "is not a JSON object")
        })?;

        let id = parse_id(index, object)?;
        let ra = parse_coordinate(index, object, "ra")?;
        let dec = parse_coordinate(index, object, "dec")?;
        if !(-90.0..=90.0).contains(&dec) {
            return Err(CrossmatchError::invalid_record(
                index,
                "dec",
                format!("{} is outside [-90, 90]", dec),
            ));
        }

        let a = parse_shape(index, object, "a")?;
        let b2a = parse_shape(index, object, "b2a")?;
        let pa = parse_shape(index, object, "pa")?;

        let extra = object
            .iter()
            .filter(|(key, _)| !REQUIRED_FIELDS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Ok(Self {
            id,
            ra,
            dec,
            a,
            b2a,
            pa,
            extra,
        })
    }
}

const REQUIRED_FIELDS: [&str; 6] = ["id", "ra", "dec", "a", "b2a", "pa"];

fn require<'a>(index: usize, object: &'a Map<String, Value>, field: &str) -> Result<&'a Value> {
    object
        .get(field)
        .ok_or_else(|| CrossmatchError::invalid_record(index, field, "is missing"))
}

fn parse_id(index: usize, object: &Map<String, Value>) -> Result<String> {
    match require(index, object, "id")? {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) if n.is_i64() || n.is_u64() => Ok(n.to_string()),
        other => Err(CrossmatchError::invalid_record(
            index,
            "id",
            format!("must be a string or integer, got {}", type_name(other)),
        )),
    }
}

fn parse_coordinate(index: usize, object: &Map<String, Value>, field: &str) -> Result<f64> {
    match require(index, object, field)? {
        Value::Number(n) => n
            .as_f64()
            .filter(|v| v.is_finite())
            .ok_or_else(|| CrossmatchError::invalid_record(index, field, "is not a finite number")),
        other => Err(CrossmatchError::invalid_record(
            index,
            field,
            format!("must be a number, got {}", type_name(other)),
        )),
    }
}

fn parse_shape(index: usize, object: &Map<String, Value>, field: &str) -> Result<Option<f64>> {
    match require(index, object, field)? {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(n.as_f64().and_then(shape_value)),
        Value::String(s) if s.trim().eq_ignore_ascii_case("nan") => Ok(None),
        other => Err(CrossmatchError::invalid_record(
            index,
            field,
            format!("must be a number, null or \"NaN\", got {}", type_name(other)),
        )),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
