//! Cell Values
//!
//! Property values carried by graph elements and stored in table cells.
//!
//! Bolt clients hand back a mix of plain scalars and database-specific
//! temporal types. Rather than probing a value's runtime type, every value is
//! one of a closed set of variants, and temporal values are a nested enum
//! with one stringification rule per variant.
//!
//! ## Temporal String Forms
//!
//! ```text
//! Date            2021-03-04
//! LocalTime       09:30:00.000000000
//! Time            09:30:00.000000000+01:00
//! LocalDateTime   2021-03-04T09:30:00.000000000
//! DateTime        2021-03-04T09:30:00.000000000+01:00
//! DateTimeZoned   2021-03-04T09:30:00.000000000+01:00[Europe/Paris]
//! Duration        P1Y2M3DT4H5M6.5S
//! ```

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use serde::de::Deserializer;
use serde::ser::{Error as _, SerializeMap, SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Property map of a node or relationship.
///
/// Ordered by key so that column order in the produced tables is stable.
pub type PropertyMap = BTreeMap<String, CellValue>;

/// A single property value / table cell
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    List(Vec<CellValue>),
    Map(BTreeMap<String, CellValue>),
    Temporal(TemporalValue),
}

/// Database temporal types, as delivered by a Bolt client
#[derive(Debug, Clone, PartialEq)]
pub enum TemporalValue {
    Date(NaiveDate),
    /// Time of day with a UTC offset
    Time {
        time: NaiveTime,
        offset: FixedOffset,
    },
    LocalTime(NaiveTime),
    DateTime(DateTime<FixedOffset>),
    LocalDateTime(NaiveDateTime),
    /// Date-time bound to a named zone (e.g. "Europe/Paris")
    DateTimeZoned {
        datetime: DateTime<FixedOffset>,
        zone: String,
    },
    Duration(BoltDuration),
}

/// Bolt duration: months, days, seconds and nanoseconds are kept apart
/// because they do not convert into each other without a calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoltDuration {
    pub months: i64,
    pub days: i64,
    pub seconds: i64,
    pub nanoseconds: i32,
}

impl BoltDuration {
    pub fn new(months: i64, days: i64, seconds: i64, nanoseconds: i32) -> Self {
        BoltDuration {
            months,
            days,
            seconds,
            nanoseconds,
        }
    }

    fn is_zero(&self) -> bool {
        self.months == 0 && self.days == 0 && self.seconds == 0 && self.nanoseconds == 0
    }
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Short type name, used in log and error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Null => "null",
            CellValue::Boolean(_) => "boolean",
            CellValue::Integer(_) => "integer",
            CellValue::Float(_) => "float",
            CellValue::String(_) => "string",
            CellValue::Bytes(_) => "bytes",
            CellValue::List(_) => "list",
            CellValue::Map(_) => "map",
            CellValue::Temporal(t) => t.type_name(),
        }
    }

    /// True for a temporal value, or a list/map holding one at any depth.
    pub fn contains_temporal(&self) -> bool {
        match self {
            CellValue::Temporal(_) => true,
            CellValue::List(items) => items.iter().any(CellValue::contains_temporal),
            CellValue::Map(entries) => entries.values().any(CellValue::contains_temporal),
            _ => false,
        }
    }

    /// Text form used for CSV export.
    ///
    /// Null renders as an empty field, bytes as `0x`-prefixed lowercase hex, and nested
    /// lists/maps as compact JSON.
    pub fn render(&self) -> Result<String, serde_json::Error> {
        Ok(match self {
            CellValue::Null => String::new(),
            CellValue::Boolean(b) => b.to_string(),
            CellValue::Integer(i) => i.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::String(s) => s.clone(),
            CellValue::Bytes(bytes) => format!("0x{}", hex::encode(bytes)),
            CellValue::List(_) | CellValue::Map(_) => serde_json::to_string(self)?,
            CellValue::Temporal(t) => t.to_string(),
        })
    }
}

impl TemporalValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            TemporalValue::Date(_) => "date",
            TemporalValue::Time { .. } => "time",
            TemporalValue::LocalTime(_) => "local_time",
            TemporalValue::DateTime(_) => "datetime",
            TemporalValue::LocalDateTime(_) => "local_datetime",
            TemporalValue::DateTimeZoned { .. } => "datetime_zoned",
            TemporalValue::Duration(_) => "duration",
        }
    }
}

const TIME_FORMAT: &str = "%H:%M:%S%.9f";
const LOCAL_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.9f";
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.9f%:z";

impl fmt::Display for TemporalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemporalValue::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            TemporalValue::Time { time, offset } => {
                write!(f, "{}{}", time.format(TIME_FORMAT), offset)
            }
            TemporalValue::LocalTime(time) => write!(f, "{}", time.format(TIME_FORMAT)),
            TemporalValue::DateTime(dt) => write!(f, "{}", dt.format(DATETIME_FORMAT)),
            TemporalValue::LocalDateTime(dt) => write!(f, "{}", dt.format(LOCAL_DATETIME_FORMAT)),
            TemporalValue::DateTimeZoned { datetime, zone } => {
                write!(f, "{}[{}]", datetime.format(DATETIME_FORMAT), zone)
            }
            TemporalValue::Duration(duration) => write!(f, "{}", duration),
        }
    }
}

impl fmt::Display for BoltDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("PT0S");
        }

        let mut out = String::from("P");
        let (years, months) = (self.months / 12, self.months % 12);
        if years != 0 {
            out.push_str(&format!("{}Y", years));
        }
        if months != 0 {
            out.push_str(&format!("{}M", months));
        }
        if self.days != 0 {
            out.push_str(&format!("{}D", self.days));
        }

        // Fold nanoseconds into the seconds total first so that sign handling
        // stays in one place.
        let total_nanos = i128::from(self.seconds) * 1_000_000_000 + i128::from(self.nanoseconds);
        if total_nanos != 0 {
            out.push('T');
            let negative = total_nanos < 0;
            let abs = total_nanos.unsigned_abs();
            let whole_secs = abs / 1_000_000_000;
            let frac = abs % 1_000_000_000;
            let (hours, minutes, secs) = (whole_secs / 3600, (whole_secs % 3600) / 60, whole_secs % 60);
            let sign = if negative { "-" } else { "" };
            if hours != 0 {
                out.push_str(&format!("{}{}H", sign, hours));
            }
            if minutes != 0 {
                out.push_str(&format!("{}{}M", sign, minutes));
            }
            if secs != 0 || frac != 0 {
                if frac == 0 {
                    out.push_str(&format!("{}{}S", sign, secs));
                } else {
                    let digits = format!("{:09}", frac);
                    out.push_str(&format!("{}{}.{}S", sign, secs, digits.trim_end_matches('0')));
                }
            }
        }

        f.write_str(&out)
    }
}

// ========== Conversions ==========

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Boolean(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::String(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::String(value)
    }
}

impl From<TemporalValue> for CellValue {
    fn from(value: TemporalValue) -> Self {
        CellValue::Temporal(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Null, Into::into)
    }
}

/// JSON has no temporal or bytes types, so this conversion never produces
/// those variants. Integers that do not fit in i64 (unsigned values above
/// `i64::MAX`) become floats and lose precision.
impl From<Value> for CellValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => CellValue::Null,
            Value::Bool(b) => CellValue::Boolean(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    CellValue::Integer(i)
                } else {
                    CellValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => CellValue::String(s),
            Value::Array(items) => CellValue::List(items.into_iter().map(CellValue::from).collect()),
            Value::Object(obj) => {
                CellValue::Map(obj.into_iter().map(|(k, v)| (k, CellValue::from(v))).collect())
            }
        }
    }
}

// ========== Serde ==========

/// Temporal cells refuse to serialize: callers are expected to run the
/// table through `temporal::normalize` first.
impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Null => serializer.serialize_unit(),
            CellValue::Boolean(b) => serializer.serialize_bool(*b),
            CellValue::Integer(i) => serializer.serialize_i64(*i),
            CellValue::Float(f) => serializer.serialize_f64(*f),
            CellValue::String(s) => serializer.serialize_str(s),
            CellValue::Bytes(bytes) => {
                serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
            }
            CellValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            CellValue::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            CellValue::Temporal(t) => Err(S::Error::custom(format!(
                "cannot serialize {} value `{}`; normalize temporal values first",
                t.type_name(),
                t
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for CellValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(CellValue::from)
    }
}
