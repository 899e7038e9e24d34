//! Column value decoding
//!
//! Raw cell values are opaque bytes written with HBase's `Bytes` encoding:
//! big-endian integers, big-endian IEEE-754 floats and UTF-8 text. The
//! declared [`ColumnType`] picks the decoder. A small table of name-keyed
//! overrides sits on top of the type-driven decoders; by default it renders
//! the `logged_at` column as a local date-time.

use crate::domain::{ColumnSpec, ColumnType, DecodeError};
use chrono::{Local, TimeZone};
use std::collections::HashMap;
use std::fmt;

/// Column rendered as a local timestamp instead of a bare integer
pub const LOGGED_AT_COLUMN: &str = "logged_at";

/// Output format of [`format_local_timestamp`]
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders a decoded `long` for one specific column
pub type LongRenderer = fn(column: &str, value: i64) -> Result<String, DecodeError>;

/// Type-driven decoder with per-column overrides for `long` values
#[derive(Clone)]
pub struct ColumnCodec {
    long_overrides: HashMap<String, LongRenderer>,
}

impl ColumnCodec {
    /// Codec with the standard overrides (`logged_at` as local time)
    pub fn new() -> Self {
        Self::without_overrides().with_long_override(LOGGED_AT_COLUMN, render_local_timestamp)
    }

    /// Purely type-driven codec
    pub fn without_overrides() -> Self {
        Self {
            long_overrides: HashMap::new(),
        }
    }

    /// Register a renderer for present `long` values of `column`
    pub fn with_long_override(mut self, column: impl Into<String>, renderer: LongRenderer) -> Self {
        self.long_overrides.insert(column.into(), renderer);
        self
    }

    /// Decode one raw value into its display text
    ///
    /// Absent values never fail: numeric types yield their zero text and
    /// textual types an empty string. Overrides only apply to present
    /// values.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] when a present numeric value has the wrong
    /// width or an override cannot render it.
    pub fn decode(&self, spec: &ColumnSpec, raw: Option<&[u8]>) -> Result<String, DecodeError> {
        let Some(bytes) = raw else {
            return Ok(default_text(&spec.column_type).to_string());
        };

        match spec.column_type {
            ColumnType::Long => {
                let value = i64::from_be_bytes(fixed_width(spec, "long", bytes)?);
                match self.long_overrides.get(&spec.name) {
                    Some(render) => render(&spec.name, value),
                    None => Ok(value.to_string()),
                }
            }
            ColumnType::Float => {
                let value = f32::from_be_bytes(fixed_width(spec, "float", bytes)?);
                Ok(float_text(value))
            }
            ColumnType::Double => {
                let value = f64::from_be_bytes(fixed_width(spec, "double", bytes)?);
                Ok(float_text(value))
            }
            ColumnType::String | ColumnType::Unrecognized(_) => {
                Ok(String::from_utf8_lossy(bytes).into_owned())
            }
        }
    }
}

impl fmt::Debug for ColumnCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut overridden: Vec<_> = self.long_overrides.keys().collect();
        overridden.sort();
        f.debug_struct("ColumnCodec")
            .field("long_overrides", &overridden)
            .finish()
    }
}

impl Default for ColumnCodec {
    fn default() -> Self {
        Self::new()
    }
}

/// Text written for an absent value
pub fn default_text(column_type: &ColumnType) -> &'static str {
    match column_type {
        ColumnType::Long => "0",
        ColumnType::Float | ColumnType::Double => "0.0",
        ColumnType::String | ColumnType::Unrecognized(_) => "",
    }
}

/// Shortest round-trip digits in `Float.toString`/`Double.toString` notation
///
/// Magnitudes in `[1e-3, 1e7)` are written plainly; anything else as
/// `<mantissa>E<exponent>` with at least one fractional digit.
fn float_text<T>(value: T) -> String
where
    T: Copy + Into<f64> + fmt::Debug + fmt::LowerExp,
{
    let wide: f64 = value.into();
    if wide.is_nan() {
        return "NaN".to_string();
    }
    if wide.is_infinite() {
        return if wide > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = wide.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        return format!("{value:?}");
    }

    let scientific = format!("{value:e}");
    match scientific.split_once('e') {
        Some((mantissa, exponent)) if mantissa.contains('.') => format!("{mantissa}E{exponent}"),
        Some((mantissa, exponent)) => format!("{mantissa}.0E{exponent}"),
        None => scientific,
    }
}

fn fixed_width<const N: usize>(
    spec: &ColumnSpec,
    type_name: &'static str,
    bytes: &[u8],
) -> Result<[u8; N], DecodeError> {
    bytes.try_into().map_err(|_| DecodeError::InvalidLength {
        column: spec.name.clone(),
        type_name,
        expected: N,
        actual: bytes.len(),
    })
}

/// Format Unix seconds as `yyyy-MM-dd HH:mm:ss` in the system time zone
///
/// Returns `None` when the instant is outside chrono's representable range.
pub fn format_local_timestamp(seconds: i64) -> Option<String> {
    Local
        .timestamp_opt(seconds, 0)
        .earliest()
        .map(|dt| dt.format(TIMESTAMP_FORMAT).to_string())
}

fn render_local_timestamp(column: &str, value: i64) -> Result<String, DecodeError> {
    format_local_timestamp(value).ok_or_else(|| DecodeError::TimestampOutOfRange {
        column: column.to_string(),
        value,
    })
}
