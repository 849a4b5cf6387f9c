use crate::data::datavalue::DataValue;
use crate::error::{DatasetError, Result};
use std::cmp::Ordering;

/// Order two values of the same orderable kind
///
/// Integers and floats compare as numbers (floats use IEEE total ordering).
/// Strings, zoned datetimes, local datetimes and dates order within their own
/// kind. Anything else, including mixing two kinds, is a `TypeMismatch`.
pub fn compare_orderable(a: &DataValue, b: &DataValue) -> Result<Ordering> {
    match (a, b) {
        (DataValue::Integer(a), DataValue::Integer(b)) => Ok(a.cmp(b)),
        (DataValue::Float(a), DataValue::Float(b)) => Ok(a.total_cmp(b)),
        // Compare actual numeric values, not types
        (DataValue::Integer(i), DataValue::Float(f)) => Ok(compare_integer_float(*i, *f)),
        (DataValue::Float(f), DataValue::Integer(i)) => Ok(compare_integer_float(*i, *f).reverse()),

        (DataValue::String(a), DataValue::String(b)) => Ok(a.cmp(b)),
        (DataValue::DateTime(a), DataValue::DateTime(b)) => Ok(a.cmp(b)),
        (DataValue::LocalDateTime(a), DataValue::LocalDateTime(b)) => Ok(a.cmp(b)),
        (DataValue::Date(a), DataValue::Date(b)) => Ok(a.cmp(b)),

        (a, _) if !is_orderable(a) => {
            Err(DatasetError::type_mismatch("orderable value", a.kind()))
        }
        (a, b) => Err(DatasetError::type_mismatch(a.kind(), b.kind())),
    }
}

/// Exact ordering of an integer against a float
///
/// Casting the integer to `f64` rounds above 2^53, so the float is split into
/// its integral part (compared as `i64`) and its fraction instead. NaNs order
/// the way `f64::total_cmp` puts them: positive NaN above everything.
fn compare_integer_float(i: i64, f: f64) -> Ordering {
    // 2^63, the first float past i64::MAX
    const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

    if f.is_nan() {
        return if f.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }

    let integral = f.trunc();
    if integral >= I64_BOUND {
        return Ordering::Less;
    }
    if integral < -I64_BOUND {
        return Ordering::Greater;
    }

    // In range and integral, so the cast is exact
    match i.cmp(&(integral as i64)) {
        Ordering::Equal => 0.0_f64
            .partial_cmp(&(f - integral))
            .unwrap_or(Ordering::Equal),
        ordering => ordering,
    }
}

/// Whether a value can take part in extent computation at all
pub fn is_orderable(value: &DataValue) -> bool {
    !matches!(value, DataValue::Boolean(_) | DataValue::Null)
}
