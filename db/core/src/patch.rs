//! Partial updates where only "truthy" values are applied.
//!
//! Update inputs treat an absent field, an empty string, `0` and `false` as "leave the
//! stored value unchanged". Flags and counters that must be cleared have dedicated
//! operations instead.

use sea_orm::{ActiveValue, Value};

/// Values that carry a change when applied as part of a partial update.
pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        !self.trim().is_empty()
    }
}

impl Truthy for i32 {
    fn is_truthy(&self) -> bool {
        *self != 0
    }
}

impl Truthy for i64 {
    fn is_truthy(&self) -> bool {
        *self != 0
    }
}

impl Truthy for f64 {
    fn is_truthy(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
}

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

impl<T> Truthy for Vec<T> {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

/// Returns the value only when it is present and truthy.
pub fn truthy<T: Truthy>(value: Option<T>) -> Option<T> {
    value.filter(Truthy::is_truthy)
}

/// Sets `target` when `value` is present and truthy. Returns whether it was set.
pub fn set_if_truthy<T>(target: &mut ActiveValue<T>, value: Option<T>) -> bool
where
    T: Truthy + Into<Value>,
{
    match truthy(value) {
        Some(v) => {
            *target = ActiveValue::Set(v);
            true
        }
        None => false,
    }
}

/// Like [`set_if_truthy`] for nullable columns. A truthy value is stored as `Some`.
pub fn set_some_if_truthy<T>(target: &mut ActiveValue<Option<T>>, value: Option<T>) -> bool
where
    T: Truthy,
    Option<T>: Into<Value>,
{
    match truthy(value) {
        Some(v) => {
            *target = ActiveValue::Set(Some(v));
            true
        }
        None => false,
    }
}
