//! Runtime field values.
//!
//! A query struct field participates in a filter only when its value is not
//! the zero value of its type. [`ToFilterValue`] decides both: whether the
//! value is zero, and how it converts into a sea-query [`Value`].

use sea_orm::sea_query::{SimpleExpr, Value};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;
use uuid::Uuid;

/// Value extracted from one field for one translation.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Single(Value),
    List(Vec<Value>),
}

impl FieldValue {
    /// Default string representation, used for LIKE wildcards.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        self.to_string()
    }

    /// The value as a bindable expression; lists become a tuple.
    #[must_use]
    pub fn to_simple_expr(&self) -> SimpleExpr {
        match self {
            Self::Single(value) => SimpleExpr::Value(value.clone()),
            Self::List(values) => {
                SimpleExpr::Tuple(values.iter().cloned().map(SimpleExpr::Value).collect())
            }
        }
    }

    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(value) => write_value(f, value),
            Self::List(values) => {
                f.write_str("[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write_value(f, value)?;
                }
                f.write_str("]")
            }
        }
    }
}

fn write_value(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::Bool(Some(v)) => write!(f, "{v}"),
        Value::TinyInt(Some(v)) => write!(f, "{v}"),
        Value::SmallInt(Some(v)) => write!(f, "{v}"),
        Value::Int(Some(v)) => write!(f, "{v}"),
        Value::BigInt(Some(v)) => write!(f, "{v}"),
        Value::TinyUnsigned(Some(v)) => write!(f, "{v}"),
        Value::SmallUnsigned(Some(v)) => write!(f, "{v}"),
        Value::Unsigned(Some(v)) => write!(f, "{v}"),
        Value::BigUnsigned(Some(v)) => write!(f, "{v}"),
        Value::Float(Some(v)) => write!(f, "{v}"),
        Value::Double(Some(v)) => write!(f, "{v}"),
        Value::String(Some(v)) => f.write_str(v),
        Value::Char(Some(v)) => write!(f, "{v}"),
        Value::Json(Some(v)) => write!(f, "{v}"),
        Value::Uuid(Some(v)) => write!(f, "{v}"),
        other => write!(f, "{other:?}"),
    }
}

/// Conversion of a struct field into a filter value.
pub trait ToFilterValue {
    /// Whether the value is the zero value of its type; zero values never
    /// reach an operator function.
    fn is_zero(&self) -> bool;

    fn to_filter_value(&self) -> FieldValue;
}

macro_rules! impl_numeric {
    ($($ty:ty),* $(,)?) => {
        impl_numeric!($($ty => |v| *v == <$ty>::default()),*);
    };
    ($($ty:ty => |$v:ident| $zero:expr),* $(,)?) => {
        $(
            impl ToFilterValue for $ty {
                fn is_zero(&self) -> bool {
                    let $v = self;
                    $zero
                }

                fn to_filter_value(&self) -> FieldValue {
                    FieldValue::Single(Value::from(*self))
                }
            }
        )*
    };
}

impl_numeric!(i8, i16, i32, i64, u8, u16, u32, u64);

// Only positive zero is zero: `-0.0` and NaN are set values.
impl_numeric!(
    f32 => |v| v.to_bits() == 0,
    f64 => |v| v.to_bits() == 0,
);

impl ToFilterValue for bool {
    fn is_zero(&self) -> bool {
        !*self
    }

    fn to_filter_value(&self) -> FieldValue {
        FieldValue::Single(Value::from(*self))
    }
}

impl ToFilterValue for char {
    fn is_zero(&self) -> bool {
        *self == '\0'
    }

    fn to_filter_value(&self) -> FieldValue {
        FieldValue::Single(Value::from(*self))
    }
}

impl ToFilterValue for str {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn to_filter_value(&self) -> FieldValue {
        FieldValue::Single(Value::from(self))
    }
}

impl ToFilterValue for String {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn to_filter_value(&self) -> FieldValue {
        FieldValue::Single(Value::from(self.as_str()))
    }
}

impl ToFilterValue for Uuid {
    fn is_zero(&self) -> bool {
        self.is_nil()
    }

    fn to_filter_value(&self) -> FieldValue {
        FieldValue::Single(Value::from(*self))
    }
}

impl ToFilterValue for serde_json::Value {
    fn is_zero(&self) -> bool {
        self.is_null()
    }

    fn to_filter_value(&self) -> FieldValue {
        FieldValue::Single(Value::from(self.clone()))
    }
}

/// `None` is the nil pointer. `Some` of a zero value still counts: the
/// caller explicitly asked to filter on it.
impl<T: ToFilterValue> ToFilterValue for Option<T> {
    fn is_zero(&self) -> bool {
        self.is_none()
    }

    fn to_filter_value(&self) -> FieldValue {
        match self {
            Some(value) => value.to_filter_value(),
            None => FieldValue::Single(Value::String(None)),
        }
    }
}

/// Empty sequences are zero.
impl<T: ToFilterValue> ToFilterValue for Vec<T> {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn to_filter_value(&self) -> FieldValue {
        let mut values = Vec::with_capacity(self.len());
        for item in self {
            match item.to_filter_value() {
                FieldValue::Single(value) => values.push(value),
                FieldValue::List(nested) => values.extend(nested),
            }
        }
        FieldValue::List(values)
    }
}

macro_rules! impl_deref {
    ($($wrapper:ident),* $(,)?) => {
        $(
            impl<T: ToFilterValue + ?Sized> ToFilterValue for $wrapper<T> {
                fn is_zero(&self) -> bool {
                    (**self).is_zero()
                }

                fn to_filter_value(&self) -> FieldValue {
                    (**self).to_filter_value()
                }
            }
        )*
    };
}

impl_deref!(Box, Rc, Arc);

impl<T: ToFilterValue + ?Sized> ToFilterValue for &T {
    fn is_zero(&self) -> bool {
        (**self).is_zero()
    }

    fn to_filter_value(&self) -> FieldValue {
        (**self).to_filter_value()
    }
}
