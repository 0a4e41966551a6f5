//! # Struct Reflection
//!
//! Rust has no runtime struct introspection, so a query struct describes
//! itself through [`QueryStruct`], normally generated by
//! `#[derive(QueryStruct)]`:
//!
//! ```rust,ignore
//! use structquery::QueryStruct;
//!
//! #[derive(Default, QueryStruct)]
//! pub struct UserQuery {
//!     #[sq("like")]
//!     pub name: String,
//!     #[sq("eq")]
//!     pub email: String,
//!     #[sq("gte;column:created_at")]
//!     pub created_after: i64,
//!     #[sq(flatten)]
//!     pub paging: Option<Box<PageQuery>>,
//! }
//! ```
//!
//! The static half ([`QueryStruct::fields`]) is turned into a [`StructInfo`]
//! once per type by the [`SchemaCache`]; the dynamic half
//! ([`QueryStruct::field`]) is read on every translation by [`reflect`].

mod cache;

pub use cache::{SchemaCache, StructInfo};

use std::any::{Any, TypeId};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::field::Field;
use crate::value::ToFilterValue;

/// A struct whose fields can be translated into filter expressions.
pub trait QueryStruct: Any {
    /// Field definitions in declaration order, skipped fields excluded.
    fn fields() -> Vec<FieldDef>
    where
        Self: Sized;

    /// Type descriptor used as the schema cache key.
    fn struct_type(&self) -> StructType;

    /// The live value of the field at `index` in [`QueryStruct::fields`].
    fn field(&self, index: usize) -> Slot<'_>;
}

/// Identity and field list of a [`QueryStruct`] type.
#[derive(Clone, Copy)]
pub struct StructType {
    id: TypeId,
    name: &'static str,
    fields: fn() -> Vec<FieldDef>,
}

impl StructType {
    #[must_use]
    pub fn of<T: QueryStruct>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            fields: T::fields,
        }
    }

    #[must_use]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn fields(&self) -> Vec<FieldDef> {
        (self.fields)()
    }
}

impl fmt::Debug for StructType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StructType").field(&self.name).finish()
    }
}

impl PartialEq for StructType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for StructType {}

/// Static description of one declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub tag: &'static str,
    /// Declared with `#[sq(flatten)]`.
    pub anonymous: bool,
    /// Set for flattened fields whose operator is empty: their own fields are
    /// surfaced in place of this one.
    pub embedded: Option<StructType>,
}

impl FieldDef {
    #[must_use]
    pub const fn leaf(name: &'static str, tag: &'static str) -> Self {
        Self {
            name,
            tag,
            anonymous: false,
            embedded: None,
        }
    }

    /// A flattened field carrying its own operator; it is a leaf.
    #[must_use]
    pub const fn anonymous(name: &'static str, tag: &'static str) -> Self {
        Self {
            name,
            tag,
            anonymous: true,
            embedded: None,
        }
    }

    #[must_use]
    pub const fn embedded(name: &'static str, tag: &'static str, ty: StructType) -> Self {
        Self {
            name,
            tag,
            anonymous: true,
            embedded: Some(ty),
        }
    }
}

/// Live value of a field.
pub enum Slot<'a> {
    /// A `None` where a value or an embedded struct would be.
    Nil,
    Value(&'a dyn ToFilterValue),
    Struct(&'a dyn QueryStruct),
}

impl fmt::Debug for Slot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => f.write_str("Nil"),
            Self::Value(value) => f.debug_tuple("Value").field(&value.to_filter_value()).finish(),
            Self::Struct(value) => f.debug_tuple("Struct").field(&value.struct_type()).finish(),
        }
    }
}

/// Resolution of a caller-supplied argument to a query struct.
///
/// Pointer-like wrappers are followed all the way down; `None` and anything
/// that is not a struct resolve to nothing, which the queryer reports as
/// [`QueryError::BadQueryValue`](crate::QueryError::BadQueryValue).
pub trait AsQuery {
    fn as_query(&self) -> Option<&dyn QueryStruct>;
}

impl AsQuery for dyn QueryStruct {
    fn as_query(&self) -> Option<&dyn QueryStruct> {
        Some(self)
    }
}

impl<T: AsQuery> AsQuery for Option<T> {
    fn as_query(&self) -> Option<&dyn QueryStruct> {
        self.as_ref().and_then(AsQuery::as_query)
    }
}

impl<T: AsQuery + ?Sized> AsQuery for &T {
    fn as_query(&self) -> Option<&dyn QueryStruct> {
        (**self).as_query()
    }
}

macro_rules! impl_as_query_deref {
    ($($wrapper:ident),* $(,)?) => {
        $(
            impl<T: AsQuery + ?Sized> AsQuery for $wrapper<T> {
                fn as_query(&self) -> Option<&dyn QueryStruct> {
                    (**self).as_query()
                }
            }
        )*
    };
}

impl_as_query_deref!(Box, Rc, Arc);

macro_rules! impl_as_query_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl AsQuery for $ty {
                fn as_query(&self) -> Option<&dyn QueryStruct> {
                    None
                }
            }
        )*
    };
}

impl_as_query_scalar!(
    str, String, bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32,
    f64, (),
);

impl<T> AsQuery for [T] {
    fn as_query(&self) -> Option<&dyn QueryStruct> {
        None
    }
}

impl<T> AsQuery for Vec<T> {
    fn as_query(&self) -> Option<&dyn QueryStruct> {
        None
    }
}

/// Walk `value` along the cached schema and collect every field holding a
/// non-zero value, in schema order.
///
/// Fields behind a `None` embedding are skipped together with everything
/// below it.
#[must_use]
pub fn reflect(info: &StructInfo, value: &dyn QueryStruct) -> Vec<Field> {
    let mut fields = Vec::new();
    for meta in info.fields() {
        match resolve(value, meta.path()) {
            Slot::Value(slot) if !slot.is_zero() => {
                fields.push(Field::new(Arc::clone(meta), slot.to_filter_value()));
            }
            Slot::Struct(inner) => {
                tracing::warn!(
                    field = %meta.canonical_name,
                    struct_type = ?inner.struct_type(),
                    "leaf field yielded a struct, skipping"
                );
            }
            _ => {}
        }
    }
    fields
}

fn resolve<'a>(root: &'a dyn QueryStruct, path: &[usize]) -> Slot<'a> {
    let Some((last, parents)) = path.split_last() else {
        return Slot::Nil;
    };
    let mut current = root;
    for &index in parents {
        match current.field(index) {
            Slot::Struct(inner) => current = inner,
            _ => return Slot::Nil,
        }
    }
    current.field(*last)
}
