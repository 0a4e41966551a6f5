//! Translate annotated query structs into sea-query filter conditions.
//!
//! Each field of a query struct carries a tag naming an operator plus
//! options. Fields holding their type's zero value are ignored, everything
//! else becomes one expression, and the expressions are combined with `AND`
//! or `OR`:
//!
//! ```rust,ignore
//! use structquery::{Queryer, QueryStruct};
//!
//! #[derive(Default, QueryStruct)]
//! pub struct UserQuery {
//!     #[sq("like")]
//!     pub name: String,
//!     #[sq("in;column:id")]
//!     pub ids: Vec<i64>,
//!     #[sq("json_extract_like;path:$.name")]
//!     pub tags: String,
//! }
//!
//! let queryer = Queryer::new();
//! let condition = queryer.and(&UserQuery {
//!     name: "hello".into(),
//!     ..Default::default()
//! })?;
//! ```
//!
//! See [`builtin`] for the operator table and [`Queryer::register`] for
//! adding operators.

extern crate self as structquery;

pub mod binder;
pub mod builtin;
pub mod errors;
pub mod field;
pub mod naming;
pub mod queryer;
pub mod reflect;
pub mod registry;
pub mod tag;
pub mod value;

pub use errors::{QueryError, Result};
pub use field::{Field, FieldMeta};
pub use naming::{NamingPolicy, SnakeCase, Verbatim};
pub use queryer::{Queryer, QueryerBuilder};
pub use reflect::{AsQuery, FieldDef, QueryStruct, SchemaCache, Slot, StructInfo, StructType};
pub use registry::{OperatorFn, OperatorRegistry};
pub use tag::{TagOptions, parse_tag};
pub use value::{FieldValue, ToFilterValue};

pub use sea_orm::Condition;
pub use sea_orm::sea_query;

#[cfg(feature = "derive")]
pub use structquery_derive::QueryStruct;
