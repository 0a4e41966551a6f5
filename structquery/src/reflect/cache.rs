use parking_lot::RwLock;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

use super::StructType;
use crate::errors::{QueryError, Result};
use crate::field::FieldMeta;
use crate::tag::parse_tag;

/// Flattened leaf fields of one struct type, embedded structs inlined at the
/// point of embedding.
#[derive(Debug)]
pub struct StructInfo {
    struct_type: StructType,
    fields: Vec<Arc<FieldMeta>>,
}

impl StructInfo {
    #[must_use]
    pub const fn struct_type(&self) -> StructType {
        self.struct_type
    }

    #[must_use]
    pub fn fields(&self) -> &[Arc<FieldMeta>] {
        &self.fields
    }

    /// Distinct operator tokens used by the leaf fields, in first-use order.
    pub fn operators(&self) -> impl Iterator<Item = &str> {
        let mut seen = Vec::new();
        self.fields.iter().filter_map(move |meta| {
            let operator = meta.operator.as_str();
            if seen.contains(&operator) {
                None
            } else {
                seen.push(operator);
                Some(operator)
            }
        })
    }
}

/// Memoized [`StructInfo`] per struct type.
#[derive(Debug, Default)]
pub struct SchemaCache {
    infos: RwLock<HashMap<TypeId, Arc<StructInfo>>>,
}

impl SchemaCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached schema for `struct_type`, building it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::RecursiveEmbedding`] when the type embeds itself.
    pub fn get(&self, struct_type: StructType) -> Result<Arc<StructInfo>> {
        if let Some(info) = self.infos.read().get(&struct_type.id()) {
            return Ok(Arc::clone(info));
        }

        let info = Arc::new(Self::parse(struct_type)?);
        tracing::debug!(
            struct_type = struct_type.name(),
            fields = info.fields.len(),
            "cached query struct schema"
        );
        let mut infos = self.infos.write();
        // A concurrent caller may have won the race; keep the first entry.
        let info = infos.entry(struct_type.id()).or_insert(info);
        Ok(Arc::clone(info))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.infos.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.infos.read().is_empty()
    }

    /// Build the schema of `struct_type` without touching the cache.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::RecursiveEmbedding`] when the type embeds itself.
    pub fn parse(struct_type: StructType) -> Result<StructInfo> {
        let mut fields = Vec::new();
        let mut stack = vec![struct_type.id()];
        Self::create(struct_type, None, &[], &mut stack, &mut fields)?;
        Ok(StructInfo {
            struct_type,
            fields,
        })
    }

    fn create(
        struct_type: StructType,
        parent: Option<&str>,
        prefix: &[usize],
        stack: &mut Vec<TypeId>,
        out: &mut Vec<Arc<FieldMeta>>,
    ) -> Result<()> {
        for (index, def) in struct_type.fields().into_iter().enumerate() {
            let (operator, options) = parse_tag(def.tag);
            let canonical_name = match parent {
                Some(parent) => format!("{parent}.{}", def.name),
                None => def.name.to_string(),
            };
            let mut path = prefix.to_vec();
            path.push(index);

            match def.embedded {
                Some(embedded) if operator.is_empty() => {
                    if stack.contains(&embedded.id()) {
                        return Err(QueryError::RecursiveEmbedding {
                            type_name: embedded.name(),
                            path: canonical_name,
                        });
                    }
                    stack.push(embedded.id());
                    Self::create(embedded, Some(&canonical_name), &path, stack, out)?;
                    stack.pop();
                }
                _ => out.push(Arc::new(FieldMeta {
                    name: def.name,
                    canonical_name,
                    anonymous: def.anonymous,
                    tag: def.tag,
                    operator,
                    options,
                    path,
                })),
            }
        }
        Ok(())
    }
}
