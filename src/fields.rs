//! Field Registry
//!
//! Owns the column definitions in their fixed creation order. Toggling a column
//! only flips `enabled`; `order_position` is assigned once, so a column that is
//! re-enabled comes back in its original slot.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{
    accessor_key, fresh_id, ColumnWidth, Field, FieldAccessor, FieldId, FieldKind, IdSource,
};
use crate::error::{BoardError, BoardResult};
use crate::ordering::OrderedCollection;

/// Width given to user-added columns unless configured otherwise
pub const DEFAULT_CUSTOM_FIELD_WIDTH: ColumnWidth = ColumnWidth::Fixed(150);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RegistrySnapshot")]
pub struct FieldRegistry {
    fields: OrderedCollection<Field>,
    next_position: u32,
}

/// Serialized registry, normalized before use
#[derive(Deserialize)]
struct RegistrySnapshot {
    fields: Vec<Field>,
    #[serde(default)]
    next_position: u32,
}

impl From<RegistrySnapshot> for FieldRegistry {
    /// Storage is put back in `order_position` order and `next_position` is
    /// raised past every position already taken.
    fn from(snapshot: RegistrySnapshot) -> Self {
        let mut fields = snapshot.fields;
        fields.sort_by_key(|field| field.order_position);
        let next_position = fields
            .last()
            .map(|field| field.order_position.saturating_add(1))
            .unwrap_or(0)
            .max(snapshot.next_position);
        Self {
            fields: OrderedCollection::new(fields),
            next_position,
        }
    }
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Lazy, restartable (`Clone`) walk over the enabled fields in position order
#[derive(Debug, Clone)]
pub struct VisibleFields<'a> {
    inner: std::slice::Iter<'a, Field>,
}

impl<'a> Iterator for VisibleFields<'a> {
    type Item = &'a Field;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.by_ref().find(|field| field.enabled)
    }
}

impl FieldRegistry {
    /// Registry with the five built-in columns, all enabled
    pub fn builtin() -> Self {
        let defaults = [
            ("taskName", "Task name", ColumnWidth::Fraction(1), FieldAccessor::Title),
            ("dueDate", "Due date", ColumnWidth::Fixed(150), FieldAccessor::DueDate),
            (
                "collaborators",
                "Collaborators",
                ColumnWidth::Fixed(150),
                FieldAccessor::Collaborators,
            ),
            ("project", "Projects", ColumnWidth::Fixed(150), FieldAccessor::Project),
            (
                "visibility",
                "Task visibility",
                ColumnWidth::Fixed(100),
                FieldAccessor::Visibility,
            ),
        ];

        let fields: Vec<Field> = defaults
            .into_iter()
            .enumerate()
            .map(|(position, (id, name, width, accessor))| {
                Field::new(FieldId::new(id), name, position as u32, width, accessor)
            })
            .collect();
        Self::from_fields(fields)
    }

    /// Registry over the given fields, kept in creation order.
    ///
    /// Positions are reassigned from 0 in the given order.
    pub fn from_fields(fields: Vec<Field>) -> Self {
        let fields: Vec<Field> = fields
            .into_iter()
            .enumerate()
            .map(|(position, field)| Field {
                order_position: position as u32,
                ..field
            })
            .collect();
        let next_position = fields.len() as u32;
        Self {
            fields: OrderedCollection::new(fields),
            next_position,
        }
    }

    /// Every field, enabled or not, in creation order
    pub fn fields(&self) -> &OrderedCollection<Field> {
        &self.fields
    }

    pub fn field(&self, id: &FieldId) -> Option<&Field> {
        self.fields.get(id)
    }

    /// Enabled fields sorted by `order_position`.
    ///
    /// Every constructor keeps storage in position order, deserialization included.
    pub fn visible_fields(&self) -> VisibleFields<'_> {
        VisibleFields {
            inner: self.fields.iter(),
        }
    }

    /// Flip `enabled` on one field
    pub fn toggle_field(&self, id: &FieldId) -> BoardResult<Self> {
        let fields = self
            .fields
            .updated(id, Field::toggled)
            .ok_or_else(|| BoardError::not_found(id))?;
        debug!(field_id = %id, "field toggled");
        Ok(Self {
            fields,
            next_position: self.next_position,
        })
    }

    /// Append a text column named `name`
    pub fn add_field(&self, ids: &dyn IdSource, name: &str) -> Self {
        self.add_field_with_kind(ids, name, FieldKind::Text)
    }

    pub fn add_field_with_kind(&self, ids: &dyn IdSource, name: &str, kind: FieldKind) -> Self {
        self.add_custom_field(ids, name, kind, DEFAULT_CUSTOM_FIELD_WIDTH)
    }

    /// Append a column with an explicit kind and width.
    ///
    /// The new field is enabled, gets the highest position, and reads
    /// `Task::custom_values` under a key derived from `name`. Duplicate names
    /// are allowed.
    pub fn add_custom_field(
        &self,
        ids: &dyn IdSource,
        name: &str,
        kind: FieldKind,
        width: ColumnWidth,
    ) -> Self {
        let id = fresh_id(ids, |candidate| self.fields.contains(&FieldId::new(candidate)));
        let field = Field::new(
            FieldId::new(id),
            name,
            self.next_position,
            width,
            FieldAccessor::Custom {
                key: accessor_key(name),
                kind,
            },
        );
        debug!(field_id = %field.id, name, position = field.order_position, "field added");
        Self {
            fields: self.fields.appended(field),
            next_position: self.next_position + 1,
        }
    }
}
