//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! Records are plain values; every change produces a new record.

mod entity;
mod field;
mod ids;
mod reference;
mod section;
mod task;

pub use entity::Entity;
pub use field::{accessor_key, ColumnWidth, Field, FieldAccessor, FieldKind};
pub use ids::{
    fresh_id, CollaboratorId, FieldId, IdSource, ProjectId, SectionId, SequentialIds, TaskId,
    UuidIds,
};
pub use reference::{Collaborator, Project, ProjectColor};
pub use section::Section;
pub use task::Task;
