//! Layout Projection
//!
//! Turns the visible fields into a grid column template and lines up the
//! header and row cells with it. The first track is always the selection
//! (drag handle / checkbox) column.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{
    Collaborator, CollaboratorId, ColumnWidth, Field, FieldAccessor, FieldId, ProjectId, Task,
};
use crate::projects::ProjectCatalog;

/// Width of the leading selection column
pub const SELECTION_COLUMN_WIDTH: ColumnWidth = ColumnWidth::Fixed(24);

/// One grid track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "track", rename_all = "snake_case")]
pub enum TemplateColumn {
    Selection { width: ColumnWidth },
    Field { id: FieldId, width: ColumnWidth },
}

impl TemplateColumn {
    pub fn width(&self) -> ColumnWidth {
        match self {
            TemplateColumn::Selection { width } | TemplateColumn::Field { width, .. } => *width,
        }
    }
}

/// Ordered grid tracks; `Display` gives the `grid-template-columns` value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnTemplate {
    pub columns: Vec<TemplateColumn>,
}

impl ColumnTemplate {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Track count excluding the selection column
    pub fn field_count(&self) -> usize {
        self.columns
            .iter()
            .filter(|c| matches!(c, TemplateColumn::Field { .. }))
            .count()
    }
}

impl fmt::Display for ColumnTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", column.width())?;
        }
        Ok(())
    }
}

/// Build the column template: selection column, then one track per visible
/// field in the order given.
pub fn project<'a>(
    selection: ColumnWidth,
    visible: impl IntoIterator<Item = &'a Field>,
) -> ColumnTemplate {
    let columns = std::iter::once(TemplateColumn::Selection { width: selection })
        .chain(visible.into_iter().map(|field| TemplateColumn::Field {
            id: field.id.clone(),
            width: field.width,
        }))
        .collect();
    ColumnTemplate { columns }
}

/// Header labels, one per visible field
pub fn header_cells<'a>(visible: impl IntoIterator<Item = &'a Field>) -> Vec<String> {
    visible.into_iter().map(|field| field.name.clone()).collect()
}

/// A task value read through a field accessor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cell", rename_all = "snake_case")]
pub enum Cell {
    Title { title: String },
    DueDate { date: Option<NaiveDate> },
    Collaborators { ids: Vec<CollaboratorId> },
    Project { id: Option<ProjectId> },
    Visibility { is_private: bool },
    Custom { key: String, value: Option<String> },
}

impl Cell {
    pub fn read(task: &Task, accessor: &FieldAccessor) -> Self {
        match accessor {
            FieldAccessor::Title => Cell::Title {
                title: task.title.clone(),
            },
            FieldAccessor::DueDate => Cell::DueDate {
                date: task.due_date,
            },
            FieldAccessor::Collaborators => Cell::Collaborators {
                ids: task.collaborators.iter().cloned().collect(),
            },
            FieldAccessor::Project => Cell::Project {
                id: task.project.clone(),
            },
            FieldAccessor::Visibility => Cell::Visibility {
                is_private: task.is_private,
            },
            FieldAccessor::Custom { key, .. } => Cell::Custom {
                key: key.clone(),
                value: task.custom_value(key).map(str::to_string),
            },
        }
    }

    /// Rendering with references resolved to names.
    ///
    /// A project missing from the catalog shows as "No project", and
    /// collaborators missing from the directory are left out.
    pub fn display_label(&self, projects: &ProjectCatalog, collaborators: &[Collaborator]) -> String {
        match self {
            Cell::Project { id } => id
                .as_ref()
                .and_then(|id| projects.name_of(id))
                .unwrap_or("No project")
                .to_string(),
            Cell::Collaborators { ids } => {
                let names: Vec<&str> = ids
                    .iter()
                    .filter_map(|id| collaborators.iter().find(|c| &c.id == id))
                    .map(|c| c.name.as_str())
                    .collect();
                if names.is_empty() {
                    "Unassigned".to_string()
                } else {
                    names.join(", ")
                }
            }
            _ => self.label(),
        }
    }

    /// Plain-text rendering with the empty-state placeholders; references
    /// show as raw ids
    pub fn label(&self) -> String {
        match self {
            Cell::Title { title } => title.clone(),
            Cell::DueDate { date: Some(date) } => date.format("%b %-d, %Y").to_string(),
            Cell::DueDate { date: None } => "No date".to_string(),
            Cell::Collaborators { ids } if ids.is_empty() => "Unassigned".to_string(),
            Cell::Collaborators { ids } => ids
                .iter()
                .map(CollaboratorId::as_str)
                .collect::<Vec<_>>()
                .join(", "),
            Cell::Project { id: Some(id) } => id.to_string(),
            Cell::Project { id: None } => "No project".to_string(),
            Cell::Visibility { is_private: true } => "Only me".to_string(),
            Cell::Visibility { is_private: false } => "Public".to_string(),
            Cell::Custom { value: Some(value), .. } => value.clone(),
            Cell::Custom { value: None, .. } => "-".to_string(),
        }
    }
}

/// One cell per visible field, aligned with `header_cells`
pub fn row_cells<'a>(task: &Task, visible: impl IntoIterator<Item = &'a Field>) -> Vec<Cell> {
    visible
        .into_iter()
        .map(|field| Cell::read(task, &field.accessor))
        .collect()
}

/// Display text per visible field, with project and collaborator names
pub fn row_labels<'a>(
    task: &Task,
    visible: impl IntoIterator<Item = &'a Field>,
    projects: &ProjectCatalog,
    collaborators: &[Collaborator],
) -> Vec<String> {
    visible
        .into_iter()
        .map(|field| Cell::read(task, &field.accessor).display_label(projects, collaborators))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SequentialIds, TaskId};
    use crate::config::BoardConfig;
    use crate::fields::FieldRegistry;
    use crate::projects::PaletteColors;

    #[test]
    fn test_default_template() {
        let registry = FieldRegistry::builtin();
        let template = project(SELECTION_COLUMN_WIDTH, registry.visible_fields());
        assert_eq!(template.to_string(), "24px 1fr 150px 150px 150px 100px");
        assert_eq!(template.field_count(), 5);
    }

    #[test]
    fn test_hidden_field_drops_its_track() {
        let registry = FieldRegistry::builtin()
            .toggle_field(&"dueDate".into())
            .unwrap();
        let template = project(SELECTION_COLUMN_WIDTH, registry.visible_fields());
        assert_eq!(template.to_string(), "24px 1fr 150px 150px 100px");
    }

    #[test]
    fn test_no_visible_fields() {
        let template = project(SELECTION_COLUMN_WIDTH, std::iter::empty());
        assert_eq!(template.to_string(), "24px");
        assert_eq!(template.len(), 1);
    }

    #[test]
    fn test_header_and_rows_align_with_template() {
        let ids = SequentialIds::new("f");
        let registry = FieldRegistry::builtin()
            .add_field(&ids, "Story Points")
            .toggle_field(&"project".into())
            .unwrap();
        let task = Task::new(TaskId::new("t1"), "Write docs")
            .with_custom_value("story_points", Some("3".into()));

        let template = project(SELECTION_COLUMN_WIDTH, registry.visible_fields());
        let header = header_cells(registry.visible_fields());
        let row = row_cells(&task, registry.visible_fields());

        assert_eq!(header.len(), template.field_count());
        assert_eq!(row.len(), template.field_count());
        assert_eq!(header.last().map(String::as_str), Some("Story Points"));
        assert_eq!(row.last().map(Cell::label), Some("3".to_string()));
    }

    #[test]
    fn test_empty_state_labels() {
        let registry = FieldRegistry::builtin();
        let task = Task::new(TaskId::new("t1"), "Plan");
        let labels: Vec<String> = row_cells(&task, registry.visible_fields())
            .iter()
            .map(Cell::label)
            .collect();
        assert_eq!(labels, ["Plan", "No date", "Unassigned", "No project", "Public"]);
    }

    #[test]
    fn test_filled_labels() {
        let task = Task::new(TaskId::new("t1"), "Ship")
            .with_due_date(NaiveDate::from_ymd_opt(2024, 3, 5))
            .toggled_visibility();
        assert_eq!(Cell::read(&task, &FieldAccessor::DueDate).label(), "Mar 5, 2024");
        assert_eq!(Cell::read(&task, &FieldAccessor::Visibility).label(), "Only me");
        let missing = FieldAccessor::Custom {
            key: "estimate".into(),
            kind: Default::default(),
        };
        assert_eq!(Cell::read(&task, &missing).label(), "-");
    }

    #[test]
    fn test_labels_resolve_names() {
        let ids = SequentialIds::new("p");
        let projects = ProjectCatalog::from_names(&ids, &PaletteColors, ["Marketing"]);
        let marketing = projects.iter().next().unwrap().id.clone();
        let directory = BoardConfig::default().collaborators;

        let task = Task::new(TaskId::new("t1"), "Launch")
            .with_project(Some(marketing))
            .toggled_collaborator(&"1".into())
            .toggled_collaborator(&"2".into());
        let labels = row_labels(&task, FieldRegistry::builtin().visible_fields(), &projects, &directory);
        assert_eq!(labels, ["Launch", "No date", "Krishna, Bob Wilson", "Marketing", "Public"]);
    }

    #[test]
    fn test_labels_for_missing_references() {
        let directory = BoardConfig::default().collaborators;
        let task = Task::new(TaskId::new("t1"), "Launch")
            .with_project(Some("p1".into()))
            .toggled_collaborator(&"ghost".into());

        let empty = ProjectCatalog::default();
        let project = Cell::read(&task, &FieldAccessor::Project);
        assert_eq!(project.display_label(&empty, &directory), "No project");
        let people = Cell::read(&task, &FieldAccessor::Collaborators);
        assert_eq!(people.display_label(&empty, &directory), "Unassigned");
    }
}
