//! Projects
//!
//! The project catalog tasks are filed under, and the color assignment for
//! newly created projects.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{fresh_id, IdSource, Project, ProjectColor, ProjectId};
use crate::ordering::OrderedCollection;

/// Picks a display color for a new project
pub trait ColorAssigner: Send + Sync {
    fn color_for(&self, name: &str) -> ProjectColor;
}

/// Curated palette, readable as pill backgrounds in both themes
const PALETTE: &[&str] = &[
    "#d73a4a", "#e36209", "#f9c513", "#0e8a16", "#006b75", "#1d76db", "#5319e7", "#b60205",
    "#d876e3", "#0075ca", "#7057ff", "#008672", "#e4e669", "#bfd4f2", "#c5def5", "#fbca04",
];

/// Same name, same color: FNV-1a of the name indexes the palette
#[derive(Debug, Default, Clone, Copy)]
pub struct PaletteColors;

impl PaletteColors {
    fn fnv1a(s: &str) -> u32 {
        s.bytes().fold(0x811c_9dc5, |hash: u32, byte| {
            (hash ^ byte as u32).wrapping_mul(0x0100_0193)
        })
    }
}

impl ColorAssigner for PaletteColors {
    fn color_for(&self, name: &str) -> ProjectColor {
        let idx = Self::fnv1a(name) as usize % PALETTE.len();
        ProjectColor::new(PALETTE[idx])
    }
}

/// Random 24-bit colors from a seeded generator, reproducible per seed
#[derive(Debug)]
pub struct SeededColors {
    rng: Mutex<StdRng>,
}

impl SeededColors {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl ColorAssigner for SeededColors {
    fn color_for(&self, _name: &str) -> ProjectColor {
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let rgb: u32 = rng.gen_range(0..=0x00ff_ffff);
        ProjectColor::new(format!("#{:06x}", rgb))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectCatalog {
    projects: OrderedCollection<Project>,
}

impl ProjectCatalog {
    pub fn new(projects: Vec<Project>) -> Self {
        Self {
            projects: OrderedCollection::new(projects),
        }
    }

    /// Catalog seeded from names, in order
    pub fn from_names<'a>(
        ids: &dyn IdSource,
        colors: &dyn ColorAssigner,
        names: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        names
            .into_iter()
            .fold(Self::default(), |catalog, name| catalog.add_project(ids, colors, name))
    }

    pub fn get(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.get(id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Project> {
        self.projects.iter()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn add_project(&self, ids: &dyn IdSource, colors: &dyn ColorAssigner, name: &str) -> Self {
        let id = fresh_id(ids, |candidate| self.projects.contains(&ProjectId::new(candidate)));
        let project = Project::new(ProjectId::new(id), name, colors.color_for(name));
        debug!(project_id = %project.id, name, color = project.color.as_str(), "project added");
        Self {
            projects: self.projects.appended(project),
        }
    }

    /// Rename in place; unknown ids are a no-op
    pub fn rename_project(&self, id: &ProjectId, name: &str) -> Self {
        match self.projects.updated(id, |project| project.renamed(name)) {
            Some(projects) => {
                debug!(project_id = %id, name, "project renamed");
                Self { projects }
            }
            None => {
                debug!(project_id = %id, "rename of unknown project ignored");
                self.clone()
            }
        }
    }

    /// Display name for a task's project, if it still exists
    pub fn name_of(&self, id: &ProjectId) -> Option<&str> {
        self.get(id).map(|project| project.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SequentialIds;

    #[test]
    fn test_palette_colors_deterministic() {
        let colors = PaletteColors;
        assert_eq!(colors.color_for("Design"), colors.color_for("Design"));
        for name in ["Marketing", "Development", "Design", ""] {
            let color = colors.color_for(name);
            assert!(PALETTE.contains(&color.as_str()));
        }
    }

    #[test]
    fn test_seeded_colors_reproducible() {
        let a = SeededColors::new(7);
        let b = SeededColors::new(7);
        let first: Vec<_> = (0..4).map(|_| a.color_for("x")).collect();
        let second: Vec<_> = (0..4).map(|_| b.color_for("x")).collect();
        assert_eq!(first, second);
        for color in first {
            let hex = color.as_str();
            assert_eq!(hex.len(), 7);
            assert!(hex.starts_with('#'));
            assert!(hex[1..].chars().all(|c| c.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn test_add_and_rename_project() {
        let ids = SequentialIds::new("p");
        let catalog = ProjectCatalog::from_names(&ids, &PaletteColors, ["Marketing", "Design"]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.name_of(&"p2".into()), Some("Design"));

        let renamed = catalog.rename_project(&"p2".into(), "Brand");
        assert_eq!(renamed.name_of(&"p2".into()), Some("Brand"));
        assert_eq!(
            renamed.get(&"p2".into()).map(|p| &p.color),
            catalog.get(&"p2".into()).map(|p| &p.color)
        );
        assert_eq!(catalog.name_of(&"p2".into()), Some("Design"));
    }

    #[test]
    fn test_rename_unknown_project_is_noop() {
        let ids = SequentialIds::new("p");
        let catalog = ProjectCatalog::default().add_project(&ids, &PaletteColors, "Ops");
        assert_eq!(catalog.rename_project(&"nope".into(), "X"), catalog);
    }
}
