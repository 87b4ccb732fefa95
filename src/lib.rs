//! Task Board
//!
//! Editor core for a single-page task board: sections holding ordered tasks,
//! a configurable set of columns, and pointer-driven drag reordering at both
//! levels. Rendering, theming and persistence belong to the host.

pub mod config;
pub mod context;
pub mod domain;
pub mod drag;
pub mod error;
pub mod fields;
pub mod layout;
pub mod logging;
pub mod ordering;
pub mod projects;
pub mod sections;
pub mod store;
pub mod tree;


pub use config::BoardConfig;
pub use context::{provide_board_context, use_board_context, BoardContext};
pub use drag::{BoardDragCoordinator, BoardItem, BoardLayout, BoardScope, DragCommand, DragOutcome};
pub use error::{BoardError, BoardResult};
pub use fields::FieldRegistry;
pub use layout::{project, ColumnTemplate, SELECTION_COLUMN_WIDTH};
pub use ordering::OrderedCollection;
pub use projects::{ColorAssigner, PaletteColors, ProjectCatalog, SeededColors};
pub use sections::SectionStore;
pub use store::{use_board_store, BoardState, BoardStore};
