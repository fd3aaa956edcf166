//! # Session State
//!
//! The one in-memory project of a running process. There is no save format;
//! the project starts from defaults and lives until the process exits.
//!
//! Reads hand out an immutable snapshot (`Arc<ProjectData>`). Writes clone
//! the current project, apply the edit and swap the new project in only if
//! the edit succeeded, so a reader never sees a half-applied edit and a
//! rejected edit changes nothing.
//!
//! ```rust
//! use estimate_core::session;
//! use estimate_core::rooms::RoomType;
//!
//! session::reset();
//! let id = session::update(|project| {
//!     let room = project.new_room(RoomType::Kitchen, "floor-1");
//!     project.add_room(room)
//! }).unwrap();
//!
//! let snapshot = session::snapshot();
//! assert!(snapshot.room(&id).is_some());
//! assert_eq!(snapshot.total_area().value(), 12.0);
//! ```

use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;
use tracing::debug;

use crate::errors::EstimateResult;
use crate::project::ProjectData;

static SESSION: Lazy<RwLock<Arc<ProjectData>>> = Lazy::new(|| RwLock::new(Arc::new(ProjectData::default())));

/// Current project snapshot
pub fn snapshot() -> Arc<ProjectData> {
    let guard = SESSION.read().unwrap_or_else(|poisoned| poisoned.into_inner());
    Arc::clone(&guard)
}

/// Apply an edit to the session project.
///
/// The edit runs on a private copy; the copy replaces the session project
/// only when the edit returns `Ok`.
pub fn update<T, F>(edit: F) -> EstimateResult<T>
where
    F: FnOnce(&mut ProjectData) -> EstimateResult<T>,
{
    let mut guard = SESSION.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    let mut draft = ProjectData::clone(&guard);
    let out = edit(&mut draft)?;
    *guard = Arc::new(draft);
    Ok(out)
}

/// Replace the session project wholesale
pub fn replace(project: ProjectData) {
    let mut guard = SESSION.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = Arc::new(project);
    debug!("session project replaced");
}

/// Reset the session project to defaults
pub fn reset() {
    replace(ProjectData::default());
}
