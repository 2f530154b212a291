//! Process-wide virtual desktop functions.
//!
//! Every function binds to the running shell on first use (see
//! [`crate::binding`]) and then queries it live.

use crate::binding::{system_directory, SystemProcesses, SystemShell};
use crate::error::Result;
use crate::handles::{DesktopId, WindowHandle};

/// A desktop of the running shell.
pub type Desktop = crate::desktop::Desktop<SystemShell, SystemProcesses>;

/// Number of desktops currently open.
pub fn desktop_count() -> Result<usize> {
    system_directory()?.count()
}

/// The desktop on screen.
pub fn current_desktop() -> Result<Desktop> {
    system_directory()?.current()
}

/// The desktop at `index`, counting from the left.
pub fn desktop_by_index(index: usize) -> Result<Desktop> {
    system_directory()?.by_index(index)
}

/// Every desktop, left to right.
pub fn all_desktops() -> Result<Vec<Desktop>> {
    system_directory()?.desktops()
}

/// Identifiers of every desktop, left to right.
pub fn all_desktop_ids() -> Result<Vec<DesktopId>> {
    system_directory()?.identifiers()
}

/// Identifier of the desktop holding `window`.
pub fn desktop_id_owning(window: WindowHandle) -> Result<DesktopId> {
    system_directory()?.owner_of(window)
}

/// The desktop holding `window`.
///
/// Looks the identifier up again through the internal manager, which fails on
/// some builds. Prefer [`desktop_id_owning`] when the identifier is enough.
pub fn desktop_owning(window: WindowHandle) -> Result<Desktop> {
    system_directory()?.by_window_best_effort(window)
}

pub fn desktop_by_id(id: DesktopId) -> Result<Desktop> {
    system_directory()?.by_id(id)
}

/// Appends a new empty desktop.
pub fn create_desktop() -> Result<Desktop> {
    system_directory()?.create()
}

/// Display position of `desktop`, or `None` once it has been removed.
pub fn desktop_index(desktop: &Desktop) -> Result<Option<usize>> {
    system_directory()?.index_of(desktop)
}
