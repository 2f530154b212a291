//! Version-independent access to the Windows virtual desktop shell.
//!
//! [`virtual_desktop`] offers process-wide functions over the running shell.
//! [`DesktopDirectory`] and [`Desktop`] work over any [`VirtualDesktopShell`],
//! which is how the fallback logic is tested without a shell.

pub mod binding;
pub mod cli;
#[cfg(windows)]
mod com;
pub mod desktop;
pub mod desktop_info;
pub mod directory;
pub mod error;
pub mod generation;
pub mod handles;
pub mod native;
pub mod reassign;
pub mod settings;
pub mod virtual_desktop;

#[cfg(test)]
mod mock;

pub use desktop::Desktop;
pub use directory::DesktopDirectory;
pub use error::{DesktopError, NativeError, Result};
pub use handles::{DesktopId, WindowHandle};
pub use native::{VirtualDesktopShell, WindowProcesses};
pub use reassign::MovePath;
