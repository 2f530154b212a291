use crate::directory::DesktopDirectory;
use crate::error::Result;
use crate::handles::{DesktopId, WindowHandle};
use crate::native::{VirtualDesktopShell, WindowProcesses};
use crate::reassign::MovePath;
use serde::Serialize;

/// Serializable summary of one desktop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesktopInfo {
    pub index: usize,
    pub id: DesktopId,
    pub current: bool,
}

/// Serializable desktop assignment of a window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowDesktopInfo {
    pub hwnd: WindowHandle,
    pub desktop_id: DesktopId,
}

/// Outcome of a window move.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowMoveInfo {
    pub hwnd: WindowHandle,
    pub desktop_id: DesktopId,
    pub path: MovePath,
}

/// Summarizes every desktop of `directory`, left to right.
pub fn describe_desktops<S, P>(directory: &DesktopDirectory<S, P>) -> Result<Vec<DesktopInfo>>
where
    S: VirtualDesktopShell,
    P: WindowProcesses,
{
    let current = directory.current()?;
    directory
        .desktops()?
        .into_iter()
        .enumerate()
        .map(|(index, desktop)| {
            Ok(DesktopInfo {
                index,
                id: desktop.id()?,
                current: desktop == current,
            })
        })
        .collect()
}
