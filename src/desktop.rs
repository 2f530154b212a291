use crate::directory::DesktopDirectory;
use crate::error::{DesktopError, Result};
use crate::handles::{DesktopId, WindowHandle};
use crate::native::{AdjacentDirection, VirtualDesktopShell, WindowProcesses};
use crate::reassign::{self, MovePath};
use log::{debug, info};
use std::fmt;

/// One virtual desktop.
///
/// Only the [`DesktopDirectory`] hands these out. Two values are equal when
/// they refer to the same shell object.
pub struct Desktop<S: VirtualDesktopShell, P> {
    directory: DesktopDirectory<S, P>,
    handle: S::Desktop,
}

impl<S, P> Desktop<S, P>
where
    S: VirtualDesktopShell,
    P: WindowProcesses,
{
    pub(crate) fn new(directory: DesktopDirectory<S, P>, handle: S::Desktop) -> Self {
        Self { directory, handle }
    }

    pub(crate) fn handle(&self) -> &S::Desktop {
        &self.handle
    }

    pub fn id(&self) -> Result<DesktopId> {
        self.directory
            .shell()
            .desktop_id(&self.handle)
            .map_err(DesktopError::rejected("read desktop id"))
    }

    /// Removes this desktop and shows `fallback`, or the first desktop when
    /// no fallback is given. The shell refuses to remove the last desktop.
    pub fn remove(&self, fallback: Option<&Desktop<S, P>>) -> Result<()> {
        let first;
        let fallback = match fallback {
            Some(desktop) => desktop,
            None => {
                first = self.directory.by_index(0)?;
                &first
            }
        };
        self.directory
            .shell()
            .remove_desktop(&self.handle, &fallback.handle)
            .map_err(DesktopError::rejected("remove desktop"))?;
        info!("Removed desktop");
        Ok(())
    }

    /// True when the shell is displaying this desktop.
    pub fn is_current(&self) -> Result<bool> {
        let current = self.directory.current()?;
        Ok(*self == current)
    }

    pub fn switch_to(&self) -> Result<()> {
        self.directory
            .shell()
            .switch_desktop(&self.handle)
            .map_err(DesktopError::rejected("switch desktop"))
    }

    pub fn left_neighbor(&self) -> Option<Desktop<S, P>> {
        self.neighbor(AdjacentDirection::Left)
    }

    pub fn right_neighbor(&self) -> Option<Desktop<S, P>> {
        self.neighbor(AdjacentDirection::Right)
    }

    // Any failure from the shell means there is nothing on that side.
    fn neighbor(&self, direction: AdjacentDirection) -> Option<Desktop<S, P>> {
        match self
            .directory
            .shell()
            .adjacent_desktop(&self.handle, direction)
        {
            Ok(handle) => Some(Desktop::new(self.directory.clone(), handle)),
            Err(err) => {
                debug!("No {:?} neighbor: {}", direction, err);
                None
            }
        }
    }

    /// True when `window` sits on this desktop.
    pub fn contains_window(&self, window: WindowHandle) -> Result<bool> {
        Ok(self.directory.owner_of(window)? == self.id()?)
    }

    /// Moves `window` onto this desktop, falling back to view-based moves when
    /// the shell refuses the direct one. Returns the path that worked.
    pub fn move_window_here(&self, window: WindowHandle) -> Result<MovePath> {
        reassign::move_window(
            self.directory.shell(),
            self.directory.processes(),
            window,
            &self.handle,
        )
    }
}

impl<S: VirtualDesktopShell, P> Clone for Desktop<S, P> {
    fn clone(&self) -> Self {
        Self {
            directory: self.directory.clone(),
            handle: self.handle.clone(),
        }
    }
}

impl<S, P> PartialEq for Desktop<S, P>
where
    S: VirtualDesktopShell,
    P: WindowProcesses,
{
    fn eq(&self, other: &Self) -> bool {
        self.directory.shell().same_desktop(&self.handle, &other.handle)
    }
}

impl<S: VirtualDesktopShell, P> fmt::Debug for Desktop<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Desktop").finish_non_exhaustive()
    }
}
