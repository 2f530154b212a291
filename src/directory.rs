use crate::desktop::Desktop;
use crate::error::{DesktopError, Result};
use crate::handles::{DesktopId, WindowHandle};
use crate::native::{VirtualDesktopShell, WindowProcesses};
use log::debug;
use std::sync::Arc;

/// Live view over the shell's desktops.
///
/// Nothing is cached: every call queries the shell, so results always reflect
/// the current state, including changes made by the user between calls.
pub struct DesktopDirectory<S, P> {
    shell: Arc<S>,
    processes: Arc<P>,
}

impl<S, P> Clone for DesktopDirectory<S, P> {
    fn clone(&self) -> Self {
        Self {
            shell: Arc::clone(&self.shell),
            processes: Arc::clone(&self.processes),
        }
    }
}

impl<S, P> DesktopDirectory<S, P>
where
    S: VirtualDesktopShell,
    P: WindowProcesses,
{
    pub fn new(shell: S, processes: P) -> Self {
        Self {
            shell: Arc::new(shell),
            processes: Arc::new(processes),
        }
    }

    pub(crate) fn shell(&self) -> &S {
        &self.shell
    }

    pub(crate) fn processes(&self) -> &P {
        &self.processes
    }

    fn wrap(&self, handle: S::Desktop) -> Desktop<S, P> {
        Desktop::new(self.clone(), handle)
    }

    /// Number of desktops currently open.
    pub fn count(&self) -> Result<usize> {
        self.shell
            .desktop_count()
            .map_err(DesktopError::rejected("count desktops"))
    }

    /// Identifiers of every desktop, left to right.
    pub fn identifiers(&self) -> Result<Vec<DesktopId>> {
        let desktops = self
            .shell
            .desktops()
            .map_err(DesktopError::rejected("enumerate desktops"))?;

        // Each element is released as soon as its identifier is copied out.
        desktops
            .into_iter()
            .map(|desktop| {
                self.shell
                    .desktop_id(&desktop)
                    .map_err(DesktopError::rejected("read desktop id"))
            })
            .collect()
    }

    /// Every desktop as a handle, left to right.
    pub fn desktops(&self) -> Result<Vec<Desktop<S, P>>> {
        let desktops = self
            .shell
            .desktops()
            .map_err(DesktopError::rejected("enumerate desktops"))?;
        Ok(desktops.into_iter().map(|d| self.wrap(d)).collect())
    }

    pub fn by_index(&self, index: usize) -> Result<Desktop<S, P>> {
        let count = self.count()?;
        if index >= count {
            return Err(DesktopError::InvalidArgument(format!(
                "desktop index {} is out of range (0..{})",
                index, count
            )));
        }
        let handle = self
            .shell
            .desktop_at(index)
            .map_err(DesktopError::rejected("get desktop"))?;
        Ok(self.wrap(handle))
    }

    /// The desktop the shell is displaying.
    pub fn current(&self) -> Result<Desktop<S, P>> {
        let handle = self
            .shell
            .current_desktop()
            .map_err(DesktopError::rejected("get current desktop"))?;
        Ok(self.wrap(handle))
    }

    pub fn by_id(&self, id: DesktopId) -> Result<Desktop<S, P>> {
        let handle = self
            .shell
            .find_desktop(id)
            .map_err(DesktopError::rejected("find desktop"))?;
        Ok(self.wrap(handle))
    }

    /// Identifier of the desktop holding `window`.
    pub fn owner_of(&self, window: WindowHandle) -> Result<DesktopId> {
        if window.is_null() {
            return Err(DesktopError::InvalidArgument(
                "window handle is null".to_string(),
            ));
        }
        self.shell
            .window_desktop_id(window)
            .map_err(DesktopError::rejected("get window desktop"))
    }

    /// Resolves the desktop holding `window` to a full handle.
    ///
    /// The identifier lookup is reliable but turning it back into a desktop
    /// object has been seen to fault inside the shell on some Windows 11
    /// builds. Prefer [`owner_of`](Self::owner_of) when the identifier is
    /// enough.
    pub fn by_window_best_effort(&self, window: WindowHandle) -> Result<Desktop<S, P>> {
        let id = self.owner_of(window)?;
        debug!("Resolving desktop {} for window {}", id, window);
        self.by_id(id)
    }

    /// Creates an empty desktop after the existing ones.
    pub fn create(&self) -> Result<Desktop<S, P>> {
        let handle = self
            .shell
            .create_desktop()
            .map_err(DesktopError::rejected("create desktop"))?;
        Ok(self.wrap(handle))
    }

    /// Display position of `desktop`, or `None` once it has been removed.
    pub fn index_of(&self, desktop: &Desktop<S, P>) -> Result<Option<usize>> {
        let desktops = self
            .shell
            .desktops()
            .map_err(DesktopError::rejected("enumerate desktops"))?;
        Ok(desktops
            .iter()
            .position(|d| self.shell.same_desktop(d, desktop.handle())))
    }
}
