//! The fixed internal interface every shell binding implements.
//!
//! The native desktop interfaces change shape between OS builds. Each supported
//! generation is adapted to [`VirtualDesktopShell`] once, at activation time,
//! and everything above this module only talks to the trait.

use crate::error::NativeResult;
use crate::handles::{DesktopId, WindowHandle};

/// Direction codes understood by the adjacent-desktop query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum AdjacentDirection {
    Left = 3,
    Right = 4,
}

impl AdjacentDirection {
    pub fn code(self) -> u32 {
        self as u32
    }
}

/// Native desktop services: the undocumented internal manager, the public
/// manager and the application-view collection.
pub trait VirtualDesktopShell: Send + Sync {
    /// A reference to one native desktop object. Cloning adds a reference,
    /// dropping releases it.
    type Desktop: Clone;
    /// A resolved application view.
    type View;

    fn desktop_count(&self) -> NativeResult<usize>;

    /// Every desktop in display order.
    fn desktops(&self) -> NativeResult<Vec<Self::Desktop>>;

    fn desktop_at(&self, index: usize) -> NativeResult<Self::Desktop>;

    fn current_desktop(&self) -> NativeResult<Self::Desktop>;

    fn adjacent_desktop(
        &self,
        from: &Self::Desktop,
        direction: AdjacentDirection,
    ) -> NativeResult<Self::Desktop>;

    fn find_desktop(&self, id: DesktopId) -> NativeResult<Self::Desktop>;

    fn switch_desktop(&self, desktop: &Self::Desktop) -> NativeResult<()>;

    fn create_desktop(&self) -> NativeResult<Self::Desktop>;

    fn remove_desktop(&self, desktop: &Self::Desktop, fallback: &Self::Desktop)
        -> NativeResult<()>;

    fn desktop_id(&self, desktop: &Self::Desktop) -> NativeResult<DesktopId>;

    /// Object identity, not identifier equality.
    fn same_desktop(&self, a: &Self::Desktop, b: &Self::Desktop) -> bool;

    /// Public manager lookup of the desktop holding `window`.
    fn window_desktop_id(&self, window: WindowHandle) -> NativeResult<DesktopId>;

    /// Public manager move. Only accepted for windows of the calling process.
    fn move_window_direct(&self, window: WindowHandle, target: DesktopId) -> NativeResult<()>;

    fn view_for_window(&self, window: WindowHandle) -> NativeResult<Self::View>;

    fn move_view(&self, view: &Self::View, desktop: &Self::Desktop) -> NativeResult<()>;
}

/// Process and window introspection.
pub trait WindowProcesses: Send + Sync {
    fn current_process_id(&self) -> u32;

    fn window_process_id(&self, window: WindowHandle) -> NativeResult<u32>;

    /// The window the OS considers the main window of `process_id`.
    fn main_window(&self, process_id: u32) -> NativeResult<WindowHandle>;
}

/// Stands in for the shell on platforms without virtual desktop services.
/// It has no values, so binding always fails before it could be used.
#[cfg(not(windows))]
#[derive(Debug, Clone, Copy)]
pub enum Unsupported {}

#[cfg(not(windows))]
impl VirtualDesktopShell for Unsupported {
    type Desktop = Unsupported;
    type View = Unsupported;

    fn desktop_count(&self) -> NativeResult<usize> {
        match *self {}
    }

    fn desktops(&self) -> NativeResult<Vec<Self::Desktop>> {
        match *self {}
    }

    fn desktop_at(&self, _index: usize) -> NativeResult<Self::Desktop> {
        match *self {}
    }

    fn current_desktop(&self) -> NativeResult<Self::Desktop> {
        match *self {}
    }

    fn adjacent_desktop(
        &self,
        _from: &Self::Desktop,
        _direction: AdjacentDirection,
    ) -> NativeResult<Self::Desktop> {
        match *self {}
    }

    fn find_desktop(&self, _id: DesktopId) -> NativeResult<Self::Desktop> {
        match *self {}
    }

    fn switch_desktop(&self, _desktop: &Self::Desktop) -> NativeResult<()> {
        match *self {}
    }

    fn create_desktop(&self) -> NativeResult<Self::Desktop> {
        match *self {}
    }

    fn remove_desktop(
        &self,
        _desktop: &Self::Desktop,
        _fallback: &Self::Desktop,
    ) -> NativeResult<()> {
        match *self {}
    }

    fn desktop_id(&self, _desktop: &Self::Desktop) -> NativeResult<DesktopId> {
        match *self {}
    }

    fn same_desktop(&self, _a: &Self::Desktop, _b: &Self::Desktop) -> bool {
        match *self {}
    }

    fn window_desktop_id(&self, _window: WindowHandle) -> NativeResult<DesktopId> {
        match *self {}
    }

    fn move_window_direct(&self, _window: WindowHandle, _target: DesktopId) -> NativeResult<()> {
        match *self {}
    }

    fn view_for_window(&self, _window: WindowHandle) -> NativeResult<Self::View> {
        match *self {}
    }

    fn move_view(&self, _view: &Self::View, _desktop: &Self::Desktop) -> NativeResult<()> {
        match *self {}
    }
}

#[cfg(not(windows))]
impl WindowProcesses for Unsupported {
    fn current_process_id(&self) -> u32 {
        match *self {}
    }

    fn window_process_id(&self, _window: WindowHandle) -> NativeResult<u32> {
        match *self {}
    }

    fn main_window(&self, _process_id: u32) -> NativeResult<WindowHandle> {
        match *self {}
    }
}
