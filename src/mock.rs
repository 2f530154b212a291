//! In-memory shell for unit tests.

use crate::directory::DesktopDirectory;
use crate::error::{NativeError, NativeResult};
use crate::handles::{DesktopId, WindowHandle};
use crate::native::{AdjacentDirection, VirtualDesktopShell, WindowProcesses};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

pub(crate) const OWN_PROCESS: u32 = 100;

const E_FAIL: u32 = 0x8000_4005;
const E_ACCESSDENIED: u32 = 0x8007_0005;
const E_INVALIDARG: u32 = 0x8007_0057;
const TYPE_E_ELEMENTNOTFOUND: u32 = 0x8002_802B;

fn fail(code: u32, message: &str) -> NativeError {
    NativeError::new(code as i32, message)
}

pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Debug)]
pub(crate) struct MockDesktop {
    id: DesktopId,
}

#[derive(Debug, Clone)]
pub(crate) struct MockWindow {
    pub process_id: u32,
    pub desktop: DesktopId,
    /// Whether the public manager treats the caller as the window's owner.
    pub thread_owned: bool,
    pub has_view: bool,
}

impl MockWindow {
    pub(crate) fn owned(process_id: u32, desktop: DesktopId) -> Self {
        Self {
            process_id,
            desktop,
            thread_owned: true,
            has_view: true,
        }
    }
}

#[derive(Default)]
pub(crate) struct MockState {
    pub desktops: Vec<Arc<MockDesktop>>,
    pub current: Option<Arc<MockDesktop>>,
    pub windows: HashMap<WindowHandle, MockWindow>,
    pub main_windows: HashMap<u32, WindowHandle>,
    /// Number of upcoming view moves to refuse.
    pub reject_view_moves: usize,
    /// Display position of a desktop whose identifier cannot be read.
    pub reject_desktop_id_at: Option<usize>,
    pub calls: Vec<&'static str>,
    next_id: u128,
}

impl MockState {
    fn new_desktop(&mut self) -> Arc<MockDesktop> {
        self.next_id += 1;
        Arc::new(MockDesktop {
            id: DesktopId(0xD000_0000_0000_0000_0000_0000_0000_0000 | self.next_id),
        })
    }

    fn position(&self, desktop: &Arc<MockDesktop>) -> Option<usize> {
        self.desktops.iter().position(|d| Arc::ptr_eq(d, desktop))
    }
}

#[derive(Clone)]
pub(crate) struct Mock(Arc<Mutex<MockState>>);

impl Mock {
    pub(crate) fn with_desktops(count: usize) -> Self {
        let mut state = MockState::default();
        for _ in 0..count {
            let desktop = state.new_desktop();
            state.desktops.push(desktop);
        }
        state.current = state.desktops.first().cloned();
        Mock(Arc::new(Mutex::new(state)))
    }

    pub(crate) fn directory(&self) -> DesktopDirectory<MockShell, MockProcesses> {
        DesktopDirectory::new(MockShell(self.0.clone()), MockProcesses(self.0.clone()))
    }

    pub(crate) fn state(&self) -> MutexGuard<'_, MockState> {
        self.0.lock().unwrap()
    }

    pub(crate) fn set_current(&self, index: usize) {
        let mut state = self.state();
        state.current = Some(state.desktops[index].clone());
    }

    pub(crate) fn add_window(&self, handle: isize, window: MockWindow) {
        self.state().windows.insert(WindowHandle(handle), window);
    }

    /// Outstanding references to each desktop, in display order.
    pub(crate) fn reference_counts(&self) -> Vec<usize> {
        self.state().desktops.iter().map(Arc::strong_count).collect()
    }

    pub(crate) fn set_main_window(&self, process_id: u32, handle: isize) {
        self.state()
            .main_windows
            .insert(process_id, WindowHandle(handle));
    }
}

pub(crate) struct MockShell(Arc<Mutex<MockState>>);

impl MockShell {
    fn state(&self, call: &'static str) -> MutexGuard<'_, MockState> {
        let mut state = self.0.lock().unwrap();
        state.calls.push(call);
        state
    }
}

impl VirtualDesktopShell for MockShell {
    type Desktop = Arc<MockDesktop>;
    type View = WindowHandle;

    fn desktop_count(&self) -> NativeResult<usize> {
        Ok(self.state("desktop_count").desktops.len())
    }

    fn desktops(&self) -> NativeResult<Vec<Self::Desktop>> {
        Ok(self.state("desktops").desktops.clone())
    }

    fn desktop_at(&self, index: usize) -> NativeResult<Self::Desktop> {
        self.state("desktop_at")
            .desktops
            .get(index)
            .cloned()
            .ok_or_else(|| fail(E_INVALIDARG, "index out of range"))
    }

    fn current_desktop(&self) -> NativeResult<Self::Desktop> {
        self.state("current_desktop")
            .current
            .clone()
            .ok_or_else(|| fail(E_FAIL, "no current desktop"))
    }

    fn adjacent_desktop(
        &self,
        from: &Self::Desktop,
        direction: AdjacentDirection,
    ) -> NativeResult<Self::Desktop> {
        let state = self.state("adjacent_desktop");
        let position = state
            .position(from)
            .ok_or_else(|| fail(E_INVALIDARG, "unknown desktop"))?;
        let neighbor = match direction {
            AdjacentDirection::Left => position.checked_sub(1),
            AdjacentDirection::Right => Some(position + 1),
        };
        neighbor
            .and_then(|i| state.desktops.get(i).cloned())
            .ok_or_else(|| fail(TYPE_E_ELEMENTNOTFOUND, "no adjacent desktop"))
    }

    fn find_desktop(&self, id: DesktopId) -> NativeResult<Self::Desktop> {
        self.state("find_desktop")
            .desktops
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| fail(TYPE_E_ELEMENTNOTFOUND, "desktop not found"))
    }

    fn switch_desktop(&self, desktop: &Self::Desktop) -> NativeResult<()> {
        let mut state = self.state("switch_desktop");
        if state.position(desktop).is_none() {
            return Err(fail(E_INVALIDARG, "unknown desktop"));
        }
        state.current = Some(desktop.clone());
        Ok(())
    }

    fn create_desktop(&self) -> NativeResult<Self::Desktop> {
        let mut state = self.state("create_desktop");
        let desktop = state.new_desktop();
        state.desktops.push(desktop.clone());
        Ok(desktop)
    }

    fn remove_desktop(
        &self,
        desktop: &Self::Desktop,
        fallback: &Self::Desktop,
    ) -> NativeResult<()> {
        let mut state = self.state("remove_desktop");
        if state.desktops.len() <= 1 || Arc::ptr_eq(desktop, fallback) {
            return Err(fail(E_FAIL, "cannot remove the last desktop"));
        }
        let index = state
            .position(desktop)
            .ok_or_else(|| fail(E_INVALIDARG, "unknown desktop"))?;
        if state.position(fallback).is_none() {
            return Err(fail(E_INVALIDARG, "unknown fallback desktop"));
        }

        state.desktops.remove(index);
        for window in state.windows.values_mut() {
            if window.desktop == desktop.id {
                window.desktop = fallback.id;
            }
        }
        if state
            .current
            .as_ref()
            .map_or(false, |current| Arc::ptr_eq(current, desktop))
        {
            state.current = Some(fallback.clone());
        }
        Ok(())
    }

    fn desktop_id(&self, desktop: &Self::Desktop) -> NativeResult<DesktopId> {
        let state = self.state("desktop_id");
        let rejected = state.reject_desktop_id_at;
        if rejected.is_some() && state.position(desktop) == rejected {
            return Err(fail(E_FAIL, "desktop id unavailable"));
        }
        Ok(desktop.id)
    }

    fn same_desktop(&self, a: &Self::Desktop, b: &Self::Desktop) -> bool {
        Arc::ptr_eq(a, b)
    }

    fn window_desktop_id(&self, window: WindowHandle) -> NativeResult<DesktopId> {
        self.state("window_desktop_id")
            .windows
            .get(&window)
            .map(|w| w.desktop)
            .ok_or_else(|| fail(E_INVALIDARG, "not a window"))
    }

    fn move_window_direct(&self, window: WindowHandle, target: DesktopId) -> NativeResult<()> {
        let mut state = self.state("move_window_direct");
        if !state.desktops.iter().any(|d| d.id == target) {
            return Err(fail(E_INVALIDARG, "unknown desktop"));
        }
        let entry = state
            .windows
            .get_mut(&window)
            .ok_or_else(|| fail(E_INVALIDARG, "not a window"))?;
        if entry.process_id != OWN_PROCESS || !entry.thread_owned {
            return Err(fail(E_ACCESSDENIED, "window is not owned by the caller"));
        }
        entry.desktop = target;
        Ok(())
    }

    fn view_for_window(&self, window: WindowHandle) -> NativeResult<Self::View> {
        match self.state("view_for_window").windows.get(&window) {
            Some(w) if w.has_view => Ok(window),
            _ => Err(fail(TYPE_E_ELEMENTNOTFOUND, "no view for window")),
        }
    }

    fn move_view(&self, view: &Self::View, desktop: &Self::Desktop) -> NativeResult<()> {
        let mut state = self.state("move_view");
        if state.reject_view_moves > 0 {
            state.reject_view_moves -= 1;
            return Err(fail(E_ACCESSDENIED, "view move refused"));
        }
        if state.position(desktop).is_none() {
            return Err(fail(E_INVALIDARG, "unknown desktop"));
        }
        let entry = state
            .windows
            .get_mut(view)
            .ok_or_else(|| fail(E_INVALIDARG, "stale view"))?;
        entry.desktop = desktop.id;
        Ok(())
    }
}

pub(crate) struct MockProcesses(Arc<Mutex<MockState>>);

impl WindowProcesses for MockProcesses {
    fn current_process_id(&self) -> u32 {
        OWN_PROCESS
    }

    fn window_process_id(&self, window: WindowHandle) -> NativeResult<u32> {
        let mut state = self.0.lock().unwrap();
        state.calls.push("window_process_id");
        state
            .windows
            .get(&window)
            .map(|w| w.process_id)
            .ok_or_else(|| fail(E_INVALIDARG, "not a window"))
    }

    fn main_window(&self, process_id: u32) -> NativeResult<WindowHandle> {
        let mut state = self.0.lock().unwrap();
        state.calls.push("main_window");
        state
            .main_windows
            .get(&process_id)
            .copied()
            .ok_or_else(|| fail(E_FAIL, "process has no main window"))
    }
}
