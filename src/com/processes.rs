//! Process lookups for windows, through user32.

use crate::error::{NativeError, NativeResult};
use crate::handles::WindowHandle;
use crate::native::WindowProcesses;
use windows::core::Error;
use windows::Win32::Foundation::{BOOL, E_FAIL, HWND, LPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetWindow, GetWindowThreadProcessId, IsWindowVisible, GW_OWNER,
};

#[derive(Debug, Default, Clone, Copy)]
pub struct Win32Processes;

impl WindowProcesses for Win32Processes {
    fn current_process_id(&self) -> u32 {
        std::process::id()
    }

    fn window_process_id(&self, window: WindowHandle) -> NativeResult<u32> {
        let mut process_id = 0u32;
        let thread_id = unsafe {
            GetWindowThreadProcessId(HWND::from(window), Some(&mut process_id as *mut u32))
        };
        if thread_id == 0 {
            return Err(Error::from_win32().into());
        }
        Ok(process_id)
    }

    fn main_window(&self, process_id: u32) -> NativeResult<WindowHandle> {
        let mut search = MainWindowSearch {
            process_id,
            found: None,
        };
        unsafe {
            // Fails with no last error when the callback stops the enumeration.
            let _ = EnumWindows(
                Some(enum_main_window_proc),
                LPARAM(&mut search as *mut _ as isize),
            );
        }
        search.found.ok_or_else(|| {
            NativeError::new(
                E_FAIL.0,
                format!("process {} has no visible top-level window", process_id),
            )
        })
    }
}

/// State for [`enum_main_window_proc`].
struct MainWindowSearch {
    process_id: u32,
    found: Option<WindowHandle>,
}

/// Stops at the first visible, unowned top-level window of the searched
/// process.
unsafe extern "system" fn enum_main_window_proc(hwnd: HWND, lparam: LPARAM) -> BOOL {
    if !IsWindowVisible(hwnd).as_bool() {
        return BOOL(1);
    }
    let search = &mut *(lparam.0 as *mut MainWindowSearch);

    let mut process_id = 0u32;
    GetWindowThreadProcessId(hwnd, Some(&mut process_id as *mut u32));
    if process_id != search.process_id {
        return BOOL(1);
    }

    // Dialogs and tool windows have an owner.
    if let Ok(owner) = GetWindow(hwnd, GW_OWNER) {
        if !owner.is_invalid() {
            return BOOL(1);
        }
    }

    search.found = Some(hwnd.into());
    BOOL(0)
}
