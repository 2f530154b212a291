//! Moving an arbitrary window onto a desktop.
//!
//! The public manager only moves windows that belong to the calling process,
//! and even then refuses some of them. Windows of other processes have to be
//! moved through their application view, and the view found for a given
//! handle is not always one the shell accepts. Each [`MovePath`] targets one
//! of these refusals; they are tried in order, cheapest first, and the first
//! success wins.

use crate::error::{DesktopError, NativeError, NativeResult, Result};
use crate::handles::WindowHandle;
use crate::native::{VirtualDesktopShell, WindowProcesses};
use log::{debug, info, warn};
use serde::Serialize;
use std::fmt;

/// One way of asking the shell to move a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MovePath {
    /// The public manager moves the window handle.
    Direct,
    /// The internal manager moves the application view of the window.
    WindowView,
    /// The internal manager moves the application view of the owning
    /// process's main window.
    MainWindowView,
}

impl fmt::Display for MovePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MovePath::Direct => "direct",
            MovePath::WindowView => "window view",
            MovePath::MainWindowView => "main window view",
        };
        f.write_str(name)
    }
}

/// Paths to try, in order, for a window owned by the current process or not.
pub fn plan(own_process: bool) -> &'static [MovePath] {
    if own_process {
        &[MovePath::Direct, MovePath::WindowView]
    } else {
        &[MovePath::WindowView, MovePath::MainWindowView]
    }
}

/// Moves `window` onto `target`, trying each [`MovePath`] of [`plan`] in turn.
///
/// # Behavior
/// - Rejects the null handle before any native call.
/// - Looks up the process owning `window`. A failed lookup means the handle is
///   not a live window.
/// - Windows of the current process try [`MovePath::Direct`] first, then
///   their own application view. Windows of other processes try their view,
///   then the view of their process's main window.
/// - Stops at the first path whose last native call succeeds.
///
/// # Returns
/// - `Ok(path)` with the path that moved the window.
/// - `Err(DesktopError::InvalidArgument)` for a null or dead handle.
/// - `Err(DesktopError::OperationRejected)` carrying one [`NativeError`] per
///   attempted path when every path failed.
///
/// # Notes
/// - Nothing is cached between calls. Each failed path is logged at `warn`
///   level and the move is not retried.
pub(crate) fn move_window<S, P>(
    shell: &S,
    processes: &P,
    window: WindowHandle,
    target: &S::Desktop,
) -> Result<MovePath>
where
    S: VirtualDesktopShell,
    P: WindowProcesses,
{
    if window.is_null() {
        return Err(DesktopError::InvalidArgument(
            "window handle is null".to_string(),
        ));
    }

    let process_id = processes.window_process_id(window).map_err(|err| {
        DesktopError::InvalidArgument(format!("window {} has no owning process: {}", window, err))
    })?;
    let own_process = process_id == processes.current_process_id();
    debug!(
        "Moving window {} of process {} (own process: {})",
        window, process_id, own_process
    );

    let mut failures: Vec<NativeError> = Vec::new();
    for &path in plan(own_process) {
        match attempt(shell, processes, path, window, process_id, target) {
            Ok(()) => {
                info!("Moved window {} using the {} path", window, path);
                return Ok(path);
            }
            Err(err) => {
                warn!("Moving window {} using the {} path failed: {}", window, path, err);
                failures.push(err);
            }
        }
    }

    Err(DesktopError::OperationRejected {
        operation: "move window",
        failures,
    })
}

fn attempt<S, P>(
    shell: &S,
    processes: &P,
    path: MovePath,
    window: WindowHandle,
    process_id: u32,
    target: &S::Desktop,
) -> NativeResult<()>
where
    S: VirtualDesktopShell,
    P: WindowProcesses,
{
    match path {
        MovePath::Direct => {
            let id = shell.desktop_id(target)?;
            shell.move_window_direct(window, id)
        }
        MovePath::WindowView => {
            let view = shell.view_for_window(window)?;
            shell.move_view(&view, target)
        }
        MovePath::MainWindowView => {
            let main = processes.main_window(process_id)?;
            debug!("Main window of process {} is {}", process_id, main);
            let view = shell.view_for_window(main)?;
            shell.move_view(&view, target)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{init_logging, Mock, MockWindow, OWN_PROCESS};

    const OTHER_PROCESS: u32 = 4242;

    #[test]
    fn own_windows_try_the_direct_path_first() {
        assert_eq!(plan(true), &[MovePath::Direct, MovePath::WindowView]);
        assert_eq!(
            plan(false),
            &[MovePath::WindowView, MovePath::MainWindowView]
        );
    }

    #[test]
    fn own_focused_window_moves_directly() {
        init_logging();
        let mock = Mock::with_desktops(3);
        mock.set_current(2);
        let directory = mock.directory();
        let desktop0 = directory.by_index(0).unwrap();
        let desktop2 = directory.by_index(2).unwrap();
        let w = WindowHandle(0x100);
        mock.add_window(w.0, MockWindow::owned(OWN_PROCESS, desktop2.id().unwrap()));

        let path = desktop0.move_window_here(w).unwrap();

        assert_eq!(path, MovePath::Direct);
        assert_eq!(directory.owner_of(w).unwrap(), desktop0.id().unwrap());
        assert!(!desktop2.contains_window(w).unwrap());
        assert!(!mock.state().calls.contains(&"move_view"));
    }

    #[test]
    fn own_window_not_owned_by_thread_uses_its_view() {
        let mock = Mock::with_desktops(2);
        let directory = mock.directory();
        let target = directory.by_index(1).unwrap();
        let w = WindowHandle(0x101);
        let mut window = MockWindow::owned(OWN_PROCESS, directory.by_index(0).unwrap().id().unwrap());
        window.thread_owned = false;
        mock.add_window(w.0, window);

        assert_eq!(target.move_window_here(w).unwrap(), MovePath::WindowView);
        assert!(target.contains_window(w).unwrap());
    }

    #[test]
    fn other_process_window_moves_through_its_view() {
        let mock = Mock::with_desktops(2);
        let directory = mock.directory();
        let target = directory.by_index(1).unwrap();
        let w = WindowHandle(0x200);
        mock.add_window(w.0, MockWindow::owned(OTHER_PROCESS, directory.by_index(0).unwrap().id().unwrap()));

        assert_eq!(target.move_window_here(w).unwrap(), MovePath::WindowView);
        assert!(target.contains_window(w).unwrap());
        assert!(!mock.state().calls.contains(&"move_window_direct"));
    }

    #[test]
    fn rejected_view_move_falls_back_to_main_window() {
        let mock = Mock::with_desktops(2);
        let directory = mock.directory();
        let source = directory.by_index(0).unwrap().id().unwrap();
        let target = directory.by_index(1).unwrap();
        let w = WindowHandle(0x201);
        let main = WindowHandle(0x202);
        mock.add_window(w.0, MockWindow::owned(OTHER_PROCESS, source));
        mock.add_window(main.0, MockWindow::owned(OTHER_PROCESS, source));
        mock.set_main_window(OTHER_PROCESS, main.0);
        mock.state().reject_view_moves = 1;

        assert_eq!(target.move_window_here(w).unwrap(), MovePath::MainWindowView);
        assert!(target.contains_window(main).unwrap());
        let state = mock.state();
        assert_eq!(state.calls.iter().filter(|c| **c == "move_view").count(), 2);
        assert_eq!(state.reject_view_moves, 0);
    }

    #[test]
    fn unresolvable_view_falls_back_to_main_window() {
        let mock = Mock::with_desktops(2);
        let directory = mock.directory();
        let source = directory.by_index(0).unwrap().id().unwrap();
        let target = directory.by_index(1).unwrap();
        let w = WindowHandle(0x203);
        let main = WindowHandle(0x204);
        let mut background = MockWindow::owned(OTHER_PROCESS, source);
        background.has_view = false;
        mock.add_window(w.0, background);
        mock.add_window(main.0, MockWindow::owned(OTHER_PROCESS, source));
        mock.set_main_window(OTHER_PROCESS, main.0);

        assert_eq!(target.move_window_here(w).unwrap(), MovePath::MainWindowView);
    }

    #[test]
    fn exhausted_paths_report_every_failure() {
        let mock = Mock::with_desktops(2);
        let directory = mock.directory();
        let target = directory.by_index(1).unwrap();
        let w = WindowHandle(0x205);
        mock.add_window(w.0, MockWindow::owned(OTHER_PROCESS, directory.by_index(0).unwrap().id().unwrap()));
        mock.state().reject_view_moves = 1;

        match target.move_window_here(w) {
            Err(DesktopError::OperationRejected { operation, failures }) => {
                assert_eq!(operation, "move window");
                assert_eq!(failures.len(), 2);
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(!target.contains_window(w).unwrap());
    }

    #[test]
    fn null_window_is_rejected_before_any_native_call() {
        let mock = Mock::with_desktops(2);
        let directory = mock.directory();
        let target = directory.by_index(1).unwrap();
        mock.state().calls.clear();

        assert!(matches!(
            target.move_window_here(WindowHandle::NULL),
            Err(DesktopError::InvalidArgument(_))
        ));
        assert!(mock.state().calls.is_empty());
    }

    #[test]
    fn unknown_window_is_invalid_argument() {
        let mock = Mock::with_desktops(2);
        let target = mock.directory().by_index(1).unwrap();
        assert!(matches!(
            target.move_window_here(WindowHandle(0xDEAD)),
            Err(DesktopError::InvalidArgument(_))
        ));
    }
}
