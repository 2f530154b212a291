//! Process-wide binding to the running shell.

use crate::directory::DesktopDirectory;
use crate::error::{DesktopError, Result};
use crate::generation::GenerationPreference;
use log::{error, info};
use once_cell::sync::OnceCell;

#[cfg(windows)]
pub type SystemShell = crate::com::ComShell;
#[cfg(windows)]
pub type SystemProcesses = crate::com::Win32Processes;

#[cfg(not(windows))]
pub type SystemShell = crate::native::Unsupported;
#[cfg(not(windows))]
pub type SystemProcesses = crate::native::Unsupported;

/// The directory over the real shell.
pub type SystemDirectory = DesktopDirectory<SystemShell, SystemProcesses>;

static DIRECTORY: OnceCell<SystemDirectory> = OnceCell::new();

/// Binds to the shell with an explicit generation preference.
///
/// Once bound, later calls return the existing directory whatever their
/// preference. A failed attempt leaves nothing behind, so the next call
/// tries again.
pub fn init(preference: GenerationPreference) -> Result<&'static SystemDirectory> {
    bind_once(&DIRECTORY, || bind(preference))
}

/// Runs `activate` unless `cell` already holds a value. Concurrent callers
/// wait for the one running activation; only a success is stored.
fn bind_once<T>(cell: &OnceCell<T>, activate: impl FnOnce() -> Result<T>) -> Result<&T> {
    cell.get_or_try_init(|| {
        activate().map_err(|err| {
            error!("Failed to bind to the virtual desktop service: {}", err);
            err
        })
    })
}

/// The bound directory, binding with automatic generation detection on first
/// use.
pub fn system_directory() -> Result<&'static SystemDirectory> {
    match DIRECTORY.get() {
        Some(directory) => Ok(directory),
        None => init(GenerationPreference::Auto),
    }
}

#[cfg(windows)]
fn bind(preference: GenerationPreference) -> Result<SystemDirectory> {
    use crate::com::{ComShell, Win32Processes};
    use crate::generation::{running_build, ShellGeneration};

    let generation = match preference.forced() {
        Some(generation) => {
            info!("Using the {} interfaces as configured", generation);
            generation
        }
        None => {
            let build = running_build().map_err(|err| {
                DesktopError::NativeServiceUnavailable(format!(
                    "cannot read the OS build: {}",
                    err.message()
                ))
            })?;
            let generation = ShellGeneration::for_build(build).ok_or_else(|| {
                DesktopError::NativeServiceUnavailable(format!(
                    "OS build {} has no supported virtual desktop interfaces",
                    build
                ))
            })?;
            info!("OS build {} uses the {} interfaces", build, generation);
            generation
        }
    };

    let shell = ComShell::activate(generation).map_err(|err| {
        DesktopError::NativeServiceUnavailable(format!(
            "cannot activate the {} shell services: {}",
            generation,
            crate::error::NativeError::from(err)
        ))
    })?;
    info!("Bound to the {} virtual desktop service", shell.generation());
    Ok(DesktopDirectory::new(shell, Win32Processes))
}

#[cfg(not(windows))]
fn bind(preference: GenerationPreference) -> Result<SystemDirectory> {
    info!("Binding requested with preference {:?}", preference);
    Err(DesktopError::NativeServiceUnavailable(
        "virtual desktops are only available on Windows".to_string(),
    ))
}
