//! Which shape of the shell interfaces the running build exposes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two interface generations this crate can bind to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShellGeneration {
    /// Windows 10.
    Windows10,
    /// Windows 11 22H2/23H2 from update revision 3085 on.
    Windows11,
}

impl ShellGeneration {
    /// Maps an OS build to its interface generation. Builds whose interfaces
    /// match neither generation yield `None`.
    pub fn for_build(build: OsBuild) -> Option<Self> {
        match build.number {
            10240..=21999 => Some(ShellGeneration::Windows10),
            22621 | 22631 if build.revision >= 3085 => Some(ShellGeneration::Windows11),
            _ => None,
        }
    }
}

impl fmt::Display for ShellGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellGeneration::Windows10 => f.write_str("Windows 10"),
            ShellGeneration::Windows11 => f.write_str("Windows 11"),
        }
    }
}

/// Configured choice of generation. `Auto` detects it from the running build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GenerationPreference {
    #[default]
    Auto,
    Windows10,
    Windows11,
}

impl GenerationPreference {
    pub fn forced(self) -> Option<ShellGeneration> {
        match self {
            GenerationPreference::Auto => None,
            GenerationPreference::Windows10 => Some(ShellGeneration::Windows10),
            GenerationPreference::Windows11 => Some(ShellGeneration::Windows11),
        }
    }
}

/// Build number and update revision, e.g. `22631.3085`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OsBuild {
    pub number: u32,
    pub revision: u32,
}

impl OsBuild {
    /// Parses the registry's `CurrentBuildNumber` string.
    pub fn parse(number: &str, revision: u32) -> Option<Self> {
        let number = number.trim().parse().ok()?;
        Some(OsBuild { number, revision })
    }
}

impl fmt::Display for OsBuild {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.number, self.revision)
    }
}

/// Reads the running build from
/// `HKLM\SOFTWARE\Microsoft\Windows NT\CurrentVersion`.
#[cfg(windows)]
pub fn running_build() -> windows::core::Result<OsBuild> {
    use std::ffi::c_void;
    use windows::core::{w, PCWSTR};
    use windows::Win32::Foundation::E_UNEXPECTED;
    use windows::Win32::System::Registry::{
        RegGetValueW, HKEY_LOCAL_MACHINE, RRF_RT_REG_DWORD, RRF_RT_REG_SZ,
    };

    const CURRENT_VERSION: PCWSTR = w!("SOFTWARE\\Microsoft\\Windows NT\\CurrentVersion");

    let mut buffer = [0u16; 32];
    let mut size = std::mem::size_of_val(&buffer) as u32;
    unsafe {
        RegGetValueW(
            HKEY_LOCAL_MACHINE,
            CURRENT_VERSION,
            w!("CurrentBuildNumber"),
            RRF_RT_REG_SZ,
            None,
            Some(buffer.as_mut_ptr() as *mut c_void),
            Some(&mut size as *mut u32),
        )
    }
    .ok()?;
    let len = buffer.iter().position(|&c| c == 0).unwrap_or(buffer.len());
    let number = String::from_utf16_lossy(&buffer[..len]);

    // Older builds have no UBR value.
    let mut revision = 0u32;
    let mut size = std::mem::size_of::<u32>() as u32;
    let found = unsafe {
        RegGetValueW(
            HKEY_LOCAL_MACHINE,
            CURRENT_VERSION,
            w!("UBR"),
            RRF_RT_REG_DWORD,
            None,
            Some(&mut revision as *mut u32 as *mut c_void),
            Some(&mut size as *mut u32),
        )
    }
    .is_ok();
    if !found {
        revision = 0;
    }

    OsBuild::parse(&number, revision).ok_or_else(|| E_UNEXPECTED.into())
}
