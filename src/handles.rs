use serde::{Serialize, Serializer};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// The 128-bit identifier the shell assigns to a desktop for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DesktopId(pub u128);

impl DesktopId {
    pub fn as_u128(&self) -> u128 {
        self.0
    }
}

impl fmt::Display for DesktopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        write!(
            f,
            "{:08X}-{:04X}-{:04X}-{:04X}-{:012X}",
            (v >> 96) as u32,
            (v >> 80) as u16,
            (v >> 64) as u16,
            (v >> 48) as u16,
            v & 0xFFFF_FFFF_FFFF
        )
    }
}

impl Serialize for DesktopId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(windows)]
impl From<windows::core::GUID> for DesktopId {
    fn from(guid: windows::core::GUID) -> Self {
        DesktopId(guid.to_u128())
    }
}

#[cfg(windows)]
impl From<DesktopId> for windows::core::GUID {
    fn from(id: DesktopId) -> Self {
        windows::core::GUID::from_u128(id.0)
    }
}

/// A top-level window owned by the OS window manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct WindowHandle(pub isize);

impl WindowHandle {
    pub const NULL: WindowHandle = WindowHandle(0);

    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#X}", self.0)
    }
}

/// Accepts decimal (`1234`) and hexadecimal (`0x4D2`) handles.
impl FromStr for WindowHandle {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let value = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => isize::from_str_radix(hex, 16)?,
            None => s.parse::<isize>()?,
        };
        Ok(WindowHandle(value))
    }
}

#[cfg(windows)]
impl From<windows::Win32::Foundation::HWND> for WindowHandle {
    fn from(hwnd: windows::Win32::Foundation::HWND) -> Self {
        WindowHandle(hwnd.0 as isize)
    }
}

#[cfg(windows)]
impl From<WindowHandle> for windows::Win32::Foundation::HWND {
    fn from(window: WindowHandle) -> Self {
        windows::Win32::Foundation::HWND(window.0 as *mut std::ffi::c_void)
    }
}
