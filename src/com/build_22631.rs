//! Interfaces of Windows 11 22H2 and 23H2, update revision 3085 and later.
//!
//! Desktops gained names, wallpapers and remote sessions, and the manager
//! gained `move_desktop` between `create_desktop` and `remove_desktop`.

use super::common::IApplicationView;
use super::{ComDesktop, ManagerBinding};
use std::ffi::c_void;
use windows::core::*;
use windows::Win32::Foundation::{E_INVALIDARG, E_POINTER};
use windows::Win32::System::Com::IServiceProvider;
use windows::Win32::UI::Shell::Common::IObjectArray;

#[interface("3F07F4BE-B107-441A-AF0F-39D82529072C")]
pub unsafe trait IVirtualDesktop: IUnknown {
    fn is_view_visible(&self, view: *mut c_void, visible: *mut u32) -> HRESULT;
    fn get_id(&self, id: *mut GUID) -> HRESULT;
    fn get_name(&self, name: *mut HSTRING) -> HRESULT;
    fn get_wallpaper(&self, path: *mut HSTRING) -> HRESULT;
    fn is_remote(&self, remote: *mut i32) -> HRESULT;
}

#[interface("53F5CA0B-158F-4124-900C-057158060B27")]
pub unsafe trait IVirtualDesktopManagerInternal: IUnknown {
    fn get_count(&self, count: *mut u32) -> HRESULT;
    fn move_view_to_desktop(&self, view: *mut c_void, desktop: *mut c_void) -> HRESULT;
    fn can_view_move_desktops(&self, view: *mut c_void, can_move: *mut i32) -> HRESULT;
    fn get_current_desktop(&self, desktop: *mut Option<IVirtualDesktop>) -> HRESULT;
    fn get_desktops(&self, desktops: *mut Option<IObjectArray>) -> HRESULT;
    fn get_adjacent_desktop(
        &self,
        from: *mut c_void,
        direction: u32,
        desktop: *mut Option<IVirtualDesktop>,
    ) -> HRESULT;
    fn switch_desktop(&self, desktop: *mut c_void) -> HRESULT;
    fn create_desktop(&self, desktop: *mut Option<IVirtualDesktop>) -> HRESULT;
    fn move_desktop(&self, desktop: *mut c_void, index: u32) -> HRESULT;
    fn remove_desktop(&self, desktop: *mut c_void, fallback: *mut c_void) -> HRESULT;
    fn find_desktop(&self, id: *const GUID, desktop: *mut Option<IVirtualDesktop>) -> HRESULT;
}

desktop_manager_binding!(Windows11);
