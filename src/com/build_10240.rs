//! Interfaces of Windows 10.

use super::common::IApplicationView;
use super::{ComDesktop, ManagerBinding};
use std::ffi::c_void;
use windows::core::*;
use windows::Win32::Foundation::{E_INVALIDARG, E_POINTER};
use windows::Win32::System::Com::IServiceProvider;
use windows::Win32::UI::Shell::Common::IObjectArray;

#[interface("FF72FFDD-BE7E-43FC-9C03-AD81681E88E4")]
pub unsafe trait IVirtualDesktop: IUnknown {
    fn is_view_visible(&self, view: *mut c_void, visible: *mut u32) -> HRESULT;
    fn get_id(&self, id: *mut GUID) -> HRESULT;
}

#[interface("F31574D6-B682-4CDC-BD56-1827860ABEC6")]
pub unsafe trait IVirtualDesktopManagerInternal: IUnknown {
    fn get_count(&self, count: *mut u32) -> HRESULT;
    fn move_view_to_desktop(&self, view: *mut c_void, desktop: *mut c_void) -> HRESULT;
    fn can_view_move_desktops(&self, view: *mut c_void, can_move: *mut i32) -> HRESULT;
    fn get_current_desktop(&self, desktop: *mut Option<IVirtualDesktop>) -> HRESULT;
    fn get_desktops(&self, desktops: *mut Option<IObjectArray>) -> HRESULT;
    /// `direction` is 3 for left and 4 for right.
    fn get_adjacent_desktop(
        &self,
        from: *mut c_void,
        direction: u32,
        desktop: *mut Option<IVirtualDesktop>,
    ) -> HRESULT;
    fn switch_desktop(&self, desktop: *mut c_void) -> HRESULT;
    fn create_desktop(&self, desktop: *mut Option<IVirtualDesktop>) -> HRESULT;
    fn remove_desktop(&self, desktop: *mut c_void, fallback: *mut c_void) -> HRESULT;
    fn find_desktop(&self, id: *const GUID, desktop: *mut Option<IVirtualDesktop>) -> HRESULT;
}

desktop_manager_binding!(Windows10);
