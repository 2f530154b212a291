//! Interfaces shared by both generations.

use std::ffi::c_void;
use windows::core::*;
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::Shell::Common::IObjectArray;

/// A window's presentation surface. Only ever passed back to the shell, so
/// the leading slots are declared for alignment and never called.
#[interface("372E1D3B-38D3-42E4-A15B-8AB2B178F513")]
pub unsafe trait IApplicationView: IUnknown {
    fn get_iids(&self, count: *mut u32, iids: *mut *mut GUID) -> HRESULT;
    fn get_runtime_class_name(&self, name: *mut HSTRING) -> HRESULT;
    fn get_trust_level(&self, level: *mut i32) -> HRESULT;
    fn set_focus(&self) -> HRESULT;
    fn switch_to(&self) -> HRESULT;
}

#[interface("1841C6D7-4F9D-42C0-AF41-8747538F10E5")]
pub unsafe trait IApplicationViewCollection: IUnknown {
    fn get_views(&self, views: *mut Option<IObjectArray>) -> HRESULT;
    fn get_views_by_z_order(&self, views: *mut Option<IObjectArray>) -> HRESULT;
    fn get_views_by_app_user_model_id(
        &self,
        id: PCWSTR,
        views: *mut Option<IObjectArray>,
    ) -> HRESULT;
    fn get_view_for_hwnd(&self, window: HWND, view: *mut Option<IApplicationView>) -> HRESULT;
    fn get_view_for_application(
        &self,
        application: *mut c_void,
        view: *mut Option<IApplicationView>,
    ) -> HRESULT;
}
