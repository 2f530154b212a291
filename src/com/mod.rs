//! COM bindings to the shell's virtual desktop services.
//!
//! `build_10240` and `build_22631` declare the internal manager and desktop
//! interfaces of each generation. Their method order and identifiers differ,
//! so each module wraps its manager in a `DesktopManager` implementing the
//! same [`ManagerBinding`] and [`ComShell`] picks one at activation.

use crate::error::{NativeError, NativeResult};
use crate::generation::ShellGeneration;
use crate::handles::{DesktopId, WindowHandle};
use crate::native::{AdjacentDirection, VirtualDesktopShell};
use log::debug;
use std::ffi::c_void;
use windows::core::{IUnknown, Interface, Result, GUID};
use windows::Win32::Foundation::{E_POINTER, HWND};
use windows::Win32::System::Com::{
    CoCreateInstance, CoIncrementMTAUsage, IServiceProvider, CLSCTX_ALL, CLSCTX_LOCAL_SERVER,
    CO_MTA_USAGE_COOKIE,
};
use windows::Win32::UI::Shell::{IVirtualDesktopManager, VirtualDesktopManager};

/// Implements [`ManagerBinding`] for the `IVirtualDesktopManagerInternal` and
/// `IVirtualDesktop` declared in the invoking module.
macro_rules! desktop_manager_binding {
    ($variant:ident) => {
        pub(super) struct DesktopManager(IVirtualDesktopManagerInternal);

        // Queried from the multithreaded apartment.
        unsafe impl Send for DesktopManager {}
        unsafe impl Sync for DesktopManager {}

        impl DesktopManager {
            pub(super) fn query(shell: &IServiceProvider) -> Result<Self> {
                let manager = unsafe {
                    shell.QueryService::<IVirtualDesktopManagerInternal>(
                        &super::CLSID_VIRTUAL_DESKTOP_MANAGER_INTERNAL,
                    )
                }?;
                Ok(Self(manager))
            }

            fn object_array(&self) -> Result<IObjectArray> {
                let mut array = None;
                unsafe { self.0.get_desktops(&mut array) }.ok()?;
                array.ok_or_else(|| E_POINTER.into())
            }
        }

        fn native(desktop: &ComDesktop) -> Result<&IVirtualDesktop> {
            match desktop {
                ComDesktop::$variant(desktop) => Ok(desktop),
                _ => Err(E_INVALIDARG.into()),
            }
        }

        fn wrap(desktop: Option<IVirtualDesktop>) -> Result<ComDesktop> {
            desktop
                .map(ComDesktop::$variant)
                .ok_or_else(|| E_POINTER.into())
        }

        impl ManagerBinding for DesktopManager {
            fn count(&self) -> Result<u32> {
                let mut count = 0;
                unsafe { self.0.get_count(&mut count) }.ok()?;
                Ok(count)
            }

            fn desktops(&self) -> Result<Vec<ComDesktop>> {
                let array = self.object_array()?;
                let count = unsafe { array.GetCount() }?;
                (0..count)
                    .map(|i| unsafe { array.GetAt::<IVirtualDesktop>(i) }.map(ComDesktop::$variant))
                    .collect()
            }

            fn desktop_at(&self, index: u32) -> Result<ComDesktop> {
                let array = self.object_array()?;
                let desktop = unsafe { array.GetAt::<IVirtualDesktop>(index) }?;
                Ok(ComDesktop::$variant(desktop))
            }

            fn current(&self) -> Result<ComDesktop> {
                let mut desktop = None;
                unsafe { self.0.get_current_desktop(&mut desktop) }.ok()?;
                wrap(desktop)
            }

            fn adjacent(&self, from: &ComDesktop, direction: u32) -> Result<ComDesktop> {
                let mut desktop = None;
                unsafe {
                    self.0
                        .get_adjacent_desktop(native(from)?.as_raw(), direction, &mut desktop)
                }
                .ok()?;
                wrap(desktop)
            }

            fn switch_to(&self, desktop: &ComDesktop) -> Result<()> {
                unsafe { self.0.switch_desktop(native(desktop)?.as_raw()) }.ok()
            }

            fn create(&self) -> Result<ComDesktop> {
                let mut desktop = None;
                unsafe { self.0.create_desktop(&mut desktop) }.ok()?;
                wrap(desktop)
            }

            fn remove(&self, desktop: &ComDesktop, fallback: &ComDesktop) -> Result<()> {
                unsafe {
                    self.0
                        .remove_desktop(native(desktop)?.as_raw(), native(fallback)?.as_raw())
                }
                .ok()
            }

            fn find(&self, id: &GUID) -> Result<ComDesktop> {
                let mut desktop = None;
                unsafe { self.0.find_desktop(id, &mut desktop) }.ok()?;
                wrap(desktop)
            }

            fn id(&self, desktop: &ComDesktop) -> Result<GUID> {
                let mut id = GUID::zeroed();
                unsafe { native(desktop)?.get_id(&mut id) }.ok()?;
                Ok(id)
            }

            fn move_view(&self, view: &IApplicationView, desktop: &ComDesktop) -> Result<()> {
                unsafe {
                    self.0
                        .move_view_to_desktop(view.as_raw(), native(desktop)?.as_raw())
                }
                .ok()
            }
        }
    };
}

mod build_10240;
mod build_22631;
mod common;
mod processes;

use common::{IApplicationView, IApplicationViewCollection};
pub use processes::Win32Processes;

const CLSID_IMMERSIVE_SHELL: GUID = GUID::from_u128(0xC2F03A33_21F5_47FA_B4BB_156362A2F239);
const CLSID_VIRTUAL_DESKTOP_MANAGER_INTERNAL: GUID =
    GUID::from_u128(0xC5E0CDCA_7B6E_41B2_9FC4_D93975CC467B);

/// A desktop object of one of the two generations.
#[derive(Clone)]
pub enum ComDesktop {
    Windows10(build_10240::IVirtualDesktop),
    Windows11(build_22631::IVirtualDesktop),
}

impl ComDesktop {
    /// The object's `IUnknown` pointer, which COM guarantees is the same for
    /// every reference to one object.
    fn identity(&self) -> Option<*mut c_void> {
        let unknown = match self {
            ComDesktop::Windows10(desktop) => desktop.cast::<IUnknown>(),
            ComDesktop::Windows11(desktop) => desktop.cast::<IUnknown>(),
        };
        unknown.ok().map(|u| u.as_raw())
    }
}

/// Internal desktop manager calls, independent of the generation's layout.
trait ManagerBinding: Send + Sync {
    fn count(&self) -> Result<u32>;
    fn desktops(&self) -> Result<Vec<ComDesktop>>;
    fn desktop_at(&self, index: u32) -> Result<ComDesktop>;
    fn current(&self) -> Result<ComDesktop>;
    fn adjacent(&self, from: &ComDesktop, direction: u32) -> Result<ComDesktop>;
    fn switch_to(&self, desktop: &ComDesktop) -> Result<()>;
    fn create(&self) -> Result<ComDesktop>;
    fn remove(&self, desktop: &ComDesktop, fallback: &ComDesktop) -> Result<()>;
    fn find(&self, id: &GUID) -> Result<ComDesktop>;
    fn id(&self, desktop: &ComDesktop) -> Result<GUID>;
    fn move_view(&self, view: &IApplicationView, desktop: &ComDesktop) -> Result<()>;
}

/// The bound shell services of the running session.
pub struct ComShell {
    generation: ShellGeneration,
    manager: Box<dyn ManagerBinding>,
    public_manager: IVirtualDesktopManager,
    views: IApplicationViewCollection,
    // Keeps the multithreaded apartment alive for the life of the process.
    _mta: CO_MTA_USAGE_COOKIE,
}

// Every reference is obtained from the multithreaded apartment, so the
// proxies may be called from any thread.
unsafe impl Send for ComShell {}
unsafe impl Sync for ComShell {}

impl ComShell {
    /// Activates the immersive shell and queries the services of `generation`.
    pub fn activate(generation: ShellGeneration) -> Result<Self> {
        let mta = unsafe { CoIncrementMTAUsage() }?;

        let shell: IServiceProvider =
            unsafe { CoCreateInstance(&CLSID_IMMERSIVE_SHELL, None, CLSCTX_LOCAL_SERVER) }?;

        let manager: Box<dyn ManagerBinding> = match generation {
            ShellGeneration::Windows10 => Box::new(build_10240::DesktopManager::query(&shell)?),
            ShellGeneration::Windows11 => Box::new(build_22631::DesktopManager::query(&shell)?),
        };

        let public_manager: IVirtualDesktopManager =
            unsafe { CoCreateInstance(&VirtualDesktopManager, None, CLSCTX_ALL) }?;

        let views = unsafe {
            shell.QueryService::<IApplicationViewCollection>(&IApplicationViewCollection::IID)
        }?;

        debug!("Queried the {} desktop manager and view collection", generation);
        Ok(Self {
            generation,
            manager,
            public_manager,
            views,
            _mta: mta,
        })
    }

    pub fn generation(&self) -> ShellGeneration {
        self.generation
    }
}

impl VirtualDesktopShell for ComShell {
    type Desktop = ComDesktop;
    type View = IApplicationView;

    fn desktop_count(&self) -> NativeResult<usize> {
        Ok(self.manager.count()? as usize)
    }

    fn desktops(&self) -> NativeResult<Vec<ComDesktop>> {
        Ok(self.manager.desktops()?)
    }

    fn desktop_at(&self, index: usize) -> NativeResult<ComDesktop> {
        Ok(self.manager.desktop_at(index as u32)?)
    }

    fn current_desktop(&self) -> NativeResult<ComDesktop> {
        Ok(self.manager.current()?)
    }

    fn adjacent_desktop(
        &self,
        from: &ComDesktop,
        direction: AdjacentDirection,
    ) -> NativeResult<ComDesktop> {
        Ok(self.manager.adjacent(from, direction.code())?)
    }

    fn find_desktop(&self, id: DesktopId) -> NativeResult<ComDesktop> {
        Ok(self.manager.find(&GUID::from(id))?)
    }

    fn switch_desktop(&self, desktop: &ComDesktop) -> NativeResult<()> {
        Ok(self.manager.switch_to(desktop)?)
    }

    fn create_desktop(&self) -> NativeResult<ComDesktop> {
        Ok(self.manager.create()?)
    }

    fn remove_desktop(&self, desktop: &ComDesktop, fallback: &ComDesktop) -> NativeResult<()> {
        Ok(self.manager.remove(desktop, fallback)?)
    }

    fn desktop_id(&self, desktop: &ComDesktop) -> NativeResult<DesktopId> {
        Ok(self.manager.id(desktop)?.into())
    }

    fn same_desktop(&self, a: &ComDesktop, b: &ComDesktop) -> bool {
        matches!((a.identity(), b.identity()), (Some(x), Some(y)) if x == y)
    }

    fn window_desktop_id(&self, window: WindowHandle) -> NativeResult<DesktopId> {
        let id = unsafe { self.public_manager.GetWindowDesktopId(HWND::from(window)) }?;
        Ok(id.into())
    }

    fn move_window_direct(&self, window: WindowHandle, target: DesktopId) -> NativeResult<()> {
        let id = GUID::from(target);
        unsafe {
            self.public_manager
                .MoveWindowToDesktop(HWND::from(window), &id)
        }?;
        Ok(())
    }

    fn view_for_window(&self, window: WindowHandle) -> NativeResult<IApplicationView> {
        let mut view = None;
        unsafe { self.views.get_view_for_hwnd(HWND::from(window), &mut view) }.ok()?;
        view.ok_or_else(|| NativeError::from(windows::core::Error::from(E_POINTER)))
    }

    fn move_view(&self, view: &IApplicationView, desktop: &ComDesktop) -> NativeResult<()> {
        Ok(self.manager.move_view(view, desktop)?)
    }
}
