use crate::generation::GenerationPreference;
use crate::handles::WindowHandle;
use clap::{ArgAction, ArgGroup, Parser};

#[derive(Parser, Debug)]
#[command(author, version, about = "Windows virtual desktop tool", long_about = None)]
#[command(group(ArgGroup::new("action").multiple(false)))]
pub struct CliArgs {
    /// Print the number of desktops.
    #[arg(long = "count", action = ArgAction::SetTrue, group = "action")]
    pub count: bool,

    /// List every desktop. The default when no action is given.
    #[arg(long = "list", action = ArgAction::SetTrue, group = "action")]
    pub list: bool,

    #[arg(long = "current", action = ArgAction::SetTrue, group = "action")]
    pub current: bool,

    #[arg(long = "switch", value_name = "INDEX", group = "action")]
    pub switch: Option<usize>,

    #[arg(long = "create", action = ArgAction::SetTrue, group = "action")]
    pub create: bool,

    #[arg(long = "remove", value_name = "INDEX", group = "action")]
    pub remove: Option<usize>,

    /// Desktop to show after `--remove`. Defaults to the first desktop.
    #[arg(long = "fallback", value_name = "INDEX", requires = "remove")]
    pub fallback: Option<usize>,

    /// Print the desktop left of INDEX.
    #[arg(long = "left", value_name = "INDEX", group = "action")]
    pub left: Option<usize>,

    /// Print the desktop right of INDEX.
    #[arg(long = "right", value_name = "INDEX", group = "action")]
    pub right: Option<usize>,

    /// Print the desktop holding a window. Decimal or 0x-prefixed hex.
    #[arg(long = "window-desktop", value_name = "HWND", group = "action")]
    pub window_desktop: Option<WindowHandle>,

    #[arg(long = "move-window", value_name = "HWND", requires = "to", group = "action")]
    pub move_window: Option<WindowHandle>,

    /// Target desktop of `--move-window`.
    #[arg(long = "to", value_name = "INDEX", requires = "move_window")]
    pub to: Option<usize>,

    /// Print results as JSON.
    #[arg(long = "json", action = ArgAction::SetTrue)]
    pub json: bool,

    /// Interface generation to bind to, overriding settings.json.
    #[arg(long = "generation", value_enum)]
    pub generation: Option<GenerationPreference>,
}

/// The action requested on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Count,
    List,
    Current,
    Switch(usize),
    Create,
    Remove {
        index: usize,
        fallback: Option<usize>,
    },
    Left(usize),
    Right(usize),
    WindowDesktop(WindowHandle),
    MoveWindow {
        window: WindowHandle,
        to: usize,
    },
}

impl CliArgs {
    pub fn command(&self) -> Command {
        if self.count {
            Command::Count
        } else if self.current {
            Command::Current
        } else if let Some(index) = self.switch {
            Command::Switch(index)
        } else if self.create {
            Command::Create
        } else if let Some(index) = self.remove {
            Command::Remove {
                index,
                fallback: self.fallback,
            }
        } else if let Some(index) = self.left {
            Command::Left(index)
        } else if let Some(index) = self.right {
            Command::Right(index)
        } else if let Some(window) = self.window_desktop {
            Command::WindowDesktop(window)
        } else if let (Some(window), Some(to)) = (self.move_window, self.to) {
            Command::MoveWindow { window, to }
        } else {
            Command::List
        }
    }
}
