use clap::Parser;
use desktop_manager::binding;
use desktop_manager::cli::{CliArgs, Command};
use desktop_manager::desktop_info::{
    describe_desktops, DesktopInfo, WindowDesktopInfo, WindowMoveInfo,
};
use desktop_manager::settings::{load_or_create_settings, Settings};
use desktop_manager::virtual_desktop::{self, Desktop};
use desktop_manager::Result;
use log::{error, info};
use serde::Serialize;
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    let settings = load_or_create_settings();

    ensure_logging_initialized(&settings);

    let json = args.json || settings.json_output;
    let preference = args.generation.unwrap_or(settings.shell_generation);
    let command = args.command();
    info!("Running {:?} with generation preference {:?}", command, preference);

    let result = binding::init(preference).and_then(|_| run(command, json));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:?} failed: {}", command, e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Executes one command against the bound shell and prints its result.
///
/// # Behavior
/// - Queries or changes desktops through the `virtual_desktop` functions.
/// - Prints a text line per result, or pretty JSON when `json` is set.
/// - `--remove` reports the desktop shown afterwards. `--left`/`--right`
///   print "No neighbor" (or `null`) at the edges.
///
/// # Error Conditions
/// - Returns the first `DesktopError` raised. Nothing is printed to stdout
///   for a failed command.
fn run(command: Command, json: bool) -> Result<()> {
    match command {
        Command::Count => {
            let count = virtual_desktop::desktop_count()?;
            if json {
                print_json(&count);
            } else {
                println!("{}", count);
            }
        }
        Command::List => {
            let infos = describe_desktops(binding::system_directory()?)?;
            if json {
                print_json(&infos);
            } else {
                for info in &infos {
                    print_desktop(info);
                }
            }
        }
        Command::Current => {
            let current = virtual_desktop::current_desktop()?;
            report_desktop(&current, json)?;
        }
        Command::Switch(index) => {
            let desktop = virtual_desktop::desktop_by_index(index)?;
            desktop.switch_to()?;
            report_desktop(&desktop, json)?;
        }
        Command::Create => {
            let desktop = virtual_desktop::create_desktop()?;
            report_desktop(&desktop, json)?;
        }
        Command::Remove { index, fallback } => {
            let desktop = virtual_desktop::desktop_by_index(index)?;
            let fallback = fallback
                .map(virtual_desktop::desktop_by_index)
                .transpose()?;
            desktop.remove(fallback.as_ref())?;
            if !json {
                println!("Removed desktop {}", index);
            }
            report_desktop(&virtual_desktop::current_desktop()?, json)?;
        }
        Command::Left(index) | Command::Right(index) => {
            let desktop = virtual_desktop::desktop_by_index(index)?;
            let neighbor = match command {
                Command::Left(_) => desktop.left_neighbor(),
                _ => desktop.right_neighbor(),
            };
            match neighbor {
                Some(neighbor) => report_desktop(&neighbor, json)?,
                None if json => print_json(&Option::<DesktopInfo>::None),
                None => println!("No neighbor"),
            }
        }
        Command::WindowDesktop(window) => {
            let info = WindowDesktopInfo {
                hwnd: window,
                desktop_id: virtual_desktop::desktop_id_owning(window)?,
            };
            if json {
                print_json(&info);
            } else {
                println!("{} {}", info.hwnd, info.desktop_id);
            }
        }
        Command::MoveWindow { window, to } => {
            let target = virtual_desktop::desktop_by_index(to)?;
            let path = target.move_window_here(window)?;
            let info = WindowMoveInfo {
                hwnd: window,
                desktop_id: target.id()?,
                path,
            };
            if json {
                print_json(&info);
            } else {
                println!(
                    "Moved {} to desktop {} ({} path)",
                    info.hwnd, info.desktop_id, info.path
                );
            }
        }
    }
    Ok(())
}

fn report_desktop(desktop: &Desktop, json: bool) -> Result<()> {
    let info = DesktopInfo {
        index: virtual_desktop::desktop_index(desktop)?.unwrap_or_default(),
        id: desktop.id()?,
        current: desktop.is_current()?,
    };
    if json {
        print_json(&info);
    } else {
        print_desktop(&info);
    }
    Ok(())
}

fn print_desktop(info: &DesktopInfo) {
    let marker = if info.current { "*" } else { " " };
    println!("{} {} {}", marker, info.index, info.id);
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize output: {}", e),
    }
}

/// Initializes logging for the process.
///
/// # Behavior
/// - When `RUST_LOG` is set, `env_logger` logs to stderr with the filters it
///   names.
/// - Otherwise a log4rs file appender writes `desktop_manager.log` in the
///   working directory, at the level from `settings.json`.
///
/// # Side Effects
/// - Truncates `desktop_manager.log` on every run.
///
/// # Error Conditions
/// - A log file or configuration that cannot be created is reported on
///   stderr and the tool runs without logging.
fn ensure_logging_initialized(settings: &Settings) {
    use log4rs::append::file::FileAppender;
    use log4rs::config::{Appender, Config, Root};
    use log4rs::encode::pattern::PatternEncoder;

    if env::var_os("RUST_LOG").is_some() {
        if let Err(e) = env_logger::try_init() {
            eprintln!("Failed to initialize logging: {}", e);
        }
        return;
    }

    let logfile = match FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new("{d} - {l} - {m}{n}")))
        .append(false)
        .build("desktop_manager.log")
    {
        Ok(logfile) => logfile,
        Err(e) => {
            eprintln!("Failed to create log file: {}", e);
            return;
        }
    };

    let config = match Config::builder()
        .appender(Appender::builder().build("file", Box::new(logfile)))
        .build(Root::builder().appender("file").build(settings.level_filter()))
    {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to build log configuration: {}", e);
            return;
        }
    };

    if let Err(e) = log4rs::init_config(config) {
        eprintln!("Failed to initialize logging: {}", e);
    }
}
