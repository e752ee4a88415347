use crate::game_automation::{CaptureRegion, SessionConfig};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Run,
    Screenshot,
    ListWindows,
}

#[derive(Debug)]
pub struct Args {
    pub mode: Mode,
    pub debug_mode: bool,
    pub session: SessionConfig,
}

impl Args {
    pub fn parse() -> Option<Self> {
        let args: Vec<String> = env::args().skip(1).collect();
        Self::parse_from(&args)
    }

    /// Parse flags (program name excluded); `None` means exit without running
    pub fn parse_from(args: &[String]) -> Option<Self> {
        let mut mode = Mode::Run;
        let mut debug_mode = false;
        let mut session = SessionConfig::default();

        for arg in args {
            if arg == "--help" || arg == "-h" {
                print_help();
                return None;
            } else if arg == "--version" || arg == "-v" {
                println!(
                    "Game Click Run v{} (© {} Vigor Solutions)",
                    env!("APP_VERSION_DISPLAY"),
                    env!("APP_BUILD_YEAR")
                );
                return None;
            } else if arg == "--debug" {
                debug_mode = true;
            } else if arg == "--screenshot" || arg == "-s" {
                mode = Mode::Screenshot;
            } else if arg == "--list-windows" {
                mode = Mode::ListWindows;
            } else if let Some(val) = arg.strip_prefix("--window=") {
                if val.is_empty() {
                    eprintln!("❌ Window title must not be empty");
                    return None;
                }
                session.window_title = val.to_string();
            } else if let Some(val) = arg.strip_prefix("--region=") {
                match CaptureRegion::parse(val) {
                    Some(region) if region.is_valid() => session.region = Some(region),
                    _ => {
                        eprintln!("❌ Invalid region '{}', expected x,y,width,height", val);
                        return None;
                    }
                }
            } else if let Some(val) = arg.strip_prefix("--templates=") {
                session.template_dir = Some(PathBuf::from(val));
            } else if let Some(val) = arg.strip_prefix("--threshold=") {
                match val.parse::<f32>() {
                    Ok(t) if (0.0..=1.0).contains(&t) => session.threshold = t,
                    _ => {
                        eprintln!("❌ Invalid threshold value: {}", val);
                        return None;
                    }
                }
            } else if let Some(val) = arg.strip_prefix("--interval=") {
                match val.parse::<u64>() {
                    Ok(ms) => session.frame_interval = Duration::from_millis(ms),
                    Err(_) => {
                        eprintln!("❌ Invalid interval value: {}", val);
                        return None;
                    }
                }
            } else if let Some(val) = arg.strip_prefix("--confirm-delay=") {
                match val.parse::<f64>() {
                    Ok(secs) if secs.is_finite() && secs >= 0.0 => {
                        session.confirm_delay = Duration::from_secs_f64(secs)
                    }
                    _ => {
                        eprintln!("❌ Invalid confirm delay value: {}", val);
                        return None;
                    }
                }
            } else {
                eprintln!("❌ Unknown argument: {}", arg);
                print_help();
                return None;
            }
        }

        Some(Args {
            mode,
            debug_mode,
            session,
        })
    }
}

fn print_help() {
    println!("🤖 Desktop Game Click Automation");
    println!();
    println!("USAGE:");
    println!("    game-click-run [FLAGS]");
    println!();
    println!("FLAGS:");
    println!("    (no flags)            Run the automation loop");
    println!("    --window=TITLE        Target window title substring (default: TelegramDesktop)");
    println!("    --region=X,Y,W,H      Monitored region relative to the window (default: whole window)");
    println!("    --templates=DIR       Directory holding play_button.png, close_button.png,");
    println!("                          ice_cube.png and green_object.png");
    println!("    --threshold=F         Match threshold 0.0-1.0 (default: 0.8)");
    println!("    --interval=MS         Pause between frames in milliseconds (default: 50)");
    println!("    --confirm-delay=SECS  Button visibility required before clicking (default: 5)");
    println!("    --screenshot, -s      Save the monitored region to cli-screenshot.png");
    println!("    --list-windows        Print the titles of all visible windows");
    println!("    --debug               Enable debug output");
    println!("    --help, -h            Show this help message");
    println!("    --version, -v         Show version information");
    println!();
    println!("While running, press 'q' to stop.");
    println!();
    println!("EXAMPLES:");
    println!("    game-click-run --region=0,80,420,640");
    println!("    game-click-run --window=\"Telegram\" --screenshot");
    println!("    game-click-run --templates=./templates --debug");
}
