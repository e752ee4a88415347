use game_click_run::args::{Args, Mode};
use game_click_run::desktop::{StopSignal, WindowCapture, list_window_titles, spawn_stop_listener};
use game_click_run::{SessionConfig, SessionOutcome, run_session};
use std::io::{self, BufRead, Write};
use std::path::Path;

fn main() {
    let Some(args) = Args::parse() else {
        return;
    };

    let default_filter = if args.debug_mode { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match args.mode {
        Mode::ListWindows => match list_window_titles() {
            Ok(titles) if titles.is_empty() => println!("❌ No windows found"),
            Ok(titles) => titles.iter().for_each(|t| println!("🪟 {t}")),
            Err(e) => println!("❌ List error: {e}"),
        },
        Mode::Screenshot => screenshot(&args.session),
        Mode::Run => run(&args.session),
    }
}

fn screenshot(config: &SessionConfig) {
    println!("📸 Capturing '{}'...", config.window_title);
    let path = Path::new("cli-screenshot.png");
    match WindowCapture::open(&config.window_title, config.region)
        .and_then(|mut capture| capture.save_screenshot(path))
    {
        Ok((w, h)) => println!("✅ Screenshot {w}x{h} saved to {}", path.display()),
        Err(e) => println!("❌ Screenshot failed: {e}"),
    }
}

fn run(config: &SessionConfig) {
    let stop = StopSignal::new();
    if let Err(e) = spawn_stop_listener(stop.clone()) {
        log::error!("Failed to start keyboard listener: {e}");
    }

    loop {
        match run_session(config, &stop) {
            SessionOutcome::Stopped => println!("⏹️ Script stopped."),
            SessionOutcome::Failed(reason) => println!("❌ An error occurred: {reason}"),
        }

        if !prompt_restart() {
            break;
        }
        println!("🔄 Restarting...");
    }
}

/// Ask the operator whether to run another session; only "r" restarts
fn prompt_restart() -> bool {
    print!("Press 'r' to restart or any other key to exit: ");
    if let Err(e) = io::stdout().flush() {
        log::debug!("Failed to flush restart prompt: {e}");
    }

    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(_) => is_restart_answer(&line),
        Err(e) => {
            log::error!("Failed to read restart answer: {e}");
            false
        }
    }
}

fn is_restart_answer(line: &str) -> bool {
    line.trim() == "r"
}
