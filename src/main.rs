//! sumi
//!
//! A small terminal text editor.

use std::path::PathBuf;
use std::process::ExitCode;

use tracing::info;

use sumi::editor::Editor;
use sumi::term::Terminal;

fn main() -> ExitCode {
    init_logging();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // the Terminal guard has already restored the tty by now
            eprintln!("sumi: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to the file named by SUMI_LOG; stderr belongs to the frame being
/// drawn, so without the variable nothing is logged.
fn init_logging() {
    let Ok(path) = std::env::var("SUMI_LOG") else {
        return;
    };
    let Ok(file) = std::fs::File::create(&path) else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    info!(log = %path, "logging started");
}

fn run() -> sumi::Result<()> {
    let path = std::env::args_os().nth(1).map(PathBuf::from);

    let mut term = Terminal::new()?;
    let (columns, rows) = term.size()?;
    let mut editor = Editor::new(columns, rows);

    editor.set_greeting();
    if let Some(path) = &path {
        editor.open(path)?;
        info!(path = %path.display(), "opened");
    }

    editor.run(&mut term)
}
