/// Falcon Terminal - procedural spacecraft in the terminal
///
/// Controls:
///   - Mouse: steer the craft
///   - Left click: loop (upward in the top half, downward below)
///   - Space: fire the turrets
///   - Q/ESC: Quit
use std::io;
use falcon_terminal::config::DEFAULT_LOG_FILTER;
use falcon_terminal::TerminalApp;
use tracing_subscriber::EnvFilter;

fn main() -> io::Result<()> {
    // Logs go to stderr so they never tear the alternate screen on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(io::stderr)
        .init();

    let mut app = TerminalApp::new()?;
    app.run()
}
