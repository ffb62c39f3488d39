/// chart3d Terminal Demo - 3D charts in the terminal
///
/// Usage: chart3d-terminal [bars|pie|solids]
///
/// Controls:
///   - WASD / Arrow Keys: Move the camera
///   - E/R: Roll
///   - +/-: Zoom
///   - Space: Pause the spin
///   - Q/ESC: Quit
use std::env;
use std::io;

use chart3d_terminal::{scene, to_io_error, AppConfig, TerminalApp};

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chart3d=warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let name = env::args().nth(1).unwrap_or_else(|| "bars".to_string());
    let world = match name.as_str() {
        "bars" => scene::bar_chart(&[3.0, 5.5, -2.0, 7.0, 4.5, 1.5], &[]),
        "pie" => scene::pie_chart(&[35.0, 20.0, 15.0, 30.0], &[]),
        "solids" => scene::solids(),
        other => {
            eprintln!("Unknown scene '{other}', expected one of: bars, pie, solids");
            std::process::exit(2);
        }
    }
    .map_err(to_io_error)?;

    println!("Starting terminal renderer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(world, format!("chart3d {name}"), AppConfig::default())?;
    app.run()?;

    Ok(())
}
