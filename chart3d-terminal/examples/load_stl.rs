/// Example: Load and render an STL file in the terminal
///
/// Usage: cargo run --example load_stl -- path/to/file.stl
use std::env;
use std::fs;
use std::io;

use chart3d_core::{stl, Color, Object3D, Point3D, World};
use chart3d_terminal::{scene, to_io_error, AppConfig, TerminalApp};

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chart3d=warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let mut world = World::new();

    let title = if let Some(stl_path) = args.get(1) {
        println!("Loading STL file: {stl_path}");
        let data = fs::read(stl_path).map_err(|e| {
            io::Error::new(e.kind(), format!("Failed to read STL file: {e}"))
        })?;
        let mesh = stl::parse_stl(&data, scene::PALETTE[0]).map_err(to_io_error)?;
        println!(
            "Loaded {} faces over {} vertices",
            mesh.face_count(),
            mesh.vertex_count()
        );
        world.add(mesh);
        stl_path.clone()
    } else {
        eprintln!("Usage: {} <stl-file>", args[0]);
        eprintln!("\nNo STL file provided, using default cube...");
        world.add(Object3D::cube(8.0, Point3D::ORIGIN, Color::GRAY).map_err(to_io_error)?);
        "cube".to_string()
    };

    println!("Starting terminal renderer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(world, title, AppConfig::default())?;
    app.run()?;

    Ok(())
}
