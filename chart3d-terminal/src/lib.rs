/// Terminal host for 3D charts: paints frames and drives the view point
use chart3d_core::{RenderConfig, Renderer, ViewPoint3D, World};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use std::f64::consts::PI;
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use tracing::debug;

pub mod renderer;
pub mod scene;

pub use renderer::AsciiRenderer;

/// Map a core error to an I/O error for the terminal boundary
pub fn to_io_error(err: chart3d_core::Error) -> io::Error {
    let kind = match err {
        chart3d_core::Error::Stl(_) => io::ErrorKind::InvalidData,
        _ => io::ErrorKind::InvalidInput,
    };
    io::Error::new(kind, err)
}

/// Interaction settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppConfig {
    /// Tilt per key press, radians
    pub rotate_increment: f64,
    /// Pan per key press, radians
    pub pan_increment: f64,
    /// Roll per key press, radians
    pub roll_increment: f64,
    /// Change of viewing distance per key press
    pub zoom_step: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    pub frame_rate: u32,
    /// Pan applied every frame while not paused
    pub spin: f64,
    /// Projection distance as a multiple of the terminal height
    pub projection_scale: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rotate_increment: PI / 60.0,
            pan_increment: PI / 60.0,
            roll_increment: PI / 60.0,
            zoom_step: 1.0,
            min_distance: 5.0,
            max_distance: 100.0,
            frame_rate: 30,
            spin: 0.005,
            projection_scale: 1.25,
        }
    }
}

/// Main application struct for terminal chart rendering
pub struct TerminalApp {
    world: World,
    view_point: ViewPoint3D,
    config: AppConfig,
    renderer: Renderer,
    canvas: AsciiRenderer,
    title: String,
    running: bool,
    paused: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(world: World, title: impl Into<String>, config: AppConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Self::with_size(world, title, config, width as usize, height as usize)
    }

    /// Create an app for a canvas of the given size, without touching the terminal
    pub fn with_size(
        world: World,
        title: impl Into<String>,
        config: AppConfig,
        width: usize,
        height: usize,
    ) -> io::Result<Self> {
        Ok(Self {
            world,
            view_point: ViewPoint3D::default(),
            config,
            renderer: Self::renderer_for(&config, height)?,
            canvas: AsciiRenderer::new(width, height),
            title: title.into(),
            running: true,
            paused: false,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    fn renderer_for(config: &AppConfig, height: usize) -> io::Result<Renderer> {
        let render_config = RenderConfig {
            projection_distance: config.projection_scale * height.max(1) as f64,
            ..RenderConfig::default()
        };
        Renderer::new(render_config).map_err(to_io_error)
    }

    pub fn view_point(&self) -> &ViewPoint3D {
        &self.view_point
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / u64::from(self.config.frame_rate.max(1)));

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::from_millis(0))? {
                match event::read()? {
                    Event::Key(KeyEvent { code, .. }) => self.handle_key(code)?,
                    Event::Resize(width, height) => self.resize(width as usize, height as usize)?,
                    _ => {}
                }
            }

            self.update();
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    /// Apply one key press to the view point
    pub fn handle_key(&mut self, code: KeyCode) -> io::Result<()> {
        let c = self.config;
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Char('w') | KeyCode::Up => {
                self.view_point = self.view_point.move_up_down(c.rotate_increment);
            }
            KeyCode::Char('s') | KeyCode::Down => {
                self.view_point = self.view_point.move_up_down(-c.rotate_increment);
            }
            KeyCode::Char('a') | KeyCode::Left => {
                self.view_point = self.view_point.pan_left_right(-c.pan_increment);
            }
            KeyCode::Char('d') | KeyCode::Right => {
                self.view_point = self.view_point.pan_left_right(c.pan_increment);
            }
            KeyCode::Char('e') => {
                self.view_point = self.view_point.roll(c.roll_increment);
            }
            KeyCode::Char('r') => {
                self.view_point = self.view_point.roll(-c.roll_increment);
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.zoom(-c.zoom_step)?;
            }
            KeyCode::Char('-') => {
                self.zoom(c.zoom_step)?;
            }
            KeyCode::Char(' ') => {
                self.paused = !self.paused;
            }
            _ => {}
        }
        Ok(())
    }

    fn zoom(&mut self, delta: f64) -> io::Result<()> {
        let rho = (self.view_point.rho() + delta)
            .clamp(self.config.min_distance, self.config.max_distance);
        self.view_point = self.view_point.with_rho(rho).map_err(to_io_error)?;
        debug!(rho, "Zoomed");
        Ok(())
    }

    fn resize(&mut self, width: usize, height: usize) -> io::Result<()> {
        self.canvas = AsciiRenderer::new(width, height);
        self.renderer = Self::renderer_for(&self.config, height)?;
        Ok(())
    }

    fn update(&mut self) {
        // Continuous slow pan for demo effect
        if !self.paused {
            self.view_point = self.view_point.pan_left_right(self.config.spin);
        }
    }

    /// Paint the current world into the canvas
    pub fn paint(&mut self) -> &AsciiRenderer {
        let frame = self.renderer.render(&self.world, &self.view_point);
        self.canvas.clear();
        self.canvas.render_frame(&frame);
        &self.canvas
    }

    fn render(&mut self) -> io::Result<()> {
        self.paint();

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.canvas.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "{} | FPS: {:.1} | {} | WASD/Arrows=Move E/R=Roll +/-=Zoom Space=Pause Q=Quit",
                self.title, self.fps, self.view_point
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> TerminalApp {
        let world = scene::bar_chart(&[2.0, 4.0, 3.0], &[]).unwrap();
        TerminalApp::with_size(world, "test", AppConfig::default(), 80, 24).unwrap()
    }

    #[test]
    fn test_keys_move_view_point() {
        let mut app = app();
        let start = *app.view_point();

        app.handle_key(KeyCode::Right).unwrap();
        assert!(app.view_point().theta() > start.theta());

        app.handle_key(KeyCode::Char('e')).unwrap();
        assert!(app.view_point().calc_roll_angle() > 0.0);

        app.handle_key(KeyCode::Up).unwrap();
        assert!(app.view_point().phi() < start.phi());

        app.handle_key(KeyCode::Char('q')).unwrap();
        assert!(!app.is_running());
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut app = app();
        for _ in 0..200 {
            app.handle_key(KeyCode::Char('+')).unwrap();
        }
        assert_eq!(app.view_point().rho(), AppConfig::default().min_distance);
        for _ in 0..200 {
            app.handle_key(KeyCode::Char('-')).unwrap();
        }
        assert_eq!(app.view_point().rho(), AppConfig::default().max_distance);
    }

    #[test]
    fn test_paint_draws_the_chart() {
        let mut app = app();
        let canvas = app.paint();
        let painted = (0..canvas.height())
            .flat_map(|y| (0..canvas.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| canvas.cell(x, y) != Some(' '))
            .count();
        assert!(painted > 0);
    }

    #[test]
    fn test_error_mapping() {
        let err = to_io_error(chart3d_core::Error::Stl("bad".into()));
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        let err = to_io_error(chart3d_core::Error::TooFewSegments(1));
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
