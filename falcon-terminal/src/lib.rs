/// Terminal front end: the craft drawn as ASCII, flown with the mouse
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use falcon_core::{Camera, GeometryError, Model};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub mod animation;
pub mod config;
pub mod renderer;
pub mod scene;

pub use renderer::AsciiRenderer;
pub use scene::FlightScene;

use config::{FIRE_KEY, QUIT_KEYS, TARGET_FPS};

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: u32 = 2;

/// Main application struct for the terminal flight view
pub struct TerminalApp {
    scene: FlightScene,
    camera: Camera,
    renderer: AsciiRenderer,
    columns: u16,
    rows: u16,
    running: bool,
    last_frame: Instant,
    last_tick: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new() -> io::Result<Self> {
        let (columns, rows) = terminal::size()?;
        let camera = Camera::new(columns as u32, rows as u32 * CELL_ASPECT);
        let model = Model::build(&camera.position_handle()).map_err(geometry_error)?;
        info!(parts = model.root().part_count(), columns, rows, "craft ready");

        Ok(Self {
            scene: FlightScene::new(model, camera.position_handle()),
            camera,
            renderer: AsciiRenderer::new(columns as usize, rows as usize),
            columns,
            rows,
            running: true,
            last_frame: Instant::now(),
            last_tick: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            EnableMouseCapture
        )?;

        let result = self.main_loop();

        // Cleanup
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;
        terminal::disable_raw_mode()?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / TARGET_FPS);

        while self.running {
            let frame_start = Instant::now();

            // Drain every pending event so pointer motion never lags a frame
            while event::poll(Duration::from_millis(0))? {
                self.handle_input(event::read()?)?;
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

        info!("leaving flight view");
        Ok(())
    }

    fn handle_input(&mut self, event: Event) -> io::Result<()> {
        match event {
            Event::Key(KeyEvent { code, kind, .. }) => match key_action(code, kind) {
                Some(KeyAction::Quit) => self.running = false,
                Some(KeyAction::Fire) => {
                    self.scene.fire().map_err(geometry_error)?;
                    debug!("fired");
                }
                None => {}
            },
            Event::Mouse(MouseEvent {
                kind,
                column,
                row,
                ..
            }) => {
                let (x, y) = scene::viewport_point(column, row, self.columns, self.rows);
                match kind {
                    MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                        self.scene.pointer_moved(x, y);
                    }
                    MouseEventKind::Down(MouseButton::Left) => self.scene.clicked(y),
                    _ => {}
                }
            }
            Event::Resize(columns, rows) => self.resize(columns, rows),
            _ => {}
        }
        Ok(())
    }

    fn resize(&mut self, columns: u16, rows: u16) {
        debug!(columns, rows, "terminal resized");
        self.columns = columns;
        self.rows = rows;
        self.camera.aspect = columns as f32 / (rows as u32 * CELL_ASPECT).max(1) as f32;
        self.renderer = AsciiRenderer::new(columns as usize, rows as usize);
    }

    fn update(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_tick).as_secs_f32();
        self.last_tick = now;
        self.scene.advance(dt);
    }

    fn render(&mut self) -> io::Result<()> {
        self.renderer.clear();
        self.renderer.render_part(self.scene.model().root(), &self.camera);
        for blast in self.scene.blasts() {
            self.renderer.render_part(blast, &self.camera);
        }

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Falcon | FPS: {:.1} | Mouse=Steer Click=Loop Space=Fire Q=Quit",
                self.fps
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyAction {
    Quit,
    Fire,
}

/// Action bound to a key event; releases and repeats are ignored
fn key_action(code: KeyCode, kind: KeyEventKind) -> Option<KeyAction> {
    if kind != KeyEventKind::Press {
        return None;
    }
    if QUIT_KEYS.contains(&code) {
        Some(KeyAction::Quit)
    } else if code == FIRE_KEY {
        Some(KeyAction::Fire)
    } else {
        None
    }
}

fn geometry_error(error: GeometryError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, error)
}
