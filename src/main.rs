//! Wayfarer - Entry Point
//!
//! Initializes the terminal, builds the world, and runs the frame loop.

use std::io;
use std::time::{Duration, Instant};
use std::fs::OpenOptions;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{
    backend::CrosstermBackend,
    Terminal,
};

use wayfarer::config::{load_settings, Settings};
use wayfarer::data::DataManager;
use wayfarer::ui::App;
use wayfarer::world::build_world;

/// How often frame statistics are logged, in frames
const STATS_INTERVAL: u64 = 1000;

fn main() -> Result<()> {
    // Initialize logging to file (to avoid interfering with TUI)
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("wayfarer.log")
        .or_else(|_| OpenOptions::new().write(true).open("/dev/null"))?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    )
    .target(env_logger::Target::Pipe(Box::new(log_file)))
    .init();

    log::info!("Starting Wayfarer v{}", env!("CARGO_PKG_VERSION"));

    let settings = load_settings();
    let data = DataManager::new();
    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("World seed: {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);
    let world = build_world(&settings, data.item_catalog(), &mut rng);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let release_events = supports_keyboard_enhancement().unwrap_or(false);
    if release_events {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(world, &settings, release_events);

    // Run the frame loop
    let result = run_loop(&mut terminal, &mut app, &settings);

    // Restore terminal
    if release_events {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Report any errors
    if let Err(ref e) = result {
        log::error!("Wayfarer exited with error: {}", e);
        eprintln!("Error: {}", e);
    }

    log::info!("Wayfarer shut down cleanly");
    result
}

/// Main frame loop
fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    settings: &Settings,
) -> Result<()> {
    let frame_time = Duration::from_secs_f64(1.0 / settings.target_fps.max(1) as f64);
    let start = Instant::now();
    let mut last_frame = start;
    let mut last_stats = (start, 0u64);
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        let delta = frame_start.duration_since(last_frame);
        last_frame = frame_start;
        frame += 1;

        if delta > Duration::ZERO {
            app.set_fps(1.0 / delta.as_secs_f32());
        }

        if frame % STATS_INTERVAL == 0 {
            let (since, since_frame) = last_stats;
            let elapsed = frame_start.duration_since(since).as_secs_f64();
            log::info!(
                "Player position: {}, frame: {}, elapsed: {:.1}s, fps: {:.1}",
                app.world().player.position,
                frame,
                frame_start.duration_since(start).as_secs_f64(),
                (frame - since_frame) as f64 / elapsed.max(f64::EPSILON)
            );
            last_stats = (frame_start, frame);
        }

        // Handle every pending event before simulating the frame
        while event::poll(Duration::from_millis(0))? {
            let ev = event::read()?;
            match app.handle_event(&ev, frame_start) {
                Ok(true) => return Ok(()),
                Ok(false) => {}
                Err(e) => log::warn!("Input handling error: {}", e),
            }
        }

        app.update(frame_start);

        terminal.draw(|f| {
            app.render(f);
        })?;

        // Frame rate limiting
        let spent = frame_start.elapsed();
        if spent < frame_time {
            std::thread::sleep(frame_time - spent);
        }
    }
}
