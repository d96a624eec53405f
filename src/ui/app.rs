//! Main UI Application
//!
//! Routes terminal events to the world and draws each frame.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{Event, KeyEvent, MouseEvent};
use glam::Vec2;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

use crate::config::Settings;
use crate::entities::Axis;
use crate::interaction::{pointer_down, pointer_up, PickOutcome, ReleaseOutcome};
use crate::render::{render_scene, DrawList};
use crate::world::World;
use super::input::{key_action, pointer_action, InputAction, PointerAction};
use super::widgets::SceneWidget;

/// Without key-release events, movement stops this long after the last
/// press or auto-repeat
const HOLD_TIMEOUT: Duration = Duration::from_millis(550);

const HINTS: &str = " WASD move  Space slow  E inventory  V stations  B snapshot  Q quit";

fn axis_slot(axis: Axis) -> usize {
    match axis {
        Axis::Horizontal => 0,
        Axis::Vertical => 1,
    }
}

/// Main UI application
pub struct App {
    world: World,
    /// Paint barriers while the pointer is held
    drawing: bool,
    draw_list: DrawList,
    /// Last known pointer position in viewport pixels
    pointer: Vec2,
    pointer_held: bool,
    /// Terminal area the scene was last drawn into
    scene_area: Rect,
    /// Whether the terminal reports key releases
    release_events: bool,
    /// Last steer input per axis, for the hold timeout
    last_steer: [Option<Instant>; 2],
    fps: f32,
}

impl App {
    pub fn new(world: World, settings: &Settings, release_events: bool) -> Self {
        if !release_events {
            log::info!("Terminal does not report key releases, movement stops after {:?}", HOLD_TIMEOUT);
        }

        Self {
            world,
            drawing: settings.drawing,
            draw_list: DrawList::new(),
            pointer: Vec2::ZERO,
            pointer_held: false,
            scene_area: Rect::default(),
            release_events,
            last_steer: [None; 2],
            fps: 0.0,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn set_fps(&mut self, fps: f32) {
        self.fps = fps;
    }

    /// Handle one terminal event; returns true when the app should quit
    pub fn handle_event(&mut self, event: &Event, now: Instant) -> Result<bool> {
        match event {
            Event::Key(key) => self.handle_key(key, now),
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse);
                Ok(false)
            }
            _ => Ok(false),
        }
    }

    fn handle_key(&mut self, key: &KeyEvent, now: Instant) -> Result<bool> {
        let Some(action) = key_action(key) else {
            return Ok(false);
        };

        match action {
            InputAction::Steer { axis, direction } => {
                self.world.player.steer(axis, direction);
                self.last_steer[axis_slot(axis)] = Some(now);
            }
            InputAction::Stop(axis) => {
                self.world.player.steer(axis, 0.0);
                self.last_steer[axis_slot(axis)] = None;
            }
            InputAction::SlowDown => self.world.player.slow_down(),
            InputAction::ToggleInventory => self.world.toggle_personal_inventory(),
            InputAction::ToggleStationInventories => self.world.toggle_station_inventories(),
            InputAction::Snapshot => {
                let json = self.world.snapshot().to_json()?;
                log::info!("Snapshot (pointer at {}):\n{}", self.pointer, json);
            }
            InputAction::Quit => return Ok(true),
        }
        Ok(false)
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) {
        let Some(action) = pointer_action(mouse, self.scene_area, self.world.viewport) else {
            return;
        };
        self.pointer = action.position();

        match action {
            PointerAction::Down(pos) => {
                self.pointer_held = true;
                match pointer_down(&mut self.world, pos) {
                    PickOutcome::Nothing | PickOutcome::AlreadyHolding => {}
                    outcome => log::debug!("Pointer down at {}: {:?}", pos, outcome),
                }
            }
            PointerAction::Up(pos) => {
                self.pointer_held = false;
                match pointer_up(&mut self.world, pos) {
                    ReleaseOutcome::NotHolding => {}
                    outcome => log::debug!("Pointer up at {}: {:?}", pos, outcome),
                }
            }
            PointerAction::Move(_) => {}
        }
    }

    /// Advance one frame
    pub fn update(&mut self, now: Instant) {
        if !self.release_events {
            for axis in [Axis::Horizontal, Axis::Vertical] {
                let slot = axis_slot(axis);
                if self.last_steer[slot].is_some_and(|at| now.duration_since(at) >= HOLD_TIMEOUT) {
                    self.world.player.steer(axis, 0.0);
                    self.last_steer[slot] = None;
                }
            }
        }

        if self.drawing && self.pointer_held {
            self.world.paint_barrier(self.pointer);
        }

        self.world.update();
    }

    pub fn render(&mut self, frame: &mut Frame) {
        frame.render_widget(Clear, frame.area());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(frame.area());
        self.scene_area = chunks[0];

        self.draw_list.reset();
        render_scene(&mut self.world, &mut self.draw_list, self.pointer, self.fps);
        frame.render_widget(SceneWidget::new(self.draw_list.commands(), self.world.viewport), chunks[0]);

        let hints = Line::from(Span::styled(HINTS, Style::default().fg(Color::Rgb(120, 120, 140))));
        frame.render_widget(Paragraph::new(hints), chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use ratatui::{backend::TestBackend, Terminal};
    use crate::data::default_item_catalog;
    use crate::items::{create_random_item, SlotMetrics, SlotPos};

    fn make_app(release_events: bool) -> App {
        let world = World::new(Vec2::new(800.0, 800.0), (5, 2), SlotMetrics::default());
        App::new(world, &Settings::default(), release_events)
    }

    fn key(c: char, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent::new_with_kind(KeyCode::Char(c), KeyModifiers::NONE, kind))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent { kind, column, row, modifiers: KeyModifiers::NONE })
    }

    /// Draw once so the scene area matches a 100x50 cell scene
    fn draw(app: &mut App) {
        let mut terminal = Terminal::new(TestBackend::new(100, 51)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
    }

    #[test]
    fn test_steer_and_release() {
        let mut app = make_app(true);
        let now = Instant::now();

        app.handle_event(&key('w', KeyEventKind::Press), now).unwrap();
        assert_eq!(app.world().player.velocity, Vec2::new(0.0, -5.0));

        // Release events are reported, so holding never times out
        app.update(now + Duration::from_secs(2));
        assert_eq!(app.world().player.velocity.y, -5.0);

        app.handle_event(&key('w', KeyEventKind::Release), now).unwrap();
        assert_eq!(app.world().player.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_hold_timeout_without_release_events() {
        let mut app = make_app(false);
        let now = Instant::now();

        app.handle_event(&key('d', KeyEventKind::Press), now).unwrap();
        app.update(now + Duration::from_millis(100));
        assert_eq!(app.world().player.velocity.x, 5.0);

        app.update(now + HOLD_TIMEOUT);
        assert_eq!(app.world().player.velocity.x, 0.0);
    }

    #[test]
    fn test_quit_and_toggles() {
        let mut app = make_app(true);
        let now = Instant::now();

        assert!(!app.handle_event(&key('e', KeyEventKind::Press), now).unwrap());
        assert!(app.world().personal.is_open());
        assert!(!app.handle_event(&key('b', KeyEventKind::Press), now).unwrap());
        assert!(app.handle_event(&key('q', KeyEventKind::Press), now).unwrap());
    }

    #[test]
    fn test_drag_item_into_inventory() {
        let mut app = make_app(true);
        let mut rng = StdRng::seed_from_u64(12);
        let item = create_random_item(&default_item_catalog(), Vec2::new(100.0, 100.0), &mut rng).unwrap();
        let id = app.world_mut().add_item(item);
        app.world_mut().toggle_personal_inventory();
        draw(&mut app);

        let now = Instant::now();
        // Cell (15, 8) is pixel (124, 136)
        app.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 15, 8), now).unwrap();
        assert_eq!(app.world().player.held(), Some(id));

        // Cell (2, 43) is pixel (20, 696), inside slot (0, 0)
        app.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 2, 43), now).unwrap();
        draw(&mut app);
        app.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 2, 43), now).unwrap();

        assert_eq!(app.world().personal.get(SlotPos::new(0, 0)), Some(id));
        assert!(!app.world().player.is_holding());
    }

    #[test]
    fn test_drawing_paints_while_held() {
        let world = World::new(Vec2::new(800.0, 800.0), (5, 2), SlotMetrics::default());
        let settings = Settings { drawing: true, ..Settings::default() };
        let mut app = App::new(world, &settings, true);
        draw(&mut app);
        let now = Instant::now();

        app.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 50, 10), now).unwrap();
        app.update(now);
        app.update(now);
        app.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 50, 10), now).unwrap();
        app.update(now);

        assert_eq!(app.world().barriers.len(), 2);
    }
}
