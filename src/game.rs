//! Frame loop controller
//!
//! Each frame: drain events, step the ball, compose, present, pause. A quit
//! ends the frame right after event handling, so nothing is simulated or
//! drawn once the world is over.

use anyhow::Result;
use glam::Vec2;

use crate::platform::{Backend, Event};
use crate::renderer::{Surface, scene};
use crate::settings::Tuning;
use crate::sim::{self, Ball};
use crate::time::FrameClock;
use crate::world::World;

/// Game instance holding all session state
pub struct Game {
    world: World,
    ball: Ball,
    frame: Surface,
    tuning: Tuning,
    clock: FrameClock,
}

impl Game {
    /// Take ownership of the loaded world and key out the sprite background
    pub fn new(mut world: World, ball: Ball, tuning: Tuning) -> Self {
        world
            .ball_sheet_mut()
            .set_color_key(Some(tuning.color_key()));

        Self {
            world,
            ball,
            frame: Surface::new(tuning.screen_width, tuning.screen_height),
            tuning,
            clock: FrameClock::new(),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn is_over(&self) -> bool {
        self.world.is_over()
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Quit => self.world.finish(),
            Event::MouseReleased { x, y } => {
                sim::flick(&mut self.ball, Vec2::new(x, y), self.tuning.speed_coefficient);
                log::debug!(
                    "Flick toward ({x}, {y}) from {:?}, velocity {:?}",
                    self.ball.pos,
                    self.ball.vel
                );
            }
        }
    }

    pub fn handle_events(&mut self, events: impl IntoIterator<Item = Event>) {
        for event in events {
            self.handle_event(event);
        }
    }

    /// Advance the ball by one frame
    pub fn update(&mut self) {
        sim::step(&mut self.ball, self.tuning.friction_coefficient);
    }

    /// Compose the current state into the screen frame
    pub fn render(&mut self) -> &Surface {
        scene::draw(&mut self.frame, &self.world, &self.ball, self.tuning.ball_size);
        &self.frame
    }

    /// Run one loop iteration against `backend`
    pub fn frame<B: Backend>(&mut self, backend: &mut B) -> Result<()> {
        let events = backend.poll_events();
        self.handle_events(events);
        if self.is_over() {
            return Ok(());
        }

        self.update();
        backend.present(self.render())?;

        if let Some(fps) = self.clock.tick() {
            log::debug!(
                "{fps:.1} fps, ball at {:?} moving {:?}",
                self.ball.pos,
                self.ball.vel
            );
        }

        backend.sleep(self.tuning.frame_delay());
        Ok(())
    }

    /// Loop until a quit arrives or presenting fails
    pub fn run_loop<B: Backend>(&mut self, backend: &mut B) -> Result<()> {
        while !self.is_over() {
            self.frame(backend)?;
        }
        Ok(())
    }

    /// Hand back the world for release
    pub fn into_world(self) -> World {
        self.world
    }
}

/// Load the world, run the loop on `backend`, then tear everything down.
///
/// The backend is shut down on every path, including asset failures.
pub fn run<B: Backend>(mut backend: B, tuning: &Tuning) -> Result<()> {
    if let Ok(json) = tuning.to_json() {
        log::debug!("Tuning: {json}");
    }

    let (world, ball) = match World::initialize(tuning) {
        Ok(loaded) => loaded,
        Err(e) => {
            backend.shutdown();
            return Err(e);
        }
    };

    let mut game = Game::new(world, ball, tuning.clone());
    let result = game.run_loop(&mut backend);
    log::info!("Loop ended after {} frames", game.clock.frame_index());

    game.into_world().release();
    backend.shutdown();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use anyhow::bail;
    use image::{Rgba, RgbaImage};
    use std::cell::Cell;
    use std::collections::VecDeque;
    use std::rc::Rc;
    use std::time::Duration;

    const EPS: f32 = 1e-4;

    /// In-memory backend replaying one batch of events per frame
    #[derive(Default)]
    struct ScriptedBackend {
        script: VecDeque<Vec<Event>>,
        presents: usize,
        last_frame: Option<Surface>,
        sleeps: Vec<Duration>,
        fail_present: bool,
        shut_down: Rc<Cell<bool>>,
    }

    impl ScriptedBackend {
        fn new(script: Vec<Vec<Event>>) -> Self {
            Self {
                script: script.into(),
                ..Default::default()
            }
        }
    }

    impl Backend for ScriptedBackend {
        fn poll_events(&mut self) -> Vec<Event> {
            self.script.pop_front().unwrap_or_default()
        }

        fn present(&mut self, frame: &Surface) -> Result<()> {
            if self.fail_present {
                bail!("device lost");
            }
            self.presents += 1;
            self.last_frame = Some(frame.clone());
            Ok(())
        }

        fn sleep(&mut self, duration: Duration) {
            self.sleeps.push(duration);
        }

        fn shutdown(self) {
            self.shut_down.set(true);
        }
    }

    const GREEN: [u8; 4] = [0, 128, 0, 255];
    const WHITE: [u8; 4] = [255, 255, 255, 255];

    fn test_game() -> Game {
        let table = Surface::from_image(RgbaImage::from_pixel(
            SCREEN_WIDTH,
            SCREEN_HEIGHT,
            Rgba(GREEN),
        ));
        let mut sheet = RgbaImage::from_pixel(2 * BALL_SIZE, BALL_SIZE, Rgba([255, 0, 255, 255]));
        sheet.put_pixel(BALL_SIZE / 2, BALL_SIZE / 2, Rgba(WHITE));
        let world = World::from_surfaces(table, Surface::from_image(sheet));
        let ball = Ball::centered(SCREEN_WIDTH, SCREEN_HEIGHT);
        Game::new(world, ball, Tuning::default())
    }

    fn release_at(x: f32, y: f32) -> Event {
        Event::MouseReleased { x, y }
    }

    #[test]
    fn test_new_keys_ball_sheet() {
        let game = test_game();
        assert_eq!(
            game.world().ball_sheet().color_key(),
            Some(crate::renderer::ColorKey::new(255, 0, 255))
        );
    }

    #[test]
    fn test_click_scenario() {
        let mut game = test_game();
        let mut backend = ScriptedBackend::new(vec![vec![release_at(744.0, 362.5)], vec![]]);

        game.frame(&mut backend).unwrap();
        assert!((game.ball().pos - Vec2::new(654.0, 362.5)).length() < EPS);
        assert!((game.ball().vel - Vec2::new(9.5, 0.0)).length() < EPS);

        game.frame(&mut backend).unwrap();
        assert!((game.ball().pos - Vec2::new(663.5, 362.5)).length() < EPS);
        assert!((game.ball().vel - Vec2::new(9.025, 0.0)).length() < EPS);

        assert_eq!(backend.presents, 2);
        assert_eq!(backend.sleeps, vec![Duration::from_millis(10); 2]);
    }

    #[test]
    fn test_last_click_in_a_frame_wins() {
        let mut game = test_game();
        game.handle_events([release_at(0.0, 0.0), release_at(744.0, 462.5)]);
        assert!((game.ball().vel - Vec2::new(10.0, 10.0)).length() < EPS);
    }

    #[test]
    fn test_quit_stops_before_physics_and_render() {
        let mut game = test_game();
        let mut backend = ScriptedBackend::new(vec![
            vec![],
            vec![release_at(744.0, 362.5), Event::Quit],
            vec![release_at(0.0, 0.0)],
        ]);

        game.run_loop(&mut backend).unwrap();

        assert!(game.is_over());
        // Only the first frame was drawn; the quit frame skipped step and present
        assert_eq!(backend.presents, 1);
        assert_eq!(backend.sleeps.len(), 1);
        assert_eq!(game.ball().pos, Vec2::new(644.0, 362.5));
        // The release in the quit frame was still applied before the quit
        assert!((game.ball().vel - Vec2::new(10.0, 0.0)).length() < EPS);
        // Third batch was never polled
        assert_eq!(backend.script.len(), 1);
    }

    #[test]
    fn test_idle_frames_do_not_move_ball() {
        let mut game = test_game();
        let mut script = vec![vec![]; 50];
        script.push(vec![Event::Quit]);
        let mut backend = ScriptedBackend::new(script);

        game.run_loop(&mut backend).unwrap();
        assert_eq!(game.ball().pos, Vec2::new(644.0, 362.5));
        assert_eq!(backend.presents, 50);
    }

    #[test]
    fn test_rendered_frame_shows_table_and_ball() {
        let mut game = test_game();
        let mut backend = ScriptedBackend::new(vec![vec![]]);
        game.frame(&mut backend).unwrap();

        let frame = backend.last_frame.as_ref().unwrap();
        assert_eq!(frame.size(), (SCREEN_WIDTH, SCREEN_HEIGHT));
        assert_eq!(frame.pixel(0, 0), Some(GREEN));
        // Ball sprite top-left lands at (644, 362)
        let c = BALL_SIZE / 2;
        assert_eq!(frame.pixel(644 + c, 362 + c), Some(WHITE));
        // Magenta around it is keyed out
        assert_eq!(frame.pixel(644, 362), Some(GREEN));
        // Second sprite frame in the sheet is never drawn
        assert_eq!(frame.pixel(644 + BALL_SIZE + c, 362 + c), Some(GREEN));
    }

    #[test]
    fn test_present_failure_ends_loop() {
        let mut game = test_game();
        let mut backend = ScriptedBackend::new(vec![]);
        backend.fail_present = true;

        let err = game.run_loop(&mut backend).unwrap_err();
        assert!(err.to_string().contains("device lost"));
        assert!(backend.sleeps.is_empty());
    }

    #[test]
    fn test_run_shuts_backend_down_when_assets_missing() {
        let backend = ScriptedBackend::new(vec![]);
        let shut_down = backend.shut_down.clone();
        let tuning = Tuning {
            table_path: "missing/table.bmp".into(),
            ..Tuning::default()
        };

        let err = run(backend, &tuning).unwrap_err();
        assert!(format!("{err:#}").contains("missing/table.bmp"));
        assert!(shut_down.get());
    }

    #[test]
    fn test_run_full_session() {
        let dir = std::env::temp_dir().join(format!("bowl-table-game-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let table_path = dir.join("table.bmp");
        let sheet_path = dir.join("balls.bmp");
        image::RgbImage::from_pixel(SCREEN_WIDTH, SCREEN_HEIGHT, image::Rgb([0, 128, 0]))
            .save(&table_path)
            .unwrap();
        image::RgbImage::from_pixel(BALL_SIZE, BALL_SIZE, image::Rgb([255, 0, 255]))
            .save(&sheet_path)
            .unwrap();
        let tuning = Tuning {
            table_path,
            ball_sheet_path: sheet_path,
            ..Tuning::default()
        };

        let backend = ScriptedBackend::new(vec![
            vec![release_at(744.0, 362.5)],
            vec![],
            vec![Event::Quit],
        ]);
        let shut_down = backend.shut_down.clone();

        run(backend, &tuning).unwrap();
        assert!(shut_down.get());
    }
}
