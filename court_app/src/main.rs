//! Headless court demo
//!
//! Drives the simulation core with a scripted input sequence: walk to the
//! ball, pick it up, turn toward the hoop, throw, and watch the ball settle.
//! Frame deltas are jittered around 60 Hz to mimic a real display refresh.
//!
//! Usage: `court_demo [config.toml|config.ron] [level.toml|level.ron]`

use court_core::config::ConfigError;
use court_core::foundation::math::utils;
use court_core::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Demo errors
#[derive(thiserror::Error, Debug)]
enum AppError {
    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to build simulation: {0}")]
    Simulation(#[from] SimulationError),
}

/// One scripted segment: hold `keys` for `duration` seconds
struct Segment {
    label: &'static str,
    keys: KeySet,
    duration: f32,
    drag: Vec2,
}

impl Segment {
    fn new(label: &'static str, keys: KeySet, duration: f32) -> Self {
        Self {
            label,
            keys,
            duration,
            drag: Vec2::zeros(),
        }
    }

    /// Mouse drag applied once at the start of the segment
    fn with_drag(mut self, pixels_x: f32, pixels_y: f32) -> Self {
        self.drag = Vec2::new(pixels_x, pixels_y);
        self
    }
}

fn script() -> Vec<Segment> {
    vec![
        Segment::new("idle", KeySet::empty(), 0.5),
        Segment::new("reach for the ball from afar", KeySet::PICKUP, 0.1),
        Segment::new("walk toward the ball", KeySet::RIGHT, 0.8),
        Segment::new("release keys", KeySet::empty(), 0.1),
        Segment::new("pick up", KeySet::PICKUP, 0.1),
        Segment::new("crouch", KeySet::empty(), 1.2),
        // At orbit yaw zero "forward" points at the hoop (-Z).
        Segment::new("sprint toward the hoop", KeySet::FORWARD | KeySet::SPRINT, 1.0),
        Segment::new("stop", KeySet::empty(), 0.2),
        Segment::new("throw", KeySet::THROW, 0.1),
        Segment::new("follow through", KeySet::empty(), 1.5),
        Segment::new("watch the ball", KeySet::empty(), 4.0),
        // About 45 degrees of orbit at the default drag sensitivity.
        Segment::new("strafe around", KeySet::LEFT | KeySet::BACKWARD, 0.8)
            .with_drag(-157.0, 0.0),
        Segment::new("rest", KeySet::empty(), 0.5),
    ]
}

struct DemoApp {
    simulation: Simulation,
    rng: StdRng,
    orbit: CameraOrbit,
}

impl DemoApp {
    fn new(config: SimulationConfig, level: &LevelGeometry) -> Result<Self, AppError> {
        let orbit = config.camera.initial_orbit;
        let mut simulation = Simulation::new(config, level)?;
        simulation.spawn_character();
        simulation.spawn_ball();

        Ok(Self {
            simulation,
            rng: StdRng::seed_from_u64(42),
            orbit,
        })
    }

    fn frame_delta(&mut self) -> f32 {
        1.0 / 60.0 + self.rng.gen_range(-0.004..0.004)
    }

    fn run(&mut self) {
        for segment in script() {
            log::info!("== {} ==", segment.label);
            let mut input = InputSnapshot::with_keys(segment.keys)
                .with_orbit(self.orbit)
                .with_drag(segment.drag);
            input.apply_drag(&self.simulation.config().camera);
            self.orbit = input.orbit;

            let mut elapsed = 0.0;
            while elapsed < segment.duration {
                let delta = self.frame_delta();
                let output = self.simulation.tick(&input, delta);
                elapsed += output.delta;
                for event in &output.events {
                    Self::report(event);
                }
            }
            self.summarize();
        }
    }

    fn report(event: &SimulationEvent) {
        match event {
            SimulationEvent::AnimationChanged { from, to } => {
                log::debug!("animation {from} -> {to}");
            }
            SimulationEvent::BallHitBox { box_label, face } => {
                log::info!("ball bounced off {box_label} ({face:?})");
            }
            SimulationEvent::BallReset { escaped_at } => {
                log::warn!("ball escaped at {escaped_at:?}");
            }
            other => log::info!("{other:?}"),
        }
    }

    fn summarize(&self) {
        if let Some(character) = self.simulation.character() {
            log::info!(
                "character at {:?} facing {:.0}° playing {} (has ball: {})",
                character.pose.position,
                utils::rad_to_deg(character.pose.yaw),
                character.animation,
                character.has_ball()
            );
        }
        if let Some(ball) = self.simulation.ball() {
            log::info!(
                "ball at {:?} moving {:.2} m/s",
                ball.position,
                ball.speed()
            );
        }
    }
}

fn main() -> Result<(), AppError> {
    let mut args = std::env::args().skip(1);
    let config_path = args.next();
    let level_path = args.next();

    let config = SimulationConfig::load_or_default(config_path.as_deref())?;
    court_core::foundation::logging::init_with_level(&config.log_level);
    log::info!("Starting court demo");

    let level = LevelGeometry::load_or_default(level_path.as_deref())?;
    let mut app = DemoApp::new(config, &level)?;
    app.run();

    let clock = app.simulation.clock();
    log::info!(
        "Simulated {} frames over {:.2}s ({:.1} fps)",
        clock.frame_count(),
        clock.total_time(),
        clock.average_fps()
    );
    Ok(())
}
