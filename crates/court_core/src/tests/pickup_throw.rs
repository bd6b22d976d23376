//! Pickup and throw flows through the full tick order

use approx::assert_relative_eq;

use super::harness::*;
use crate::animation::AnimationStateId;
use crate::events::SimulationEvent;
use crate::foundation::math::Vec3;
use crate::input::KeySet;

#[test]
fn test_pickup_rejected_then_accepted() {
    let mut simulation = court_simulation();

    // Ball rests at (3, r, 0), three meters away.
    let events = step(&mut simulation, KeySet::PICKUP, DT);
    assert_eq!(
        count(&events, |e| matches!(e, SimulationEvent::PickupRejected { .. })),
        1
    );
    assert!(!simulation.character().unwrap().is_transitioning());

    simulation.character_mut().unwrap().pose.position = Vec3::new(2.2, 0.0, 0.0);
    step(&mut simulation, KeySet::empty(), DT);
    let events = step(&mut simulation, KeySet::PICKUP, DT);
    assert!(events.contains(&SimulationEvent::PickupStarted));
    assert!(simulation.character().unwrap().is_transitioning());
    assert_eq!(simulation.animator().current(), AnimationStateId::CrouchDown);

    let mut ticks = 0;
    while simulation.character().unwrap().is_transitioning() {
        step(&mut simulation, KeySet::empty(), DT);
        ticks += 1;
        assert!(ticks <= 70, "crouch never completed");
    }
    // One second of crouch at 60 Hz, give or take a tick of rounding.
    assert!((60..=61).contains(&ticks));

    let character = simulation.character().unwrap();
    assert!(character.has_ball());
    assert!(character.ball_state.is_crouched);
    assert_eq!(character.animation, AnimationStateId::HoldingBall);
    assert_eq!(simulation.animator().current(), AnimationStateId::HoldingBall);
}

#[test]
fn test_crouch_locks_movement_and_keys() {
    let mut simulation = court_simulation();
    simulation.character_mut().unwrap().pose.position = Vec3::new(2.2, 0.0, 0.0);
    step(&mut simulation, KeySet::PICKUP, DT);
    let start = simulation.character().unwrap().pose;

    // Hold movement and throw for the whole crouch.
    let held = KeySet::FORWARD | KeySet::SPRINT | KeySet::THROW;
    let mut events = Vec::new();
    while simulation.character().unwrap().is_transitioning() {
        events.extend(step(&mut simulation, held, DT));
        if simulation.character().unwrap().is_transitioning() {
            assert_eq!(simulation.character().unwrap().pose, start);
        }
    }
    assert!(!events.contains(&SimulationEvent::ThrowStarted));

    // The throw key was already down when the lock lifted: no throw.
    let events = step(&mut simulation, held, DT);
    assert!(!events.contains(&SimulationEvent::ThrowStarted));
    assert!(simulation.character().unwrap().has_ball());

    // Once released and pressed again it throws.
    step(&mut simulation, KeySet::empty(), DT);
    let events = step(&mut simulation, KeySet::THROW, DT);
    assert!(events.contains(&SimulationEvent::ThrowStarted));
}

#[test]
fn test_pickup_completes_once() {
    let mut simulation = court_simulation();
    simulation.character_mut().unwrap().pose.position = Vec3::new(2.2, 0.0, 0.0);
    let mut events = step(&mut simulation, KeySet::PICKUP, DT);
    for _ in 0..300 {
        events.extend(step(&mut simulation, KeySet::empty(), DT));
    }
    assert_eq!(count(&events, |e| *e == SimulationEvent::PickupCompleted), 1);
    assert_eq!(count(&events, |e| *e == SimulationEvent::PickupStarted), 1);
}

#[test]
fn test_held_ball_follows_character() {
    let mut simulation = court_simulation();
    pick_up_ball(&mut simulation);

    for _ in 0..30 {
        step(&mut simulation, KeySet::RIGHT, DT);
    }

    let character = simulation.character().unwrap();
    let ball = simulation.ball().unwrap();
    let hand = crate::physics::throw_curve::hand_position(
        &simulation.config().ball,
        &character.pose,
        None,
    );
    assert_relative_eq!(ball.position, hand, epsilon = 1.0e-5);
    assert_eq!(ball.velocity, Vec3::zeros());
    assert_eq!(character.animation, AnimationStateId::HoldingBall);
}

#[test]
fn test_repeated_presses_are_idempotent() {
    let mut simulation = court_simulation();
    pick_up_ball(&mut simulation);

    // Pickup while holding does nothing.
    step(&mut simulation, KeySet::empty(), DT);
    let events = step(&mut simulation, KeySet::PICKUP, DT);
    assert!(events.is_empty());
    assert!(!simulation.character().unwrap().is_transitioning());

    // Throw, then mash throw and pickup during the throw.
    step(&mut simulation, KeySet::empty(), DT);
    let mut events = step(&mut simulation, KeySet::THROW, DT);
    for i in 0..120 {
        let keys = if i % 2 == 0 {
            KeySet::THROW | KeySet::PICKUP
        } else {
            KeySet::empty()
        };
        events.extend(step(&mut simulation, keys, DT));
    }
    assert_eq!(count(&events, |e| *e == SimulationEvent::ThrowStarted), 1);
    assert_eq!(count(&events, |e| *e == SimulationEvent::ThrowCompleted), 1);
    assert_eq!(releases(&events), 1);
}

#[test]
fn test_throw_launches_along_facing() {
    let mut simulation = court_simulation();
    pick_up_ball(&mut simulation);

    // Face -X by stepping left with the camera at yaw zero.
    step(&mut simulation, KeySet::LEFT, DT);
    step(&mut simulation, KeySet::empty(), DT);
    let mut events = step(&mut simulation, KeySet::THROW, DT);
    events.extend(run_transition(&mut simulation, KeySet::empty(), DT));

    let released = events.iter().find_map(|event| match event {
        SimulationEvent::BallReleased { velocity, .. } => Some(*velocity),
        _ => None,
    });
    let velocity = released.unwrap();
    assert_relative_eq!(velocity, Vec3::new(-5.0, 6.0, 0.0), epsilon = 1.0e-4);

    let character = simulation.character().unwrap();
    assert!(!character.has_ball());
    assert!(!character.ball_state.is_throwing_ball);
    assert!(!character.ball_state.is_crouched);
    assert_eq!(character.animation, AnimationStateId::Idle);
}

#[test]
fn test_thrown_ball_settles_and_can_be_picked_up_again() {
    let mut simulation = court_simulation();
    pick_up_ball(&mut simulation);
    step(&mut simulation, KeySet::empty(), DT);
    step(&mut simulation, KeySet::THROW, DT);
    run_transition(&mut simulation, KeySet::empty(), DT);

    for _ in 0..900 {
        step(&mut simulation, KeySet::empty(), DT);
    }
    let ball = *simulation.ball().unwrap();
    assert_relative_eq!(ball.position.y, simulation.config().ball.radius);
    assert!(ball.speed() < 1.0e-3);

    // Walk over to it and pick it up again; it follows the hand afterwards.
    simulation.character_mut().unwrap().pose.position = ball.position - Vec3::new(0.5, 0.0, 0.0);
    step(&mut simulation, KeySet::PICKUP, DT);
    run_transition(&mut simulation, KeySet::empty(), DT);
    assert!(simulation.character().unwrap().has_ball());

    step(&mut simulation, KeySet::FORWARD, DT);
    let character = simulation.character().unwrap();
    let hand = crate::physics::throw_curve::hand_position(
        &simulation.config().ball,
        &character.pose,
        None,
    );
    assert_relative_eq!(simulation.ball().unwrap().position, hand, epsilon = 1.0e-5);
}

#[test]
fn test_camera_trails_character() {
    let mut simulation = court_simulation();
    let first = simulation.tick(&crate::input::InputSnapshot::default(), DT);
    let orbit = crate::input::CameraOrbit::default();
    let (eye, look_at) = simulation
        .camera()
        .desired(&Vec3::zeros(), &orbit);
    assert_relative_eq!(first.camera_eye, eye, epsilon = 1.0e-5);
    assert_relative_eq!(first.camera_look_at, look_at, epsilon = 1.0e-5);

    for _ in 0..60 {
        step(&mut simulation, KeySet::FORWARD, DT);
    }
    let position = simulation.character().unwrap().pose.position;
    let look_at = simulation.camera().look_at();
    // Lagging behind, but already close.
    assert!((look_at.z - position.z).abs() < 0.5);
    assert!(look_at.z > position.z);
}
