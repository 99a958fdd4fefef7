use anyhow::Result;
use std::time::Duration;
use tickanim_core::{
    AnimationEvent, AnimationOptions, AnimationTarget, Direction, Element, ManualClock,
    StopReason, Timeline,
};

const DESCRIPTION: &str = r#"{
    "animationDirection": 1,
    "timeScale": 1,
    "properties": [
        {"attribute": "left", "from": 0, "to": 100, "durationMs": 100, "unit": "px"},
        {"attribute": "opacity", "from": 0, "to": 1, "durationMs": 200}
    ]
}"#;

#[test]
fn plays_description_to_completion() -> Result<()> {
    let clock = ManualClock::new();
    let mut timeline = Timeline::new(clock.clone());
    let element = Element::new("div").with_id("box").into_shared();

    let id = timeline.create(element.clone(), AnimationOptions::from_json(DESCRIPTION)?);
    timeline.start(id)?;
    timeline.run_until_idle();

    let el = element.borrow();
    assert_eq!(el.attribute("left"), Some("100px"));
    assert_eq!(el.attribute("opacity"), Some("1"));
    // 100 ms property finishes at 112, 200 ms property at 208.
    assert_eq!(clock.elapsed(), Duration::from_millis(208));

    let events: Vec<_> = timeline.drain_events().into_iter().map(|e| e.event).collect();
    assert_eq!(
        events,
        vec![
            AnimationEvent::Started {
                direction: Direction::Forward,
                property_count: 2,
            },
            AnimationEvent::PropertyFinished {
                property_index: 0,
                elapsed_ms: 112.0,
            },
            AnimationEvent::PropertyFinished {
                property_index: 1,
                elapsed_ms: 208.0,
            },
            AnimationEvent::Stopped {
                reason: StopReason::Completed,
            },
        ]
    );
    Ok(())
}

#[test]
fn property_a_leaves_before_property_b() -> Result<()> {
    let clock = ManualClock::new();
    let mut timeline = Timeline::new(clock.clone());
    let element = Element::new("div").into_shared();
    let id = timeline.create(element.clone(), AnimationOptions::from_json(DESCRIPTION)?);
    timeline.start(id)?;

    clock.advance_ms(112);
    timeline.update();
    let animation = timeline.get(id).expect("animation registered");
    assert_eq!(animation.active_indices(), &[1]);
    assert!(animation.is_playing());

    clock.advance_ms(96);
    timeline.update();
    let animation = timeline.get(id).expect("animation registered");
    assert_eq!(animation.active_len(), 0);
    assert!(!animation.is_playing());
    Ok(())
}

#[test]
fn backward_playback_restores_start_values() -> Result<()> {
    let clock = ManualClock::new();
    let mut timeline = Timeline::new(clock.clone());
    let element = Element::new("div")
        .with_attribute("left", "100px")
        .into_shared();

    let options = AnimationOptions::from_json(DESCRIPTION)?.with_direction(Direction::Backward);
    let id = timeline.create(element.clone(), options);
    timeline.start(id)?;

    clock.advance_ms(16);
    timeline.update();
    // Backward: position = 100 - 16 for "left", 200 - 16 for "opacity".
    assert_eq!(element.borrow().attribute("left"), Some("84px"));
    assert_eq!(element.borrow().attribute("opacity"), Some("0.92"));

    timeline.run_until_idle();
    assert_eq!(element.borrow().attribute("left"), Some("0px"));
    assert_eq!(element.borrow().attribute("opacity"), Some("0"));
    Ok(())
}

#[test]
fn time_scale_speeds_up_playback() -> Result<()> {
    let clock = ManualClock::new();
    let mut timeline = Timeline::new(clock.clone());
    let element = Element::new("div").into_shared();

    let options = AnimationOptions::from_json(DESCRIPTION)?.with_time_scale(4.0);
    let id = timeline.create(element.clone(), options);
    timeline.start(id)?;
    timeline.run_until_idle();

    // 200 ms of animation at 4x: scaled time reaches 200 at 50 ms, first tick past it is 64.
    assert_eq!(clock.elapsed(), Duration::from_millis(64));
    assert_eq!(element.borrow().attribute("opacity"), Some("1"));
    Ok(())
}

#[test]
fn replaying_after_completion() -> Result<()> {
    let clock = ManualClock::new();
    let mut timeline = Timeline::new(clock.clone());
    let element = Element::new("div").into_shared();
    let id = timeline.create(element.clone(), AnimationOptions::from_json(DESCRIPTION)?);

    timeline.start(id)?;
    timeline.run_until_idle();
    timeline.reverse(id)?;
    timeline.start(id)?;
    timeline.run_until_idle();

    assert_eq!(element.borrow().attribute("left"), Some("0px"));
    let stops = timeline
        .drain_events()
        .into_iter()
        .filter(|e| e.event.is_stopped())
        .count();
    assert_eq!(stops, 2);
    Ok(())
}
