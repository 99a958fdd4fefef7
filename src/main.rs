//! Demo runner: plays an animation description on an in-memory element.
//!
//! ```text
//! tickanim [DESCRIPTION.json] [--reverse]
//! ```
//!
//! Without a path the description from `tickanim.toml` is used, and failing
//! that a built-in slide-in.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tickanim_config::TickanimConfig;
use tickanim_core::{
    Animation, AnimationOptions, Element, PropertyConfig, SystemClock, Timeline,
};

fn main() -> Result<()> {
    let config = TickanimConfig::load();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.filter.as_str()),
    )
    .init();

    let mut reverse = false;
    let mut description = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--reverse" => reverse = true,
            _ => description = Some(PathBuf::from(arg)),
        }
    }

    let options = match description.or_else(|| config.demo.description.clone()) {
        Some(path) => load_description(&path)?,
        None => builtin_description(),
    }
    .with_default_time_scale(config.timing.time_scale);

    let element = Element::new("div").with_id("demo").into_shared();
    let mut animation = Animation::new(element.clone(), options);
    if reverse {
        animation.reverse()?;
    }

    let mut timeline = Timeline::new(SystemClock).with_interval(config.tick_interval());
    let id = timeline.add(animation);
    timeline.start(id)?;

    let ticks = timeline.run_until_idle();
    for event in timeline.drain_events() {
        log::info!("{} {:?}", event.animation_id, event.event);
    }

    log::info!("finished after {} ticks", ticks);
    for (name, value) in element.borrow().attributes() {
        println!("{name}: {value}");
    }
    Ok(())
}

fn load_description(path: &Path) -> Result<AnimationOptions> {
    log::info!("Loading animation description: {}", path.display());
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    AnimationOptions::from_json(&json)
        .with_context(|| format!("failed to parse {}", path.display()))
}

fn builtin_description() -> AnimationOptions {
    AnimationOptions::new()
        .with_property(PropertyConfig::new("left", -200.0, 0.0, 400.0).with_unit("px"))
        .with_property(PropertyConfig::new("opacity", 0.0, 1.0, 250.0))
}
