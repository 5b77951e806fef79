//! Processor capability presets.
//!
//! | Preset | Events / tact | Event ops | Actions / tact | Action ops |
//! |---|---|---|---|---|
//! | `basic` | 1 | `scan` | 2 | `move`, `shoot` |
//! | `advanced` | 2 | `scan`, `ping` | 3 | `move`, `shoot`, `turn`, `shield` |

use robots_types::ProcessorSpec;

pub const BASIC: &str = "basic";
pub const ADVANCED: &str = "advanced";

pub fn basic() -> ProcessorSpec {
    ProcessorSpec::new(BASIC)
        .with_events(1, ["scan"])
        .with_actions(2, ["move", "shoot"])
}

pub fn advanced() -> ProcessorSpec {
    ProcessorSpec::new(ADVANCED)
        .with_events(2, ["scan", "ping"])
        .with_actions(3, ["move", "shoot", "turn", "shield"])
}

/// Look up a built-in preset by name.
pub fn preset(name: &str) -> Option<ProcessorSpec> {
    match name {
        BASIC => Some(basic()),
        ADVANCED => Some(advanced()),
        _ => None,
    }
}

/// Every built-in preset.
pub fn all() -> Vec<ProcessorSpec> {
    vec![basic(), advanced()]
}
