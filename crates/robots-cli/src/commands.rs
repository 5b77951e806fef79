//! Command implementations.
//!
//! Each command renders its report into a `String` so `main` decides where it
//! goes; failures come back as `Err` with a human-readable message.

use colored::Colorize;
use robots_hal::{Factory, ModelBlueprint, ProcessorChoice};
use robots_types::{Channel, InstructionBatch, ProcessorSpec, Slot};
use tracing::info;

/// `robots models` – list the catalog.
pub fn models(factory: &Factory) -> String {
    let lines: Vec<String> = factory
        .models()
        .map(|bp| {
            format!(
                "  {} ({:?})  processor: {}  sensors: {}\n",
                bp.name.bold(),
                bp.class,
                describe_processor(factory, bp),
                bp.sensors.join(", ")
            )
        })
        .collect();
    if lines.is_empty() {
        return "  No models registered.\n".to_string();
    }
    lines.concat()
}

fn describe_processor(factory: &Factory, bp: &ModelBlueprint) -> String {
    let spec: &ProcessorSpec = match &bp.processor {
        ProcessorChoice::Preset(name) => match factory.processor(name) {
            Some(spec) => spec,
            None => return format!("{} {}", name, "(unregistered)".red()),
        },
        ProcessorChoice::Inline(spec) => spec,
    };
    format!(
        "{} [events {} of {{{}}}, actions {} of {{{}}}]",
        if spec.name.is_empty() { "inline" } else { spec.name.as_str() },
        spec.max_events_count,
        join(&spec.available_events),
        spec.max_actions_count,
        join(&spec.available_actions),
    )
}

fn join(names: &std::collections::BTreeSet<String>) -> String {
    names.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

/// `robots check <model>` – build the model and run its systems check.
pub fn check(factory: &Factory, model: &str) -> Result<String, String> {
    let robot = factory.build(model).map_err(|e| e.to_string())?;
    robot.run().map_err(|e| e.to_string())?;

    let mut out = format!("  {} {} is ready\n", "✓".green().bold(), model.bold());
    for slot in robot.required_slots() {
        let detail = match slot {
            Slot::Sensors => robot
                .sensors()
                .iter()
                .map(|s| s.model())
                .collect::<Vec<_>>()
                .join(", "),
            other => robot
                .part(*other)
                .map(|p| p.model().to_string())
                .unwrap_or_default(),
        };
        out.push_str(&format!("    {:<10} {}\n", slot.to_string(), detail.dimmed()));
    }
    Ok(out)
}

/// `robots validate <model> <batch>` – check an instruction batch against
/// the model's processor.
pub fn validate(factory: &Factory, model: &str, raw_batch: &str) -> Result<String, String> {
    let batch = InstructionBatch::from_json(raw_batch).map_err(|e| e.to_string())?;
    let robot = factory.build(model).map_err(|e| e.to_string())?;
    robot.validate(&batch).map_err(|e| e.to_string())?;

    info!(model, robot = %robot.id(), "batch admissible");
    Ok(format!(
        "  {} batch accepted by {} ({} events, {} actions)\n",
        "✓".green().bold(),
        model.bold(),
        batch.channel(Channel::Events).len(),
        batch.channel(Channel::Actions).len(),
    ))
}

/// `robots schema` – JSON Schema of the batch document.
pub fn schema() -> Result<String, String> {
    serde_json::to_string_pretty(&InstructionBatch::schema())
        .map(|s| s + "\n")
        .map_err(|e| format!("Failed to render schema: {}", e))
}

pub fn help() -> String {
    let mut out = String::from("  Usage: robots <command> [args]\n\n");
    for (cmd, desc) in [
        ("models", "list the robot models in the catalog"),
        ("check [model]", "build a model and run its systems check"),
        ("validate [model] <file|->", "validate a JSON instruction batch"),
        ("schema", "print the JSON Schema of an instruction batch"),
        ("init", "write a default config file if none exists"),
        ("help", "show this list"),
    ] {
        out.push_str(&format!("  {:<28} {}\n", cmd.bold().cyan(), desc));
    }
    out
}
