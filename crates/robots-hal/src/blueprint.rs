//! [`ModelBlueprint`] – serialisable recipe for a robot model.
//!
//! Blueprints are what the [`Factory`][crate::factory::Factory] keeps in its
//! catalog.  They can be declared in TOML:
//!
//! ```toml
//! [[models]]
//! name = "sentinel"
//! class = "armored"
//! engine = "hover-2"
//! memory = "mem-32"
//! armor = "ceramic"
//! sensors = ["radar", "sonar"]
//! processor = "basic"
//! ```
//!
//! `processor` is either the name of a registered capability preset or an
//! inline [`ProcessorSpec`] table.

use std::collections::BTreeMap;

use robots_kernel::{Part, Robot, RobotClass};
use robots_types::{ProcessorSpec, RobotError};
use serde::{Deserialize, Serialize};

use crate::parts::{StockArmor, StockEngine, StockMemory, StockSensor};

/// Serialisable form of [`RobotClass`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelClass {
    #[default]
    Standard,
    Armored,
}

impl From<ModelClass> for RobotClass {
    fn from(class: ModelClass) -> Self {
        match class {
            ModelClass::Standard => RobotClass::Standard,
            ModelClass::Armored => RobotClass::Armored,
        }
    }
}

/// How a blueprint picks its processor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProcessorChoice {
    /// Name of a registered preset.
    Preset(String),
    /// Descriptor declared in place.
    Inline(ProcessorSpec),
}

/// Recipe for one robot model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelBlueprint {
    pub name: String,
    #[serde(default)]
    pub class: ModelClass,
    pub engine: String,
    pub memory: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub armor: Option<String>,
    #[serde(default)]
    pub sensors: Vec<String>,
    pub processor: ProcessorChoice,
}

impl ModelBlueprint {
    /// Assemble a robot from this recipe, resolving preset names against
    /// `processors`.
    ///
    /// # Errors
    ///
    /// - [`RobotError::ModelNotFound`] – the processor preset is not
    ///   registered.
    /// - [`RobotError::MissingComponent`] – the recipe leaves a required slot
    ///   empty (e.g. an armored model without armor, or no sensors).
    pub fn assemble(
        &self,
        processors: &BTreeMap<String, ProcessorSpec>,
    ) -> Result<Robot, RobotError> {
        let spec = match &self.processor {
            ProcessorChoice::Preset(name) => processors
                .get(name)
                .cloned()
                .ok_or_else(|| RobotError::ModelNotFound(name.clone()))?,
            ProcessorChoice::Inline(spec) => spec.clone(),
        };

        let mut robot = Robot::new(self.name.as_str(), self.class.into())
            .with(Part::Engine(StockEngine::boxed(self.engine.as_str())))
            .with(Part::Memory(StockMemory::boxed(self.memory.as_str())));
        if let Some(armor) = &self.armor {
            robot.assign(Part::Armor(StockArmor::boxed(armor.as_str())));
        }
        for sensor in &self.sensors {
            robot.add_sensor(StockSensor::boxed(sensor.as_str()));
        }
        robot.install_processor(spec);

        // A blueprint must never hand out a half-built robot.
        if let Some(slot) = robot.first_missing() {
            return Err(RobotError::MissingComponent(slot));
        }
        Ok(robot)
    }
}
