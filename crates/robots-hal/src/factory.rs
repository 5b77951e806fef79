//! [`Factory`] – builds robots by model name.
//!
//! The factory holds a catalog of [`ModelBlueprint`]s and named processor
//! presets.  [`Factory::build`] either returns a robot that passes
//! [`Robot::run`] or fails; it never returns a partially assembled robot.
//!
//! # Built-in models
//!
//! | Model | Class | Processor | Sensors |
//! |---|---|---|---|
//! | `scout` | standard | `basic` | radar |
//! | `tank` | armored | `advanced` | radar, thermal |
//!
//! # Example
//!
//! ```
//! use robots_hal::Factory;
//! use robots_types::RobotError;
//!
//! let factory = Factory::new();
//! let scout = factory.build("scout").unwrap();
//! assert!(scout.run().is_ok());
//!
//! assert_eq!(
//!     factory.build("unicorn").unwrap_err(),
//!     RobotError::ModelNotFound("unicorn".into()),
//! );
//! ```

use std::collections::BTreeMap;

use robots_kernel::Robot;
use robots_types::{ProcessorSpec, RobotError};
use tracing::{info, instrument};

use crate::blueprint::{ModelBlueprint, ModelClass, ProcessorChoice};
use crate::presets;

/// Catalog of robot models and processor presets.
#[derive(Debug, Clone, Default)]
pub struct Factory {
    models: BTreeMap<String, ModelBlueprint>,
    processors: BTreeMap<String, ProcessorSpec>,
}

impl Factory {
    /// Factory pre-loaded with the built-in presets and models.
    pub fn new() -> Self {
        let mut factory = Self::empty();
        for spec in presets::all() {
            factory.register_processor(spec);
        }
        for model in builtin_models() {
            factory.register_model(model);
        }
        factory
    }

    /// Factory with nothing registered.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Register a model.  Any previous model with the same name is replaced.
    pub fn register_model(&mut self, blueprint: ModelBlueprint) {
        self.models.insert(blueprint.name.clone(), blueprint);
    }

    /// Register a processor preset.  Any previous preset with the same name
    /// is replaced.
    pub fn register_processor(&mut self, spec: ProcessorSpec) {
        self.processors.insert(spec.name.clone(), spec);
    }

    /// Registered model blueprints, sorted by name.
    pub fn models(&self) -> impl Iterator<Item = &ModelBlueprint> {
        self.models.values()
    }

    pub fn model(&self, name: &str) -> Option<&ModelBlueprint> {
        self.models.get(name)
    }

    pub fn processor(&self, name: &str) -> Option<&ProcessorSpec> {
        self.processors.get(name)
    }

    /// Build a fully assembled robot of model `name`.
    ///
    /// # Errors
    ///
    /// - [`RobotError::ModelNotFound`] – `name` is not in the catalog, or the
    ///   model refers to an unregistered processor preset.
    /// - [`RobotError::MissingComponent`] – the blueprint leaves a required
    ///   slot empty.
    #[instrument(skip(self))]
    pub fn build(&self, name: &str) -> Result<Robot, RobotError> {
        let blueprint = self
            .models
            .get(name)
            .ok_or_else(|| RobotError::ModelNotFound(name.to_string()))?;
        let robot = blueprint.assemble(&self.processors)?;
        info!(robot = %robot.id(), "robot built");
        Ok(robot)
    }
}

fn builtin_models() -> Vec<ModelBlueprint> {
    vec![
        ModelBlueprint {
            name: "scout".to_string(),
            class: ModelClass::Standard,
            engine: "ion-drive".to_string(),
            memory: "mem-64".to_string(),
            armor: None,
            sensors: vec!["radar".to_string()],
            processor: ProcessorChoice::Preset(presets::BASIC.to_string()),
        },
        ModelBlueprint {
            name: "tank".to_string(),
            class: ModelClass::Armored,
            engine: "diesel-v12".to_string(),
            memory: "mem-128".to_string(),
            armor: Some("composite-plate".to_string()),
            sensors: vec!["radar".to_string(), "thermal".to_string()],
            processor: ProcessorChoice::Preset(presets::ADVANCED.to_string()),
        },
    ]
}
