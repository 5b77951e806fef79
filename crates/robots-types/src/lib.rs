//! `robots-types` – shared vocabulary for the robot workspace.
//!
//! Every other crate speaks in these types: the [`Slot`]s a robot exposes,
//! the two instruction [`Channel`]s, the [`InstructionBatch`] a caller submits
//! each tact, the [`ProcessorSpec`] capability descriptor and the
//! [`RobotError`] taxonomy.

use std::collections::BTreeSet;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A named position in a robot.
///
/// `Sensors` is the only multi-occupant slot; every other slot holds at most
/// one component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Engine,
    Processor,
    Memory,
    Sensors,
    Armor,
}

impl Slot {
    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Engine => "engine",
            Slot::Processor => "processor",
            Slot::Memory => "memory",
            Slot::Sensors => "sensors",
            Slot::Armor => "armor",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the two independent instruction streams of a tact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Events,
    Actions,
}

impl Channel {
    /// Channels in validation order.
    pub const ALL: [Channel; 2] = [Channel::Events, Channel::Actions];

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Events => "events",
            Channel::Actions => "actions",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single operation request.
///
/// Only the operation identifier matters to validation.  Any extra keys in
/// the JSON form (handler arguments) belong to the execution layer and are
/// ignored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Instruction {
    /// Operation identifier, e.g. `"scan"` or `"move"`.
    #[serde(alias = "op")]
    pub method: String,
}

impl Instruction {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
        }
    }
}

/// The instructions submitted for one tact.
///
/// An absent channel is equivalent to an empty one.  Keys other than
/// `events` and `actions` are rejected so a misspelled channel cannot turn
/// into an empty batch.
///
/// ```
/// use robots_types::{Channel, InstructionBatch};
///
/// let batch = InstructionBatch::from_json(r#"{"events": [{"method": "scan"}]}"#).unwrap();
/// assert_eq!(batch.channel(Channel::Events).len(), 1);
/// assert!(batch.channel(Channel::Actions).is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct InstructionBatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<Instruction>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<Instruction>>,
}

impl InstructionBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder helper: set the events channel from operation identifiers.
    pub fn with_events<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.events = Some(methods.into_iter().map(Instruction::new).collect());
        self
    }

    /// Builder helper: set the actions channel from operation identifiers.
    pub fn with_actions<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.actions = Some(methods.into_iter().map(Instruction::new).collect());
        self
    }

    /// Instructions queued on `channel`; empty when the channel is absent.
    pub fn channel(&self, channel: Channel) -> &[Instruction] {
        let seq = match channel {
            Channel::Events => &self.events,
            Channel::Actions => &self.actions,
        };
        seq.as_deref().unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        Channel::ALL.iter().all(|c| self.channel(*c).is_empty())
    }

    /// Parse a batch from its JSON form.
    ///
    /// # Errors
    ///
    /// [`RobotError::InvalidBatch`] when the document is not a valid batch.
    pub fn from_json(raw: &str) -> Result<Self, RobotError> {
        serde_json::from_str(raw).map_err(|e| RobotError::InvalidBatch(e.to_string()))
    }

    /// JSON Schema describing the batch document.
    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(InstructionBatch)
    }
}

/// Capability descriptor of a processor variant.
///
/// Fixed at construction; a processor never mutates its descriptor.  Omitted
/// limits and whitelists default to nothing permitted; unknown keys are an
/// error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProcessorSpec {
    /// Variant name, e.g. `"basic"`.
    #[serde(default)]
    pub name: String,
    /// Maximum events accepted per tact.
    #[serde(default)]
    pub max_events_count: usize,
    /// Maximum actions accepted per tact.
    #[serde(default)]
    pub max_actions_count: usize,
    /// Operation identifiers permitted on the events channel.
    #[serde(default)]
    pub available_events: BTreeSet<String>,
    /// Operation identifiers permitted on the actions channel.
    #[serde(default)]
    pub available_actions: BTreeSet<String>,
}

impl ProcessorSpec {
    /// A descriptor with zero capacity and empty whitelists.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            max_events_count: 0,
            max_actions_count: 0,
            available_events: BTreeSet::new(),
            available_actions: BTreeSet::new(),
        }
    }

    pub fn with_events<I, S>(mut self, max: usize, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.max_events_count = max;
        self.available_events = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_actions<I, S>(mut self, max: usize, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.max_actions_count = max;
        self.available_actions = names.into_iter().map(Into::into).collect();
        self
    }

    /// Per-tact capacity of `channel`.
    pub fn limit(&self, channel: Channel) -> usize {
        match channel {
            Channel::Events => self.max_events_count,
            Channel::Actions => self.max_actions_count,
        }
    }

    /// Whether `name` is whitelisted on `channel`.
    pub fn permits(&self, channel: Channel, name: &str) -> bool {
        match channel {
            Channel::Events => self.available_events.contains(name),
            Channel::Actions => self.available_actions.contains(name),
        }
    }
}

/// Error taxonomy shared by the registry, the validator and the factory.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RobotError {
    #[error("Missing component: {0} not installed")]
    MissingComponent(Slot),

    #[error("Capacity exceeded on {channel}: limit {limit}, got {got}")]
    CapacityExceeded {
        channel: Channel,
        limit: usize,
        got: usize,
    },

    #[error("Unknown {channel} operation: '{name}'")]
    UnknownOperation { channel: Channel, name: String },

    #[error("Model not found: '{0}'")]
    ModelNotFound(String),

    #[error("Invalid instruction batch: {0}")]
    InvalidBatch(String),
}
