//! [`Robot`] – component registry and readiness gate.
//!
//! A robot is assembled incrementally: single-occupant slots are filled with
//! [`Robot::assign`] (upsert, the previous occupant is handed back) and
//! sensors are appended with [`Robot::add_sensor`].  Readiness is evaluated
//! on every [`Robot::run`] call and never cached, so a slot may be swapped
//! between runs.
//!
//! # Check order
//!
//! When several slots are empty, `run` reports only the first one in this
//! fixed order:
//!
//! | Class | Order |
//! |---|---|
//! | [`RobotClass::Standard`] | engine → processor → memory → sensors |
//! | [`RobotClass::Armored`] | armor → engine → processor → memory → sensors |

use std::collections::BTreeMap;

use robots_types::{InstructionBatch, ProcessorSpec, RobotError, Slot};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::component::{Part, Sensor};
use crate::processor::Processor;

/// Which slots a robot must fill before it may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RobotClass {
    #[default]
    Standard,
    /// Standard requirements plus armor, which is checked first.
    Armored,
}

impl RobotClass {
    /// Required slots in check order.
    pub fn required_slots(&self) -> &'static [Slot] {
        match self {
            RobotClass::Standard => &[Slot::Engine, Slot::Processor, Slot::Memory, Slot::Sensors],
            RobotClass::Armored => &[
                Slot::Armor,
                Slot::Engine,
                Slot::Processor,
                Slot::Memory,
                Slot::Sensors,
            ],
        }
    }
}

/// A robot assembled from pluggable components.
///
/// # Example
///
/// ```
/// use robots_kernel::{Engine, Memory, Part, Robot, RobotClass, Sensor};
/// use robots_types::{ProcessorSpec, RobotError, Slot};
///
/// #[derive(Debug)]
/// struct Stub(&'static str);
/// impl Engine for Stub { fn model(&self) -> &str { self.0 } }
/// impl Memory for Stub { fn model(&self) -> &str { self.0 } }
/// impl Sensor for Stub { fn model(&self) -> &str { self.0 } }
///
/// let mut robot = Robot::new("scout", RobotClass::Standard);
/// robot.assign(Part::Engine(Box::new(Stub("v2"))));
/// assert_eq!(robot.run(), Err(RobotError::MissingComponent(Slot::Processor)));
///
/// robot.install_processor(ProcessorSpec::new("basic"));
/// robot.assign(Part::Memory(Box::new(Stub("ram"))));
/// robot.add_sensor(Box::new(Stub("radar")));
/// assert!(robot.is_ready());
/// assert!(robot.run().is_ok());
/// ```
#[derive(Debug)]
pub struct Robot {
    id: Uuid,
    model: String,
    class: RobotClass,
    slots: BTreeMap<Slot, Part>,
    sensors: Vec<Box<dyn Sensor>>,
}

impl Robot {
    /// Create an empty robot of the given model and class.
    pub fn new(model: impl Into<String>, class: RobotClass) -> Self {
        Self {
            id: Uuid::new_v4(),
            model: model.into(),
            class,
            slots: BTreeMap::new(),
            sensors: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn class(&self) -> RobotClass {
        self.class
    }

    /// Put `part` into its slot, returning the previous occupant if any.
    ///
    /// A processor is rebound to this robot on assignment.
    pub fn assign(&mut self, part: Part) -> Option<Part> {
        let part = match part {
            Part::Processor(cpu) => Part::Processor(cpu.rebind(self.id)),
            other => other,
        };
        let slot = part.slot();
        debug!(robot = %self.id, %slot, component = part.model(), "component assigned");
        self.slots.insert(slot, part)
    }

    /// Builder form of [`Robot::assign`].
    pub fn with(mut self, part: Part) -> Self {
        self.assign(part);
        self
    }

    /// Build a processor from `spec` owned by this robot and assign it.
    pub fn install_processor(&mut self, spec: ProcessorSpec) -> Option<Part> {
        let cpu = Processor::new(self.id, spec);
        self.assign(Part::Processor(cpu))
    }

    /// Take the component out of `slot`.  Sensors are not single-slot parts;
    /// use [`Robot::clear_sensors`] for them.
    pub fn remove(&mut self, slot: Slot) -> Option<Part> {
        self.slots.remove(&slot)
    }

    /// Append a sensor.  Order is preserved.
    pub fn add_sensor(&mut self, sensor: Box<dyn Sensor>) {
        debug!(robot = %self.id, component = sensor.model(), "sensor added");
        self.sensors.push(sensor);
    }

    /// Builder form of [`Robot::add_sensor`].
    pub fn with_sensor(mut self, sensor: Box<dyn Sensor>) -> Self {
        self.add_sensor(sensor);
        self
    }

    pub fn clear_sensors(&mut self) {
        self.sensors.clear();
    }

    pub fn sensors(&self) -> &[Box<dyn Sensor>] {
        &self.sensors
    }

    /// The component in a single-occupant slot.
    pub fn part(&self, slot: Slot) -> Option<&Part> {
        self.slots.get(&slot)
    }

    pub fn processor(&self) -> Option<&Processor> {
        match self.slots.get(&Slot::Processor) {
            Some(Part::Processor(cpu)) => Some(cpu),
            _ => None,
        }
    }

    /// Whether `slot` is occupied.  The sensors slot counts as occupied once
    /// at least one sensor is present.
    pub fn is_installed(&self, slot: Slot) -> bool {
        match slot {
            Slot::Sensors => !self.sensors.is_empty(),
            other => self.slots.contains_key(&other),
        }
    }

    pub fn required_slots(&self) -> &'static [Slot] {
        self.class.required_slots()
    }

    /// First required slot that is empty, in check order.
    pub fn first_missing(&self) -> Option<Slot> {
        self.required_slots()
            .iter()
            .copied()
            .find(|slot| !self.is_installed(*slot))
    }

    pub fn is_ready(&self) -> bool {
        self.first_missing().is_none()
    }

    /// Check every required system.
    ///
    /// # Errors
    ///
    /// [`RobotError::MissingComponent`] naming the first empty slot in check
    /// order.
    #[instrument(skip_all, fields(robot = %self.id, model = %self.model))]
    pub fn run(&self) -> Result<(), RobotError> {
        if let Some(slot) = self.first_missing() {
            return Err(RobotError::MissingComponent(slot));
        }
        info!(sensors = self.sensors.len(), "systems check passed");
        Ok(())
    }

    /// Validate `batch` with the installed processor.
    ///
    /// # Errors
    ///
    /// [`RobotError::MissingComponent`] when no processor is installed,
    /// otherwise whatever [`Processor::validate`] reports.
    pub fn validate(&self, batch: &InstructionBatch) -> Result<(), RobotError> {
        self.processor()
            .ok_or(RobotError::MissingComponent(Slot::Processor))?
            .validate(batch)
    }
}
