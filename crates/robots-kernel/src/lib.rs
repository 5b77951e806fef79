//! `robots-kernel` – Component Registry & Instruction Validator
//!
//! The core of the robot workspace.  It does not decide what instructions
//! do; it decides whether a robot is complete enough to run and whether a
//! submitted instruction batch is admissible.
//!
//! # Modules
//!
//! - [`component`] – the opaque [`Engine`], [`Memory`], [`Armor`] and
//!   [`Sensor`] traits plus the [`Part`] wrapper for single-occupant slots.
//! - [`robot`] – [`Robot`][robot::Robot]: holds one component per slot and a
//!   list of sensors, and refuses to [`run`][robot::Robot::run] until every
//!   required slot is filled.
//! - [`processor`] – [`Processor`][processor::Processor]: validates an
//!   [`InstructionBatch`][robots_types::InstructionBatch] against a fixed
//!   [`ProcessorSpec`][robots_types::ProcessorSpec], rejecting the whole
//!   batch on the first capacity or whitelist violation.
//!
//! Access is single-threaded: callers own one robot per execution context
//! and serialize access to it themselves.

pub mod component;
pub mod processor;
pub mod robot;

pub use component::{Armor, Engine, Memory, Part, Sensor};
pub use processor::Processor;
pub use robot::{Robot, RobotClass};
