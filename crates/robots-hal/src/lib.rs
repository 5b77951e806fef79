//! `robots-hal` – concrete components and the robot factory.
//!
//! The kernel treats components as opaque handles.  This crate supplies the
//! stock implementations, the processor capability presets and the
//! [`Factory`] that turns a model name into a fully assembled
//! [`Robot`][robots_kernel::Robot].
//!
//! # Modules
//!
//! - [`parts`] – stock engine, memory, armor and sensor drivers that carry
//!   only a model name.
//! - [`presets`] – named [`ProcessorSpec`][robots_types::ProcessorSpec]
//!   descriptors (`basic`, `advanced`).
//! - [`blueprint`] – [`ModelBlueprint`]: a serialisable recipe for one robot
//!   model.
//! - [`factory`] – [`Factory`]: catalog of blueprints; `build` fails with
//!   [`RobotError::ModelNotFound`][robots_types::RobotError::ModelNotFound]
//!   for unknown models.

pub mod blueprint;
pub mod factory;
pub mod parts;
pub mod presets;

pub use blueprint::{ModelBlueprint, ModelClass, ProcessorChoice};
pub use factory::Factory;
pub use parts::{StockArmor, StockEngine, StockMemory, StockSensor};
