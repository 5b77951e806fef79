//! [`Processor`] – per-tact instruction validator.
//!
//! A processor is bound to an immutable [`ProcessorSpec`] at construction.
//! [`Processor::validate`] checks a submitted [`InstructionBatch`] against
//! the descriptor and rejects the whole batch on the first violation:
//!
//! 1. events capacity (`max_events_count`)
//! 2. events whitelist (`available_events`), in submission order
//! 3. actions capacity (`max_actions_count`)
//! 4. actions whitelist (`available_actions`), in submission order
//!
//! Capacity is always checked before membership, and the events channel is
//! fully checked before the actions channel.  An absent channel behaves like
//! an empty one.  Dispatching accepted instructions is left to the caller.

use robots_types::{Channel, InstructionBatch, ProcessorSpec, RobotError};
use tracing::{debug, instrument};
use uuid::Uuid;

/// Instruction validator owned by exactly one robot.
///
/// # Example
///
/// ```
/// use robots_kernel::Processor;
/// use robots_types::{Channel, InstructionBatch, ProcessorSpec, RobotError};
/// use uuid::Uuid;
///
/// let spec = ProcessorSpec::new("basic").with_events(1, ["scan"]);
/// let cpu = Processor::new(Uuid::new_v4(), spec);
///
/// assert!(cpu.validate(&InstructionBatch::new().with_events(["scan"])).is_ok());
/// assert_eq!(
///     cpu.validate(&InstructionBatch::new().with_events(["fire"])),
///     Err(RobotError::UnknownOperation { channel: Channel::Events, name: "fire".into() }),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Processor {
    robot_id: Uuid,
    spec: ProcessorSpec,
}

impl Processor {
    /// Bind `spec` to the robot identified by `robot_id`.
    pub fn new(robot_id: Uuid, spec: ProcessorSpec) -> Self {
        Self { robot_id, spec }
    }

    /// The capability descriptor this processor was built with.
    pub fn spec(&self) -> &ProcessorSpec {
        &self.spec
    }

    /// Identity of the owning robot.
    pub fn robot_id(&self) -> Uuid {
        self.robot_id
    }

    pub(crate) fn rebind(mut self, robot_id: Uuid) -> Self {
        self.robot_id = robot_id;
        self
    }

    /// Validate `batch` against capacity limits and operation whitelists.
    ///
    /// # Errors
    ///
    /// - [`RobotError::CapacityExceeded`] – a channel carries more
    ///   instructions than the descriptor allows.
    /// - [`RobotError::UnknownOperation`] – an instruction names an operation
    ///   missing from the channel's whitelist.
    #[instrument(skip_all, fields(robot = %self.robot_id, processor = %self.spec.name))]
    pub fn validate(&self, batch: &InstructionBatch) -> Result<(), RobotError> {
        for channel in Channel::ALL {
            self.validate_channel(channel, batch)?;
        }
        debug!(
            events = batch.channel(Channel::Events).len(),
            actions = batch.channel(Channel::Actions).len(),
            "instruction batch accepted"
        );
        Ok(())
    }

    fn validate_channel(&self, channel: Channel, batch: &InstructionBatch) -> Result<(), RobotError> {
        let instructions = batch.channel(channel);
        let limit = self.spec.limit(channel);
        if instructions.len() > limit {
            return Err(RobotError::CapacityExceeded {
                channel,
                limit,
                got: instructions.len(),
            });
        }
        if let Some(unknown) = instructions
            .iter()
            .find(|i| !self.spec.permits(channel, &i.method))
        {
            return Err(RobotError::UnknownOperation {
                channel,
                name: unknown.method.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use robots_types::Instruction;

    // ------------------------------------------------------------------ helpers
    fn scanner() -> Processor {
        Processor::new(
            Uuid::new_v4(),
            ProcessorSpec::new("scanner").with_events(1, ["scan"]),
        )
    }

    fn mover() -> Processor {
        Processor::new(
            Uuid::new_v4(),
            ProcessorSpec::new("mover").with_actions(2, ["move", "shoot"]),
        )
    }

    fn combined() -> Processor {
        Processor::new(
            Uuid::new_v4(),
            ProcessorSpec::new("basic")
                .with_events(1, ["scan"])
                .with_actions(2, ["move", "shoot"]),
        )
    }

    // ------------------------------------------------------------------ events

    #[test]
    fn single_known_event_passes() {
        let batch = InstructionBatch::new().with_events(["scan"]);
        assert!(scanner().validate(&batch).is_ok());
    }

    #[test]
    fn events_over_capacity_rejected() {
        let batch = InstructionBatch::new().with_events(["scan", "scan"]);
        assert_eq!(
            scanner().validate(&batch),
            Err(RobotError::CapacityExceeded {
                channel: Channel::Events,
                limit: 1,
                got: 2,
            })
        );
    }

    #[test]
    fn unknown_event_rejected() {
        let batch = InstructionBatch::new().with_events(["fire"]);
        assert_eq!(
            scanner().validate(&batch),
            Err(RobotError::UnknownOperation {
                channel: Channel::Events,
                name: "fire".into(),
            })
        );
    }

    #[test]
    fn zero_capacity_fails_before_membership() {
        let cpu = Processor::new(Uuid::new_v4(), ProcessorSpec::new("mute"));
        // "ghost" is not whitelisted either, but capacity is reported first.
        let batch = InstructionBatch::new().with_events(["ghost"]);
        assert_eq!(
            cpu.validate(&batch),
            Err(RobotError::CapacityExceeded {
                channel: Channel::Events,
                limit: 0,
                got: 1,
            })
        );
    }

    // ------------------------------------------------------------------ actions

    #[test]
    fn actions_within_capacity_pass() {
        let batch = InstructionBatch::new().with_actions(["move", "shoot"]);
        assert!(mover().validate(&batch).is_ok());
    }

    #[test]
    fn actions_over_capacity_rejected() {
        let batch = InstructionBatch::new().with_actions(["move", "shoot", "move"]);
        assert_eq!(
            mover().validate(&batch),
            Err(RobotError::CapacityExceeded {
                channel: Channel::Actions,
                limit: 2,
                got: 3,
            })
        );
    }

    #[test]
    fn first_unknown_action_is_reported() {
        let batch = InstructionBatch::new().with_actions(["jump", "fly"]);
        assert_eq!(
            mover().validate(&batch),
            Err(RobotError::UnknownOperation {
                channel: Channel::Actions,
                name: "jump".into(),
            })
        );
    }

    #[test]
    fn event_name_is_not_an_action() {
        let batch = InstructionBatch::new().with_actions(["scan"]);
        assert!(matches!(
            combined().validate(&batch),
            Err(RobotError::UnknownOperation {
                channel: Channel::Actions,
                ..
            })
        ));
    }

    // ------------------------------------------------------------------ ordering

    #[test]
    fn events_error_wins_when_both_channels_fail() {
        let batch = InstructionBatch::new()
            .with_events(["fire"])
            .with_actions(["move", "move", "move"]);
        assert!(matches!(
            combined().validate(&batch),
            Err(RobotError::UnknownOperation {
                channel: Channel::Events,
                ..
            })
        ));
    }

    #[test]
    fn valid_events_then_bad_actions_reports_actions() {
        let batch = InstructionBatch::new()
            .with_events(["scan"])
            .with_actions(["move", "teleport"]);
        assert_eq!(
            combined().validate(&batch),
            Err(RobotError::UnknownOperation {
                channel: Channel::Actions,
                name: "teleport".into(),
            })
        );
    }

    // ------------------------------------------------------------------ edge cases

    #[test]
    fn empty_batches_always_pass() {
        let mute = Processor::new(Uuid::new_v4(), ProcessorSpec::new("mute"));
        let explicit_empty = InstructionBatch {
            events: Some(Vec::new()),
            actions: Some(Vec::new()),
        };
        for cpu in [mute, combined()] {
            assert!(cpu.validate(&InstructionBatch::new()).is_ok());
            assert!(cpu.validate(&explicit_empty).is_ok());
        }
    }

    #[test]
    fn validation_is_idempotent() {
        let cpu = combined();
        let good = InstructionBatch::new().with_events(["scan"]);
        let bad = InstructionBatch {
            events: None,
            actions: Some(vec![Instruction::new("move"), Instruction::new("dance")]),
        };
        assert_eq!(cpu.validate(&good), cpu.validate(&good));
        assert_eq!(cpu.validate(&bad), cpu.validate(&bad));
        assert!(cpu.validate(&bad).is_err());
    }

    #[test]
    fn processor_remembers_owner() {
        let owner = Uuid::new_v4();
        let cpu = Processor::new(owner, ProcessorSpec::new("basic"));
        assert_eq!(cpu.robot_id(), owner);
        assert_eq!(cpu.spec().name, "basic");
    }
}
