//! Component traits – the opaque parts a [`Robot`][crate::robot::Robot] is
//! assembled from.
//!
//! The registry only tracks whether a slot is occupied; it never inspects a
//! component beyond its model name.  Concrete drivers live outside the kernel
//! and implement these traits.

use std::fmt::Debug;

use robots_types::Slot;

use crate::processor::Processor;

/// Propulsion unit.
pub trait Engine: Debug + Send + Sync {
    /// Model name, e.g. `"v8-tracks"`.
    fn model(&self) -> &str;
}

/// Storage unit.
pub trait Memory: Debug + Send + Sync {
    fn model(&self) -> &str;
}

/// Plating; only required by armored robots.
pub trait Armor: Debug + Send + Sync {
    fn model(&self) -> &str;
}

/// Sensing unit.  A robot may carry any number of sensors.
pub trait Sensor: Debug + Send + Sync {
    fn model(&self) -> &str;
}

/// A component destined for one of the single-occupant slots.
#[derive(Debug)]
pub enum Part {
    Engine(Box<dyn Engine>),
    Memory(Box<dyn Memory>),
    Armor(Box<dyn Armor>),
    Processor(Processor),
}

impl Part {
    /// The slot this part occupies once assigned.
    pub fn slot(&self) -> Slot {
        match self {
            Part::Engine(_) => Slot::Engine,
            Part::Memory(_) => Slot::Memory,
            Part::Armor(_) => Slot::Armor,
            Part::Processor(_) => Slot::Processor,
        }
    }

    /// Model name of the wrapped component.  Processors report their
    /// capability descriptor name.
    pub fn model(&self) -> &str {
        match self {
            Part::Engine(e) => e.model(),
            Part::Memory(m) => m.model(),
            Part::Armor(a) => a.model(),
            Part::Processor(p) => &p.spec().name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use robots_types::ProcessorSpec;
    use uuid::Uuid;

    #[derive(Debug)]
    struct MockEngine;
    impl Engine for MockEngine {
        fn model(&self) -> &str {
            "mock-engine"
        }
    }

    #[derive(Debug)]
    struct MockArmor;
    impl Armor for MockArmor {
        fn model(&self) -> &str {
            "mock-armor"
        }
    }

    #[test]
    fn part_reports_its_slot() {
        assert_eq!(Part::Engine(Box::new(MockEngine)).slot(), Slot::Engine);
        assert_eq!(Part::Armor(Box::new(MockArmor)).slot(), Slot::Armor);

        let cpu = Processor::new(Uuid::new_v4(), ProcessorSpec::new("basic"));
        assert_eq!(Part::Processor(cpu).slot(), Slot::Processor);
    }

    #[test]
    fn part_model_delegates_to_component() {
        assert_eq!(Part::Engine(Box::new(MockEngine)).model(), "mock-engine");

        let cpu = Processor::new(Uuid::new_v4(), ProcessorSpec::new("quantum"));
        assert_eq!(Part::Processor(cpu).model(), "quantum");
    }
}
