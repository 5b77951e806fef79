//! Stock component drivers.
//!
//! Each stub only records its model name; the kernel never looks further.
//! They let the full stack run in tests and from the CLI without any real
//! hardware model behind the parts.

use robots_kernel::{Armor, Engine, Memory, Sensor};

macro_rules! stock_part {
    ($(#[$doc:meta])* $name:ident: $trait:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            model: String,
        }

        impl $name {
            pub fn new(model: impl Into<String>) -> Self {
                Self { model: model.into() }
            }

            /// Boxed form, ready for a robot slot.
            pub fn boxed(model: impl Into<String>) -> Box<Self> {
                Box::new(Self::new(model))
            }
        }

        impl $trait for $name {
            fn model(&self) -> &str {
                &self.model
            }
        }
    };
}

stock_part!(
    /// Stock propulsion unit.
    StockEngine: Engine
);
stock_part!(
    /// Stock storage unit.
    StockMemory: Memory
);
stock_part!(
    /// Stock plating.
    StockArmor: Armor
);
stock_part!(
    /// Stock sensing unit.
    StockSensor: Sensor
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_parts_report_model() {
        assert_eq!(Engine::model(&StockEngine::new("ion-drive")), "ion-drive");
        assert_eq!(Memory::model(&StockMemory::new("mem-64")), "mem-64");
        assert_eq!(Armor::model(&StockArmor::new("plate")), "plate");
        assert_eq!(Sensor::model(&*StockSensor::boxed("radar")), "radar");
    }
}
