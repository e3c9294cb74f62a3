use log::debug;

use crate::game::{Direction, SensorReadings};

/// A steering policy fed with sensor readings once per tick.
///
/// Returning `None` keeps the current heading. Closures of the right shape
/// are agents too.
pub trait Agent {
    fn decide(&mut self, sensors: &SensorReadings) -> Option<Direction>;
}

impl<F> Agent for F
where
    F: FnMut(&SensorReadings) -> Option<Direction>,
{
    fn decide(&mut self, sensors: &SensorReadings) -> Option<Direction> {
        self(sensors)
    }
}

/// Placeholder policy: records what it sees and never steers.
#[derive(Debug, Default)]
pub struct IdleAgent;

impl Agent for IdleAgent {
    fn decide(&mut self, sensors: &SensorReadings) -> Option<Direction> {
        debug!("Sensor readings {:?}", sensors.to_array());
        None
    }
}
