// Domain layer: run-scoped models and the ports the coordinator drives.

pub mod model;
pub mod ports;
