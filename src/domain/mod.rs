// Domain layer: records, feed shapes and the ports the core talks through.

pub mod model;
pub mod ports;
