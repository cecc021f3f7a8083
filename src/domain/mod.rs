// Domain layer: catalog models and the seams (ports) the core talks through.

pub mod model;
pub mod ports;
