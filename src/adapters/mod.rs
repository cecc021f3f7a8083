// Adapters layer: concrete implementations for external systems (registry http, rendering, ssh).

pub mod consul;
pub mod launcher;
pub mod probe;
pub mod render;
