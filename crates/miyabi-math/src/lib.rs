//! Vector and matrix types shared by every crate of the engine.

pub use glam::*;
