pub mod ecs {
    pub use miyabi_ecs::*;
}

pub mod log {
    pub use miyabi_log::*;
}

pub mod math {
    pub use miyabi_math::*;
}
