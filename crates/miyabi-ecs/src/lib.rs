//! Archetype based entity component storage.
//!
//! Entities sharing an exact set of component types live together in one archetype, with each
//! component type stored in its own densely packed column. Structural changes move an entity
//! between archetypes; queries walk the columns of every archetype matching a filter.

pub mod archetype;
pub mod component;
pub mod entity;
pub mod error;
pub mod query;
pub mod signature;
pub mod snapshot;
pub mod world;

#[cfg(test)]
mod tests;

pub mod prelude {
    pub use crate::archetype::Archetype;
    pub use crate::archetype::ArchetypeId;
    pub use crate::component::builtin::*;
    pub use crate::component::filter::ComponentFilter;
    pub use crate::component::filter::ReadOnlyComponentFilter;
    pub use crate::component::pack::ComponentPack;
    pub use crate::component::Component;
    pub use crate::component::ComponentType;
    pub use crate::component::ComponentValue;
    pub use crate::entity::Entity;
    pub use crate::error::EcsError;
    pub use crate::query::Query;
    pub use crate::signature::Signature;
    pub use crate::snapshot::ArchetypeSnapshot;
    pub use crate::snapshot::WorldSnapshot;
    pub use crate::world::entities::EntityLocation;
    pub use crate::world::World;
}
