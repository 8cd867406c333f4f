pub mod access;
pub mod builtin;
pub mod filter;
pub mod pack;
pub mod registry;

use std::fmt::Debug;

pub use builtin::*;
pub use registry::{Column, ComponentType, ComponentValue};

/// A component represents a unique piece of data in an ECS. Components are associated with a
/// particular entity within a world.
///
/// The set of component kinds is closed: every implementation is generated by the registry in
/// `registry.rs`, which is the one place a new kind has to be listed.
pub trait Component: Clone + Debug + PartialEq + Send + Sync + Sized + 'static {
    /// Tag identifying this component kind in type-erased storage.
    const TYPE: ComponentType;

    /// Views a column as this component's concrete buffer. Returns `None` if the column holds a
    /// different kind.
    fn column(column: &Column) -> Option<&Vec<Self>>;

    /// Mutable version of `column`.
    fn column_mut(column: &mut Column) -> Option<&mut Vec<Self>>;

    /// Erases the concrete type of the component.
    fn into_value(self) -> ComponentValue;
}
