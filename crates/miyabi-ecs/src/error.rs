use thiserror::Error;

use crate::{component::ComponentType, entity::Entity};

pub type Result<T> = std::result::Result<T, EcsError>;

/// Errors reported by world operations. A failed operation never leaves the world partially
/// modified.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EcsError {
    #[error("`{0}` does not exist in this world")]
    UnknownEntity(Entity),
    #[error("invalid operation on component `{component}` of `{entity}`: {reason}")]
    InvalidComponentOperation {
        entity: Entity,
        component: ComponentType,
        reason: &'static str,
    },
    #[error("`{entity}` has no `{component}` component")]
    MissingComponent {
        entity: Entity,
        component: ComponentType,
    },
    #[error("query requests `{0}` mutably alongside another access to it")]
    BorrowConflict(ComponentType),
    #[error("component pack contains `{0}` more than once")]
    DuplicateComponent(ComponentType),
    #[error("corrupt world snapshot: {reason}")]
    CorruptSnapshot { reason: String },
}
