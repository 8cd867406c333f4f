use crate::{
    archetype::{
        storage::access::{
            ReadStorageBuffer, SharedStorageBufferAccess, StorageBufferAccess, WriteStorageBuffer,
        },
        Archetype,
    },
    component::Component,
};

/// Represents a way to access a particular component type.
pub trait ComponentAccess {
    /// The component type being accessed.
    type Component: Component;

    /// The type of column access needed for the component access.
    type Storage: StorageBufferAccess<Component = Self::Component>;

    /// Indicates that the component access type is mutable.
    const MUT_ACCESS: bool;
}

/// A component access that never writes, and so can be served from a shared world borrow.
pub trait ReadOnlyComponentAccess: ComponentAccess {
    fn shared_storage(archetype: &Archetype) -> Option<Self::Storage>;
}

impl<'a, C: Component> ComponentAccess for &'a C {
    type Component = C;
    type Storage = ReadStorageBuffer<C>;
    const MUT_ACCESS: bool = false;
}

impl<'a, C: Component> ReadOnlyComponentAccess for &'a C {
    #[inline]
    fn shared_storage(archetype: &Archetype) -> Option<Self::Storage> {
        ReadStorageBuffer::new_shared(archetype)
    }
}

impl<'a, C: Component> ComponentAccess for &'a mut C {
    type Component = C;
    type Storage = WriteStorageBuffer<C>;
    const MUT_ACCESS: bool = true;
}
