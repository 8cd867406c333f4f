use smallvec::{smallvec, SmallVec};

use crate::{
    archetype::{
        storage::{access::StorageBufferAccess, set::ArchetypeStorageSet},
        Archetype,
    },
    component::{
        access::{ComponentAccess, ReadOnlyComponentAccess},
        Component, ComponentType,
    },
    error::{EcsError, Result},
    signature::Signature,
};

/// One requested component access.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Access {
    pub component: ComponentType,
    pub mutable: bool,
}

impl Access {
    #[inline]
    pub fn of<T: ComponentAccess>() -> Self {
        Self {
            component: <T::Component as Component>::TYPE,
            mutable: T::MUT_ACCESS,
        }
    }
}

/// Checks that no component is requested mutably alongside any other access to it.
///
/// Shared reads of the same component are allowed.
pub fn audit(accesses: &[Access]) -> Result<()> {
    for (i, a) in accesses.iter().enumerate() {
        for b in &accesses[i + 1..] {
            if a.component == b.component && (a.mutable || b.mutable) {
                return Err(EcsError::BorrowConflict(a.component));
            }
        }
    }
    Ok(())
}

/// A component filter represents a set of components and how we wish to access them (read only
/// or read/write).
pub trait ComponentFilter
where
    Self: Sized,
{
    /// The appropriate storage set for the filter.
    type StorageSet: ArchetypeStorageSet;

    /// Every access the filter requests, in declaration order.
    fn accesses() -> SmallVec<[Access; 8]>;

    /// Generates the signature of every component within the filter.
    fn type_key() -> Signature {
        Self::accesses()
            .into_iter()
            .map(|access| access.component)
            .collect()
    }

    /// Rejects filters that would alias a mutable reference.
    #[inline]
    fn audit() -> Result<()> {
        audit(&Self::accesses())
    }

    /// Given an archetype, generates an instance of the storage set for the filter.
    ///
    /// Returns `None` if the filter isn't a subset of the archetype.
    fn make_storage_set(archetype: &mut Archetype) -> Option<Self::StorageSet>;
}

/// A filter made only of shared reads.
pub trait ReadOnlyComponentFilter: ComponentFilter {
    /// Same as `make_storage_set`, from a shared borrow.
    fn make_shared_storage_set(archetype: &Archetype) -> Option<Self::StorageSet>;
}

impl<T: ComponentAccess> ComponentFilter for T {
    type StorageSet = T::Storage;

    #[inline]
    fn accesses() -> SmallVec<[Access; 8]> {
        smallvec![Access::of::<T>()]
    }

    #[inline]
    fn make_storage_set(archetype: &mut Archetype) -> Option<Self::StorageSet> {
        T::Storage::new(archetype)
    }
}

impl<T: ReadOnlyComponentAccess> ReadOnlyComponentFilter for T {
    #[inline]
    fn make_shared_storage_set(archetype: &Archetype) -> Option<Self::StorageSet> {
        T::shared_storage(archetype)
    }
}

macro_rules! component_filter_impl {
    ( $n:expr, $( $name:ident )+ ) => {
        impl<$($name: ComponentAccess,)*> ComponentFilter for ($($name,)*) {
            type StorageSet = ($($name::Storage,)*);

            #[inline]
            fn accesses() -> SmallVec<[Access; 8]> {
                smallvec![$(Access::of::<$name>(),)*]
            }

            #[inline]
            fn make_storage_set(archetype: &mut Archetype) -> Option<Self::StorageSet> {
                Some(($(
                    $name::Storage::new(archetype)?,
                )*))
            }
        }

        impl<$($name: ReadOnlyComponentAccess,)*> ReadOnlyComponentFilter for ($($name,)*) {
            #[inline]
            fn make_shared_storage_set(archetype: &Archetype) -> Option<Self::StorageSet> {
                Some(($(
                    $name::shared_storage(archetype)?,
                )*))
            }
        }
    }
}

component_filter_impl! { 1, A }
component_filter_impl! { 2, A B }
component_filter_impl! { 3, A B C }
component_filter_impl! { 4, A B C D }
component_filter_impl! { 5, A B C D E }
component_filter_impl! { 6, A B C D E F }
component_filter_impl! { 7, A B C D E F G }
component_filter_impl! { 8, A B C D E F G H }
component_filter_impl! { 9, A B C D E F G H I }
component_filter_impl! { 10, A B C D E F G H I J }
component_filter_impl! { 11, A B C D E F G H I J K }
component_filter_impl! { 12, A B C D E F G H I J K L }
