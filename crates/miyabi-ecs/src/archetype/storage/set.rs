use paste::paste;

use crate::archetype::storage::access::StorageBufferAccess;

/// A set of column accesses into the same archetype.
pub trait ArchetypeStorageSet {
    /// What a single row of the set is accessed as.
    type Filter<'w>;

    /// Fetch every access in the set at the same row.
    ///
    /// # Safety
    /// Same requirements as `StorageBufferAccess::fetch`, for every access in the set.
    unsafe fn fetch<'w>(&self, idx: usize) -> Self::Filter<'w>;
}

impl<T: StorageBufferAccess> ArchetypeStorageSet for T {
    type Filter<'w> = T::Item<'w>;

    #[inline]
    unsafe fn fetch<'w>(&self, idx: usize) -> Self::Filter<'w> {
        StorageBufferAccess::fetch(self, idx)
    }
}

macro_rules! archetype_storage_set_impl {
    ( $n:expr, $( $name:ident )+ ) => {
        impl<$($name: StorageBufferAccess,)*> ArchetypeStorageSet for ($($name,)*) {
            type Filter<'w> = ($($name::Item<'w>,)*);

            #[inline]
            unsafe fn fetch<'w>(&self, idx: usize) -> Self::Filter<'w> {
                paste! {
                    #[allow(non_snake_case)]
                    let ($([<$name _storage>],)*) = self;
                }

                paste! { ($(
                    StorageBufferAccess::fetch([<$name _storage>], idx),
                )*) }
            }
        }
    }
}

archetype_storage_set_impl! { 1, A }
archetype_storage_set_impl! { 2, A B }
archetype_storage_set_impl! { 3, A B C }
archetype_storage_set_impl! { 4, A B C D }
archetype_storage_set_impl! { 5, A B C D E }
archetype_storage_set_impl! { 6, A B C D E F }
archetype_storage_set_impl! { 7, A B C D E F G }
archetype_storage_set_impl! { 8, A B C D E F G H }
archetype_storage_set_impl! { 9, A B C D E F G H I }
archetype_storage_set_impl! { 10, A B C D E F G H I J }
archetype_storage_set_impl! { 11, A B C D E F G H I J K }
archetype_storage_set_impl! { 12, A B C D E F G H I J K L }
