use std::ptr::NonNull;

use crate::{archetype::Archetype, component::Component, entity::Entity};

/// A way to access a column within an archetype.
pub trait StorageBufferAccess: Sized {
    /// Type of component held in the column.
    type Component: Component;

    /// What a single row of the column is accessed as.
    type Item<'w>;

    /// Creates an access to the archetype's column for `Self::Component`.
    ///
    /// Returns `None` if the archetype has no such column.
    fn new(archetype: &mut Archetype) -> Option<Self>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool;

    /// Fetch a component in the column by row.
    ///
    /// # Safety
    /// `idx` must be in bounds, the column must not have been structurally modified since the
    /// access was created, and for mutable accesses no other reference to the same row may be
    /// alive for `'w`.
    unsafe fn fetch<'w>(&self, idx: usize) -> Self::Item<'w>;
}

/// A column access that can be created from a shared borrow of the archetype.
pub trait SharedStorageBufferAccess: StorageBufferAccess {
    fn new_shared(archetype: &Archetype) -> Option<Self>;
}

// Raw pointers because a single archetype may hand out a mutable access to one column while
// other columns of the same archetype are being read.

pub struct ReadStorageBuffer<T> {
    ptr: NonNull<T>,
    len: usize,
}

pub struct WriteStorageBuffer<T> {
    ptr: NonNull<T>,
    len: usize,
}

impl<T: Component> StorageBufferAccess for ReadStorageBuffer<T> {
    type Component = T;
    type Item<'w> = &'w T;

    #[inline]
    fn new(archetype: &mut Archetype) -> Option<Self> {
        Self::new_shared(archetype)
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    unsafe fn fetch<'w>(&self, idx: usize) -> Self::Item<'w> {
        debug_assert!(idx < self.len);
        &*self.ptr.as_ptr().add(idx)
    }
}

impl<T: Component> SharedStorageBufferAccess for ReadStorageBuffer<T> {
    #[inline]
    fn new_shared(archetype: &Archetype) -> Option<Self> {
        Some(Self {
            ptr: archetype.column_ptr::<T>()?,
            len: archetype.len(),
        })
    }
}

impl<T: Component> StorageBufferAccess for WriteStorageBuffer<T> {
    type Component = T;
    type Item<'w> = &'w mut T;

    #[inline]
    fn new(archetype: &mut Archetype) -> Option<Self> {
        let len = archetype.len();
        Some(Self {
            ptr: archetype.column_ptr_mut::<T>()?,
            len,
        })
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    unsafe fn fetch<'w>(&self, idx: usize) -> Self::Item<'w> {
        debug_assert!(idx < self.len);
        &mut *self.ptr.as_ptr().add(idx)
    }
}

/// Special fast iterator for the entity list of an archetype.
pub(crate) struct EntityBuffer {
    ptr: NonNull<Entity>,
    len: usize,
}

impl EntityBuffer {
    #[inline]
    pub fn new(archetype: &Archetype) -> Self {
        let entities = archetype.entities();
        Self {
            ptr: NonNull::from(entities).cast(),
            len: entities.len(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// # Safety
    /// `idx` must be in bounds and the archetype must not have been structurally modified since
    /// the buffer was created.
    #[inline]
    pub unsafe fn fetch(&self, idx: usize) -> Entity {
        debug_assert!(idx < self.len);
        *self.ptr.as_ptr().add(idx)
    }
}
