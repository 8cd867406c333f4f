use std::{iter::FusedIterator, marker::PhantomData};

use crate::{
    archetype::{
        storage::{access::EntityBuffer, set::ArchetypeStorageSet},
        Archetype,
    },
    component::filter::{ComponentFilter, ReadOnlyComponentFilter},
    entity::Entity,
    error::Result,
};

/// What a query yields for each matching entity.
pub type QueryItem<'w, F> = (
    Entity,
    <<F as ComponentFilter>::StorageSet as ArchetypeStorageSet>::Filter<'w>,
);

/// Iterates every entity whose signature is a superset of the filter's component set.
///
/// Archetypes are visited in ascending ID order and rows in storage order. The query borrows the
/// world for `'w`, so no structural change can happen while it is alive.
pub struct Query<'w, F: ComponentFilter> {
    /// Storage sets still to be visited, in reverse order.
    sets: Vec<(EntityBuffer, F::StorageSet)>,
    /// Set currently being visited.
    set: Option<(EntityBuffer, F::StorageSet)>,
    /// Row within the current set.
    idx: usize,
    /// Rows not yet yielded.
    remaining: usize,
    _phantom: PhantomData<(&'w (), fn() -> F)>,
}

impl<'w, F: ComponentFilter> Query<'w, F> {
    /// Builds a query over mutably borrowed archetypes.
    ///
    /// Fails with `BorrowConflict` before touching any column if the filter would alias a mutable
    /// reference.
    pub(crate) fn new(archetypes: &'w mut [Archetype]) -> Result<Self> {
        F::audit()?;
        let descriptor = F::type_key();

        let mut sets = Vec::default();
        let mut len = 0;
        for archetype in archetypes.iter_mut() {
            if archetype.is_empty() || !descriptor.subset_of(archetype.signature()) {
                continue;
            }

            if let Some(set) = F::make_storage_set(archetype) {
                len += archetype.len();
                sets.push((EntityBuffer::new(archetype), set));
            }
        }

        Ok(Self::from_sets(sets, len))
    }

    fn from_sets(mut sets: Vec<(EntityBuffer, F::StorageSet)>, len: usize) -> Self {
        // Popping from the back must visit the lowest archetype ID first
        sets.reverse();
        let set = sets.pop();
        Self {
            sets,
            set,
            idx: 0,
            remaining: len,
            _phantom: PhantomData,
        }
    }

    /// Number of entities left to visit.
    #[inline]
    pub fn len(&self) -> usize {
        self.remaining
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining == 0
    }
}

impl<'w, F: ReadOnlyComponentFilter> Query<'w, F> {
    /// Builds a read only query over shared archetypes. Multiple of these may be alive at once.
    pub(crate) fn new_shared(archetypes: &'w [Archetype]) -> Result<Self> {
        F::audit()?;
        let descriptor = F::type_key();

        let mut sets = Vec::default();
        let mut len = 0;
        for archetype in archetypes {
            if archetype.is_empty() || !descriptor.subset_of(archetype.signature()) {
                continue;
            }

            if let Some(set) = F::make_shared_storage_set(archetype) {
                len += archetype.len();
                sets.push((EntityBuffer::new(archetype), set));
            }
        }

        Ok(Self::from_sets(sets, len))
    }
}

impl<'w, F: ComponentFilter> Iterator for Query<'w, F> {
    type Item = QueryItem<'w, F>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (entities, set) = self.set.as_ref()?;

        // SAFETY: Sets are never empty, and `idx` is moved to the next set as soon as it reaches
        // the end of the current one. The archetypes are borrowed for `'w` so no column can be
        // resized behind our back, and each row is yielded exactly once so mutable references
        // never alias.
        let item = unsafe { (entities.fetch(self.idx), set.fetch(self.idx)) };

        self.idx += 1;
        self.remaining -= 1;
        if self.idx == entities.len() {
            self.set = self.sets.pop();
            self.idx = 0;
        }

        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'w, F: ComponentFilter> ExactSizeIterator for Query<'w, F> {}

impl<'w, F: ComponentFilter> FusedIterator for Query<'w, F> {}
