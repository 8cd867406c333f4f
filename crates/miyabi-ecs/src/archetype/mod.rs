pub mod storage;

use std::{fmt, ptr::NonNull};

use rustc_hash::FxHashMap;

use crate::{
    component::{Column, Component, ComponentType},
    entity::Entity,
    signature::Signature,
};

/// Unique ID for an archetype. This is the archetype's index within its world and is never
/// reused or invalidated.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArchetypeId(u32);

/// Columnar storage for every entity sharing one exact signature.
///
/// For any row `i`, `entities[i]`'s component data lives at index `i` of every column, and every
/// column is exactly as long as `entities`.
#[derive(Debug)]
pub struct Archetype {
    id: ArchetypeId,
    signature: Signature,
    entities: Vec<Entity>,
    /// One column per type in the signature, in signature order.
    columns: Vec<Column>,
}

impl Archetype {
    fn new(id: ArchetypeId, signature: Signature) -> Self {
        let columns = signature.iter().map(Column::new).collect();
        Self {
            id,
            signature,
            entities: Vec::new(),
            columns,
        }
    }

    /// Builds an archetype from pre-filled columns. The caller guarantees the columns match the
    /// signature order and the entity count.
    pub(crate) fn from_parts(
        id: ArchetypeId,
        signature: Signature,
        entities: Vec<Entity>,
        columns: Vec<Column>,
    ) -> Self {
        debug_assert_eq!(signature.len(), columns.len());
        debug_assert!(columns.iter().all(|column| column.len() == entities.len()));
        Self {
            id,
            signature,
            entities,
            columns,
        }
    }

    #[inline]
    pub fn id(&self) -> ArchetypeId {
        self.id
    }

    #[inline]
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    #[inline]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    #[inline]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Number of rows (entities) in the archetype.
    #[inline]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    #[inline]
    pub fn column(&self, ty: ComponentType) -> Option<&Column> {
        self.signature.index_of(ty).map(|i| &self.columns[i])
    }

    /// Typed view of the column holding `C`.
    #[inline]
    pub fn components<C: Component>(&self) -> Option<&[C]> {
        self.column(C::TYPE)
            .and_then(C::column)
            .map(|buffer| buffer.as_slice())
    }

    #[inline]
    pub fn get<C: Component>(&self, row: usize) -> Option<&C> {
        self.components::<C>().and_then(|buffer| buffer.get(row))
    }

    #[inline]
    pub fn get_mut<C: Component>(&mut self, row: usize) -> Option<&mut C> {
        self.typed_column_mut::<C>()
            .and_then(|buffer| buffer.get_mut(row))
    }

    #[inline]
    pub(crate) fn column_mut(&mut self, ty: ComponentType) -> Option<&mut Column> {
        self.signature.index_of(ty).map(|i| &mut self.columns[i])
    }

    #[inline]
    pub(crate) fn typed_column_mut<C: Component>(&mut self) -> Option<&mut Vec<C>> {
        self.column_mut(C::TYPE).and_then(C::column_mut)
    }

    /// Pointer to the first element of the column holding `C`. Only valid for reads.
    #[inline]
    pub(crate) fn column_ptr<C: Component>(&self) -> Option<NonNull<C>> {
        self.components::<C>().map(|buffer| NonNull::from(buffer).cast())
    }

    /// Pointer to the first element of the column holding `C`. Valid for reads and writes until
    /// the archetype is next borrowed mutably for the same column.
    #[inline]
    pub(crate) fn column_ptr_mut<C: Component>(&mut self) -> Option<NonNull<C>> {
        self.typed_column_mut::<C>()
            .map(|buffer| NonNull::from(buffer.as_mut_slice()).cast())
    }

    /// Appends an entity to the entity list. The caller must push exactly one value into every
    /// column as part of the same operation.
    #[inline]
    pub(crate) fn push_entity(&mut self, entity: Entity) -> usize {
        self.entities.push(entity);
        self.entities.len() - 1
    }

    /// Removes the entity at `row` from the entity list only, moving the last entity into its
    /// place. Returns the moved entity if there was one.
    fn swap_remove_entity(&mut self, row: usize) -> Option<Entity> {
        // Entity is the last entity, so we don't need to worry about moving anything
        if row == self.entities.len() - 1 {
            self.entities.pop();
            None
        }
        // Entity is not the last entity, so we need to determine which entity is moved
        else {
            self.entities.swap_remove(row);
            Some(self.entities[row])
        }
    }

    /// Removes every row, keeping the allocation.
    pub(crate) fn clear(&mut self) {
        self.entities.clear();
        self.columns.iter_mut().for_each(Column::clear);
    }

    pub(crate) fn into_parts(self) -> (Signature, Vec<Entity>, Vec<Column>) {
        (self.signature, self.entities, self.columns)
    }

    /// Checks the column density invariant.
    pub fn is_dense(&self) -> bool {
        self.columns.len() == self.signature.len()
            && self
                .columns
                .iter()
                .zip(self.signature.iter())
                .all(|(column, ty)| {
                    column.component_type() == ty && column.len() == self.entities.len()
                })
    }
}

/// Holds every archetype of a world.
#[derive(Default)]
pub struct Archetypes {
    /// All archetypes, indexed by ID.
    archetypes: Vec<Archetype>,
    /// Maps archetype signatures to their unique ID.
    to_archetype: FxHashMap<Signature, ArchetypeId>,
}

impl Archetypes {
    pub fn new() -> Self {
        Archetypes::default()
    }

    /// Gets a list of all archetypes in ascending ID order.
    #[inline]
    pub fn archetypes(&self) -> &[Archetype] {
        &self.archetypes
    }

    #[inline]
    pub(crate) fn archetypes_mut(&mut self) -> &mut [Archetype] {
        &mut self.archetypes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.archetypes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.archetypes.is_empty()
    }

    /// # Panics
    /// Panics if the ID was not issued by this collection.
    #[inline]
    pub fn get(&self, id: ArchetypeId) -> &Archetype {
        &self.archetypes[usize::from(id)]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: ArchetypeId) -> &mut Archetype {
        &mut self.archetypes[usize::from(id)]
    }

    /// Looks up the archetype with exactly this signature.
    #[inline]
    pub fn find(&self, signature: &Signature) -> Option<ArchetypeId> {
        self.to_archetype.get(signature).copied()
    }

    /// Returns the archetype with exactly this signature, creating an empty one if none exists.
    pub fn get_or_create(&mut self, signature: &Signature) -> ArchetypeId {
        if let Some(id) = self.find(signature) {
            return id;
        }

        let id = ArchetypeId::from(self.archetypes.len());
        log::debug!("creating archetype {} with signature {}", id, signature);
        self.to_archetype.insert(signature.clone(), id);
        self.archetypes.push(Archetype::new(id, signature.clone()));
        id
    }

    /// Adds an archetype built from imported data. Returns `None` if the signature is already
    /// taken.
    pub(crate) fn insert_filled(
        &mut self,
        signature: Signature,
        entities: Vec<Entity>,
        columns: Vec<Column>,
    ) -> Option<ArchetypeId> {
        if self.to_archetype.contains_key(&signature) {
            return None;
        }

        let id = ArchetypeId::from(self.archetypes.len());
        self.to_archetype.insert(signature.clone(), id);
        self.archetypes
            .push(Archetype::from_parts(id, signature, entities, columns));
        Some(id)
    }

    /// Removes an entity from its archetype by the index of the entity within the archetype.
    /// If an entity was moved to fill in the place of the removed entity, the moved entity's
    /// handle is returned.
    ///
    /// # Panics
    /// Panics if the archetype ID is invalid or if the provided index is out of bounds.
    pub fn remove_entity(&mut self, archetype: ArchetypeId, index: usize) -> Option<Entity> {
        let archetype = &mut self.archetypes[usize::from(archetype)];
        let moved = archetype.swap_remove_entity(index);

        // For every component type in the archetype, remove the entity's component and swap it
        // with the last component in the buffer
        for column in &mut archetype.columns {
            column.swap_remove(index);
        }

        moved
    }

    /// Moves an entity into the archetype with the signature extended by `C` and appends
    /// `component` to it. Returns the new archetype ID, the entity's new index, and the entity
    /// that was moved to fill its old place if there was one.
    ///
    /// Returns `None` without touching any storage if the entity already has a `C`.
    pub fn add_component<C: Component>(
        &mut self,
        entity: Entity,
        src_archetype_id: ArchetypeId,
        index: usize,
        component: C,
    ) -> Option<(ArchetypeId, usize, Option<Entity>)> {
        let mut key = self.get(src_archetype_id).signature.clone();
        if key.add(C::TYPE) {
            return None;
        }

        let dst_archetype_id = self.get_or_create(&key);
        let (src, dst) = self.pair_mut(src_archetype_id, dst_archetype_id);
        let (new_idx, moved) = migrate(entity, src, dst, index);

        // The only column the source did not fill
        dst.typed_column_mut::<C>()
            .expect("destination archetype missing added component column")
            .push(component);

        debug_assert!(dst.is_dense());
        Some((dst_archetype_id, new_idx, moved))
    }

    /// Moves an entity into the archetype with `component` removed from its signature, dropping
    /// the removed component. Returns the new archetype ID, the entity's new index, and the
    /// entity that was moved to fill its old place if there was one.
    ///
    /// Returns `None` without touching any storage if the entity does not have the component.
    pub fn remove_component(
        &mut self,
        entity: Entity,
        src_archetype_id: ArchetypeId,
        index: usize,
        component: ComponentType,
    ) -> Option<(ArchetypeId, usize, Option<Entity>)> {
        let mut key = self.get(src_archetype_id).signature.clone();
        if !key.remove(component) {
            return None;
        }

        let dst_archetype_id = self.get_or_create(&key);
        let (src, dst) = self.pair_mut(src_archetype_id, dst_archetype_id);
        let (new_idx, moved) = migrate(entity, src, dst, index);

        debug_assert!(dst.is_dense());
        Some((dst_archetype_id, new_idx, moved))
    }

    /// Mutably borrows two distinct archetypes at once.
    fn pair_mut(&mut self, a: ArchetypeId, b: ArchetypeId) -> (&mut Archetype, &mut Archetype) {
        let (a, b) = (usize::from(a), usize::from(b));
        assert_ne!(a, b, "cannot borrow an archetype twice");
        if a < b {
            let (lo, hi) = self.archetypes.split_at_mut(b);
            (&mut lo[a], &mut hi[0])
        } else {
            let (lo, hi) = self.archetypes.split_at_mut(a);
            (&mut hi[0], &mut lo[b])
        }
    }

    /// Drops every row of every archetype. Archetypes themselves stay allocated.
    pub(crate) fn clear(&mut self) {
        self.archetypes.iter_mut().for_each(Archetype::clear);
    }

    pub(crate) fn into_archetypes(self) -> Vec<Archetype> {
        self.archetypes
    }
}

/// Swap-removes `entity` at `index` from `src` and appends it to `dst`, carrying every component
/// the two signatures share. Components only `src` has are dropped. Components only `dst` has must
/// be pushed by the caller before the archetype is observed again.
fn migrate(
    entity: Entity,
    src: &mut Archetype,
    dst: &mut Archetype,
    index: usize,
) -> (usize, Option<Entity>) {
    log::trace!(
        "moving {} from archetype {} to archetype {}",
        entity,
        src.id,
        dst.id
    );

    let moved = src.swap_remove_entity(index);
    let new_idx = dst.push_entity(entity);

    // Swap components from src buffers to dst buffers
    for (ty, src_column) in src.signature.iter().zip(src.columns.iter_mut()) {
        match dst.signature.index_of(ty) {
            Some(dst_column) => src_column.swap_move(&mut dst.columns[dst_column], index),
            None => src_column.swap_remove(index),
        }
    }

    (new_idx, moved)
}

impl fmt::Display for ArchetypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ArchetypeId {
    #[inline]
    fn from(item: u32) -> Self {
        ArchetypeId(item)
    }
}

impl From<usize> for ArchetypeId {
    #[inline]
    fn from(item: usize) -> Self {
        ArchetypeId(item as u32)
    }
}

impl From<ArchetypeId> for u32 {
    #[inline]
    fn from(item: ArchetypeId) -> Self {
        item.0
    }
}

impl From<ArchetypeId> for usize {
    #[inline]
    fn from(item: ArchetypeId) -> Self {
        item.0 as usize
    }
}
