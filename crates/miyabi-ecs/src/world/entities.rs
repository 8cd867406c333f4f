use rustc_hash::FxHashMap;

use crate::{
    archetype::ArchetypeId,
    entity::{Entity, EntityAllocator},
};

/// Where an entity's components live: which archetype, and which row within it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct EntityLocation {
    archetype: ArchetypeId,
    index: usize,
}

impl EntityLocation {
    #[inline]
    pub(crate) fn new(archetype: ArchetypeId, index: usize) -> Self {
        Self { archetype, index }
    }

    /// ID of the archetype the entity's components exist in.
    #[inline]
    pub fn archetype(&self) -> ArchetypeId {
        self.archetype
    }

    /// Row within each archetype column the entity's components exist in.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Container for the entities belonging to a world.
///
/// Owns the identifier counter and the location index. Only the world mutates it, and every
/// structural change to an archetype is mirrored here in the same call.
#[derive(Debug, Default)]
pub struct Entities {
    locations: FxHashMap<Entity, EntityLocation>,
    allocator: EntityAllocator,
}

impl Entities {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut locations = FxHashMap::default();
        locations.reserve(capacity);
        Self {
            locations,
            allocator: EntityAllocator::default(),
        }
    }

    pub(crate) fn with_next_id(next: u64, capacity: usize) -> Self {
        let mut entities = Self::with_capacity(capacity);
        entities.allocator = EntityAllocator::starting_at(next);
        entities
    }

    #[inline]
    pub fn location(&self, entity: Entity) -> Option<EntityLocation> {
        self.locations.get(&entity).copied()
    }

    #[inline]
    pub fn contains(&self, entity: Entity) -> bool {
        self.locations.contains_key(&entity)
    }

    /// Number of live entities.
    #[inline]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Iterates every live entity and its location in no particular order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (Entity, EntityLocation)> + '_ {
        self.locations.iter().map(|(e, l)| (*e, *l))
    }

    /// The identifier the next allocation will produce.
    #[inline]
    pub fn next_id(&self) -> u64 {
        self.allocator.peek()
    }

    #[inline]
    pub(crate) fn reserve(&mut self, additional: usize) {
        self.locations.reserve(additional);
    }

    #[inline]
    pub(crate) fn allocate(&mut self) -> Entity {
        self.allocator.allocate()
    }

    #[inline]
    pub(crate) fn insert(&mut self, entity: Entity, location: EntityLocation) {
        self.locations.insert(entity, location);
    }

    #[inline]
    pub(crate) fn remove(&mut self, entity: Entity) -> Option<EntityLocation> {
        self.locations.remove(&entity)
    }

    /// Records that `entity` was moved to another row of the same archetype.
    #[inline]
    pub(crate) fn set_index(&mut self, entity: Entity, index: usize) {
        if let Some(location) = self.locations.get_mut(&entity) {
            location.index = index;
        } else {
            debug_assert!(false, "moved entity {entity} missing from location index");
        }
    }

    /// Forgets every entity. The counter keeps going so identifiers are never handed out twice.
    #[inline]
    pub(crate) fn clear(&mut self) {
        self.locations.clear();
    }
}
