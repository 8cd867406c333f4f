pub mod entities;

use crate::{
    archetype::{ArchetypeId, Archetypes},
    component::{
        filter::{ComponentFilter, ReadOnlyComponentFilter},
        pack::ComponentPack,
        Component, ComponentType,
    },
    entity::Entity,
    error::{EcsError, Result},
    query::Query,
    signature::Signature,
    world::entities::{Entities, EntityLocation},
};

/// A world contains the data of the ECS. It is used to create entities and add and remove
/// components from those entities.
///
/// Every operation either fully applies or returns an error with the world unchanged.
#[derive(Default)]
pub struct World {
    /// Entities belonging to the world.
    pub(crate) entities: Entities,
    /// Archetypes and their storages.
    pub(crate) archetypes: Archetypes,
}

impl World {
    pub fn new() -> World {
        World::default()
    }

    /// Creates a world with room for `entities` entities in its location index.
    pub fn with_capacity(entities: usize) -> World {
        World {
            entities: Entities::with_capacity(entities),
            archetypes: Archetypes::default(),
        }
    }

    #[inline]
    pub fn entities(&self) -> &Entities {
        &self.entities
    }

    #[inline]
    pub fn archetypes(&self) -> &Archetypes {
        &self.archetypes
    }

    /// Number of live entities.
    #[inline]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    #[inline]
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains(entity)
    }

    #[inline]
    pub fn location(&self, entity: Entity) -> Result<EntityLocation> {
        self.entities
            .location(entity)
            .ok_or(EcsError::UnknownEntity(entity))
    }

    /// The set of component types `entity` currently has.
    pub fn signature_of(&self, entity: Entity) -> Result<&Signature> {
        let location = self.location(entity)?;
        Ok(self.archetypes.get(location.archetype()).signature())
    }

    /// Returns the archetype with exactly this signature, creating an empty one if none exists.
    #[inline]
    pub fn get_or_create_archetype(&mut self, signature: &Signature) -> ArchetypeId {
        self.archetypes.get_or_create(signature)
    }

    /// Hands out the next identifier. The entity has no location until it is placed.
    #[inline]
    fn allocate_entity(&mut self) -> Entity {
        self.entities.allocate()
    }

    /// Creates a new entity with the components in the pack.
    ///
    /// Fails with `DuplicateComponent` if the pack names a component type twice, in which case no
    /// identifier is consumed.
    pub fn spawn<P: ComponentPack>(&mut self, pack: P) -> Result<Entity> {
        if let Some(ty) = pack.duplicate() {
            return Err(EcsError::DuplicateComponent(ty));
        }

        let id = self.archetypes.get_or_create(&pack.type_key());
        Ok(self.place(id, pack))
    }

    /// Creates one entity per pack. Every pack is validated before any entity is created, so an
    /// invalid pack anywhere in the batch leaves the world untouched.
    pub fn spawn_batch<P, I>(&mut self, packs: I) -> Result<Vec<Entity>>
    where
        P: ComponentPack,
        I: IntoIterator<Item = P>,
    {
        let packs: Vec<P> = packs.into_iter().collect();
        if let Some(ty) = packs.iter().find_map(ComponentPack::duplicate) {
            return Err(EcsError::DuplicateComponent(ty));
        }

        self.entities.reserve(packs.len());
        let mut spawned = Vec::with_capacity(packs.len());
        let mut last: Option<(Signature, ArchetypeId)> = None;
        for pack in packs {
            let signature = pack.type_key();
            let id = match &last {
                Some((cached, id)) if *cached == signature => *id,
                _ => {
                    let id = self.archetypes.get_or_create(&signature);
                    last = Some((signature, id));
                    id
                }
            };
            spawned.push(self.place(id, pack));
        }

        Ok(spawned)
    }

    /// Moves a validated pack into archetype `id` under a freshly allocated entity.
    fn place<P: ComponentPack>(&mut self, id: ArchetypeId, pack: P) -> Entity {
        let entity = self.allocate_entity();
        let archetype = self.archetypes.get_mut(id);
        pack.move_into(archetype);
        let index = archetype.push_entity(entity);
        debug_assert!(archetype.is_dense());

        self.entities.insert(entity, EntityLocation::new(id, index));
        entity
    }

    /// Destroys an entity and drops all of its components. The last entity of the archetype takes
    /// its row.
    pub fn despawn(&mut self, entity: Entity) -> Result<()> {
        let location = self
            .entities
            .remove(entity)
            .ok_or(EcsError::UnknownEntity(entity))?;

        if let Some(moved) = self
            .archetypes
            .remove_entity(location.archetype(), location.index())
        {
            self.entities.set_index(moved, location.index());
        }

        Ok(())
    }

    /// Gives `entity` a component it does not yet have, moving it to the matching archetype.
    pub fn add_component<C: Component>(&mut self, entity: Entity, component: C) -> Result<()> {
        let location = self.location(entity)?;

        let (archetype, index, moved) = self
            .archetypes
            .add_component(entity, location.archetype(), location.index(), component)
            .ok_or(EcsError::InvalidComponentOperation {
                entity,
                component: C::TYPE,
                reason: "entity already has this component",
            })?;

        self.relocate(entity, location, archetype, index, moved);
        Ok(())
    }

    /// Removes the `C` component from `entity`, moving it to the matching archetype.
    #[inline]
    pub fn remove_component<C: Component>(&mut self, entity: Entity) -> Result<()> {
        self.remove_component_by_type(entity, C::TYPE)
    }

    /// Same as `remove_component` for a component type only known at runtime.
    pub fn remove_component_by_type(&mut self, entity: Entity, ty: ComponentType) -> Result<()> {
        let location = self.location(entity)?;

        let (archetype, index, moved) = self
            .archetypes
            .remove_component(entity, location.archetype(), location.index(), ty)
            .ok_or(EcsError::InvalidComponentOperation {
                entity,
                component: ty,
                reason: "entity does not have this component",
            })?;

        self.relocate(entity, location, archetype, index, moved);
        Ok(())
    }

    /// Records the outcome of a migration in the location index.
    fn relocate(
        &mut self,
        entity: Entity,
        old: EntityLocation,
        archetype: ArchetypeId,
        index: usize,
        moved: Option<Entity>,
    ) {
        self.entities
            .insert(entity, EntityLocation::new(archetype, index));
        if let Some(moved) = moved {
            self.entities.set_index(moved, old.index());
        }
    }

    pub fn get<C: Component>(&self, entity: Entity) -> Result<&C> {
        let location = self.location(entity)?;
        self.archetypes
            .get(location.archetype())
            .get::<C>(location.index())
            .ok_or(EcsError::MissingComponent {
                entity,
                component: C::TYPE,
            })
    }

    pub fn get_mut<C: Component>(&mut self, entity: Entity) -> Result<&mut C> {
        let location = self.location(entity)?;
        self.archetypes
            .get_mut(location.archetype())
            .get_mut::<C>(location.index())
            .ok_or(EcsError::MissingComponent {
                entity,
                component: C::TYPE,
            })
    }

    /// Iterates every entity having all of the filter's components.
    ///
    /// ```ignore
    /// for (entity, (position, velocity)) in world.query::<(&mut Position, &Velocity)>()? {
    ///     position.0 += velocity.0;
    /// }
    /// ```
    #[inline]
    pub fn query<F: ComponentFilter>(&mut self) -> Result<Query<'_, F>> {
        Query::new(self.archetypes.archetypes_mut())
    }

    /// Same as `query` for filters that only read, from a shared borrow of the world.
    #[inline]
    pub fn view<F: ReadOnlyComponentFilter>(&self) -> Result<Query<'_, F>> {
        Query::new_shared(self.archetypes.archetypes())
    }

    /// Despawns every entity that has a component of type `ty`. Returns how many were removed.
    pub fn clear_entities_of_component(&mut self, ty: ComponentType) -> usize {
        let mut removed = 0;
        for archetype in self.archetypes.archetypes_mut() {
            if !archetype.signature().contains(ty) {
                continue;
            }

            for entity in archetype.entities() {
                self.entities.remove(*entity);
            }
            removed += archetype.len();
            archetype.clear();
        }

        log::debug!("cleared {} entities with component {}", removed, ty);
        removed
    }

    /// Despawns every entity. Archetypes stay allocated, and identifiers keep counting up from
    /// where they were.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.archetypes.clear();
    }
}
