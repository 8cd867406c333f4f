//! Plain-data copies of a world, for persistence.
//!
//! A snapshot only carries entities and columns. Archetype IDs and the location index are
//! rebuilt on import, so a snapshot taken from one world can be loaded into a fresh one.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::{
    archetype::{Archetype, Archetypes},
    component::Column,
    entity::Entity,
    error::{EcsError, Result},
    signature::Signature,
    world::{
        entities::{Entities, EntityLocation},
        World,
    },
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    /// Counter value of the world the snapshot was taken from.
    pub next_entity: u64,
    pub archetypes: Vec<ArchetypeSnapshot>,
}

/// The rows of one archetype. Column `c` row `i` belongs to `entities[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeSnapshot {
    pub entities: Vec<Entity>,
    pub columns: Vec<Column>,
}

impl ArchetypeSnapshot {
    fn from_archetype(archetype: &Archetype) -> Self {
        Self {
            entities: archetype.entities().to_vec(),
            columns: archetype.columns().to_vec(),
        }
    }

    /// The set of component types held by the columns.
    pub fn signature(&self) -> Signature {
        self.columns.iter().map(Column::component_type).collect()
    }
}

impl WorldSnapshot {
    /// Total number of entities in the snapshot.
    pub fn len(&self) -> usize {
        self.archetypes.iter().map(|a| a.entities.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.archetypes.iter().all(|a| a.entities.is_empty())
    }
}

impl World {
    /// Copies every non-empty archetype into a snapshot.
    pub fn export(&self) -> WorldSnapshot {
        WorldSnapshot {
            next_entity: self.entities.next_id(),
            archetypes: self
                .archetypes
                .archetypes()
                .iter()
                .filter(|archetype| !archetype.is_empty())
                .map(ArchetypeSnapshot::from_archetype)
                .collect(),
        }
    }

    /// Same as `export`, but moves the columns out instead of cloning them.
    pub fn into_snapshot(self) -> WorldSnapshot {
        let next_entity = self.entities.next_id();
        WorldSnapshot {
            next_entity,
            archetypes: self
                .archetypes
                .into_archetypes()
                .into_iter()
                .filter(|archetype| !archetype.is_empty())
                .map(|archetype| {
                    let (_, entities, columns) = archetype.into_parts();
                    ArchetypeSnapshot { entities, columns }
                })
                .collect(),
        }
    }

    /// Rebuilds a world from a snapshot.
    ///
    /// The whole snapshot is validated before anything is built. The new world's counter starts
    /// past both the recorded counter and the highest entity in the snapshot, so handles from
    /// the snapshot are never handed out again.
    pub fn import(snapshot: WorldSnapshot) -> Result<World> {
        validate(&snapshot)?;

        let highest = snapshot
            .archetypes
            .iter()
            .flat_map(|a| a.entities.iter())
            .map(|entity| entity.id())
            .max();
        let next = match highest {
            Some(highest) => snapshot.next_entity.max(highest.saturating_add(1)),
            None => snapshot.next_entity,
        };

        let mut entities = Entities::with_next_id(next, snapshot.len());
        let mut archetypes = Archetypes::default();
        let archetype_count = snapshot.archetypes.len();

        for archetype in snapshot.archetypes {
            if archetype.entities.is_empty() {
                continue;
            }

            let mut columns = archetype.columns;
            columns.sort_by_key(Column::component_type);
            let signature: Signature = columns.iter().map(Column::component_type).collect();

            let id = archetypes
                .insert_filled(signature, archetype.entities, columns)
                .ok_or_else(|| corrupt("two archetypes share a signature".into()))?;

            for (index, entity) in archetypes.get(id).entities().iter().enumerate() {
                entities.insert(*entity, EntityLocation::new(id, index));
            }
        }

        log::debug!(
            "imported {} entities in {} archetypes",
            entities.len(),
            archetype_count
        );

        Ok(World {
            entities,
            archetypes,
        })
    }
}

fn corrupt(reason: String) -> EcsError {
    log::warn!("rejecting world snapshot: {}", reason);
    EcsError::CorruptSnapshot { reason }
}

fn validate(snapshot: &WorldSnapshot) -> Result<()> {
    let mut signatures = FxHashSet::default();
    let mut seen = FxHashSet::default();

    for (i, archetype) in snapshot.archetypes.iter().enumerate() {
        let rows = archetype.entities.len();

        let signature = archetype.signature();
        if signature.len() != archetype.columns.len() {
            return Err(corrupt(format!(
                "archetype {} has more than one column of the same type",
                i
            )));
        }

        if let Some(column) = archetype.columns.iter().find(|c| c.len() != rows) {
            return Err(corrupt(format!(
                "archetype {} has {} entities but its `{}` column has {} rows",
                i,
                rows,
                column.component_type(),
                column.len()
            )));
        }

        if rows > 0 && !signatures.insert(signature) {
            return Err(corrupt(format!(
                "archetype {} repeats the signature of an earlier archetype",
                i
            )));
        }

        if let Some(entity) = archetype.entities.iter().find(|e| !seen.insert(**e)) {
            return Err(corrupt(format!("{} appears more than once", entity)));
        }
    }

    Ok(())
}
