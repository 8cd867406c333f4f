use std::{cmp::Ordering, fmt};

use smallvec::SmallVec;

use crate::component::ComponentType;

/// The set of component types an archetype's entities all possess.
///
/// Types are kept sorted and unique so that two signatures describing the same set compare and
/// hash equal, and so that set operations are linear merges.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    types: SmallVec<[ComponentType; 8]>,
}

impl Signature {
    #[inline]
    pub fn new() -> Signature {
        Signature::default()
    }

    #[inline]
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, ComponentType>> {
        self.types.iter().copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[ComponentType] {
        &self.types
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    #[inline]
    pub fn contains(&self, ty: ComponentType) -> bool {
        self.types.binary_search(&ty).is_ok()
    }

    /// Position of the type within the signature. Archetypes store their columns in signature
    /// order, so this is also the column index.
    #[inline]
    pub fn index_of(&self, ty: ComponentType) -> Option<usize> {
        self.types.binary_search(&ty).ok()
    }

    /// Returns true if the signature already contained the type.
    #[inline]
    pub fn add(&mut self, ty: ComponentType) -> bool {
        match self.types.binary_search(&ty) {
            Ok(_) => true,
            Err(pos) => {
                self.types.insert(pos, ty);
                false
            }
        }
    }

    /// Returns true if the signature contained the type removed.
    #[inline]
    pub fn remove(&mut self, ty: ComponentType) -> bool {
        match self.types.binary_search(&ty) {
            Ok(pos) => {
                self.types.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    /// Indicates that this signature and the other don't contain any types in common.
    pub fn disjoint(&self, other: &Signature) -> bool {
        let mut self_idx = 0;
        let mut other_idx = 0;
        while self_idx < self.types.len() && other_idx < other.types.len() {
            match self.types[self_idx].cmp(&other.types[other_idx]) {
                Ordering::Equal => return false,
                Ordering::Less => self_idx += 1,
                Ordering::Greater => other_idx += 1,
            }
        }
        true
    }

    /// Indicates that every type in this signature is also found in the other.
    pub fn subset_of(&self, other: &Signature) -> bool {
        if self.types.len() > other.types.len() {
            return false;
        }

        let mut i = 0;
        for ty in &other.types {
            if i == self.types.len() {
                break;
            }
            if *ty == self.types[i] {
                i += 1;
            }
        }

        i == self.types.len()
    }

    #[inline]
    pub fn superset_of(&self, other: &Signature) -> bool {
        other.subset_of(self)
    }
}

impl FromIterator<ComponentType> for Signature {
    fn from_iter<I: IntoIterator<Item = ComponentType>>(iter: I) -> Self {
        let mut types: SmallVec<[ComponentType; 8]> = iter.into_iter().collect();
        types.sort_unstable();
        types.dedup();
        Signature { types }
    }
}

impl<'a> IntoIterator for &'a Signature {
    type Item = ComponentType;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, ComponentType>>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, ty) in self.types.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{ty}")?;
        }
        write!(f, "}}")
    }
}
