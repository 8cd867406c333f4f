use paste::paste;

use crate::{
    archetype::Archetype,
    component::{Component, ComponentType, ComponentValue},
    signature::Signature,
};

/// A component pack holds the set of components for a single entity.
pub trait ComponentPack {
    /// Generate the signature for the components within the pack.
    fn type_key(&self) -> Signature;

    /// Returns the first component kind that appears more than once in the pack.
    fn duplicate(&self) -> Option<ComponentType>;

    /// A pack is valid if no component kind appears twice.
    #[inline]
    fn is_valid(&self) -> bool {
        self.duplicate().is_none()
    }

    /// Moves all of the components in the pack onto the end of their columns in the archetype.
    /// The caller is responsible for appending the owning entity.
    ///
    /// # Panics
    /// Panics if the archetype's signature is not exactly the pack's signature.
    fn move_into(self, archetype: &mut Archetype);
}

fn first_duplicate(types: &[ComponentType]) -> Option<ComponentType> {
    types
        .iter()
        .enumerate()
        .find(|(i, ty)| types[..*i].contains(ty))
        .map(|(_, ty)| *ty)
}

/// Implementation of component pack for empty tuple. Used for entity creation without components.
impl ComponentPack for () {
    #[inline]
    fn type_key(&self) -> Signature {
        Signature::default()
    }

    #[inline]
    fn duplicate(&self) -> Option<ComponentType> {
        None
    }

    #[inline]
    fn move_into(self, _: &mut Archetype) {}
}

/// Dynamic pack, for callers that only know component kinds at runtime.
impl ComponentPack for Vec<ComponentValue> {
    fn type_key(&self) -> Signature {
        self.iter().map(ComponentValue::component_type).collect()
    }

    fn duplicate(&self) -> Option<ComponentType> {
        let types: Vec<_> = self.iter().map(ComponentValue::component_type).collect();
        first_duplicate(&types)
    }

    fn move_into(self, archetype: &mut Archetype) {
        for value in self {
            archetype
                .column_mut(value.component_type())
                .expect("Archetype missing component type in pack.")
                .push(value);
        }
    }
}

/// Macro to help implement the `ComponentPack` trait for tuples of components.
macro_rules! component_pack_impl {
    ( $n:expr, $( $name:ident )+ ) => {
        impl<$($name: Component,)*> ComponentPack for ($($name,)*) {
            #[inline]
            fn type_key(&self) -> Signature {
                [$($name::TYPE,)*].into_iter().collect()
            }

            #[inline]
            fn duplicate(&self) -> Option<ComponentType> {
                first_duplicate(&[$($name::TYPE,)*])
            }

            fn move_into(self, archetype: &mut Archetype) {
                // Decompose the tuple
                paste! {
                    #[allow(non_snake_case)]
                    let ($([<$name _component>],)*) = self;
                }

                // Move all components into their respective buffers
                paste! {$(
                    archetype
                        .typed_column_mut::<$name>()
                        .expect("Archetype missing component type in pack.")
                        .push([<$name _component>]);
                )*}
            }
        }
    }
}

component_pack_impl! { 1, A }
component_pack_impl! { 2, A B }
component_pack_impl! { 3, A B C }
component_pack_impl! { 4, A B C D }
component_pack_impl! { 5, A B C D E }
component_pack_impl! { 6, A B C D E F }
component_pack_impl! { 7, A B C D E F G }
component_pack_impl! { 8, A B C D E F G H }
component_pack_impl! { 9, A B C D E F G H I }
component_pack_impl! { 10, A B C D E F G H I J }
component_pack_impl! { 11, A B C D E F G H I J K }
component_pack_impl! { 12, A B C D E F G H I J K L }
