use std::fmt;

use serde::{Deserialize, Serialize};

use crate::component::{builtin::*, Component};

/// Declares the closed set of component kinds.
///
/// For every listed type this generates a `ComponentType` tag, a `Column` variant holding a dense
/// `Vec` of that type, a `ComponentValue` variant holding one owned value, and the `Component`
/// implementation tying them together. Adding a component kind means adding it here and nowhere
/// else.
macro_rules! component_registry {
    ( $( $name:ident ),+ $(,)? ) => {
        /// Tag identifying one concrete component kind.
        #[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum ComponentType {
            $( $name, )+
        }

        impl ComponentType {
            /// Every registered component kind, in tag order.
            pub const ALL: &'static [ComponentType] = &[ $( ComponentType::$name, )+ ];

            #[inline]
            pub const fn name(self) -> &'static str {
                match self {
                    $( ComponentType::$name => stringify!($name), )+
                }
            }
        }

        /// A densely packed, homogeneous buffer of one component kind.
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub enum Column {
            $( $name(Vec<$name>), )+
        }

        impl Column {
            /// Creates an empty column of the kind named by the tag.
            #[inline]
            pub fn new(ty: ComponentType) -> Column {
                match ty {
                    $( ComponentType::$name => Column::$name(Vec::new()), )+
                }
            }

            #[inline]
            pub fn component_type(&self) -> ComponentType {
                match self {
                    $( Column::$name(_) => ComponentType::$name, )+
                }
            }

            #[inline]
            pub fn len(&self) -> usize {
                match self {
                    $( Column::$name(buffer) => buffer.len(), )+
                }
            }

            #[inline]
            pub fn is_empty(&self) -> bool {
                self.len() == 0
            }

            #[inline]
            pub fn reserve(&mut self, additional: usize) {
                match self {
                    $( Column::$name(buffer) => buffer.reserve(additional), )+
                }
            }

            /// Clones the value at `row` out of the column.
            #[inline]
            pub fn value(&self, row: usize) -> Option<ComponentValue> {
                match self {
                    $( Column::$name(buffer) => buffer.get(row).cloned().map(ComponentValue::$name), )+
                }
            }

            /// Drops the object at `row` and moves the last object in the column into its place.
            ///
            /// # Panics
            /// Panics if `row` is out of bounds.
            #[inline]
            pub(crate) fn swap_remove(&mut self, row: usize) {
                match self {
                    $( Column::$name(buffer) => {
                        buffer.swap_remove(row);
                    } )+
                }
            }

            /// Moves the object at `row` to the end of `dst` and moves the last object in this
            /// column into its place.
            ///
            /// # Panics
            /// Panics if `row` is out of bounds or if the columns hold different kinds.
            #[inline]
            pub(crate) fn swap_move(&mut self, dst: &mut Column, row: usize) {
                match (self, dst) {
                    $( (Column::$name(src), Column::$name(dst)) => dst.push(src.swap_remove(row)), )+
                    (src, dst) => unreachable!(
                        "moving a `{}` row into a `{}` column",
                        src.component_type(),
                        dst.component_type(),
                    ),
                }
            }

            /// Appends a type-erased value.
            ///
            /// # Panics
            /// Panics if the value is of a different kind than the column.
            #[inline]
            pub(crate) fn push(&mut self, value: ComponentValue) {
                match (self, value) {
                    $( (Column::$name(buffer), ComponentValue::$name(value)) => buffer.push(value), )+
                    (column, value) => unreachable!(
                        "pushing a `{}` value into a `{}` column",
                        value.component_type(),
                        column.component_type(),
                    ),
                }
            }

            #[inline]
            pub(crate) fn clear(&mut self) {
                match self {
                    $( Column::$name(buffer) => buffer.clear(), )+
                }
            }
        }

        /// One owned component value of any registered kind.
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub enum ComponentValue {
            $( $name($name), )+
        }

        impl ComponentValue {
            #[inline]
            pub fn component_type(&self) -> ComponentType {
                match self {
                    $( ComponentValue::$name(_) => ComponentType::$name, )+
                }
            }
        }

        $(
            impl Component for $name {
                const TYPE: ComponentType = ComponentType::$name;

                #[inline]
                fn column(column: &Column) -> Option<&Vec<Self>> {
                    match column {
                        Column::$name(buffer) => Some(buffer),
                        _ => None,
                    }
                }

                #[inline]
                fn column_mut(column: &mut Column) -> Option<&mut Vec<Self>> {
                    match column {
                        Column::$name(buffer) => Some(buffer),
                        _ => None,
                    }
                }

                #[inline]
                fn into_value(self) -> ComponentValue {
                    ComponentValue::$name(self)
                }
            }

            impl From<$name> for ComponentValue {
                #[inline]
                fn from(value: $name) -> Self {
                    ComponentValue::$name(value)
                }
            }
        )+
    };
}

component_registry! {
    Position,
    Velocity,
    Transform,
    Material,
    Sprite,
    Button,
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
