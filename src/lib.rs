//! Front-end of the DAS contract designer.
//!
//! Reads a `.dascontract` document (a BPMN-flavored process model plus a data model of
//! entities, tokens and enumerations) into a typed [`Contract`] for the code generator.

/// Generates a fieldless enum whose variants parse from, and display as, their own names.
/// Surrounding whitespace is ignored when parsing.
macro_rules! named_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$variant_meta:meta])* $variant:ident),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $($(#[$variant_meta])* $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ();

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $(stringify!($variant) => Ok($name::$variant),)+
                    _ => Err(()),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub mod contract;
pub mod data;
pub mod error;
pub mod process;
pub mod schema;
pub mod xml;

pub use error::*;
pub use crate::contract::{parse_contract, parse_contract_reader, Contract};
pub use crate::data::{DataType, Entity, Enumeration, Property, PropertyDataType, PropertyType, Token};
pub use crate::process::{Process, ProcessElement, SequenceFlow};
