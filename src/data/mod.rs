//! This module defines the data model of a contract: entities, tokens and enumerations with typed properties.

mod parse;

pub use parse::parse_data_types;

use std::str::FromStr;

use serde::Serialize;

use crate::error::ParseError;

named_enum! {
    /// Whether a property holds a primitive value or refers to another data type
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
    pub enum PropertyType {
        #[default]
        Primitive,
        Reference,
    }
}

/// The scalar kind of a property value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PropertyDataType {
    Int,
    Uint,
    Bool,
    String,
    Reference,
    Address,
    AddressPayable,
    DateTime,
}

/// The editor's names for data types, matched case-insensitively
impl FromStr for PropertyDataType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "number" => Ok(PropertyDataType::Int),
            "bool" => Ok(PropertyDataType::Bool),
            "text" => Ok(PropertyDataType::String),
            "reference" => Ok(PropertyDataType::Reference),
            "address" => Ok(PropertyDataType::Address),
            "addresspayable" => Ok(PropertyDataType::AddressPayable),
            "positivenumber" => Ok(PropertyDataType::Uint),
            "datetime" => Ok(PropertyDataType::DateTime),
            _ => Err(ParseError::UnrecognizedDataType(s.to_string())),
        }
    }
}

/// A property of an entity or token.
/// Two properties are the same property if all of their fields are equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Property {
    pub id: String,
    pub name: String,
    pub is_mandatory: bool,
    pub property_type: PropertyType,
    pub data_type: Option<PropertyDataType>,
    /// Key type when the property is a keyed collection
    pub key_data_type: Option<PropertyDataType>,
    /// ID of the data type a reference property points at; not resolved
    pub referenced_data_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Entity {
    pub id: String,
    pub name: String,
    pub is_root_entity: bool,
    pub properties: Vec<Property>,
}

/// A fungible or non-fungible asset the contract defines or uses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Token {
    pub id: String,
    pub name: String,
    pub symbol: Option<String>,
    pub is_fungible: bool,
    pub is_issued: bool,
    /// Set when the token contract is already deployed and only referenced.
    /// Otherwise a new token contract is deployed together with the main contract.
    pub address: Option<String>,
    pub mint_script: Option<String>,
    pub transfer_script: Option<String>,
    pub properties: Vec<Property>,
}

/// An enumeration. The order of the values determines their integer encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Enumeration {
    pub id: String,
    pub name: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum DataType {
    Entity(Entity),
    Token(Token),
    Enum(Enumeration),
}

impl DataType {
    pub fn id(&self) -> &str {
        match self {
            DataType::Entity(entity) => &entity.id,
            DataType::Token(token) => &token.id,
            DataType::Enum(enumeration) => &enumeration.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            DataType::Entity(entity) => &entity.name,
            DataType::Token(token) => &token.name,
            DataType::Enum(enumeration) => &enumeration.name,
        }
    }

    /// Properties of entities and tokens; enumerations have none
    pub fn properties(&self) -> &[Property] {
        match self {
            DataType::Entity(entity) => &entity.properties,
            DataType::Token(token) => &token.properties,
            DataType::Enum(_) => &[],
        }
    }
}
