//! This module builds the data types declared in the `DataModel` section of a contract document.

use std::collections::BTreeMap;

use tracing::debug;

use crate::data::{DataType, Entity, Enumeration, Property, Token};
use crate::error::ParseError;
use crate::process::name::strip_whitespace;
use crate::schema;
use crate::xml::XmlElement;

/// Parse every entity, token and enumeration declared anywhere below the data model section.
/// When two declarations share an ID, the later one replaces the earlier one.
pub fn parse_data_types(section: &XmlElement) -> Result<BTreeMap<String, DataType>, ParseError> {
    let mut data_types = BTreeMap::new();
    for declaration in section.descendants() {
        let data_type = match declaration.name.as_str() {
            schema::ENTITY => DataType::Entity(parse_entity(declaration)?),
            schema::TOKEN => DataType::Token(parse_token(declaration)?),
            schema::ENUM => DataType::Enum(parse_enum(declaration)?),
            _ => continue,
        };
        let id = data_type.id().to_string();
        if data_types.insert(id.clone(), data_type).is_some() {
            debug!(data_type = %id, line = declaration.line, "data type declared twice, keeping the later declaration");
        }
    }
    debug!(data_types = data_types.len(), "parsed data model");
    Ok(data_types)
}

/// The ID and whitespace-free name every data type has
fn common_fields(declaration: &XmlElement) -> Result<(String, String), ParseError> {
    let id = declaration
        .child_text(schema::ID)
        .ok_or_else(|| ParseError::invalid(format!("{} is missing an ID", declaration.name), declaration.line))?
        .to_string();
    let name = declaration
        .child_text(schema::NAME)
        .map(strip_whitespace)
        .unwrap_or_default();
    Ok((id, name))
}

/// Add properties that are not present yet, comparing by value
fn union_properties(properties: &mut Vec<Property>, more: impl IntoIterator<Item = Property>) {
    for property in more {
        if !properties.contains(&property) {
            properties.push(property);
        }
    }
}

fn parse_entity(declaration: &XmlElement) -> Result<Entity, ParseError> {
    let (id, name) = common_fields(declaration)?;
    let mut entity = Entity {
        id,
        name,
        ..Default::default()
    };
    for child in &declaration.children {
        match child.name.as_str() {
            schema::IS_ROOT_ENTITY => entity.is_root_entity = child.bool_value()?,
            schema::PRIMITIVE_PROPERTIES | schema::REFERENCE_PROPERTIES => {
                let properties = child
                    .children
                    .iter()
                    .map(parse_property)
                    .collect::<Result<Vec<_>, _>>()?;
                union_properties(&mut entity.properties, properties);
            }
            _ => {}
        }
    }
    Ok(entity)
}

/// Token fields may sit at any depth below the declaration; properties are appended as found
fn parse_token(declaration: &XmlElement) -> Result<Token, ParseError> {
    let (id, name) = common_fields(declaration)?;
    let mut token = Token {
        id,
        name,
        ..Default::default()
    };
    for descendant in declaration.descendants() {
        match descendant.name.as_str() {
            schema::PRIMITIVE_CONTRACT_PROPERTY | schema::REFERENCE_CONTRACT_PROPERTY => {
                token.properties.push(parse_property(descendant)?)
            }
            schema::SYMBOL => token.symbol = Some(descendant.text.clone()),
            schema::ADDRESS => token.address = Some(descendant.text.clone()),
            schema::IS_FUNGIBLE => token.is_fungible = descendant.bool_value()?,
            schema::IS_ISSUED => token.is_issued = descendant.bool_value()?,
            schema::MINT_SCRIPT => token.mint_script = Some(descendant.text.clone()),
            schema::TRANSFER_SCRIPT => token.transfer_script = Some(descendant.text.clone()),
            _ => {}
        }
    }
    Ok(token)
}

fn parse_enum(declaration: &XmlElement) -> Result<Enumeration, ParseError> {
    let (id, name) = common_fields(declaration)?;
    let values = declaration
        .children_named(schema::ENUM_VALUES)
        .last()
        .map(|values| {
            values
                .children_named(schema::ENUM_VALUE)
                .map(|value| value.text.clone())
                .collect()
        })
        .unwrap_or_default();
    Ok(Enumeration { id, name, values })
}

fn parse_property(declaration: &XmlElement) -> Result<Property, ParseError> {
    let id = declaration
        .child_text(schema::ID)
        .ok_or_else(|| ParseError::invalid("Property is missing an ID", declaration.line))?
        .to_string();
    let mut property = Property {
        id,
        ..Default::default()
    };
    for child in &declaration.children {
        match child.name.as_str() {
            schema::NAME => property.name = strip_whitespace(&child.text),
            schema::IS_MANDATORY => property.is_mandatory = child.bool_value()?,
            schema::PROPERTY_TYPE => property.property_type = child.parse_text("property type")?,
            schema::DATA_TYPE => property.data_type = Some(child.text.trim().parse()?),
            schema::KEY_DATA_TYPE => property.key_data_type = Some(child.text.trim().parse()?),
            schema::ENTITY_ID => property.referenced_data_type = Some(child.text.clone()),
            _ => {}
        }
    }
    Ok(property)
}
