//! This module defines the root of a parsed document: a contract with its processes and data model.

mod parse;

pub use parse::{parse_contract, parse_contract_reader};

use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::DataType;
use crate::process::Process;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Contract {
    pub id: String,
    pub name: Option<String>,
    /// In document order
    pub processes: Vec<Process>,
    pub data_types: BTreeMap<String, DataType>,
}

impl Contract {
    pub fn process(&self, id: &str) -> Option<&Process> {
        self.processes.iter().find(|process| process.id == id)
    }

    pub fn data_type(&self, id: &str) -> Option<&DataType> {
        self.data_types.get(id)
    }
}
