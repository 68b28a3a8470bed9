//! This module defines the process graph of a contract: typed workflow elements connected by sequence flows.

pub mod name;
mod parse;

pub use parse::{parse_flow, parse_process};

use std::collections::BTreeMap;

use serde::Serialize;

use crate::schema;

named_enum! {
    /// How many instances of a task are run
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
    pub enum InstanceType {
        #[default]
        Single,
        Sequential,
        Parallel,
    }
}

named_enum! {
    /// What a payable task does with the contract's tokens
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
    pub enum TokenOperationType {
        #[default]
        None,
        Mint,
        Transfer,
    }
}

named_enum! {
    /// How the definition expression of a timer is interpreted
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
    pub enum TimerDefinitionType {
        Date,
        Cycle,
        Duration,
    }
}

/// The kind of a process element, as named by its `xsi:type` discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ElementKind {
    BusinessRuleTask,
    ScriptTask,
    ServiceTask,
    UserTask,
    StartEvent,
    EndEvent,
    ExclusiveGateway,
    ParallelGateway,
    TimerBoundaryEvent,
    CallActivity,
}

impl ElementKind {
    pub fn from_discriminator(discriminator: &str) -> Option<Self> {
        let kind = match discriminator {
            schema::BUSINESS_RULE_TASK => ElementKind::BusinessRuleTask,
            schema::SCRIPT_TASK => ElementKind::ScriptTask,
            schema::SERVICE_TASK => ElementKind::ServiceTask,
            schema::USER_TASK => ElementKind::UserTask,
            schema::START_EVENT => ElementKind::StartEvent,
            schema::END_EVENT => ElementKind::EndEvent,
            schema::EXCLUSIVE_GATEWAY => ElementKind::ExclusiveGateway,
            schema::PARALLEL_GATEWAY => ElementKind::ParallelGateway,
            schema::TIMER_BOUNDARY_EVENT => ElementKind::TimerBoundaryEvent,
            schema::CALL_ACTIVITY => ElementKind::CallActivity,
            _ => return None,
        };
        Some(kind)
    }

    pub fn discriminator(&self) -> &'static str {
        match self {
            ElementKind::BusinessRuleTask => schema::BUSINESS_RULE_TASK,
            ElementKind::ScriptTask => schema::SCRIPT_TASK,
            ElementKind::ServiceTask => schema::SERVICE_TASK,
            ElementKind::UserTask => schema::USER_TASK,
            ElementKind::StartEvent => schema::START_EVENT,
            ElementKind::EndEvent => schema::END_EVENT,
            ElementKind::ExclusiveGateway => schema::EXCLUSIVE_GATEWAY,
            ElementKind::ParallelGateway => schema::PARALLEL_GATEWAY,
            ElementKind::TimerBoundaryEvent => schema::TIMER_BOUNDARY_EVENT,
            ElementKind::CallActivity => schema::CALL_ACTIVITY,
        }
    }
}

/// Attributes every element has: a unique ID, a display name without whitespace,
/// and the sequence flows it declares as incoming and outgoing.
/// The edge lists are kept as authored, they are not derived from the process's flows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlowNode {
    pub id: String,
    pub name: String,
    pub incoming: Vec<String>,
    pub outgoing: Vec<String>,
}

/// Multi-instance settings shared by all tasks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskSettings {
    pub instance_type: InstanceType,
    pub loop_cardinality: Option<i32>,
    /// Expression naming the collection to iterate over
    pub loop_collection: Option<String>,
}

/// Who is expected to complete a user task
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Assignee {
    /// A blockchain address, e.g. `0xABC123`
    Address(String),
    Username(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartEvent {
    #[serde(flatten)]
    pub node: FlowNode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndEvent {
    #[serde(flatten)]
    pub node: FlowNode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExclusiveGateway {
    #[serde(flatten)]
    pub node: FlowNode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParallelGateway {
    #[serde(flatten)]
    pub node: FlowNode,
}

/// A timer attached to another element, firing on a date, cycle or duration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerBoundaryEvent {
    #[serde(flatten)]
    pub node: FlowNode,
    /// ID of the guarded element
    pub attached_to: String,
    pub timer_definition_type: TimerDefinitionType,
    pub timer_definition: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptTask {
    #[serde(flatten)]
    pub node: FlowNode,
    #[serde(flatten)]
    pub task: TaskSettings,
    pub operation_type: TokenOperationType,
    pub script: String,
}

/// Service tasks only carry their ID, implementation and configuration are left to the generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceTask {
    pub id: String,
}

/// Business rule tasks only carry their ID, the rule definition is left to the generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusinessRuleTask {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserTask {
    #[serde(flatten)]
    pub node: FlowNode,
    #[serde(flatten)]
    pub task: TaskSettings,
    pub operation_type: TokenOperationType,
    pub assignee: Option<Assignee>,
    /// Expression checked after the user completes the task
    pub validation_script: Option<String>,
    pub form: Option<UserForm>,
}

/// The form a user fills in to complete a task
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserForm {
    pub id: Option<String>,
    pub fields: Vec<FormField>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormField {
    pub id: String,
    pub display_name: String,
    pub is_read_only: bool,
    /// Path of the data model property the field edits
    pub property_expression: String,
}

/// Invokes another process
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallActivity {
    #[serde(flatten)]
    pub node: FlowNode,
    #[serde(flatten)]
    pub task: TaskSettings,
    pub called_element: String,
}

/// A node of the process graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum ProcessElement {
    StartEvent(StartEvent),
    EndEvent(EndEvent),
    ExclusiveGateway(ExclusiveGateway),
    ParallelGateway(ParallelGateway),
    TimerBoundaryEvent(TimerBoundaryEvent),
    ScriptTask(ScriptTask),
    ServiceTask(ServiceTask),
    BusinessRuleTask(BusinessRuleTask),
    UserTask(UserTask),
    CallActivity(CallActivity),
}

impl ProcessElement {
    pub fn id(&self) -> &str {
        match self {
            ProcessElement::ServiceTask(task) => &task.id,
            ProcessElement::BusinessRuleTask(task) => &task.id,
            _ => self.node().map(|node| node.id.as_str()).unwrap_or_default(),
        }
    }

    /// Display name of the element; the two stub tasks have none
    pub fn name(&self) -> Option<&str> {
        self.node().map(|node| node.name.as_str())
    }

    /// The common attributes, for every element except the stub tasks
    pub fn node(&self) -> Option<&FlowNode> {
        match self {
            ProcessElement::StartEvent(event) => Some(&event.node),
            ProcessElement::EndEvent(event) => Some(&event.node),
            ProcessElement::ExclusiveGateway(gateway) => Some(&gateway.node),
            ProcessElement::ParallelGateway(gateway) => Some(&gateway.node),
            ProcessElement::TimerBoundaryEvent(event) => Some(&event.node),
            ProcessElement::ScriptTask(task) => Some(&task.node),
            ProcessElement::UserTask(task) => Some(&task.node),
            ProcessElement::CallActivity(task) => Some(&task.node),
            ProcessElement::ServiceTask(_) | ProcessElement::BusinessRuleTask(_) => None,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            ProcessElement::StartEvent(_) => ElementKind::StartEvent,
            ProcessElement::EndEvent(_) => ElementKind::EndEvent,
            ProcessElement::ExclusiveGateway(_) => ElementKind::ExclusiveGateway,
            ProcessElement::ParallelGateway(_) => ElementKind::ParallelGateway,
            ProcessElement::TimerBoundaryEvent(_) => ElementKind::TimerBoundaryEvent,
            ProcessElement::ScriptTask(_) => ElementKind::ScriptTask,
            ProcessElement::ServiceTask(_) => ElementKind::ServiceTask,
            ProcessElement::BusinessRuleTask(_) => ElementKind::BusinessRuleTask,
            ProcessElement::UserTask(_) => ElementKind::UserTask,
            ProcessElement::CallActivity(_) => ElementKind::CallActivity,
        }
    }
}

/// A directed edge between two elements.
/// The name of a flow doubles as its guard condition, so both hold the same text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequenceFlow {
    pub id: String,
    pub source_id: String,
    pub target_id: String,
    pub name: Option<String>,
    pub condition: Option<String>,
}

/// A process has a unique ID, and its elements and sequence flows keyed by their IDs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Process {
    pub id: String,
    pub is_executable: bool,
    pub process_elements: BTreeMap<String, ProcessElement>,
    pub sequence_flows: BTreeMap<String, SequenceFlow>,
}

impl Process {
    pub fn element(&self, id: &str) -> Option<&ProcessElement> {
        self.process_elements.get(id)
    }

    pub fn start_events(&self) -> impl Iterator<Item = &StartEvent> {
        self.process_elements.values().filter_map(|element| match element {
            ProcessElement::StartEvent(event) => Some(event),
            _ => None,
        })
    }

    /// Flows leaving the given element, according to the flows' own source IDs
    pub fn outgoing_flows<'a>(&'a self, element_id: &'a str) -> impl Iterator<Item = &'a SequenceFlow> + 'a {
        self.sequence_flows.values().filter(move |flow| flow.source_id == element_id)
    }
}
