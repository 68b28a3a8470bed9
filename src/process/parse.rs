//! This module builds process graphs from the `Process` sections of a contract document.

use std::collections::btree_map::{BTreeMap, Entry};

use tracing::{debug, trace};

use crate::error::ParseError;
use crate::process::name::{decode_assignee, display_name, strip_whitespace};
use crate::process::{
    BusinessRuleTask, CallActivity, ElementKind, EndEvent, ExclusiveGateway, FlowNode, FormField,
    InstanceType, ParallelGateway, Process, ProcessElement, ScriptTask, SequenceFlow, ServiceTask,
    StartEvent, TaskSettings, TimerBoundaryEvent, TokenOperationType, UserForm, UserTask,
};
use crate::schema;
use crate::xml::XmlElement;

/// Parse one process section.
/// Flows and elements are collected from all descendants, however deeply they are nested.
pub fn parse_process(section: &XmlElement) -> Result<Process, ParseError> {
    let id = section
        .child_text(schema::ID)
        .ok_or_else(|| ParseError::invalid("Process is missing an ID", section.line))?
        .to_string();
    let is_executable = match section.child(schema::IS_EXECUTABLE) {
        Some(element) => element.bool_value()?,
        None => false,
    };

    let mut process_elements = BTreeMap::new();
    let mut sequence_flows = BTreeMap::new();
    for descendant in section.descendants() {
        match descendant.name.as_str() {
            schema::SEQUENCE_FLOW => {
                let flow = parse_flow(descendant)?;
                insert_unique(&mut sequence_flows, flow.id.clone(), flow, "sequence flow", descendant.line)?;
            }
            schema::PROCESS_ELEMENT => {
                let element = parse_element(descendant)?;
                insert_unique(&mut process_elements, element.id().to_string(), element, "process element", descendant.line)?;
            }
            _ => {}
        }
    }

    debug!(
        process = %id,
        elements = process_elements.len(),
        flows = sequence_flows.len(),
        "parsed process"
    );
    Ok(Process {
        id,
        is_executable,
        process_elements,
        sequence_flows,
    })
}

/// IDs are unique within a process
fn insert_unique<T>(
    map: &mut BTreeMap<String, T>,
    id: String,
    value: T,
    what: &str,
    line: u32,
) -> Result<(), ParseError> {
    match map.entry(id) {
        Entry::Vacant(entry) => {
            entry.insert(value);
            Ok(())
        }
        Entry::Occupied(entry) => Err(ParseError::invalid(
            format!("Duplicate {} ID {}", what, entry.key()),
            line,
        )),
    }
}

/// Parse a sequence flow declaration. Its name is also its guard condition.
pub fn parse_flow(declaration: &XmlElement) -> Result<SequenceFlow, ParseError> {
    let line = declaration.line;
    let id = declaration
        .child_text(schema::ID)
        .ok_or_else(|| ParseError::invalid("Sequence flow is missing an ID", line))?
        .to_string();
    let source_id = declaration
        .child_text(schema::SOURCE_ID)
        .ok_or_else(|| ParseError::invalid(format!("Sequence flow {} is missing a source", id), line))?
        .to_string();
    let target_id = declaration
        .child_text(schema::TARGET_ID)
        .ok_or_else(|| ParseError::invalid(format!("Sequence flow {} is missing a target", id), line))?
        .to_string();
    let name = declaration.child_text(schema::NAME).map(str::to_string);

    Ok(SequenceFlow {
        id,
        source_id,
        target_id,
        condition: name.clone(),
        name,
    })
}

/// Build the element named by the declaration's `xsi:type` discriminator
fn parse_element(declaration: &XmlElement) -> Result<ProcessElement, ParseError> {
    let discriminator = declaration
        .attribute(Some(schema::XSI_NAMESPACE), schema::TYPE_ATTRIBUTE)
        .ok_or_else(|| {
            ParseError::invalid("Mandatory attribute for a process element not found", declaration.line)
        })?;
    let kind = ElementKind::from_discriminator(discriminator).ok_or_else(|| {
        ParseError::invalid(
            format!("{} is not a valid process element type", discriminator),
            declaration.line,
        )
    })?;
    trace!(?kind, line = declaration.line, "building process element");

    let element = match kind {
        ElementKind::BusinessRuleTask => ProcessElement::BusinessRuleTask(BusinessRuleTask {
            id: element_id(declaration)?,
        }),
        ElementKind::ServiceTask => ProcessElement::ServiceTask(ServiceTask {
            id: element_id(declaration)?,
        }),
        ElementKind::ScriptTask => ProcessElement::ScriptTask(script_task(declaration)?),
        ElementKind::UserTask => ProcessElement::UserTask(user_task(declaration)?),
        ElementKind::StartEvent => ProcessElement::StartEvent(StartEvent {
            node: fill_node(declaration)?,
        }),
        ElementKind::EndEvent => ProcessElement::EndEvent(EndEvent {
            node: fill_node(declaration)?,
        }),
        ElementKind::ExclusiveGateway => ProcessElement::ExclusiveGateway(ExclusiveGateway {
            node: fill_node(declaration)?,
        }),
        ElementKind::ParallelGateway => ProcessElement::ParallelGateway(ParallelGateway {
            node: fill_node(declaration)?,
        }),
        ElementKind::TimerBoundaryEvent => ProcessElement::TimerBoundaryEvent(timer_boundary_event(declaration)?),
        ElementKind::CallActivity => ProcessElement::CallActivity(call_activity(declaration)?),
    };
    Ok(element)
}

fn element_id(declaration: &XmlElement) -> Result<String, ParseError> {
    declaration
        .child_text(schema::ID)
        .map(str::to_string)
        .ok_or_else(|| ParseError::invalid("Id not set for process element", declaration.line))
}

/// The name as written in the document, possibly carrying an assignee tag
fn raw_name(declaration: &XmlElement) -> &str {
    declaration
        .first_descendant(schema::NAME)
        .map(|name| name.text.as_str())
        .unwrap_or_default()
}

/// The items of an `Incoming`/`Outgoing` list. The list itself must be present, even if empty.
fn edge_list(declaration: &XmlElement, container: &str) -> Result<Vec<String>, ParseError> {
    let list = declaration.first_descendant(container).ok_or_else(|| {
        ParseError::invalid(
            format!("Process element is missing its {} list", container),
            declaration.line,
        )
    })?;
    Ok(list
        .descendants_named(schema::LIST_ITEM)
        .map(|item| item.text.clone())
        .collect())
}

fn fill_node(declaration: &XmlElement) -> Result<FlowNode, ParseError> {
    Ok(FlowNode {
        id: element_id(declaration)?,
        name: display_name(raw_name(declaration)),
        incoming: edge_list(declaration, schema::INCOMING)?,
        outgoing: edge_list(declaration, schema::OUTGOING)?,
    })
}

fn fill_task(declaration: &XmlElement) -> Result<(FlowNode, TaskSettings), ParseError> {
    let node = fill_node(declaration)?;
    let instance_type = match declaration.child(schema::INSTANCE_TYPE) {
        Some(element) => element.parse_text("instance type")?,
        None => InstanceType::Single,
    };
    let loop_cardinality = declaration
        .child(schema::LOOP_CARDINALITY)
        .map(|element| element.parse_text("loop cardinality, it must be an integer"))
        .transpose()?;
    let loop_collection = declaration.child_text(schema::LOOP_COLLECTION).map(str::to_string);

    let task = TaskSettings {
        instance_type,
        loop_cardinality,
        loop_collection,
    };
    Ok((node, task))
}

/// Script and user tasks can also mint or transfer tokens
fn fill_payable_task(declaration: &XmlElement) -> Result<(FlowNode, TaskSettings, TokenOperationType), ParseError> {
    let (node, task) = fill_task(declaration)?;
    let operation_type = match declaration.child(schema::OPERATION_TYPE) {
        Some(element) => element.parse_text("token operation type")?,
        None => TokenOperationType::None,
    };
    Ok((node, task, operation_type))
}

fn script_task(declaration: &XmlElement) -> Result<ScriptTask, ParseError> {
    let (node, task, operation_type) = fill_payable_task(declaration)?;
    let script = declaration
        .child_text(schema::SCRIPT)
        .ok_or_else(|| {
            ParseError::invalid(format!("Script task {} must contain a script", node.id), declaration.line)
        })?
        .to_string();
    Ok(ScriptTask {
        node,
        task,
        operation_type,
        script,
    })
}

fn user_task(declaration: &XmlElement) -> Result<UserTask, ParseError> {
    let (node, task, operation_type) = fill_payable_task(declaration)?;
    let assignee = decode_assignee(raw_name(declaration));
    let validation_script = declaration.child_text(schema::SCRIPT).map(str::to_string);
    let form = declaration
        .first_descendant(schema::FORM)
        .map(user_form)
        .transpose()?;
    Ok(UserTask {
        node,
        task,
        operation_type,
        assignee,
        validation_script,
        form,
    })
}

/// The form's ID is the first `Id` below it, whether or not it belongs to a field
fn user_form(form: &XmlElement) -> Result<UserForm, ParseError> {
    let fields = form
        .descendants_named(schema::FORM_FIELD)
        .map(form_field)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(UserForm {
        id: form.first_descendant(schema::ID).map(|id| id.text.clone()),
        fields,
    })
}

fn form_field(field: &XmlElement) -> Result<FormField, ParseError> {
    let required = |name: &str| {
        field
            .first_descendant(name)
            .map(|element| element.text.as_str())
            .ok_or_else(|| ParseError::invalid(format!("Form field is missing {}", name), field.line))
    };
    let id = required(schema::ID)?.to_string();
    let display_name = strip_whitespace(required(schema::NAME)?);
    // Anything but a lowercase `true` leaves the field editable
    let is_read_only = required(schema::READ_ONLY)? == "true";
    let property_expression = required(schema::PROPERTY_ID)?.to_string();
    Ok(FormField {
        id,
        display_name,
        is_read_only,
        property_expression,
    })
}

fn timer_boundary_event(declaration: &XmlElement) -> Result<TimerBoundaryEvent, ParseError> {
    let node = fill_node(declaration)?;
    let line = declaration.line;
    let attached_to = declaration
        .child_text(schema::ATTACHED_TO)
        .ok_or_else(|| {
            ParseError::invalid(format!("Timer event {} is missing attached to definition", node.id), line)
        })?
        .to_string();
    let timer_definition_type = declaration
        .child(schema::DEFINITION_TYPE)
        .ok_or_else(|| ParseError::invalid(format!("Timer event {} is missing timer definition type", node.id), line))?
        .parse_text("timer definition type")?;
    let timer_definition = declaration
        .child_text(schema::DEFINITION)
        .ok_or_else(|| ParseError::invalid(format!("Timer event {} is missing timer definition", node.id), line))?
        .to_string();
    Ok(TimerBoundaryEvent {
        node,
        attached_to,
        timer_definition_type,
        timer_definition,
    })
}

fn call_activity(declaration: &XmlElement) -> Result<CallActivity, ParseError> {
    let (node, task) = fill_task(declaration)?;
    let called_element = declaration
        .child_text(schema::CALLED_ELEMENT)
        .ok_or_else(|| {
            ParseError::invalid(
                format!("Call activity {} is missing called element definition", node.id),
                declaration.line,
            )
        })?
        .to_string();
    Ok(CallActivity {
        node,
        task,
        called_element,
    })
}
