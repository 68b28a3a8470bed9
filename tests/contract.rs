use std::error::Error;
use std::fs::File;

use das_contract::process::{Assignee, InstanceType, TimerDefinitionType, TokenOperationType};
use das_contract::{parse_contract, parse_contract_reader, DataType, ParseError, ProcessElement, PropertyDataType, PropertyType};

const ELECTIONS: &str = include_str!("fixtures/elections.dascontract");

#[test]
fn test_elections_contract() -> Result<(), Box<dyn Error>> {
    let contract = parse_contract(ELECTIONS)?;
    assert_eq!(contract.id, "Contract_Elections");
    assert_eq!(contract.name.as_deref(), Some("Elections"));

    let ids: Vec<_> = contract.processes.iter().map(|process| process.id.as_str()).collect();
    assert_eq!(ids, ["Process_Elections", "Process_Runoff"]);

    let main = contract.process("Process_Elections").ok_or("missing main process")?;
    assert!(main.is_executable);
    assert_eq!(main.process_elements.len(), 10);
    assert_eq!(main.sequence_flows.len(), 9);
    let runoff = contract.process("Process_Runoff").ok_or("missing runoff process")?;
    assert!(!runoff.is_executable);
    assert_eq!(runoff.process_elements.len(), 3);

    assert_eq!(contract.data_types.len(), 4);
    Ok(())
}

#[test]
fn test_user_tasks() -> Result<(), Box<dyn Error>> {
    let contract = parse_contract(ELECTIONS)?;
    let process = &contract.processes[0];

    let Some(ProcessElement::UserTask(register)) = process.element("Task_Register") else {
        panic!("expected a user task");
    };
    assert_eq!(register.node.name, "RegisterCandidate");
    assert_eq!(register.assignee, Some(Assignee::Address("0xA11CE".to_string())));
    assert_eq!(register.task.instance_type, InstanceType::Sequential);
    assert_eq!(register.task.loop_cardinality, Some(3));
    assert_eq!(register.operation_type, TokenOperationType::Mint);
    assert_eq!(register.validation_script.as_deref(), Some("candidate.Name != \"\""));

    let form = register.form.as_ref().ok_or("missing form")?;
    assert_eq!(form.id.as_deref(), Some("Form_Register"));
    assert_eq!(form.fields.len(), 2);
    assert_eq!(form.fields[0].display_name, "CandidateName");
    assert!(!form.fields[0].is_read_only);
    assert!(form.fields[1].is_read_only);
    assert_eq!(form.fields[1].property_expression, "Election.Candidates.Party");

    let Some(ProcessElement::UserTask(vote)) = process.element("Task_Vote") else {
        panic!("expected a user task");
    };
    assert_eq!(vote.assignee, Some(Assignee::Username("voter".to_string())));
    assert_eq!(vote.task.instance_type, InstanceType::Parallel);
    assert_eq!(vote.task.loop_collection.as_deref(), Some("Election.Voters"));
    assert_eq!(vote.operation_type, TokenOperationType::Transfer);
    assert!(vote.form.is_none());
    Ok(())
}

#[test]
fn test_events_gateways_and_calls() -> Result<(), Box<dyn Error>> {
    let contract = parse_contract(ELECTIONS)?;
    let process = &contract.processes[0];

    let Some(ProcessElement::TimerBoundaryEvent(timer)) = process.element("Timer_Registration") else {
        panic!("expected a timer boundary event");
    };
    assert_eq!(timer.attached_to, "Task_Register");
    assert_eq!(timer.timer_definition_type, TimerDefinitionType::Duration);
    assert_eq!(timer.timer_definition, "P7D");
    assert!(timer.node.incoming.is_empty());

    let Some(ProcessElement::ParallelGateway(gateway)) = process.element("Gateway_Open") else {
        panic!("expected a parallel gateway");
    };
    assert_eq!(gateway.node.incoming, ["Flow_Registered", "Flow_Closed"]);

    let Some(ProcessElement::ScriptTask(count)) = process.element("Task_Count") else {
        panic!("expected a script task");
    };
    assert_eq!(count.script, "winner = votes.max(v => v.Count);");
    assert_eq!(count.operation_type, TokenOperationType::None);

    let Some(ProcessElement::CallActivity(call)) = process.element("Call_Runoff") else {
        panic!("expected a call activity");
    };
    assert_eq!(call.called_element, "Process_Runoff");
    assert!(contract.process(&call.called_element).is_some());

    let service = process.element("Service_Notify").ok_or("missing service task")?;
    assert_eq!(service.id(), "Service_Notify");
    assert_eq!(service.name(), None);

    assert!(matches!(contract.processes[1].element("Rule_Tiebreak"), Some(ProcessElement::BusinessRuleTask(_))));
    Ok(())
}

#[test]
fn test_conditional_flows() -> Result<(), Box<dyn Error>> {
    let contract = parse_contract(ELECTIONS)?;
    let process = &contract.processes[0];

    let mut branches: Vec<_> = process
        .outgoing_flows("Gateway_Result")
        .map(|flow| (flow.target_id.as_str(), flow.condition.as_deref()))
        .collect();
    branches.sort();
    assert_eq!(
        branches,
        [("Call_Runoff", Some("winner == null")), ("EndEvent_1", Some("winner != null"))]
    );

    let unconditional = &process.sequence_flows["Flow_Start"];
    assert_eq!(unconditional.name, None);
    assert_eq!(unconditional.condition, None);

    let starts: Vec<_> = process.start_events().map(|event| event.node.id.as_str()).collect();
    assert_eq!(starts, ["StartEvent_1"]);
    Ok(())
}

#[test]
fn test_data_model() -> Result<(), Box<dyn Error>> {
    let contract = parse_contract(ELECTIONS)?;

    let Some(DataType::Entity(election)) = contract.data_type("Entity_Election") else {
        panic!("expected an entity");
    };
    assert!(election.is_root_entity);
    assert_eq!(election.properties.len(), 4);
    let deadline = &election.properties[1];
    assert_eq!(deadline.name, "VotingDeadline");
    assert_eq!(deadline.data_type, Some(PropertyDataType::DateTime));
    let votes = &election.properties[2];
    assert_eq!(votes.data_type, Some(PropertyDataType::Uint));
    assert_eq!(votes.key_data_type, Some(PropertyDataType::Address));
    let candidates = &election.properties[3];
    assert_eq!(candidates.property_type, PropertyType::Reference);
    assert_eq!(candidates.referenced_data_type.as_deref(), Some("Entity_Candidate"));

    let candidate = contract.data_type("Entity_Candidate").ok_or("missing candidate")?;
    assert_eq!(candidate.properties()[1].property_type, PropertyType::Primitive);

    let Some(DataType::Token(ballot)) = contract.data_type("Token_Ballot") else {
        panic!("expected a token");
    };
    assert_eq!(ballot.name, "BallotToken");
    assert_eq!(ballot.symbol.as_deref(), Some("BLT"));
    assert!(!ballot.is_fungible);
    assert!(ballot.is_issued);
    assert_eq!(ballot.properties.len(), 1);
    assert_eq!(ballot.properties[0].data_type, Some(PropertyDataType::Int));

    let Some(DataType::Enum(phase)) = contract.data_type("Enum_Phase") else {
        panic!("expected an enum");
    };
    assert_eq!(phase.name, "ElectionPhase");
    assert_eq!(phase.values, ["Registration", "Voting", "Counting", "Closed"]);
    Ok(())
}

#[test]
fn test_read_from_file() -> Result<(), Box<dyn Error>> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/elections.dascontract");
    let contract = parse_contract_reader(File::open(path)?)?;
    assert_eq!(contract, parse_contract(ELECTIONS)?);
    Ok(())
}

#[test]
fn test_serializes_to_json() -> Result<(), Box<dyn Error>> {
    let contract = parse_contract(ELECTIONS)?;
    let json = serde_json::to_value(&contract)?;
    assert_eq!(json["id"], "Contract_Elections");
    let register = &json["processes"][0]["process_elements"]["Task_Register"];
    assert_eq!(register["kind"], "UserTask");
    assert_eq!(register["name"], "RegisterCandidate");
    assert_eq!(register["instance_type"], "Sequential");
    assert_eq!(json["data_types"]["Enum_Phase"]["kind"], "Enum");
    Ok(())
}

#[test]
fn test_broken_flow_reports_line() {
    let broken = ELECTIONS.replacen("<TargetId>Task_Register</TargetId>", "", 1);
    let error = parse_contract(&broken).unwrap_err();
    assert!(matches!(error, ParseError::InvalidElement { .. }));
    assert_eq!(error.line().0, Some(131));
    assert!(error.to_string().starts_with("Sequence flow Flow_Start is missing a target"));
}
