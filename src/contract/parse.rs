//! This module builds a whole contract from a document: its processes and its data model.

use std::io::Read;

use tracing::debug;

use crate::contract::Contract;
use crate::data::parse_data_types;
use crate::error::{Error, Line, ParseError};
use crate::process::parse_process;
use crate::schema;
use crate::xml::parse_document;

/// Parse a whole contract document.
///
/// The root element must be an `EditorContract`. Every `Process` section below it becomes a process,
/// in document order, and the first `DataModel` section provides the data types.
/// Any structural problem aborts the parse, no partial contract is returned.
pub fn parse_contract(input: &str) -> Result<Contract, ParseError> {
    let root = parse_document(input)?;
    if root.name != schema::CONTRACT {
        return Err(ParseError::invalid(
            format!("Expected a {} root element, found {}", schema::CONTRACT, root.name),
            root.line,
        ));
    }

    let id = root
        .child_text(schema::ID)
        .ok_or_else(|| ParseError::invalid("Contract is missing an ID", root.line))?
        .to_string();
    let name = root.child_text(schema::NAME).map(str::to_string);

    let processes = root
        .descendants_named(schema::PROCESS)
        .map(parse_process)
        .collect::<Result<Vec<_>, _>>()?;

    let data_model = root
        .first_descendant(schema::DATA_MODEL)
        .ok_or_else(|| ParseError::invalid("Contract is missing a data model", Line(None)))?;
    let data_types = parse_data_types(data_model)?;

    debug!(
        contract = %id,
        processes = processes.len(),
        data_types = data_types.len(),
        "parsed contract"
    );
    Ok(Contract {
        id,
        name,
        processes,
        data_types,
    })
}

/// Read a contract document from any reader, e.g. an opened `.dascontract` file
pub fn parse_contract_reader<R: Read>(mut reader: R) -> Result<Contract, Error> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    Ok(parse_contract(&input)?)
}

#[cfg(test)]
mod test {
    use std::error::Error as StdError;

    use super::*;
    use crate::data::{DataType, PropertyDataType};
    use crate::process::ProcessElement;

    const XSI: &str = r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance""#;

    fn element(kind: &str, id: &str, name: &str, incoming: &[&str], outgoing: &[&str], extra: &str) -> String {
        let list = |ids: &[&str]| ids.iter().map(|id| format!("<string>{}</string>", id)).collect::<String>();
        format!(
            r#"<ContractProcessElement xsi:type="{}"><Id>{}</Id><Name>{}</Name><Incoming>{}</Incoming><Outgoing>{}</Outgoing>{}</ContractProcessElement>"#,
            kind,
            id,
            name,
            list(incoming),
            list(outgoing),
            extra
        )
    }

    fn flow(id: &str, source: &str, target: &str) -> String {
        format!(
            "<ContractSequenceFlow><Id>{}</Id><SourceId>{}</SourceId><TargetId>{}</TargetId></ContractSequenceFlow>",
            id, source, target
        )
    }

    fn small_contract() -> String {
        format!(
            r#"<EditorContract {xsi}>
  <Id>Contract_1</Id>
  <Name>Loan</Name>
  <Processes>
    <Process>
      <Id>Process_1</Id>
      <IsExecutable>true</IsExecutable>
      <ProcessElements>{start}{script}{end}</ProcessElements>
      <SequenceFlows>{f1}{f2}</SequenceFlows>
    </Process>
  </Processes>
  <DataModel>
    <DataTypes>
      <ContractEntity>
        <Id>Entity_1</Id>
        <Name>Loan Request</Name>
        <PrimitiveProperties>
          <PrimitiveContractProperty><Id>P1</Id><Name>Amount</Name><Type>Primitive</Type><DataType>Number</DataType></PrimitiveContractProperty>
          <PrimitiveContractProperty><Id>P2</Id><Name>Approved</Name><Type>Primitive</Type><DataType>Bool</DataType></PrimitiveContractProperty>
        </PrimitiveProperties>
      </ContractEntity>
    </DataTypes>
  </DataModel>
</EditorContract>"#,
            xsi = XSI,
            start = element("ContractStartEvent", "Start", "Start", &[], &["F1"], ""),
            script = element(
                "ContractScriptActivity",
                "Script",
                "Compute Interest",
                &["F1"],
                &["F2"],
                "<Script>interest = amount / 10;</Script>"
            ),
            end = element("ContractEndEvent", "End", "End", &["F2"], &[], ""),
            f1 = flow("F1", "Start", "Script"),
            f2 = flow("F2", "Script", "End"),
        )
    }

    #[test]
    fn test_start_script_end() -> Result<(), Box<dyn StdError>> {
        let contract = parse_contract(&small_contract())?;
        assert_eq!(contract.id, "Contract_1");
        assert_eq!(contract.name.as_deref(), Some("Loan"));
        assert_eq!(contract.processes.len(), 1);

        let process = contract.process("Process_1").ok_or("missing process")?;
        assert!(process.is_executable);
        assert_eq!(process.process_elements.len(), 3);
        assert_eq!(process.sequence_flows.len(), 2);
        assert!(matches!(process.element("Script"), Some(ProcessElement::ScriptTask(task)) if task.node.name == "ComputeInterest"));
        assert_eq!(process.start_events().count(), 1);
        let next: Vec<_> = process.outgoing_flows("Start").map(|flow| flow.target_id.as_str()).collect();
        assert_eq!(next, ["Script"]);

        let Some(DataType::Entity(entity)) = contract.data_type("Entity_1") else {
            panic!("expected an entity");
        };
        assert_eq!(entity.name, "LoanRequest");
        assert_eq!(entity.properties.len(), 2);
        assert_eq!(entity.properties[1].data_type, Some(PropertyDataType::Bool));
        Ok(())
    }

    #[test]
    fn test_missing_id() {
        let input = format!("<EditorContract {}><Name>Nameless</Name><DataModel/></EditorContract>", XSI);
        let error = parse_contract(&input).unwrap_err();
        assert!(matches!(error, ParseError::InvalidElement { .. }));
        assert!(error.to_string().starts_with("Contract is missing an ID"));
    }

    #[test]
    fn test_no_processes() -> Result<(), Box<dyn StdError>> {
        let contract = parse_contract("<EditorContract><Id>C</Id><Processes/><DataModel/></EditorContract>")?;
        assert!(contract.processes.is_empty());
        assert!(contract.data_types.is_empty());
        assert_eq!(contract.name, None);
        Ok(())
    }

    #[test]
    fn test_data_model_without_processes() -> Result<(), Box<dyn StdError>> {
        let input = "<EditorContract><Id>C</Id><DataModel><DataTypes>
            <ContractEnum><Id>Enum_1</Id><Name>Status</Name><EnumValues><EnumValue>Open</EnumValue></EnumValues></ContractEnum>
        </DataTypes></DataModel></EditorContract>";
        let contract = parse_contract(input)?;
        assert!(contract.processes.is_empty());
        assert_eq!(contract.data_types.len(), 1);
        assert!(matches!(contract.data_type("Enum_1"), Some(DataType::Enum(status)) if status.values == ["Open"]));
        Ok(())
    }

    #[test]
    fn test_missing_data_model() {
        let error = parse_contract("<EditorContract><Id>C</Id></EditorContract>").unwrap_err();
        assert_eq!(error.to_string(), "Contract is missing a data model (line N/A)");
    }

    #[test]
    fn test_wrong_root() {
        let error = parse_contract("<Definitions><Id>C</Id></Definitions>").unwrap_err();
        assert!(error.to_string().starts_with("Expected a EditorContract root element, found Definitions"));
    }

    #[test]
    fn test_failing_process_aborts() {
        let broken = element("ContractScriptActivity", "Script", "Empty", &[], &[], "");
        let input = format!(
            "<EditorContract {}><Id>C</Id><Process><Id>P</Id>{}</Process><DataModel/></EditorContract>",
            XSI, broken
        );
        let error = parse_contract(&input).unwrap_err();
        assert!(error.to_string().contains("must contain a script"));
    }

    #[test]
    fn test_reader_reports_parse_errors() {
        let result = parse_contract_reader("<EditorContract>".as_bytes());
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_reader_parses_document() -> Result<(), Box<dyn StdError>> {
        let contract = parse_contract_reader(small_contract().as_bytes())?;
        assert_eq!(contract.processes[0].id, "Process_1");
        Ok(())
    }
}
