//! Tag, attribute and namespace spellings of the DAS contract file format.
//!
//! Everything the parsers match on by name lives here, so a schema revision only touches this file.

/// Namespace of the `xsi:type` attribute that discriminates process elements
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Local name of the discriminator attribute (resolved against [`XSI_NAMESPACE`])
pub const TYPE_ATTRIBUTE: &str = "type";

/// Deepest element nesting a document may use. Contract documents stay far below this,
/// and the element tree is dropped recursively.
pub const MAX_DEPTH: usize = 512;

// Document level
pub const CONTRACT: &str = "EditorContract";
pub const ID: &str = "Id";
pub const NAME: &str = "Name";
pub const PROCESS: &str = "Process";
pub const DATA_MODEL: &str = "DataModel";

// Process level
pub const IS_EXECUTABLE: &str = "IsExecutable";
pub const SEQUENCE_FLOW: &str = "ContractSequenceFlow";
pub const PROCESS_ELEMENT: &str = "ContractProcessElement";
pub const SOURCE_ID: &str = "SourceId";
pub const TARGET_ID: &str = "TargetId";
pub const INCOMING: &str = "Incoming";
pub const OUTGOING: &str = "Outgoing";
pub const LIST_ITEM: &str = "string";

// Tasks and events
pub const INSTANCE_TYPE: &str = "InstanceType";
pub const LOOP_CARDINALITY: &str = "LoopCardinality";
pub const LOOP_COLLECTION: &str = "LoopCollection";
pub const OPERATION_TYPE: &str = "OperationType";
pub const SCRIPT: &str = "Script";
pub const FORM: &str = "Form";
pub const FORM_FIELD: &str = "ContractFormField";
pub const READ_ONLY: &str = "ReadOnly";
pub const PROPERTY_ID: &str = "PropertyId";
pub const ATTACHED_TO: &str = "AttachedTo";
pub const DEFINITION_TYPE: &str = "DefinitionType";
pub const DEFINITION: &str = "Definition";
pub const CALLED_ELEMENT: &str = "CalledElement";

// Discriminator values
pub const BUSINESS_RULE_TASK: &str = "ContractBusinessRuleTask";
pub const SCRIPT_TASK: &str = "ContractScriptActivity";
pub const SERVICE_TASK: &str = "ContractServiceActivity";
pub const USER_TASK: &str = "ContractUserActivity";
pub const START_EVENT: &str = "ContractStartEvent";
pub const END_EVENT: &str = "ContractEndEvent";
pub const EXCLUSIVE_GATEWAY: &str = "ContractExclusiveGateway";
pub const PARALLEL_GATEWAY: &str = "ContractParallelGateway";
pub const TIMER_BOUNDARY_EVENT: &str = "ContractTimerBoundaryEvent";
pub const CALL_ACTIVITY: &str = "ContractCallActivity";

// Data model
pub const ENTITY: &str = "ContractEntity";
pub const TOKEN: &str = "ContractToken";
pub const ENUM: &str = "ContractEnum";
pub const IS_ROOT_ENTITY: &str = "IsRootEntity";
pub const PRIMITIVE_PROPERTIES: &str = "PrimitiveProperties";
pub const REFERENCE_PROPERTIES: &str = "ReferenceProperties";
pub const PRIMITIVE_CONTRACT_PROPERTY: &str = "PrimitiveContractProperty";
pub const REFERENCE_CONTRACT_PROPERTY: &str = "ReferenceContractProperty";
pub const SYMBOL: &str = "Symbol";
pub const ADDRESS: &str = "Address";
pub const IS_FUNGIBLE: &str = "IsFungible";
pub const IS_ISSUED: &str = "IsIssued";
pub const MINT_SCRIPT: &str = "MintScript";
pub const TRANSFER_SCRIPT: &str = "TransferScript";
pub const ENUM_VALUES: &str = "EnumValues";
pub const ENUM_VALUE: &str = "EnumValue";
pub const IS_MANDATORY: &str = "IsMandatory";
pub const PROPERTY_TYPE: &str = "Type";
pub const DATA_TYPE: &str = "DataType";
pub const KEY_DATA_TYPE: &str = "KeyDataType";
pub const ENTITY_ID: &str = "EntityId";
