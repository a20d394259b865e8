// Partial Update Directives
//
// Wire shape: `{"_operation": "<Kind>", "value": <operand>}`. A bare value is a
// replacement, which is also how `Replace` is encoded.

use crate::domain::error::{DomainError, Result};
use crate::domain::record::{Record, OBJECT_ID};
use serde_json::{json, Value};

const OPERATION_KEY: &str = "_operation";
const VALUE_KEY: &str = "value";

/// Directive applied to a single attribute of a stored record
#[derive(Debug, Clone, PartialEq)]
pub enum PartialUpdateOp {
    Replace(Value),
    Increment(i64),
    Decrement(i64),
    Add(Value),
    Remove(Value),
    AddUnique(Value),
}

impl PartialUpdateOp {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Replace(_) => "Replace",
            Self::Increment(_) => "Increment",
            Self::Decrement(_) => "Decrement",
            Self::Add(_) => "Add",
            Self::Remove(_) => "Remove",
            Self::AddUnique(_) => "AddUnique",
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::Replace(value) => value.clone(),
            Self::Increment(delta) | Self::Decrement(delta) => {
                json!({ OPERATION_KEY: self.kind(), VALUE_KEY: delta })
            }
            Self::Add(element) | Self::Remove(element) | Self::AddUnique(element) => {
                json!({ OPERATION_KEY: self.kind(), VALUE_KEY: element })
            }
        }
    }

    /// Decode a wire value. Anything that is not an `_operation` object is a replacement.
    pub fn from_value(value: &Value) -> Result<Self> {
        let Some(Value::String(kind)) = value.as_object().and_then(|m| m.get(OPERATION_KEY)) else {
            return Ok(Self::Replace(value.clone()));
        };
        let operand = value.get(VALUE_KEY).cloned().unwrap_or(Value::Null);

        match kind.as_str() {
            "Increment" => delta(kind, &operand).map(Self::Increment),
            "Decrement" => delta(kind, &operand).map(Self::Decrement),
            "Add" => Ok(Self::Add(operand)),
            "Remove" => Ok(Self::Remove(operand)),
            "AddUnique" => Ok(Self::AddUnique(operand)),
            other => Err(DomainError::ValidationError(format!(
                "Unknown partial update operation: {other}"
            ))),
        }
    }

    /// New value of `attribute` after applying this directive to `current`.
    ///
    /// Numeric directives start from 0 and list directives from an empty list
    /// when the attribute is absent.
    pub fn apply(&self, attribute: &str, current: Option<&Value>) -> Result<Value> {
        match self {
            Self::Replace(value) => Ok(value.clone()),
            Self::Increment(delta) => self.add_number(attribute, current, *delta),
            Self::Decrement(delta) => match delta.checked_neg() {
                Some(negated) => self.add_number(attribute, current, negated),
                None => Err(DomainError::InvalidOperation {
                    operation: self.kind().to_string(),
                    attribute: attribute.to_string(),
                    reason: format!("operand {delta} cannot be negated"),
                }),
            },
            Self::Add(element) => {
                let mut list = self.current_list(attribute, current)?;
                list.push(element.clone());
                Ok(Value::Array(list))
            }
            Self::Remove(element) => {
                let mut list = self.current_list(attribute, current)?;
                list.retain(|item| item != element);
                Ok(Value::Array(list))
            }
            Self::AddUnique(element) => {
                let mut list = self.current_list(attribute, current)?;
                if !list.contains(element) {
                    list.push(element.clone());
                }
                Ok(Value::Array(list))
            }
        }
    }

    fn add_number(&self, attribute: &str, current: Option<&Value>, delta: i64) -> Result<Value> {
        match current {
            None | Some(Value::Null) => Ok(Value::from(delta)),
            Some(Value::Number(n)) => match n.as_i64() {
                Some(i) => Ok(Value::from(i.saturating_add(delta))),
                None => Ok(json!(n.as_f64().unwrap_or_default() + delta as f64)),
            },
            Some(other) => Err(self.invalid(attribute, other)),
        }
    }

    fn current_list(&self, attribute: &str, current: Option<&Value>) -> Result<Vec<Value>> {
        match current {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => Ok(items.clone()),
            Some(other) => Err(self.invalid(attribute, other)),
        }
    }

    fn invalid(&self, attribute: &str, found: &Value) -> DomainError {
        DomainError::InvalidOperation {
            operation: self.kind().to_string(),
            attribute: attribute.to_string(),
            reason: format!(
                "stored value is a {}",
                crate::domain::error::json_kind(found)
            ),
        }
    }
}

impl From<PartialUpdateOp> for Value {
    fn from(op: PartialUpdateOp) -> Self {
        op.to_value()
    }
}

// Fractional operands are rejected rather than truncated.
fn delta(kind: &str, operand: &Value) -> Result<i64> {
    operand
        .as_i64()
        .ok_or_else(|| DomainError::invalid_type(format!("{kind} operand"), "integer"))
}

/// Apply every attribute of a partial-update body to `record`.
///
/// `objectID` in the body is ignored; each other attribute is decoded as a
/// directive and applied in turn.
pub fn apply_partial_update(record: &mut Record, update: &Record) -> Result<()> {
    for (attribute, raw) in update.attributes() {
        if attribute == OBJECT_ID {
            continue;
        }
        let op = PartialUpdateOp::from_value(raw)?;
        let next = op.apply(attribute, record.get(attribute))?;
        record.insert(attribute.clone(), next);
    }
    Ok(())
}
