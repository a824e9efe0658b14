use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::command::parser::filter::parse_filter;
use crate::engine::errors::ValidationError;
use crate::engine::types::ScalarValue;

/// Load options as they arrive on the wire (camelCase JSON).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub group: Vec<GroupingInfo>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub group_summary: Vec<SummaryInfo>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_summary: Vec<SummaryInfo>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub require_total_count: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub require_group_count: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupingInfo {
    pub selector: String,
    #[serde(default = "default_expanded", deserialize_with = "null_as_expanded")]
    pub is_expanded: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub desc: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryInfo {
    #[serde(default)]
    pub selector: Option<String>,
    pub summary_type: String,
}

fn default_expanded() -> bool {
    true
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_expanded<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

impl LoadRequest {
    pub fn from_json(raw: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(raw).map_err(|e| ValidationError::InvalidJson(e.to_string()))
    }

    /// Parses the raw filter array, if any.
    pub fn parsed_filter(&self) -> Result<Option<FilterExpr>, ValidationError> {
        match &self.filter {
            None => Ok(None),
            Some(value) => parse_filter(value),
        }
    }
}

impl GroupingInfo {
    pub fn new(selector: &str, is_expanded: bool) -> Self {
        Self {
            selector: selector.to_string(),
            is_expanded,
            desc: false,
        }
    }
}

impl SummaryInfo {
    pub fn new(selector: &str, summary_type: &str) -> Self {
        Self {
            selector: Some(selector.to_string()),
            summary_type: summary_type.to_string(),
        }
    }
}

/// Filter tree over field names, before resolution against a schema.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpr {
    Compare {
        field: String,
        op: CompareOp,
        value: ScalarValue,
    },
    And(Vec<FilterExpr>),
    Or(Vec<FilterExpr>),
    Not(Box<FilterExpr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    StartsWith,
    EndsWith,
    Contains,
    NotContains,
}

impl CompareOp {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "=" | "==" => Ok(CompareOp::Eq),
            "<>" | "!=" => Ok(CompareOp::Neq),
            ">" => Ok(CompareOp::Gt),
            ">=" => Ok(CompareOp::Gte),
            "<" => Ok(CompareOp::Lt),
            "<=" => Ok(CompareOp::Lte),
            "startswith" => Ok(CompareOp::StartsWith),
            "endswith" => Ok(CompareOp::EndsWith),
            "contains" => Ok(CompareOp::Contains),
            "notcontains" => Ok(CompareOp::NotContains),
            _ => Err(ValidationError::UnknownFilterOperator(raw.to_string())),
        }
    }

    pub fn is_string_op(&self) -> bool {
        matches!(
            self,
            CompareOp::StartsWith | CompareOp::EndsWith | CompareOp::Contains | CompareOp::NotContains
        )
    }
}
