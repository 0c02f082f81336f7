//! Search rules and their exclusion sub-rules.
//!
//! A rule is a named bundle of query parameters for the communications
//! listing, plus an ordered list of exclusions applied to whatever the
//! query returns. Rules are plain data: the engine receives them from the
//! caller and never stores or mutates them.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Recognized query fields of the communications listing endpoint.
///
/// The set is closed. A parameter key outside this enumeration cannot be
/// constructed in code, and a rule file containing one fails to decode
/// instead of silently querying with a typo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QueryField {
    #[serde(rename = "numeroOab")]
    OabNumber,
    #[serde(rename = "ufOab")]
    OabState,
    #[serde(rename = "nomeAdvogado")]
    LawyerName,
    #[serde(rename = "nomeParte")]
    PartyName,
    #[serde(rename = "numeroProcesso")]
    ProcessNumber,
    #[serde(rename = "numeroComunicacao")]
    CommunicationNumber,
    #[serde(rename = "siglaTribunal")]
    TribunalCode,
    #[serde(rename = "siglaOrgaoJulgador")]
    CourtBodyCode,
    #[serde(rename = "orgaoId")]
    CourtBodyId,
    #[serde(rename = "dataDisponibilizacaoInicio")]
    AvailableFrom,
    #[serde(rename = "dataDisponibilizacaoFim")]
    AvailableUntil,
}

impl QueryField {
    /// Parameter name sent to the upstream API.
    pub fn wire_name(self) -> &'static str {
        match self {
            QueryField::OabNumber => "numeroOab",
            QueryField::OabState => "ufOab",
            QueryField::LawyerName => "nomeAdvogado",
            QueryField::PartyName => "nomeParte",
            QueryField::ProcessNumber => "numeroProcesso",
            QueryField::CommunicationNumber => "numeroComunicacao",
            QueryField::TribunalCode => "siglaTribunal",
            QueryField::CourtBodyCode => "siglaOrgaoJulgador",
            QueryField::CourtBodyId => "orgaoId",
            QueryField::AvailableFrom => "dataDisponibilizacaoInicio",
            QueryField::AvailableUntil => "dataDisponibilizacaoFim",
        }
    }
}

/// A typed query parameter value.
///
/// Untagged, so rule files read naturally: `"nomeParte": "Sinales"`,
/// `"orgaoId": 123`, `"dataDisponibilizacaoInicio": "2025-08-20"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Date(NaiveDate),
    Text(String),
}

impl ParamValue {
    /// Whether the value amounts to "not filled in". Empty strings and zero
    /// come from blank form fields and must not reach the query string.
    fn is_vacuous(&self) -> bool {
        match self {
            ParamValue::Text(text) => text.is_empty(),
            ParamValue::Int(n) => *n == 0,
            ParamValue::Date(_) => false,
        }
    }

    /// Rendering used in the HTTP query string.
    pub fn to_query_value(&self) -> String {
        match self {
            ParamValue::Text(text) => text.clone(),
            ParamValue::Int(n) => n.to_string(),
            ParamValue::Date(date) => date.format("%Y-%m-%d").to_string(),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<NaiveDate> for ParamValue {
    fn from(value: NaiveDate) -> Self {
        ParamValue::Date(value)
    }
}

/// Query parameters of one rule, keyed by field. Ordered so the rendered
/// query string is deterministic.
pub type Parameters = BTreeMap<QueryField, ParamValue>;

/// Field an exclusion matches against.
///
/// Unlike [`QueryField`] this set stays open: an unrecognized name loaded
/// from an old rule file becomes [`ExclusionField::Other`], which never
/// matches anything. A typo weakens one exclusion instead of discarding the
/// rule it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExclusionField {
    /// Exact match against a lawyer's OAB registration number.
    OabNumber,
    /// Case-insensitive substring match against recipient names.
    PartyName,
    /// Case-sensitive substring match against the masked process number.
    ProcessNumber,
    /// Case-insensitive substring match against lawyer names.
    LawyerName,
    /// Anything else. Never matches.
    Other(String),
}

impl ExclusionField {
    pub fn as_str(&self) -> &str {
        match self {
            ExclusionField::OabNumber => "numeroOab",
            ExclusionField::PartyName => "nomeParte",
            ExclusionField::ProcessNumber => "numeroProcesso",
            ExclusionField::LawyerName => "nomeAdvogado",
            ExclusionField::Other(name) => name,
        }
    }
}

impl From<String> for ExclusionField {
    fn from(name: String) -> Self {
        match name.as_str() {
            "numeroOab" => ExclusionField::OabNumber,
            "nomeParte" => ExclusionField::PartyName,
            "numeroProcesso" => ExclusionField::ProcessNumber,
            "nomeAdvogado" => ExclusionField::LawyerName,
            _ => ExclusionField::Other(name),
        }
    }
}

impl From<ExclusionField> for String {
    fn from(field: ExclusionField) -> Self {
        field.as_str().to_string()
    }
}

/// A named exclusion attached to a search rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExclusionRule {
    pub name: String,
    pub field: ExclusionField,
    pub value: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl ExclusionRule {
    pub fn new(name: impl Into<String>, field: ExclusionField, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field,
            value: value.into(),
            enabled: true,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// A named search against the communications listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SearchRuleData")]
pub struct SearchRule {
    pub name: String,
    pub enabled: bool,
    pub parameters: Parameters,
    #[serde(default)]
    pub exclusions: Vec<ExclusionRule>,
}

/// Raw shape of a rule on disk; normalized into [`SearchRule`] on decode so
/// vacuous parameters are stripped no matter where the rule came from.
#[derive(Deserialize)]
struct SearchRuleData {
    name: String,
    enabled: bool,
    parameters: Parameters,
    #[serde(default)]
    exclusions: Vec<ExclusionRule>,
}

impl From<SearchRuleData> for SearchRule {
    fn from(data: SearchRuleData) -> Self {
        SearchRule::new(data.name, data.enabled, data.parameters, data.exclusions)
    }
}

impl SearchRule {
    /// Build a rule, dropping parameters whose value is an empty string or
    /// zero. The effective query is exactly the parameters that survive.
    pub fn new(
        name: impl Into<String>,
        enabled: bool,
        parameters: Parameters,
        exclusions: Vec<ExclusionRule>,
    ) -> Self {
        let parameters = parameters
            .into_iter()
            .filter(|(_, value)| !value.is_vacuous())
            .collect();
        Self {
            name: name.into(),
            enabled,
            parameters,
            exclusions,
        }
    }

    /// Wire-name/value pairs for the HTTP query, in field order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.parameters
            .iter()
            .map(|(field, value)| (field.wire_name().to_string(), value.to_query_value()))
            .collect()
    }
}
