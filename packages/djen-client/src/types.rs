//! Wire types for the DJEN comunica API.
//!
//! Only the fields the rest of the system inspects are typed. Everything
//! else the upstream sends is captured in the `extra` maps so a record can
//! be persisted without losing information, and so new upstream fields do
//! not break decoding.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One page of the communications listing.
///
/// `items` is required: a success response without it is a malformed page
/// and surfaces as a decode error, never as an empty result.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommunicationsPage {
    pub items: Vec<Publication>,
    /// Listing metadata (`status`, `count`, ...) the engine does not read.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single judicial communication.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Publication {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Upstream content hash, when provided. Preferred duplicate key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    /// Process number as digits only.
    #[serde(
        rename = "numero_processo",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub process_number: Option<String>,
    /// Process number in the CNJ masked format (with separators).
    #[serde(
        rename = "numeroprocessocommascara",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub masked_process_number: Option<String>,
    #[serde(
        rename = "siglaTribunal",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub tribunal: Option<String>,
    #[serde(
        rename = "tipoComunicacao",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub communication_type: Option<String>,
    /// Free-text body of the communication.
    #[serde(rename = "texto", default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(
        rename = "destinatarios",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub recipients: Vec<Recipient>,
    #[serde(
        rename = "destinatarioadvogados",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub lawyers: Vec<LawyerAssociation>,
    /// Name of the search rule that retrieved this record. Never sent by
    /// the upstream; stamped after exclusion filtering so it survives into
    /// persisted results.
    #[serde(
        rename = "_source_rule",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub source_rule: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A party the communication is addressed to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Recipient {
    #[serde(rename = "nome", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Side of the case (`ATIVO` / `PASSIVO`).
    #[serde(rename = "polo", default, skip_serializing_if = "Option::is_none")]
    pub pole: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Join record between a communication and one of its lawyers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LawyerAssociation {
    #[serde(rename = "advogado", default, skip_serializing_if = "Option::is_none")]
    pub lawyer: Option<Lawyer>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Lawyer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "nome", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// OAB registration number. The upstream encodes this inconsistently as
    /// a string or a bare number; both decode to a string here.
    #[serde(
        rename = "numero_oab",
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub registration_number: Option<String>,
    #[serde(rename = "uf_oab", default, skip_serializing_if = "Option::is_none")]
    pub registration_state: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_publication() {
        let json = r#"{
            "id": 441390144,
            "hash": "a3f9c2",
            "numero_processo": "00012345620258080024",
            "numeroprocessocommascara": "0001234-56.2025.8.08.0024",
            "siglaTribunal": "TJES",
            "tipoComunicacao": "Intimação",
            "texto": "Fica intimada a parte...",
            "link": "https://comunica.pje.jus.br/comunicacao/441390144",
            "nomeOrgao": "Vara Cível de Vitória",
            "destinatarios": [
                {"nome": "SINALES SINALIZACAO ESPIRITO SANTO LTDA", "polo": "P"}
            ],
            "destinatarioadvogados": [
                {"id": 9981, "advogado": {"id": 512, "nome": "Maria Souza", "numero_oab": "8773", "uf_oab": "ES"}}
            ]
        }"#;

        let publication: Publication = serde_json::from_str(json).unwrap();
        assert_eq!(publication.id, Some(441390144));
        assert_eq!(publication.hash.as_deref(), Some("a3f9c2"));
        assert_eq!(
            publication.masked_process_number.as_deref(),
            Some("0001234-56.2025.8.08.0024")
        );
        assert_eq!(publication.tribunal.as_deref(), Some("TJES"));
        assert_eq!(publication.recipients.len(), 1);
        assert_eq!(
            publication.recipients[0].name.as_deref(),
            Some("SINALES SINALIZACAO ESPIRITO SANTO LTDA")
        );
        let lawyer = publication.lawyers[0].lawyer.as_ref().unwrap();
        assert_eq!(lawyer.registration_number.as_deref(), Some("8773"));
        assert_eq!(lawyer.registration_state.as_deref(), Some("ES"));
        // Untyped upstream fields land in `extra`.
        assert_eq!(
            publication.extra.get("nomeOrgao").and_then(Value::as_str),
            Some("Vara Cível de Vitória")
        );
        assert!(publication.extra.contains_key("link"));
    }

    #[test]
    fn test_deserialize_minimal_publication() {
        let publication: Publication = serde_json::from_str("{}").unwrap();
        assert_eq!(publication.id, None);
        assert_eq!(publication.hash, None);
        assert!(publication.recipients.is_empty());
        assert!(publication.lawyers.is_empty());
        assert!(publication.extra.is_empty());
    }

    #[test]
    fn test_oab_number_accepts_numeric_encoding() {
        let json = r#"{"advogado": {"nome": "João Lima", "numero_oab": 8773}}"#;
        let association: LawyerAssociation = serde_json::from_str(json).unwrap();
        let lawyer = association.lawyer.unwrap();
        assert_eq!(lawyer.registration_number.as_deref(), Some("8773"));

        let json = r#"{"advogado": {"nome": "João Lima", "numero_oab": null}}"#;
        let association: LawyerAssociation = serde_json::from_str(json).unwrap();
        assert_eq!(association.lawyer.unwrap().registration_number, None);
    }

    #[test]
    fn test_page_requires_items() {
        let err = serde_json::from_str::<CommunicationsPage>(r#"{"status": "ok", "count": 0}"#)
            .unwrap_err();
        assert!(err.to_string().contains("items"));

        let page: CommunicationsPage =
            serde_json::from_str(r#"{"status": "ok", "count": 2, "items": [{}, {}]}"#).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.extra.get("count").and_then(Value::as_i64), Some(2));
    }

    #[test]
    fn test_serialization_preserves_unknown_fields() {
        let json = r#"{"id": 7, "tipoDocumento": "Edital", "meio": "D"}"#;
        let publication: Publication = serde_json::from_str(json).unwrap();
        let out = serde_json::to_value(&publication).unwrap();
        assert_eq!(out["tipoDocumento"], "Edital");
        assert_eq!(out["meio"], "D");
        // No source rule stamped, so the marker key must be absent.
        assert!(out.get("_source_rule").is_none());
    }

    #[test]
    fn test_source_rule_round_trips() {
        let mut publication = Publication::default();
        publication.source_rule = Some("Sinales".to_string());
        let out = serde_json::to_value(&publication).unwrap();
        assert_eq!(out["_source_rule"], "Sinales");

        let back: Publication = serde_json::from_value(out).unwrap();
        assert_eq!(back.source_rule.as_deref(), Some("Sinales"));
    }
}
