//! Structured output constraints

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Constraint on the shape of generated output
///
/// Kinds the host does not know are kept by name rather than rejected at
/// parse time, so providers can report the offending value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ResponseFormatRepr", into = "ResponseFormatRepr")]
pub enum ResponseFormat {
    /// Output must validate against a JSON schema
    JsonSchema {
        /// The schema
        json_schema: Value,
    },
    /// Output must follow a BNF grammar
    Grammar {
        /// The grammar
        bnf: Value,
    },
    /// A kind this host version does not recognize
    Unrecognized {
        /// The `type` tag as received
        kind: String,
    },
}

impl ResponseFormat {
    /// JSON schema constraint
    pub const fn json_schema(schema: Value) -> Self {
        Self::JsonSchema {
            json_schema: schema,
        }
    }

    /// Grammar constraint
    pub const fn grammar(bnf: Value) -> Self {
        Self::Grammar { bnf }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ResponseFormatRepr {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    json_schema: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bnf: Option<Value>,
}

impl From<ResponseFormatRepr> for ResponseFormat {
    fn from(repr: ResponseFormatRepr) -> Self {
        match repr.kind.as_str() {
            "json_schema" => Self::JsonSchema {
                json_schema: repr.json_schema.unwrap_or(Value::Null),
            },
            "grammar" => Self::Grammar {
                bnf: repr.bnf.unwrap_or(Value::Null),
            },
            _ => Self::Unrecognized { kind: repr.kind },
        }
    }
}

impl From<ResponseFormat> for ResponseFormatRepr {
    fn from(format: ResponseFormat) -> Self {
        match format {
            ResponseFormat::JsonSchema { json_schema } => Self {
                kind: "json_schema".to_string(),
                json_schema: Some(json_schema),
                bnf: None,
            },
            ResponseFormat::Grammar { bnf } => Self {
                kind: "grammar".to_string(),
                json_schema: None,
                bnf: Some(bnf),
            },
            ResponseFormat::Unrecognized { kind } => Self {
                kind,
                json_schema: None,
                bnf: None,
            },
        }
    }
}
