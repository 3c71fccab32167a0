//! Root document schema.
//!
//! A document is an object with a `blocks` array; every block is an object
//! with a non-empty string `type` and an object `data`. Editor.js metadata
//! (`time`, `version`, block `id`) is accepted and ignored.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::validator::{Validation, Validator, validate_with};

#[derive(Deserialize)]
struct DocumentShape {
    blocks: Vec<BlockShape>,
}

#[derive(Deserialize)]
struct BlockShape {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(rename = "data")]
    _data: Map<String, Value>,
}

/// Validator for the document structure.
#[derive(Clone, Copy, Debug, Default)]
pub struct DocumentValidator;

impl Validator for DocumentValidator {
    fn validate(&self, data: &Value) -> Validation {
        validate_with::<DocumentShape, _>(data, |document, report| {
            for (index, block) in document.blocks.iter().enumerate() {
                report.ensure(!block.block_type.is_empty(), || {
                    format!("blocks[{index}].type cannot be empty")
                });
            }
        })
        .prefixed("invalid document")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn errors(data: &Value) -> Vec<String> {
        DocumentValidator.validate(data).into_errors()
    }

    #[test]
    fn test_editorjs_output_is_valid() {
        let data = json!({
            "time": 1_700_000_000_000_u64,
            "version": "2.28.2",
            "blocks": [
                {"id": "a1", "type": "paragraph", "data": {"text": "Hello"}},
                {"id": "a2", "type": "delimiter", "data": {}}
            ]
        });
        assert!(errors(&data).is_empty());
    }

    #[test]
    fn test_empty_blocks_is_valid() {
        assert!(errors(&json!({"blocks": []})).is_empty());
    }

    #[test]
    fn test_null_content() {
        let errors = errors(&Value::Null);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("invalid document: invalid type: null"));
    }

    #[test]
    fn test_missing_blocks() {
        let errors = errors(&json!({"time": 1}));
        assert_eq!(errors, vec!["invalid document: missing field `blocks`"]);
    }

    #[test]
    fn test_blocks_not_array() {
        assert_eq!(errors(&json!({"blocks": {}})).len(), 1);
    }

    #[test]
    fn test_block_without_data() {
        let errors = errors(&json!({"blocks": [{"type": "paragraph"}]}));
        assert_eq!(errors, vec!["invalid document: missing field `data`"]);
    }

    #[test]
    fn test_block_data_must_be_object() {
        assert_eq!(
            errors(&json!({"blocks": [{"type": "paragraph", "data": "text"}]})).len(),
            1
        );
    }

    #[test]
    fn test_empty_block_type() {
        let errors = errors(&json!({"blocks": [
            {"type": "paragraph", "data": {}},
            {"type": "", "data": {}}
        ]}));
        assert_eq!(errors, vec!["invalid document: blocks[1].type cannot be empty"]);
    }
}
