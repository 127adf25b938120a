//! GraphQL documents for the translation lookups.
//!
//! The transport is somebody else's job; this module only provides the query
//! text and a request body that can be POSTed as JSON.

use serde::Serialize;
use serde_json::{json, Value};

/// Every translation group with its key/translation/unit entries.
pub const ALL_PAIR_XLATE_GROUPS: &str = r#"{
  allPairXlateGroup {
    edges {
      node {
        id
        idxPairXlateGroup
        pairXlatePairXlateGroup {
          edges {
            node {
              key
              translation
              units
              language {
                code
              }
            }
          }
        }
      }
    }
  }
}"#;

/// A single translation group, looked up by its relay ID.
pub const PAIR_XLATE_GROUP: &str = r#"query PairXlateGroup($id: String!) {
  pairXlateGroup(id: $id) {
    id
    idxPairXlateGroup
    pairXlatePairXlateGroup {
      edges {
        node {
          key
          translation
          units
          language {
            code
          }
        }
      }
    }
  }
}"#;

/// JSON body of a GraphQL HTTP request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryRequest {
    pub query: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Value>,
}

impl QueryRequest {
    pub fn all_pair_xlate_groups() -> Self {
        Self {
            query: ALL_PAIR_XLATE_GROUPS,
            variables: None,
        }
    }

    pub fn pair_xlate_group(id: &str) -> Self {
        Self {
            query: PAIR_XLATE_GROUP,
            variables: Some(json!({ "id": id })),
        }
    }
}
