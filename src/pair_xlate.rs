//! Translation lookups built from `pairXlateGroup` GraphQL responses.
//!
//! A response is classified once by [`XlateResponse::from_value`] into the bulk
//! (`allPairXlateGroup`) or single-group (`pairXlateGroup` / `node`) shape.
//! Resolution then keeps only entries in the requested language and builds a
//! [`TranslationIndex`] keyed by `idxPairXlateGroup`, then by metric key.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// Errors raised when a response does not have the expected structure
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Malformed translation response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Unrecognized translation response: expected data.allPairXlateGroup, data.pairXlateGroup or node")]
    UnrecognizedShape,

    #[error("GraphQL query failed: {}", .0.join("; "))]
    GraphQl(Vec<String>),
}

/// Localized label for one metric key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationRecord {
    pub text: String,
    pub units: Option<String>,
}

/// Translations of one group, keyed by metric key
pub type GroupTranslations = BTreeMap<String, TranslationRecord>;

// ==================== Wire Types ====================

#[derive(Debug, Clone, Deserialize)]
struct Connection<T> {
    edges: Vec<Edge<T>>,
}

#[derive(Debug, Clone, Deserialize)]
struct Edge<T> {
    node: T,
}

impl<T> Connection<T> {
    fn into_nodes(self) -> Vec<T> {
        self.edges.into_iter().map(|edge| edge.node).collect()
    }
}

/// A `pairXlateGroup` node as returned by the API
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupNode {
    #[serde(default)]
    id: Option<String>,
    idx_pair_xlate_group: String,
    pair_xlate_pair_xlate_group: Connection<EntryNode>,
}

#[derive(Debug, Clone, Deserialize)]
struct EntryNode {
    key: String,
    // Older servers published the text as `description`
    #[serde(alias = "description")]
    translation: String,
    #[serde(default)]
    units: Option<String>,
    language: LanguageNode,
}

#[derive(Debug, Clone, Deserialize)]
struct LanguageNode {
    code: String,
}

// ==================== Response Shapes ====================

/// The two shapes a translation response can take
#[derive(Debug, Clone)]
pub enum XlateResponse {
    /// Result of the `allPairXlateGroup` query
    Bulk(Vec<GroupNode>),
    /// Result of the `pairXlateGroup(id:)` query, or a single bulk edge
    Single(GroupNode),
}

impl XlateResponse {
    /// Classify a raw GraphQL response.
    ///
    /// `null` and `{}` are treated as a bulk response with no groups.
    pub fn from_value(response: &Value) -> Result<Self, ResolveError> {
        if is_empty(response) {
            return Ok(XlateResponse::Bulk(Vec::new()));
        }

        if let Some(node) = response.get("node") {
            return Ok(XlateResponse::Single(GroupNode::deserialize(node)?));
        }

        let errors = graphql_errors(response);
        let data = match response.get("data") {
            Some(data) if !data.is_null() => data,
            _ if !errors.is_empty() => return Err(ResolveError::GraphQl(errors)),
            _ => return Err(ResolveError::UnrecognizedShape),
        };
        if !errors.is_empty() {
            warn!("GraphQL response carried partial errors: {:?}", errors);
        }

        if let Some(all) = data.get("allPairXlateGroup") {
            if all.is_null() && !errors.is_empty() {
                return Err(ResolveError::GraphQl(errors));
            }
            let connection = Connection::<GroupNode>::deserialize(all)?;
            return Ok(XlateResponse::Bulk(connection.into_nodes()));
        }

        if let Some(group) = data.get("pairXlateGroup") {
            if group.is_null() && !errors.is_empty() {
                return Err(ResolveError::GraphQl(errors));
            }
            return Ok(XlateResponse::Single(GroupNode::deserialize(group)?));
        }

        Err(ResolveError::UnrecognizedShape)
    }

    /// Resolve each group in response order.
    pub fn groups(&self, language: &str) -> Vec<PairXlateGroup> {
        match self {
            XlateResponse::Bulk(nodes) => nodes
                .iter()
                .map(|node| PairXlateGroup::resolve(node, language))
                .collect(),
            XlateResponse::Single(node) => vec![PairXlateGroup::resolve(node, language)],
        }
    }

    /// Resolve every group into a single index.
    pub fn translations(&self, language: &str) -> TranslationIndex {
        self.groups(language).into_iter().collect()
    }
}

fn is_empty(response: &Value) -> bool {
    match response {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

fn graphql_errors(response: &Value) -> Vec<String> {
    response
        .get("errors")
        .and_then(Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .map(|error| match error.get("message").and_then(Value::as_str) {
                    Some(message) => message.to_string(),
                    None => error.to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

// ==================== Resolved Groups ====================

/// One translation group filtered down to a single language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairXlateGroup {
    id: Option<String>,
    idx_pair_xlate_group: String,
    translations: GroupTranslations,
}

impl PairXlateGroup {
    fn resolve(node: &GroupNode, language: &str) -> Self {
        let entries = &node.pair_xlate_pair_xlate_group.edges;
        let mut translations = GroupTranslations::new();

        for entry in entries.iter().map(|edge| &edge.node) {
            if entry.language.code != language {
                continue;
            }
            translations.insert(
                entry.key.clone(),
                TranslationRecord {
                    text: entry.translation.clone(),
                    units: entry.units.clone(),
                },
            );
        }

        let dropped = entries
            .iter()
            .filter(|edge| edge.node.language.code != language)
            .count();
        debug!(
            "Translation group {}: kept {} entries, dropped {} not in '{}'",
            node.idx_pair_xlate_group,
            translations.len(),
            dropped,
            language
        );

        Self {
            id: node.id.clone(),
            idx_pair_xlate_group: node.idx_pair_xlate_group.clone(),
            translations,
        }
    }

    /// GraphQL relay ID of the group, when the query asked for it
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn idx_pair_xlate_group(&self) -> &str {
        &self.idx_pair_xlate_group
    }

    pub fn translations(&self) -> &GroupTranslations {
        &self.translations
    }

    /// Index holding just this group
    pub fn into_index(self) -> TranslationIndex {
        std::iter::once(self).collect()
    }
}

// ==================== Translation Index ====================

/// Translations keyed by `idxPairXlateGroup`, then by metric key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TranslationIndex(BTreeMap<String, GroupTranslations>);

impl TranslationIndex {
    pub fn get(&self, idx_pair_xlate_group: &str) -> Option<&GroupTranslations> {
        self.0.get(idx_pair_xlate_group)
    }

    pub fn lookup(&self, idx_pair_xlate_group: &str, key: &str) -> Option<&TranslationRecord> {
        self.get(idx_pair_xlate_group)?.get(key)
    }

    /// Translated text for `key`, or the key itself when there is none.
    pub fn label(&self, idx_pair_xlate_group: &str, key: &str) -> String {
        self.lookup(idx_pair_xlate_group, key)
            .map(|record| record.text.clone())
            .unwrap_or_else(|| key.to_string())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &GroupTranslations)> {
        self.0.iter()
    }

    /// Fold another index into this one. Groups in `other` replace groups
    /// with the same index here.
    pub fn merge(&mut self, other: TranslationIndex) {
        self.0.extend(other.0);
    }
}

impl FromIterator<PairXlateGroup> for TranslationIndex {
    fn from_iter<I: IntoIterator<Item = PairXlateGroup>>(iter: I) -> Self {
        TranslationIndex(
            iter.into_iter()
                .map(|group| (group.idx_pair_xlate_group, group.translations))
                .collect(),
        )
    }
}

/// Classify and resolve a response in one step.
pub fn resolve(response: &Value, language: &str) -> Result<TranslationIndex, ResolveError> {
    Ok(XlateResponse::from_value(response)?.translations(language))
}

/// Read a saved GraphQL response from disk
pub fn load_response(path: &Path) -> Result<Value> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read GraphQL response from {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse GraphQL response in {}", path.display()))
}
