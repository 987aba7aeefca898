//! Parent and child relations inside one vocabulary.

use namaste_model::TerminologyEntry;
use serde::Serialize;

/// A broader concept named by an entry's `parent` URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParentLink {
    pub uri: String,
    /// Code the URI points at, or `None` for the code system root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// The parent concept, when the vocabulary carries it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<TerminologyEntry>,
}

/// A code with its parents and direct children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hierarchy {
    pub code: TerminologyEntry,
    pub parents: Vec<ParentLink>,
    pub children: Vec<TerminologyEntry>,
}

impl Hierarchy {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Code named by `uri` below `root`, if any.
pub(crate) fn code_under(root: &str, uri: &str) -> Option<String> {
    uri.strip_prefix(root)
        .and_then(|rest| rest.strip_prefix('/'))
        .filter(|code| !code.is_empty())
        .map(str::to_string)
}
