//! Load requests and their backward-linked history.

use std::fmt;
use std::sync::Arc;

use crate::location::LoadLocation;

/// The identifier reported for a request with no source.
pub const ROOT_SOURCE_IDENTIFIER: &str = "<root>";

/// A record of "this content was requested via specification X, triggered
/// from source Y".
///
/// Each item points backwards at the location that triggered it, forming a
/// singly-linked chain to the root request. Items are immutable once
/// created; their lifetime is tied to whichever object (a loaded file, a
/// block) embeds them.
#[derive(Debug, Clone)]
pub struct LoadItem {
    specification: String,
    source: Option<Arc<dyn LoadLocation>>,
}

impl LoadItem {
    pub fn new(specification: impl Into<String>, source: Arc<dyn LoadLocation>) -> Self {
        Self {
            specification: specification.into(),
            source: Some(source),
        }
    }

    /// A request with no triggering source (the start of a load chain).
    pub fn root(specification: impl Into<String>) -> Self {
        Self {
            specification: specification.into(),
            source: None,
        }
    }

    pub fn specification(&self) -> &str {
        &self.specification
    }

    pub fn source(&self) -> Option<&dyn LoadLocation> {
        self.source.as_deref()
    }

    /// The source's load identifier, or [`ROOT_SOURCE_IDENTIFIER`] for a
    /// root request.
    pub fn source_identifier(&self) -> String {
        match self.source.as_deref() {
            Some(source) => source.load_identifier(),
            None => ROOT_SOURCE_IDENTIFIER.to_owned(),
        }
    }

    /// The load history leading up to this item, most-recent-first.
    ///
    /// Returns a fresh iterator on every call; the chain ends at the root
    /// request.
    pub fn history(&self) -> impl Iterator<Item = &LoadItem> {
        std::iter::successors(Some(self), |item| {
            item.source.as_deref().map(LoadLocation::load_item)
        })
    }

    /// True if any source in the history chain has the given load
    /// identifier.
    ///
    /// Loaders use this for import-loop detection: an identifier that is
    /// already part of the current chain means the load would recurse.
    pub fn chain_contains(&self, load_identifier: &str) -> bool {
        self.history().any(|item| {
            item.source
                .as_deref()
                .is_some_and(|source| source.load_identifier() == load_identifier)
        })
    }
}

impl fmt::Display for LoadItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for item in self.history() {
            if !first {
                write!(f, ";")?;
            }
            first = false;
            let source = match item.source.as_deref() {
                Some(source) => source.interactive_identifier(),
                None => ROOT_SOURCE_IDENTIFIER.to_owned(),
            };
            write!(
                f,
                "included as \"{}\" from \"{}\"",
                item.specification, source
            )?;
        }
        Ok(())
    }
}
