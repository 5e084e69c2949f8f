use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::ids::GrammarType;

/// Used when no tip exists for a grammar type.
pub const FALLBACK_TIP: &str = "There is no specific tip for this grammar type.";

/// Grammar tips keyed by grammar type label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GrammarTips(BTreeMap<GrammarType, String>);

impl GrammarTips {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, grammar_type: impl Into<GrammarType>, tip: impl Into<String>) {
        self.0.insert(grammar_type.into(), tip.into());
    }

    #[must_use]
    pub fn get(&self, grammar_type: &GrammarType) -> Option<&str> {
        self.0.get(grammar_type).map(String::as_str)
    }

    /// Tip for `grammar_type`, or [`FALLBACK_TIP`] when none is configured.
    #[must_use]
    pub fn lookup(&self, grammar_type: &GrammarType) -> &str {
        self.get(grammar_type).unwrap_or(FALLBACK_TIP)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for GrammarTips
where
    K: Into<GrammarType>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
