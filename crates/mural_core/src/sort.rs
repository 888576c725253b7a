//! Client-side ordering of the recado list.

use std::{cmp::Reverse, fmt, str::FromStr};

use shared::protocol::Recado;
use thiserror::Error;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortCriterion {
    /// Newest `createdAt` first.
    #[default]
    Recent,
    Oldest,
    /// Author name, locale-aware.
    Alphabetical,
}

impl SortCriterion {
    pub const ALL: [SortCriterion; 3] = [
        SortCriterion::Recent,
        SortCriterion::Oldest,
        SortCriterion::Alphabetical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortCriterion::Recent => "recent",
            SortCriterion::Oldest => "oldest",
            SortCriterion::Alphabetical => "alphabetical",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortCriterion::Recent => "Mais recentes",
            SortCriterion::Oldest => "Mais antigos",
            SortCriterion::Alphabetical => "Ordem alfabética",
        }
    }
}

impl fmt::Display for SortCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown sort criterion '{0}' (expected recent, oldest or alphabetical)")]
pub struct ParseSortCriterionError(String);

impl FromStr for SortCriterion {
    type Err = ParseSortCriterionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recent" | "recentes" => Ok(SortCriterion::Recent),
            "oldest" | "antigos" => Ok(SortCriterion::Oldest),
            "alphabetical" | "alfabetica" => Ok(SortCriterion::Alphabetical),
            _ => Err(ParseSortCriterionError(s.to_string())),
        }
    }
}

/// Reorders `recados` in place. Equal keys keep their current relative order.
/// Recados whose timestamp could not be parsed go last for both date orders.
pub fn sort_recados(recados: &mut [Recado], criterion: SortCriterion) {
    match criterion {
        SortCriterion::Recent => recados.sort_by_key(|recado| {
            let instant = recado.created_at.instant();
            (instant.is_none(), Reverse(instant))
        }),
        SortCriterion::Oldest => recados.sort_by_key(|recado| {
            let instant = recado.created_at.instant();
            (instant.is_none(), instant)
        }),
        SortCriterion::Alphabetical => {
            recados.sort_by_cached_key(|recado| CollationKey::new(&recado.author))
        }
    }
}

/// Multi-level comparison key approximating a locale collator: base letters
/// first, then accents, then case (lowercase before uppercase).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    base: String,
    accents: String,
    case: Vec<bool>,
}

impl CollationKey {
    pub fn new(text: &str) -> Self {
        let base = text
            .nfd()
            .filter(|c| !is_combining_mark(*c))
            .flat_map(char::to_lowercase)
            .collect();
        let accents = text.nfd().flat_map(char::to_lowercase).collect();
        let case = text
            .nfd()
            .filter(|c| !is_combining_mark(*c))
            .map(char::is_uppercase)
            .collect();
        Self {
            base,
            accents,
            case,
        }
    }
}
