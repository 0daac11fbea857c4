//! Client-side search, filter and sort over fetched characters
//!
//! Everything here is pure: inputs are borrowed, never reordered in place, and
//! every call returns a fresh vector. Views recompute on each parameter change.

use marvel_protocol::Character;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Categorical filter over related-item availability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharacterFilter {
    #[default]
    All,
    HasDescription,
    HasComics,
    HasSeries,
}

impl CharacterFilter {
    pub fn matches(&self, character: &Character) -> bool {
        match self {
            Self::All => true,
            Self::HasDescription => character.has_description(),
            Self::HasComics => character.comics.available > 0,
            Self::HasSeries => character.series.available > 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::HasDescription => "hasDescription",
            Self::HasComics => "hasComics",
            Self::HasSeries => "hasSeries",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All Characters",
            Self::HasDescription => "With Description",
            Self::HasComics => "With Comics",
            Self::HasSeries => "With Series",
        }
    }
}

impl fmt::Display for CharacterFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CharacterFilter {
    type Err = String;

    /// Accepts `hasComics`, `has-comics`, `with_comics` and similar spellings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "all" => Ok(Self::All),
            "hasdescription" | "withdescription" => Ok(Self::HasDescription),
            "hascomics" | "withcomics" => Ok(Self::HasComics),
            "hasseries" | "withseries" => Ok(Self::HasSeries),
            _ => Err(format!(
                "unknown filter '{}', expected one of: all, hasDescription, hasComics, hasSeries",
                s
            )),
        }
    }
}

/// Field a result set is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    Modified,
    Comics,
    Series,
    Stories,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Modified => "modified",
            Self::Comics => "comics",
            Self::Series => "series",
            Self::Stories => "stories",
        }
    }

    /// Ascending comparison on this key
    pub fn compare(&self, a: &Character, b: &Character) -> Ordering {
        match self {
            Self::Name => compare_names(&a.name, &b.name),
            // unparseable timestamps order before every parseable one
            Self::Modified => a.modified_at().cmp(&b.modified_at()),
            Self::Comics => a.comics.available.cmp(&b.comics.available),
            Self::Series => a.series.available.cmp(&b.series.available),
            Self::Stories => a.stories.available.cmp(&b.stories.available),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "modified" => Ok(Self::Modified),
            "comics" => Ok(Self::Comics),
            "series" => Ok(Self::Series),
            "stories" => Ok(Self::Stories),
            _ => Err(format!(
                "unknown sort key '{}', expected one of: name, modified, comics, series, stories",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            _ => Err(format!("unknown sort order '{}', expected asc or desc", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    pub key: SortKey,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }

    pub fn compare(&self, a: &Character, b: &Character) -> Ordering {
        self.order.apply(self.key.compare(a, b))
    }
}

/// Search text, categorical filter and optional ordering, applied together
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub search: String,
    pub filter: CharacterFilter,
    /// `None` keeps the server's order
    pub sort: Option<SortSpec>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn filter(mut self, filter: CharacterFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn sort_by(mut self, key: SortKey, order: SortOrder) -> Self {
        self.sort = Some(SortSpec::new(key, order));
        self
    }

    /// Search AND filter
    pub fn matches(&self, character: &Character) -> bool {
        matches_search(character, &self.search) && self.filter.matches(character)
    }

    pub fn apply(&self, characters: &[Character]) -> Vec<Character> {
        let mut result: Vec<Character> = characters
            .iter()
            .filter(|c| self.matches(c))
            .cloned()
            .collect();

        if let Some(spec) = self.sort {
            // stable: equal keys keep their relative order
            result.sort_by(|a, b| spec.compare(a, b));
        }

        result
    }
}

/// Case-insensitive substring match on the name; blank search matches everything
pub fn matches_search(character: &Character, search: &str) -> bool {
    if search.trim().is_empty() {
        return true;
    }
    character.name.to_lowercase().contains(&search.to_lowercase())
}

pub fn search(characters: &[Character], text: &str) -> Vec<Character> {
    Query::new().search(text).apply(characters)
}

pub fn filter(characters: &[Character], filter: CharacterFilter) -> Vec<Character> {
    Query::new().filter(filter).apply(characters)
}

pub fn sort(characters: &[Character], key: SortKey, order: SortOrder) -> Vec<Character> {
    Query::new().sort_by(key, order).apply(characters)
}

/// Dictionary order: accents and case are ignored first, then unaccented
/// sorts before accented and lowercase before uppercase
fn compare_names(a: &str, b: &str) -> Ordering {
    fn folded(name: &str) -> impl Iterator<Item = char> + '_ {
        decomposed(name).filter(|c| !is_combining_mark(*c))
    }
    fn decomposed(name: &str) -> impl Iterator<Item = char> + '_ {
        name.nfd().flat_map(char::to_lowercase)
    }

    folded(a)
        .cmp(folded(b))
        .then_with(|| decomposed(a).cmp(decomposed(b)))
        .then_with(|| b.cmp(a))
}
