use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Content category of a title
///
/// Drives which raw field supplies the display title and which playback URL
/// template applies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Movie,
    Series,
}

impl Category {
    /// Path segment of the metadata provider's search endpoint
    pub fn search_path(&self) -> &'static str {
        match self {
            Category::Movie => "movie",
            Category::Series => "tv",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Movie => write!(f, "movie"),
            Category::Series => write!(f, "series"),
        }
    }
}

/// A normalized movie or series title, provider-agnostic
///
/// Created fresh per search response and never mutated afterwards; stale
/// lists are replaced wholesale by the next query's results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Video {
    /// Identifier assigned by the metadata provider; opaque to this crate
    pub provider_id: String,
    /// Cross-provider playback identifier (IMDB-shaped); empty if unknown.
    /// Search responses never carry it, so search-stage normalization always
    /// leaves it empty.
    pub external_id: String,
    /// Human-readable display title
    pub title: String,
    pub poster_path: String,
    pub backdrop_path: String,
    pub category: Category,
}

// ============================================================================
// Metadata provider wire types
// ============================================================================

/// Raw search record as returned by the metadata provider
///
/// Transient: consumed once during normalization, then discarded. Series
/// records carry `name`, movie records carry `title`; either may be absent.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRecord {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
}

/// One page of search results from the metadata provider
///
/// The `results` key is mandatory; a response without it is a provider
/// error. Page metadata is consumed for logging only.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchPage {
    pub results: Vec<SearchRecord>,
    #[serde(default)]
    pub total_results: Option<i64>,
}

impl Video {
    /// Normalizes one raw provider record into the unified model
    ///
    /// Series take their display title from `name`, movies from `title`; a
    /// record missing the expected field yields an empty display title.
    /// Both artwork paths are populated from the provider's `poster_path`
    /// (the raw `backdrop_path` field is not consumed).
    pub fn from_record(record: SearchRecord, category: Category) -> Self {
        let title = match category {
            Category::Series => record.name,
            Category::Movie => record.title,
        }
        .unwrap_or_default();

        let poster_path = record.poster_path.unwrap_or_default();

        Video {
            provider_id: record.id.to_string(),
            external_id: String::new(),
            title,
            backdrop_path: poster_path.clone(),
            poster_path,
            category,
        }
    }
}

/// Normalizes a full result page into published order
///
/// Records are prepended as they are processed: the published list is the
/// exact reverse of the provider's result order. Externally observable
/// contract, pinned by tests.
pub fn normalize_page(page: SearchPage, category: Category) -> Vec<Video> {
    page.results
        .into_iter()
        .rev()
        .map(|record| Video::from_record(record, category))
        .collect()
}
