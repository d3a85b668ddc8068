use jiff::civil::Date;
use serde::{Serialize, Serializer};

use crate::entities::{movie, section};

pub type SectionId = i32;
pub type MovieId = i32;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SectionType {
    AdminDefined,
    Latest,
    Popular,
    MostRated,
    MostCommented,
    Random,
    /// A type string this build does not know. Resolves to an empty page.
    Unknown(String),
}

impl SectionType {
    pub fn from_db(value: &str) -> Self {
        match value {
            "ADMIN_DEFINED" => SectionType::AdminDefined,
            "LATEST" => SectionType::Latest,
            "POPULAR" => SectionType::Popular,
            "MOST_RATED" => SectionType::MostRated,
            "MOST_COMMENTED" => SectionType::MostCommented,
            "RANDOM" => SectionType::Random,
            other => SectionType::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SectionType::AdminDefined => "ADMIN_DEFINED",
            SectionType::Latest => "LATEST",
            SectionType::Popular => "POPULAR",
            SectionType::MostRated => "MOST_RATED",
            SectionType::MostCommented => "MOST_COMMENTED",
            SectionType::Random => "RANDOM",
            SectionType::Unknown(raw) => raw,
        }
    }

    pub fn strategy(&self) -> Strategy {
        match self {
            SectionType::Latest => Strategy::CuratedWithFallback(MovieOrder::ReleaseDateDesc),
            SectionType::Popular => Strategy::CuratedWithFallback(MovieOrder::RatingDesc),
            SectionType::AdminDefined | SectionType::MostRated | SectionType::MostCommented => {
                Strategy::CuratedOnly
            },
            SectionType::Random => Strategy::Random,
            SectionType::Unknown(_) => Strategy::Unrecognized,
        }
    }
}

impl Serialize for SectionType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// How a section's movies are chosen.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Strategy {
    /// Pinned links win for the requested page, otherwise the dynamic ranking.
    CuratedWithFallback(MovieOrder),
    /// Pinned links only; no curation means no movies.
    CuratedOnly,
    /// Fresh uniform sample per call; curation and offset are ignored.
    Random,
    Unrecognized,
}

/// Dynamic ranking. Ties break on movie id ascending, missing keys sort last.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MovieOrder {
    ReleaseDateDesc,
    RatingDesc,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PageWindow {
    pub limit: u64,
    pub offset: u64,
}

impl PageWindow {
    pub fn new(limit: u64, offset: u64) -> Self {
        Self { limit, offset }
    }

    pub fn first(limit: u64) -> Self {
        Self { limit, offset: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.limit == 0
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Section {
    pub id: SectionId,
    pub title: String,
    pub section_type: SectionType,
    pub display_order: i32,
    pub is_active: bool,
}

impl From<section::Model> for Section {
    fn from(row: section::Model) -> Self {
        Self {
            id: row.id,
            section_type: SectionType::from_db(&row.section_type),
            title: row.title,
            display_order: row.display_order,
            is_active: row.is_active,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub release_date: Option<Date>,
    pub rating: Option<f64>,
    pub poster_path: Option<String>,
    pub duration_minutes: Option<i32>,
    pub genres: Vec<String>,
}

impl From<movie::Model> for Movie {
    fn from(row: movie::Model) -> Self {
        let release_date = row.release_date.as_deref().and_then(|raw| match raw.parse::<Date>() {
            Ok(date) => Some(date),
            Err(err) => {
                tracing::warn!(movie_id = row.id, value = raw, error = %err, "unparseable release date");
                None
            },
        });

        let genres = row
            .genres
            .split(',')
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            id: row.id,
            title: row.title,
            release_date,
            rating: row.rating,
            poster_path: row.poster_path,
            duration_minutes: row.duration_minutes,
            genres,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct SectionWithMovies {
    #[serde(flatten)]
    pub section: Section,
    pub movies: Vec<Movie>,
}
