use std::{
    cmp,
    sync::{
        Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use rand::seq::SliceRandom;

use super::{MovieStore, PinnedLinkStore, SectionStore};
use crate::{
    error::{CatalogError, CatalogResult},
    models::{Movie, MovieId, MovieOrder, PageWindow, Section, SectionId, SectionType},
};

#[derive(Clone, Debug)]
struct Pin {
    section_id: SectionId,
    movie_id: MovieId,
    display_order: i32,
}

/// In-memory catalog with a query counter and an outage switch.
#[derive(Default)]
pub struct MemoryStore {
    sections: Mutex<Vec<Section>>,
    movies: Mutex<Vec<Movie>>,
    pins: Mutex<Vec<Pin>>,
    queries: AtomicUsize,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_section(self, id: SectionId, section_type: SectionType) -> Self {
        let title = format!("Section {id}");
        self.with_section_full(id, &title, section_type, id, true)
    }

    pub fn with_section_full(
        self,
        id: SectionId,
        title: &str,
        section_type: SectionType,
        display_order: i32,
        is_active: bool,
    ) -> Self {
        self.sections.lock().unwrap().push(Section {
            id,
            title: title.to_string(),
            section_type,
            display_order,
            is_active,
        });
        self
    }

    pub fn with_movie(self, id: MovieId, release_date: Option<&str>, rating: Option<f64>) -> Self {
        self.movies.lock().unwrap().push(Movie {
            id,
            title: format!("Movie {id}"),
            release_date: release_date.map(|d| d.parse().unwrap()),
            rating,
            poster_path: None,
            duration_minutes: None,
            genres: Vec::new(),
        });
        self
    }

    pub fn with_pin(self, section_id: SectionId, movie_id: MovieId, display_order: i32) -> Self {
        self.pins.lock().unwrap().push(Pin { section_id, movie_id, display_order });
        self
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn begin_query(&self) -> CatalogResult<()> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(sea_orm::DbErr::Custom("store offline".to_string()).into());
        }
        Ok(())
    }

    fn sorted_pins(&self, section_id: SectionId) -> Vec<Pin> {
        let mut pins: Vec<Pin> =
            self.pins.lock().unwrap().iter().filter(|p| p.section_id == section_id).cloned().collect();
        pins.sort_by_key(|p| (p.display_order, p.movie_id));
        pins
    }

    fn movie(&self, id: MovieId) -> Option<Movie> {
        self.movies.lock().unwrap().iter().find(|m| m.id == id).cloned()
    }
}

/// Same ordering the SQL store produces for `order`.
fn compare(order: MovieOrder, a: &Movie, b: &Movie) -> cmp::Ordering {
    let primary = match order {
        MovieOrder::ReleaseDateDesc => {
            desc_nulls_last(a.release_date.as_ref(), b.release_date.as_ref(), Ord::cmp)
        },
        MovieOrder::RatingDesc => desc_nulls_last(a.rating.as_ref(), b.rating.as_ref(), f64::total_cmp),
    };
    primary.then_with(|| a.id.cmp(&b.id))
}

fn desc_nulls_last<T>(
    a: Option<&T>,
    b: Option<&T>,
    by: impl Fn(&T, &T) -> cmp::Ordering,
) -> cmp::Ordering {
    match (a, b) {
        (Some(a), Some(b)) => by(b, a),
        (Some(_), None) => cmp::Ordering::Less,
        (None, Some(_)) => cmp::Ordering::Greater,
        (None, None) => cmp::Ordering::Equal,
    }
}

fn page<T>(items: impl IntoIterator<Item = T>, window: PageWindow) -> Vec<T> {
    items.into_iter().skip(window.offset as usize).take(window.limit as usize).collect()
}

#[async_trait]
impl SectionStore for MemoryStore {
    async fn list_sections(&self, include_inactive: bool) -> CatalogResult<Vec<Section>> {
        self.begin_query()?;
        let mut sections: Vec<Section> = self
            .sections
            .lock()
            .unwrap()
            .iter()
            .filter(|s| include_inactive || s.is_active)
            .cloned()
            .collect();
        sections.sort_by(|a, b| a.display_order.cmp(&b.display_order).then_with(|| a.title.cmp(&b.title)));
        Ok(sections)
    }

    async fn get_section(&self, id: SectionId) -> CatalogResult<Section> {
        self.begin_query()?;
        self.sections
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }
}

#[async_trait]
impl PinnedLinkStore for MemoryStore {
    async fn list_pinned(&self, section_id: SectionId, window: PageWindow) -> CatalogResult<Vec<Movie>> {
        self.begin_query()?;
        let pins = self.sorted_pins(section_id);
        Ok(page(pins.iter().filter_map(|p| self.movie(p.movie_id)), window))
    }

    async fn pinned_movie_ids(&self, section_id: SectionId) -> CatalogResult<Vec<MovieId>> {
        self.begin_query()?;
        Ok(self.sorted_pins(section_id).into_iter().map(|p| p.movie_id).collect())
    }
}

#[async_trait]
impl MovieStore for MemoryStore {
    async fn list_ordered(
        &self,
        order: MovieOrder,
        window: PageWindow,
        exclude: &[MovieId],
    ) -> CatalogResult<Vec<Movie>> {
        self.begin_query()?;
        let mut movies: Vec<Movie> =
            self.movies.lock().unwrap().iter().filter(|m| !exclude.contains(&m.id)).cloned().collect();
        movies.sort_by(|a, b| compare(order, a, b));
        Ok(page(movies, window))
    }

    async fn list_random(&self, limit: u64) -> CatalogResult<Vec<Movie>> {
        self.begin_query()?;
        let mut movies = self.movies.lock().unwrap().clone();
        movies.shuffle(&mut rand::rng());
        movies.truncate(limit as usize);
        Ok(movies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(store: &MemoryStore, order: MovieOrder) -> Vec<MovieId> {
        let mut movies = store.movies.lock().unwrap().clone();
        movies.sort_by(|a, b| compare(order, a, b));
        movies.iter().map(|m| m.id).collect()
    }

    #[test]
    fn release_date_order_breaks_ties_by_id_and_puts_nulls_last() {
        let store = MemoryStore::new()
            .with_movie(9, None, None)
            .with_movie(5, Some("2024-01-01"), None)
            .with_movie(2, Some("2024-01-01"), None)
            .with_movie(7, Some("2025-03-10"), None)
            .with_movie(1, None, None);
        assert_eq!(ids(&store, MovieOrder::ReleaseDateDesc), vec![7, 2, 5, 1, 9]);
    }

    #[test]
    fn rating_order_is_descending_with_nulls_last() {
        let store = MemoryStore::new()
            .with_movie(3, None, None)
            .with_movie(4, None, Some(6.5))
            .with_movie(8, None, Some(9.1))
            .with_movie(2, None, Some(6.5));
        assert_eq!(ids(&store, MovieOrder::RatingDesc), vec![8, 2, 4, 3]);
    }
}
