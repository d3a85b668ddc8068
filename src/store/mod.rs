//! Read-side interfaces the resolver depends on.
//!
//! The resolver only ever sees these traits; production wires in
//! [`crate::db::SeaOrmStore`], tests use [`memory::MemoryStore`].

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;

use crate::{
    error::CatalogResult,
    models::{Movie, MovieId, MovieOrder, PageWindow, Section, SectionId},
};

#[async_trait]
pub trait SectionStore: Send + Sync {
    /// Sections ordered by display order, then title.
    async fn list_sections(&self, include_inactive: bool) -> CatalogResult<Vec<Section>>;
    /// Fails with [`crate::error::CatalogError::NotFound`] for an unknown id.
    async fn get_section(&self, id: SectionId) -> CatalogResult<Section>;
}

#[async_trait]
pub trait PinnedLinkStore: Send + Sync {
    /// One page of pinned movies, ordered by pin display order then movie id.
    async fn list_pinned(&self, section_id: SectionId, window: PageWindow) -> CatalogResult<Vec<Movie>>;
    /// Every pinned movie id of a section, in pin order.
    async fn pinned_movie_ids(&self, section_id: SectionId) -> CatalogResult<Vec<MovieId>>;
}

#[async_trait]
pub trait MovieStore: Send + Sync {
    async fn list_ordered(
        &self,
        order: MovieOrder,
        window: PageWindow,
        exclude: &[MovieId],
    ) -> CatalogResult<Vec<Movie>>;
    async fn list_random(&self, limit: u64) -> CatalogResult<Vec<Movie>>;
}

pub trait CatalogStore: SectionStore + PinnedLinkStore + MovieStore {}

impl<T: SectionStore + PinnedLinkStore + MovieStore> CatalogStore for T {}
