//! Decides which movies a recommendation section shows.
//!
//! LATEST and POPULAR honor pinned links for the requested page and fall back
//! to a dynamic ranking. ADMIN_DEFINED, MOST_RATED and MOST_COMMENTED are
//! curation only. RANDOM samples the whole catalog on every call. The
//! resolver never writes.

use std::{str::FromStr, sync::Arc};

use futures::{StreamExt, TryStreamExt, stream};
use tracing::{debug, warn};

use crate::{
    error::{CatalogError, CatalogResult},
    models::{Movie, MovieOrder, PageWindow, Section, SectionId, SectionWithMovies, Strategy},
    store::CatalogStore,
};

/// What a LATEST/POPULAR page does when curation only partly covers it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum PinnedPagePolicy {
    /// Any pinned row on the page replaces the dynamic ranking for that page,
    /// even if the page comes back short. A page with no pinned row is served
    /// by the dynamic ranking at the same raw offset, so paging past the
    /// curated set can repeat pinned movies that an earlier page already
    /// showed. It does not return an empty page there.
    #[default]
    PageOverride,
    /// Pinned movies come first, then the dynamic ranking without them.
    FillFromDynamic,
}

impl FromStr for PinnedPagePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "override" => Ok(PinnedPagePolicy::PageOverride),
            "fill" => Ok(PinnedPagePolicy::FillFromDynamic),
            other => anyhow::bail!("unknown pinned page policy: {other}"),
        }
    }
}

#[derive(Clone)]
pub struct SectionResolver {
    store: Arc<dyn CatalogStore>,
    policy: PinnedPagePolicy,
    concurrency: usize,
}

impl SectionResolver {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store, policy: PinnedPagePolicy::default(), concurrency: 1 }
    }

    pub fn with_policy(mut self, policy: PinnedPagePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sections resolved at once by [`Self::list_sections_with_movies`].
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub async fn list_sections(&self, include_inactive: bool) -> CatalogResult<Vec<Section>> {
        self.store.list_sections(include_inactive).await
    }

    pub async fn get_section(&self, id: SectionId) -> CatalogResult<Section> {
        self.store.get_section(id).await
    }

    pub async fn section_movies_by_id(
        &self,
        id: SectionId,
        window: PageWindow,
    ) -> CatalogResult<Vec<Movie>> {
        let section = self.store.get_section(id).await?;
        self.list_section_movies(&section, window).await
    }

    /// One page of a section's movies. An empty page is never an error.
    pub async fn list_section_movies(
        &self,
        section: &Section,
        window: PageWindow,
    ) -> CatalogResult<Vec<Movie>> {
        if window.is_empty() {
            return Ok(Vec::new());
        }

        let movies = match section.section_type.strategy() {
            Strategy::CuratedWithFallback(order) => {
                self.curated_with_fallback(section.id, order, window).await?
            },
            Strategy::CuratedOnly => self.store.list_pinned(section.id, window).await?,
            Strategy::Random => self.store.list_random(window.limit).await?,
            Strategy::Unrecognized => {
                warn!(
                    section_id = section.id,
                    section_type = section.section_type.as_str(),
                    "unrecognized section type, rendering empty"
                );
                Vec::new()
            },
        };

        debug!(
            section_id = section.id,
            section_type = section.section_type.as_str(),
            limit = window.limit,
            offset = window.offset,
            count = movies.len(),
            "resolved section page"
        );
        Ok(movies)
    }

    /// Every active section with its first page, in section listing order.
    pub async fn list_sections_with_movies(
        &self,
        first_page_limit: u64,
    ) -> CatalogResult<Vec<SectionWithMovies>> {
        let sections = self.store.list_sections(false).await?;
        debug!(sections = sections.len(), first_page_limit, "resolving section first pages");

        stream::iter(sections)
            .map(|section| async move {
                let movies =
                    self.list_section_movies(&section, PageWindow::first(first_page_limit)).await?;
                Ok::<_, CatalogError>(SectionWithMovies { section, movies })
            })
            .buffered(self.concurrency)
            .try_collect()
            .await
    }

    async fn curated_with_fallback(
        &self,
        section_id: SectionId,
        order: MovieOrder,
        window: PageWindow,
    ) -> CatalogResult<Vec<Movie>> {
        let pinned = self.store.list_pinned(section_id, window).await?;

        match self.policy {
            PinnedPagePolicy::PageOverride => {
                if !pinned.is_empty() {
                    debug!(section_id, pinned = pinned.len(), "serving curated page");
                    return Ok(pinned);
                }
                self.store.list_ordered(order, window, &[]).await
            },
            PinnedPagePolicy::FillFromDynamic => {
                let missing = window.limit.saturating_sub(pinned.len() as u64);
                if missing == 0 {
                    return Ok(pinned);
                }

                let pinned_ids = self.store.pinned_movie_ids(section_id).await?;
                let tail = PageWindow::new(missing, window.offset.saturating_sub(pinned_ids.len() as u64));

                let mut movies = pinned;
                movies.extend(self.store.list_ordered(order, tail, &pinned_ids).await?);
                Ok(movies)
            },
        }
    }
}
