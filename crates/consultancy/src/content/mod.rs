//! Marketing content: published documents for the public site and the
//! editor CRUD behind them. Every collection shares one generic catalog.

pub mod bodies;
pub mod catalog;
pub mod domain;
pub mod repository;
pub mod router;

pub use bodies::{
    BlogPost, CaseStudy, Event, Investor, PortfolioProject, ServiceOffering, TeamMember,
};
pub use catalog::{CollectionStats, ContentCatalog, ContentCounts};
pub use domain::{slugify, ContentBody, ContentDocument, ContentDraft};
pub use repository::{ContentRepository, MemoryContentRepository};
pub use router::content_router;

use std::sync::Arc;

use axum::Router;

use crate::storage::RepositoryError;
use crate::validation::ValidationErrors;

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("slug '{0}' is already in use")]
    DuplicateSlug(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// One catalog per collection, all backed by the same kind of store.
#[derive(Clone)]
pub struct ContentCatalogs {
    pub blog: Arc<ContentCatalog<BlogPost>>,
    pub services: Arc<ContentCatalog<ServiceOffering>>,
    pub case_studies: Arc<ContentCatalog<CaseStudy>>,
    pub portfolio: Arc<ContentCatalog<PortfolioProject>>,
    pub investors: Arc<ContentCatalog<Investor>>,
    pub team: Arc<ContentCatalog<TeamMember>>,
    pub events: Arc<ContentCatalog<Event>>,
}

impl ContentCatalogs {
    pub fn in_memory() -> Self {
        fn catalog<T: ContentBody>() -> Arc<ContentCatalog<T>> {
            Arc::new(ContentCatalog::new(Arc::new(
                MemoryContentRepository::<T>::default(),
            )))
        }

        Self {
            blog: catalog(),
            services: catalog(),
            case_studies: catalog(),
            portfolio: catalog(),
            investors: catalog(),
            team: catalog(),
            events: catalog(),
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .merge(content_router(self.blog.clone()))
            .merge(content_router(self.services.clone()))
            .merge(content_router(self.case_studies.clone()))
            .merge(content_router(self.portfolio.clone()))
            .merge(content_router(self.investors.clone()))
            .merge(content_router(self.team.clone()))
            .merge(content_router(self.events.clone()))
    }

    /// Per-collection counters for the dashboard.
    pub fn stats(&self) -> Vec<Arc<dyn CollectionStats>> {
        let mut stats: Vec<Arc<dyn CollectionStats>> = Vec::with_capacity(7);
        stats.push(self.blog.clone());
        stats.push(self.services.clone());
        stats.push(self.case_studies.clone());
        stats.push(self.portfolio.clone());
        stats.push(self.investors.clone());
        stats.push(self.team.clone());
        stats.push(self.events.clone());
        stats
    }
}
