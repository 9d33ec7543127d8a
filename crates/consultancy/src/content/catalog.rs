use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use super::domain::{slugify, ContentBody, ContentDocument, ContentDraft};
use super::repository::ContentRepository;
use super::ContentError;
use crate::pagination::{Page, PageRequest};
use crate::storage::RepositoryError;
use crate::validation::ValidationErrors;

/// Published/total counts for one collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ContentCounts {
    pub total: usize,
    pub published: usize,
}

/// Type-erased view the dashboard uses to count every collection.
pub trait CollectionStats: Send + Sync {
    fn collection(&self) -> &'static str;
    fn counts(&self) -> Result<ContentCounts, ContentError>;
}

/// Service over one content collection.
pub struct ContentCatalog<T: ContentBody> {
    repository: Arc<dyn ContentRepository<T>>,
}

impl<T: ContentBody> ContentCatalog<T> {
    pub fn new(repository: Arc<dyn ContentRepository<T>>) -> Self {
        Self { repository }
    }

    fn ordered(&self) -> Result<Vec<ContentDocument<T>>, ContentError> {
        let mut documents = self.repository.list()?;
        documents.sort_by(|a, b| {
            a.body
                .order()
                .cmp(&b.body.order())
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(documents)
    }

    pub fn list_published(
        &self,
        page: PageRequest,
    ) -> Result<Page<ContentDocument<T>>, ContentError> {
        let published = self
            .ordered()?
            .into_iter()
            .filter(|document| document.published)
            .collect();
        Ok(Page::slice(published, page))
    }

    /// Unpublished documents are reported as missing.
    pub fn get_published(&self, slug: &str) -> Result<ContentDocument<T>, ContentError> {
        self.repository
            .find_by_slug(slug)?
            .filter(|document| document.published)
            .ok_or(ContentError::Repository(RepositoryError::NotFound))
    }

    /// Drafts included.
    pub fn list_all(&self, page: PageRequest) -> Result<Page<ContentDocument<T>>, ContentError> {
        Ok(Page::slice(self.ordered()?, page))
    }

    pub fn get(&self, id: &str) -> Result<ContentDocument<T>, ContentError> {
        self.repository
            .fetch(id)?
            .ok_or(ContentError::Repository(RepositoryError::NotFound))
    }

    pub fn create(&self, draft: ContentDraft<T>) -> Result<ContentDocument<T>, ContentError> {
        let slug = self.resolve_slug(&draft, None)?;
        let now = Utc::now();
        let document = ContentDocument {
            id: format!("{}-{}", T::COLLECTION, Uuid::new_v4()),
            slug,
            published: draft.published.unwrap_or(false),
            created_at: now,
            updated_at: now,
            body: draft.body,
        };

        let stored = self.repository.insert(document)?;
        info!(
            collection = T::COLLECTION,
            id = %stored.id,
            slug = %stored.slug,
            "content created"
        );
        Ok(stored)
    }

    /// Replaces the body. The slug changes only when one is supplied.
    pub fn update(
        &self,
        id: &str,
        draft: ContentDraft<T>,
    ) -> Result<ContentDocument<T>, ContentError> {
        let existing = self.get(id)?;
        let slug = match draft.slug.as_deref() {
            Some(_) => self.resolve_slug(&draft, Some(id))?,
            None => {
                validate_body(&draft.body)?;
                existing.slug.clone()
            }
        };

        let document = ContentDocument {
            id: existing.id,
            slug,
            published: draft.published.unwrap_or(existing.published),
            created_at: existing.created_at,
            updated_at: Utc::now(),
            body: draft.body,
        };
        self.repository.update(document.clone())?;
        info!(collection = T::COLLECTION, id = %document.id, "content updated");
        Ok(document)
    }

    pub fn delete(&self, id: &str) -> Result<ContentDocument<T>, ContentError> {
        let removed = self.repository.remove(id)?;
        info!(collection = T::COLLECTION, id = %removed.id, "content deleted");
        Ok(removed)
    }

    /// Validates the body and picks a free slug; `owner` is the document
    /// allowed to already hold it.
    fn resolve_slug(
        &self,
        draft: &ContentDraft<T>,
        owner: Option<&str>,
    ) -> Result<String, ContentError> {
        let mut errors = ValidationErrors::default();
        draft.body.validate(&mut errors);

        let source = draft
            .slug
            .as_deref()
            .filter(|slug| !slug.trim().is_empty())
            .unwrap_or_else(|| draft.body.title());
        let slug = slugify(source);
        if slug.is_empty() && errors.is_empty() {
            errors.push("slug", "slug must contain at least one letter or digit");
        }
        if !errors.is_empty() {
            return Err(errors.into());
        }

        match self.repository.find_by_slug(&slug)? {
            Some(existing) if Some(existing.id.as_str()) != owner => {
                Err(ContentError::DuplicateSlug(slug))
            }
            _ => Ok(slug),
        }
    }
}

fn validate_body<T: ContentBody>(body: &T) -> Result<(), ContentError> {
    let mut errors = ValidationErrors::default();
    body.validate(&mut errors);
    errors.finish(|| ()).map_err(ContentError::from)
}

impl<T: ContentBody> CollectionStats for ContentCatalog<T> {
    fn collection(&self) -> &'static str {
        T::COLLECTION
    }

    fn counts(&self) -> Result<ContentCounts, ContentError> {
        let documents = self.repository.list()?;
        Ok(ContentCounts {
            total: documents.len(),
            published: documents.iter().filter(|document| document.published).count(),
        })
    }
}
