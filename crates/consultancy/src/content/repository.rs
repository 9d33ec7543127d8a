use super::domain::{ContentBody, ContentDocument};
use crate::storage::{MemoryTable, RepositoryError};

pub trait ContentRepository<T: ContentBody>: Send + Sync {
    fn insert(&self, document: ContentDocument<T>) -> Result<ContentDocument<T>, RepositoryError>;
    fn update(&self, document: ContentDocument<T>) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &str) -> Result<Option<ContentDocument<T>>, RepositoryError>;
    fn find_by_slug(&self, slug: &str) -> Result<Option<ContentDocument<T>>, RepositoryError>;
    fn remove(&self, id: &str) -> Result<ContentDocument<T>, RepositoryError>;
    fn list(&self) -> Result<Vec<ContentDocument<T>>, RepositoryError>;
}

#[derive(Debug)]
pub struct MemoryContentRepository<T> {
    documents: MemoryTable<ContentDocument<T>>,
}

impl<T> Default for MemoryContentRepository<T> {
    fn default() -> Self {
        Self {
            documents: MemoryTable::default(),
        }
    }
}

impl<T: ContentBody> ContentRepository<T> for MemoryContentRepository<T> {
    fn insert(&self, document: ContentDocument<T>) -> Result<ContentDocument<T>, RepositoryError> {
        self.documents.insert(document)
    }

    fn update(&self, document: ContentDocument<T>) -> Result<(), RepositoryError> {
        self.documents.update(document)
    }

    fn fetch(&self, id: &str) -> Result<Option<ContentDocument<T>>, RepositoryError> {
        self.documents.get(id)
    }

    fn find_by_slug(&self, slug: &str) -> Result<Option<ContentDocument<T>>, RepositoryError> {
        self.documents.find(|document| document.slug == slug)
    }

    fn remove(&self, id: &str) -> Result<ContentDocument<T>, RepositoryError> {
        self.documents.remove(id)
    }

    fn list(&self) -> Result<Vec<ContentDocument<T>>, RepositoryError> {
        self.documents.all()
    }
}
