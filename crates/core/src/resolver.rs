//! Catalog-backed implementation of [`MovieResolver`].

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::movie::normalize_title;
use crate::ports::{MovieResolver, MovieStore};

/// Resolves names by normalizing the input and looking it up in the
/// movie catalog.
#[derive(Clone)]
pub struct CatalogResolver {
    movies: Arc<dyn MovieStore>,
}

impl CatalogResolver {
    pub fn new(movies: Arc<dyn MovieStore>) -> Self {
        Self { movies }
    }
}

#[async_trait]
impl MovieResolver for CatalogResolver {
    async fn resolve(&self, input: &str) -> Result<Option<String>, StoreError> {
        let Some(title) = normalize_title(input) else {
            return Ok(None);
        };
        self.movies.find_title(&title).await
    }
}
