//! Brand reference documents.
//!
//! Each catalog brand may name a reference file (e.g. `Shingrix.pdf`),
//! resolved against `server.assets_dir`. Extracted text is cached per brand
//! after the first read. A file that is missing or unreadable is logged once
//! and treated as "no reference" so the turn still goes through.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;

use salescall_types::chat::ReferenceDocument;
use salescall_types::selection::OptionCatalog;

use crate::document::FileDocumentReader;

pub struct BrandReferenceLoader {
    assets_dir: PathBuf,
    reader: FileDocumentReader,
    cache: DashMap<String, Option<Arc<ReferenceDocument>>>,
}

impl BrandReferenceLoader {
    pub fn new(assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            assets_dir: assets_dir.into(),
            reader: FileDocumentReader::new(),
            cache: DashMap::new(),
        }
    }

    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    /// Reference document for `brand`, if the catalog names one and it reads.
    pub async fn load(&self, catalog: &OptionCatalog, brand: &str) -> Option<Arc<ReferenceDocument>> {
        if let Some(cached) = self.cache.get(brand) {
            return cached.value().clone();
        }

        let file = catalog.brand(brand)?.reference_document.clone()?;
        let path = self.assets_dir.join(&file);
        let reader = self.reader;

        let result = tokio::task::spawn_blocking(move || reader.read_path(&path)).await;
        let doc = match result {
            Ok(Ok(doc)) => {
                tracing::info!(brand, file = %file, chars = doc.text.chars().count(), "brand reference loaded");
                Some(Arc::new(doc))
            }
            Ok(Err(err)) => {
                tracing::warn!(brand, file = %file, error = %err, "brand reference unavailable");
                None
            }
            Err(err) => {
                tracing::warn!(brand, file = %file, error = %err, "brand reference task failed");
                None
            }
        };

        self.cache.insert(brand.to_string(), doc.clone());
        doc
    }
}
