use crate::domain::Page;
use async_trait::async_trait;
use thiserror::Error;

pub mod local;

pub use self::local::LocalPageStore;

// page persistence, shared by every request handler
// the filesystem implementation lives in "local.rs"
#[async_trait]
pub trait PageStore: Send + Sync {
    async fn load(&self, title: &str) -> Result<Page, StoreError>;
    async fn save(&self, page: &Page) -> Result<(), StoreError>;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("page {title} does not exist")]
    NotFound { title: String },

    #[error("unable to access page {title}: {source}")]
    Io {
        title: String,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}
