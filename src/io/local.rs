use crate::domain::Page;
use crate::io::{PageStore, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::io::AsyncWriteExt;

pub const PAGE_EXTENSION: &str = "txt";

/// Stores every page as `<root>/<title>.txt`, holding nothing but the page body.
///
/// Titles are expected to be validated before they get here; the store joins them onto the
/// root path as-is.
pub struct LocalPageStore {
    pub root_path: PathBuf,
    save_locks: Option<TitleLocks>,
}

impl LocalPageStore {
    /// `serialize_saves` makes concurrent saves of the same title wait on each other instead of
    /// writing into the same file at once. The last save to finish still wins.
    pub fn new(root_path: impl Into<PathBuf>, serialize_saves: bool) -> Self {
        Self {
            root_path: root_path.into(),
            save_locks: serialize_saves.then(TitleLocks::default),
        }
    }

    pub fn page_path(&self, title: &str) -> PathBuf {
        self.root_path.join(format!("{}.{}", title, PAGE_EXTENSION))
    }
}

#[async_trait]
impl PageStore for LocalPageStore {
    async fn load(&self, title: &str) -> Result<Page, StoreError> {
        let path = self.page_path(title);

        match tokio::fs::read(&path).await {
            Ok(body) => Ok(Page::new(title, body)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StoreError::NotFound {
                title: title.to_string(),
            }),
            Err(e) => Err(StoreError::Io {
                title: title.to_string(),
                source: e,
            }),
        }
    }

    async fn save(&self, page: &Page) -> Result<(), StoreError> {
        let path = self.page_path(&page.title);

        let result = match &self.save_locks {
            Some(locks) => {
                let lock = locks.acquire(&page.title);
                let result = {
                    let _guard = lock.lock().await;
                    write_page_file(&path, &page.body).await
                };
                locks.release(&page.title, lock);
                result
            }
            None => write_page_file(&path, &page.body).await,
        };

        result.map_err(|source| StoreError::Io {
            title: page.title.clone(),
            source,
        })
    }
}

// create or truncate, owner read/write only
async fn write_page_file(path: &Path, body: &[u8]) -> std::io::Result<()> {
    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await?;
    file.write_all(body).await?;
    file.flush().await
}

// one async mutex per title that currently has a save in flight
#[derive(Default)]
struct TitleLocks {
    locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl TitleLocks {
    fn acquire(&self, title: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        locks.entry(title.to_string()).or_default().clone()
    }

    // drop the entry once nobody else holds or waits on it
    fn release(&self, title: &str, lock: Arc<tokio::sync::Mutex<()>>) {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        if Arc::strong_count(&lock) == 2 {
            locks.remove(title);
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.locks.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[cfg(test)]
impl LocalPageStore {
    pub(crate) fn pending_save_locks(&self) -> usize {
        self.save_locks.as_ref().map_or(0, TitleLocks::len)
    }
}
