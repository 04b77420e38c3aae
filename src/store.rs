use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::error::{Error, Result};
use crate::{Platform, ViralContent};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreData {
    #[serde(default)]
    pub contents: Vec<ViralContent>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

pub struct ContentStore {
    path: PathBuf,
    data: Mutex<StoreData>,
}

impl ContentStore {
    pub async fn load(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let raw = tokio::fs::read_to_string(&path)
                .await
                .map_err(|err| Error::io(&path, err))?;
            if raw.trim().is_empty() {
                StoreData::default()
            } else {
                serde_json::from_str(&raw)
                    .map_err(|err| Error::json(format!("content store {}", path.display()), err))?
            }
        } else {
            StoreData::default()
        };

        tracing::debug!(
            path = %path.display(),
            count = data.contents.len(),
            "content store loaded"
        );

        Ok(Self {
            path,
            data: Mutex::new(data),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn all(&self) -> Vec<ViralContent> {
        let guard = self.data.lock().await;
        guard.contents.clone()
    }

    pub async fn len(&self) -> usize {
        self.data.lock().await.contents.len()
    }

    pub async fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.data.lock().await.last_updated
    }

    pub async fn get(&self, content_id: &str) -> Option<ViralContent> {
        let guard = self.data.lock().await;
        guard
            .contents
            .iter()
            .find(|content| content.id == content_id)
            .cloned()
    }

    pub async fn by_platform(&self, platform: Platform) -> Vec<ViralContent> {
        let guard = self.data.lock().await;
        guard
            .contents
            .iter()
            .filter(|content| content.platform == platform)
            .cloned()
            .collect()
    }

    pub async fn search(&self, query: &str) -> Vec<ViralContent> {
        let needle = query.to_lowercase();
        let guard = self.data.lock().await;
        guard
            .contents
            .iter()
            .filter(|content| {
                content.title.to_lowercase().contains(&needle)
                    || content.content_text.to_lowercase().contains(&needle)
                    || content
                        .tags
                        .iter()
                        .any(|tag| tag.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect()
    }

    pub async fn top(&self, limit: usize) -> Vec<ViralContent> {
        let mut contents = self.all().await;
        sort_by_score(&mut contents);
        contents.truncate(limit);
        contents
    }

    pub async fn merge(&self, incoming: Vec<ViralContent>) -> Result<usize> {
        let mut guard = self.data.lock().await;
        let mut next = guard.clone();
        let mut seen: HashSet<String> = next
            .contents
            .iter()
            .map(|content| content.url.clone())
            .collect();

        let before = next.contents.len();
        for content in incoming {
            if seen.insert(content.url.clone()) {
                next.contents.push(content);
            }
        }
        let added = next.contents.len() - before;

        sort_by_score(&mut next.contents);
        next.last_updated = Some(Utc::now());
        self.persist(&next).await?;

        *guard = next;
        tracing::info!(added, total = guard.contents.len(), "content store merged");
        Ok(added)
    }

    async fn persist(&self, data: &StoreData) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent).await?;
        }
        let payload = serde_json::to_string_pretty(data)
            .map_err(|err| Error::json("content store", err))?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, payload)
            .await
            .map_err(|err| Error::io(&tmp_path, err))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|err| Error::io(&self.path, err))?;
        Ok(())
    }
}

pub fn sort_by_score(contents: &mut [ViralContent]) {
    contents.sort_by(|a, b| {
        b.viral_score
            .partial_cmp(&a.viral_score)
            .unwrap_or(Ordering::Equal)
    });
}

async fn ensure_dir(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() || path.exists() {
        return Ok(());
    }
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|err| Error::io(path, err))
}
