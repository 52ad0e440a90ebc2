use crate::error::{Result, StoreError};
use crate::traits::{DocumentStore, ListOptions, ObjectInfo, UploadOptions};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// In-memory [`DocumentStore`] with the same overwrite semantics as the
/// Supabase implementation. Backs tests and local development.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    objects: BTreeMap<(String, String), StoredObject>,
    next_seq: u64,
}

struct StoredObject {
    body: Vec<u8>,
    created_at: DateTime<Utc>,
    seq: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn download(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        let inner = self.inner.lock().expect("memory store lock poisoned");
        inner
            .objects
            .get(&(bucket.to_string(), key.to_string()))
            .map(|o| o.body.clone())
            .ok_or_else(|| StoreError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })
    }

    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        options: UploadOptions,
    ) -> Result<()> {
        let mut inner = self.inner.lock().expect("memory store lock poisoned");
        let id = (bucket.to_string(), key.to_string());
        if !options.overwrite && inner.objects.contains_key(&id) {
            return Err(StoreError::Conflict {
                bucket: bucket.to_string(),
                key: key.to_string(),
            });
        }
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.objects.insert(
            id,
            StoredObject {
                body,
                created_at: Utc::now(),
                seq,
            },
        );
        Ok(())
    }

    async fn list(
        &self,
        bucket: &str,
        prefix: &str,
        options: ListOptions,
    ) -> Result<Vec<ObjectInfo>> {
        let inner = self.inner.lock().expect("memory store lock poisoned");
        let mut entries: Vec<(u64, ObjectInfo)> = inner
            .objects
            .iter()
            .filter(|((b, k), _)| b == bucket && k.starts_with(prefix))
            .map(|((_, k), o)| {
                (
                    o.seq,
                    ObjectInfo {
                        name: k.clone(),
                        created_at: Some(o.created_at),
                    },
                )
            })
            .collect();

        // Insertion sequence breaks created_at ties deterministically.
        entries.sort_by_key(|(seq, _)| *seq);
        if options.newest_first {
            entries.reverse();
        }

        let mut out: Vec<ObjectInfo> = entries.into_iter().map(|(_, info)| info).collect();
        if let Some(limit) = options.limit {
            out.truncate(limit);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(bytes: &[u8]) -> String {
        String::from_utf8(bytes.to_vec()).expect("utf-8")
    }

    #[tokio::test]
    async fn upsert_overwrites_existing_object() {
        let store = MemoryStore::new();
        store
            .upload("kb", "p/kb.md", b"v1".to_vec(), UploadOptions::upsert("text/markdown"))
            .await
            .expect("first write");
        store
            .upload("kb", "p/kb.md", b"v2".to_vec(), UploadOptions::upsert("text/markdown"))
            .await
            .expect("second write");
        let body = store.download("kb", "p/kb.md").await.expect("download");
        assert_eq!(text(&body), "v2");
    }

    #[tokio::test]
    async fn create_only_write_fails_on_collision() {
        let store = MemoryStore::new();
        let options = UploadOptions::create_only("application/json");
        store
            .upload("change-log", "a.json", b"{}".to_vec(), options.clone())
            .await
            .expect("first write");
        let err = store
            .upload("change-log", "a.json", b"{}".to_vec(), options)
            .await
            .expect_err("collision must fail");
        assert!(matches!(err, StoreError::Conflict { .. }));
    }

    #[tokio::test]
    async fn download_missing_object_is_not_found() {
        let store = MemoryStore::new();
        let err = store.download("kb", "nope.md").await.expect_err("missing");
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn list_filters_by_prefix_and_sorts_newest_first() {
        let store = MemoryStore::new();
        for name in ["log/a.json", "log/b.json", "other/c.json"] {
            store
                .upload("bucket", name, b"{}".to_vec(), UploadOptions::create_only("application/json"))
                .await
                .expect("write");
        }

        let listed = store
            .list(
                "bucket",
                "log/",
                ListOptions {
                    limit: Some(10),
                    newest_first: true,
                },
            )
            .await
            .expect("list");
        let names: Vec<&str> = listed.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["log/b.json", "log/a.json"]);
    }

    #[tokio::test]
    async fn list_applies_limit() {
        let store = MemoryStore::new();
        for i in 0..5 {
            store
                .upload(
                    "bucket",
                    &format!("{i}.json"),
                    b"{}".to_vec(),
                    UploadOptions::create_only("application/json"),
                )
                .await
                .expect("write");
        }
        let listed = store
            .list(
                "bucket",
                "",
                ListOptions {
                    limit: Some(2),
                    newest_first: true,
                },
            )
            .await
            .expect("list");
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name, "4.json");
    }
}
