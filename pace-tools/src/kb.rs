//! Knowledge-base document operations shared by the tool executor and the
//! `/api/kb` HTTP surface.

use pace_store::{DocumentStore, Result, UploadOptions, buckets};

pub fn document_key(process_id: &str) -> String {
    format!("{process_id}/kb.md")
}

pub async fn read(store: &dyn DocumentStore, process_id: &str) -> Result<String> {
    store
        .download_text(buckets::KNOWLEDGE_BASE, &document_key(process_id))
        .await
}

/// Replace the whole document. Last write wins; there is no versioning.
pub async fn replace(store: &dyn DocumentStore, process_id: &str, content: &str) -> Result<()> {
    store
        .upload(
            buckets::KNOWLEDGE_BASE,
            &document_key(process_id),
            content.as_bytes().to_vec(),
            UploadOptions::upsert("text/markdown"),
        )
        .await
}

/// Append to the document, optionally under a new section heading.
/// A missing document is treated as empty, not as an error.
pub async fn append(
    store: &dyn DocumentStore,
    process_id: &str,
    content: &str,
    section: Option<&str>,
) -> Result<()> {
    let existing = match read(store, process_id).await {
        Ok(text) => text,
        Err(e) if e.is_not_found() => String::new(),
        Err(e) => return Err(e),
    };
    let updated = format!("{existing}{}{content}", separator(section));
    replace(store, process_id, &updated).await
}

fn separator(section: Option<&str>) -> String {
    match section {
        Some(heading) => format!("\n\n## {heading}\n\n"),
        None => "\n\n".to_string(),
    }
}
