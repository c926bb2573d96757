//! Attribution capture — marketing parameters taken from the entry URL once
//! and replayed onto the outbound checkout link.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::store::traits::{Storage, keys};

/// Query parameters worth preserving across the session.
pub const TRACKED_PARAMS: [&str; 8] = [
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_content",
    "utm_term",
    "fbclid",
    "gclid",
    "ttclid",
];

/// The captured attribution blob.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribution {
    #[serde(flatten)]
    params: BTreeMap<String, String>,
}

impl Attribution {
    /// Filter the tracked parameters out of a URL's query string.
    pub fn capture(url: &Url) -> Self {
        let mut params = BTreeMap::new();
        for (key, value) in url.query_pairs() {
            if TRACKED_PARAMS.contains(&key.as_ref()) && !value.is_empty() {
                params.insert(key.into_owned(), value.into_owned());
            }
        }
        Self { params }
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Capture from the entry URL if it carries tracked parameters (and
    /// persist them), otherwise replay whatever a previous visit stored.
    ///
    /// Storage failures degrade to whatever could be captured in-memory.
    pub async fn load_or_capture(storage: &Arc<dyn Storage>, entry_url: Option<&Url>) -> Self {
        if let Some(url) = entry_url {
            let captured = Self::capture(url);
            if !captured.is_empty() {
                match serde_json::to_value(&captured) {
                    Ok(value) => {
                        if let Err(e) = storage.put(keys::ATTRIBUTION, &value).await {
                            tracing::warn!("Failed to persist attribution: {}", e);
                        }
                    }
                    Err(e) => tracing::warn!("Failed to serialize attribution: {}", e),
                }
                return captured;
            }
        }

        match storage.get(keys::ATTRIBUTION).await {
            Ok(Some(value)) => serde_json::from_value(value).unwrap_or_else(|e| {
                tracing::warn!("Discarding corrupt persisted attribution: {}", e);
                Self::default()
            }),
            Ok(None) => Self::default(),
            Err(e) => {
                tracing::warn!("Storage unavailable, no attribution replay: {}", e);
                Self::default()
            }
        }
    }

    /// Set every captured parameter on a URL, replacing same-named ones.
    pub fn apply_to(&self, url: &mut Url) {
        if self.params.is_empty() {
            return;
        }
        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(k, _)| !self.params.contains_key(k.as_ref()))
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (k, v) in &kept {
            pairs.append_pair(k, v);
        }
        for (k, v) in &self.params {
            pairs.append_pair(k, v);
        }
    }
}

/// Build the outbound purchase URL: the configured checkout base with every
/// attribution parameter captured at session start appended.
pub fn build_checkout_url(base: &Url, attribution: &Attribution) -> Url {
    let mut url = base.clone();
    attribution.apply_to(&mut url);
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStorage;

    fn url(raw: &str) -> Url {
        Url::parse(raw).unwrap()
    }

    #[test]
    fn capture_filters_tracked_params() {
        let entry = url("https://example.com/?utm_source=x&fbclid=y&page=2&utm_term=");
        let attribution = Attribution::capture(&entry);
        assert_eq!(attribution.get("utm_source"), Some("x"));
        assert_eq!(attribution.get("fbclid"), Some("y"));
        assert_eq!(attribution.get("page"), None, "untracked params dropped");
        assert_eq!(attribution.get("utm_term"), None, "empty values dropped");
    }

    #[test]
    fn bare_url_captures_nothing() {
        assert!(Attribution::capture(&url("https://example.com/")).is_empty());
    }

    #[test]
    fn checkout_url_carries_attribution() {
        let attribution =
            Attribution::capture(&url("https://example.com/?utm_source=x&fbclid=y"));
        let out = build_checkout_url(&url("https://pay.example.com/checkout?offer=full"), &attribution);
        let query: Vec<(String, String)> = out
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(query.contains(&("offer".to_string(), "full".to_string())));
        assert!(query.contains(&("utm_source".to_string(), "x".to_string())));
        assert!(query.contains(&("fbclid".to_string(), "y".to_string())));
    }

    #[test]
    fn apply_to_replaces_rather_than_duplicates() {
        let attribution = Attribution::capture(&url("https://example.com/?utm_source=new"));
        let mut target = url("https://pay.example.com/?utm_source=old&keep=1");
        attribution.apply_to(&mut target);
        let query: Vec<(String, String)> = target
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            query.iter().filter(|(k, _)| k == "utm_source").count(),
            1
        );
        assert!(query.contains(&("utm_source".to_string(), "new".to_string())));
        assert!(query.contains(&("keep".to_string(), "1".to_string())));
    }

    #[tokio::test]
    async fn replayed_after_navigation_without_query() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());

        // First visit carries parameters.
        let entry = url("https://example.com/?utm_source=x&fbclid=y");
        let first = Attribution::load_or_capture(&storage, Some(&entry)).await;
        assert_eq!(first.get("utm_source"), Some("x"));

        // Client-side navigation to a bare URL: replayed from storage.
        let bare = url("https://example.com/result");
        let replayed = Attribution::load_or_capture(&storage, Some(&bare)).await;
        assert_eq!(replayed, first);

        let out = build_checkout_url(&url("https://pay.example.com/checkout"), &replayed);
        assert!(out.as_str().contains("utm_source=x"));
        assert!(out.as_str().contains("fbclid=y"));
    }

    #[tokio::test]
    async fn first_visit_without_params_is_empty() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let attribution = Attribution::load_or_capture(&storage, None).await;
        assert!(attribution.is_empty());
        let out = build_checkout_url(&url("https://pay.example.com/checkout"), &attribution);
        assert_eq!(out.query(), None);
    }
}
