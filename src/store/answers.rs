//! `AnswerStore` — the single process-wide holder of the collected profile,
//! with synchronous write-through to durable storage.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::profile::{Answer, Profile};
use crate::script::QuestionDef;
use crate::store::traits::{Storage, keys};

/// Holds the growing profile and persists it after every accepted answer.
///
/// Storage failures degrade to in-memory-only operation: they are logged
/// and never surfaced to the caller.
#[derive(Clone)]
pub struct AnswerStore {
    storage: Arc<dyn Storage>,
    profile: Arc<RwLock<Profile>>,
}

impl AnswerStore {
    /// Load the persisted profile, or start empty on first visit.
    ///
    /// Malformed persisted JSON is treated as absent.
    pub async fn load(storage: Arc<dyn Storage>) -> Self {
        let profile = match storage.get(keys::PROFILE).await {
            Ok(Some(value)) => match serde_json::from_value::<Profile>(value) {
                Ok(profile) => profile,
                Err(e) => {
                    tracing::warn!("Discarding corrupt persisted profile: {}", e);
                    Profile::default()
                }
            },
            Ok(None) => Profile::default(),
            Err(e) => {
                tracing::warn!("Storage unavailable, starting with empty profile: {}", e);
                Profile::default()
            }
        };

        Self {
            storage,
            profile: Arc::new(RwLock::new(profile)),
        }
    }

    /// A snapshot of the current profile.
    pub async fn profile(&self) -> Profile {
        self.profile.read().await.clone()
    }

    /// Record one accepted answer and write the profile through to storage
    /// before returning. Returns `false` if the answer's field was already
    /// set (the profile is left untouched and nothing is persisted).
    pub async fn record(&self, question: &QuestionDef, answer: Answer) -> bool {
        let applied = {
            let mut profile = self.profile.write().await;
            profile.apply(answer, question.id, question.prompt)
        };
        if applied {
            self.persist().await;
        }
        applied
    }

    /// Mark the dialogue complete and persist.
    pub async fn mark_complete(&self) {
        self.profile.write().await.mark_complete();
        self.persist().await;
    }

    async fn persist(&self) {
        let profile = self.profile.read().await;
        let value = match serde_json::to_value(&*profile) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Failed to serialize profile: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.put(keys::PROFILE, &value).await {
            tracing::warn!("Failed to persist profile: {}", e);
        }
    }
}
