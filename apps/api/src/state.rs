use std::sync::Arc;

use crate::auth::IdentityProvider;
use crate::documents::store::DocumentStore;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Every collaborator is built once in `main` and handed in here.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    /// Saved-CV persistence. Default: PgDocumentStore.
    pub documents: Arc<dyn DocumentStore>,
    /// Bearer-token resolution. Default: SupabaseAuth.
    pub identity: Arc<dyn IdentityProvider>,
}
