use std::collections::HashMap;
use std::sync::Arc;
use tvl_data::Database;
use tvl_domain::entities::Token;
use tvl_domain::value_objects::AssetId;

/// Shared application state: the database handle and the token registry.
/// Token metadata is injected at construction; this crate never loads it.
#[derive(Clone)]
pub struct AppState {
    db: Database,
    tokens: Arc<HashMap<AssetId, Token>>,
}

impl AppState {
    pub fn new(db: Database, tokens: impl IntoIterator<Item = Token>) -> Self {
        let tokens = tokens
            .into_iter()
            .map(|token| (token.asset_id.clone(), token))
            .collect();
        Self {
            db,
            tokens: Arc::new(tokens),
        }
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn token(&self, asset_id: &AssetId) -> Option<&Token> {
        self.tokens.get(asset_id)
    }
}
