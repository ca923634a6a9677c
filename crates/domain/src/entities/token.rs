use crate::value_objects::ids::{AssetId, ChainId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub asset_id: AssetId,
    pub symbol: String,
    pub name: String,
    pub decimals: u32,
    pub chain_id: ChainId,
    pub coingecko_id: Option<String>,
}

impl Token {
    pub fn new(
        asset_id: impl Into<String>,
        symbol: impl Into<String>,
        decimals: u32,
        name: impl Into<String>,
        chain_id: ChainId,
    ) -> Self {
        Self {
            asset_id: AssetId::new(asset_id),
            symbol: symbol.into(),
            name: name.into(),
            decimals,
            chain_id,
            coingecko_id: None,
        }
    }
}
