pub mod display_value;
pub mod ids;
pub mod timestamp;

pub use display_value::{USD_DECIMALS, as_display_number};
pub use ids::{AssetId, ChainId};
pub use timestamp::UnixTime;
