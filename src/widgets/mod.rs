//! Shaping of widget payloads: the markets and transaction tables, the heatmap and
//! the price ticker's number formatting.

pub mod heatmap;
pub mod table;
pub mod ticker;

pub use heatmap::{Heat, HeatTile};
pub use table::{SortKey, SortOrder, TxFilter};
pub use ticker::TickerItem;
