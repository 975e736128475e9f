pub mod parse;
pub mod records;
pub mod store;
pub mod validate;

pub use records::{ConsumptionRecord, PurchaseRecord};
pub use store::{HistorySnapshot, append_consumption, append_purchase, load_history};
