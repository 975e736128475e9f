pub mod common;
pub mod forecast;
pub mod history;
pub mod record;
pub mod totals;
