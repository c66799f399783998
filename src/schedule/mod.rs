pub mod types;
pub mod scoring;
pub mod dispatch;

pub use types::DispatchResult;
pub use dispatch::schedule_orders;
