pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
pub mod store;
pub mod utils;
