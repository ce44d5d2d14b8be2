pub mod activity;
pub mod auth;
pub mod common;
pub mod draw;
pub mod pagination;
pub mod roulette;

pub use activity::*;
pub use auth::*;
pub use common::*;
pub use draw::*;
pub use pagination::*;
pub use roulette::*;
