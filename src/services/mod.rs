pub mod activity_service;
pub mod admin_auth_service;
pub mod draw_service;
pub mod roulette_service;

pub use activity_service::*;
pub use admin_auth_service::*;
pub use draw_service::*;
pub use roulette_service::*;
