pub mod activity;
pub mod admin;
pub mod auth;
pub mod draw;
pub mod wheel;

pub use activity::activity_config;
pub use admin::admin_config;
pub use auth::auth_config;
pub use draw::draw_config;
pub use wheel::wheel_config;
