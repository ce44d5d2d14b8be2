pub mod award_histories;
pub mod award_lists;
pub mod draw_histories;
pub mod prizes;
pub mod roulette_configs;

pub use award_histories as award_history_entity;
pub use award_lists as award_list_entity;
pub use draw_histories as draw_history_entity;
pub use prizes as prize_entity;
pub use roulette_configs as roulette_config_entity;
