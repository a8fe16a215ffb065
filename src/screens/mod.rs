pub mod about;
pub mod error;
pub mod game_over;
pub mod loading;
pub mod menu;
pub mod play;
