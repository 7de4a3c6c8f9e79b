pub mod config;
pub mod emblem;
pub mod glitch;
pub mod images;
pub mod menu;
pub mod orchestrator;
pub mod particles;
pub mod quotes;
pub mod rain;
pub mod statics;
pub mod surface;
