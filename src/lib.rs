pub mod app;
pub mod badges;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod heatmap;
pub mod models;
pub mod state;
pub mod storage;
pub mod streak;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::{load_data, resolve_data_path};
