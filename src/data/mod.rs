pub mod app_settings;
pub mod persistence;
pub mod selection;

pub use app_settings::AppSettings;
pub use persistence::Persistable;
pub use selection::{Meridiem, Selection};
