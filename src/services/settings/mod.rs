// Settings service
// Loads and saves the timeline configuration file

mod service;

pub use service::SettingsService;
