mod setting;

pub use setting::{ServerSetting, SessionSetting, Settings, SettingsError};
