pub mod load;
pub mod types;

pub use load::{apply_overrides, get_data_dir, load_default, load_from_path};
pub use types::{
    AppConfig, DesktopProviderConfig, LocalProviderConfig, LoggingConfig, ProviderConfig,
    RemoteProviderConfig, SaveFormat, UiConfig,
};
