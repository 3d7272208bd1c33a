//! Container records and application settings.

pub mod blobs;
pub mod env_vars;
pub mod fields;
pub mod kv;
pub mod loader;
pub mod settings;
pub mod types;

pub use blobs::{DxWrapperConfig, ExposedExtensions, GraphicsDriverConfig};
pub use env_vars::{known_env_var, EnvVarKind, EnvVars, KnownEnvVar, KNOWN_ENV_VARS};
pub use fields::{
    win_component_title, ButtonBindings, CpuList, DriveMapping, Drives, WinComponents,
    BINDING_VALUES, CONTROLLER_BUTTONS,
};
pub use kv::KeyValueSet;
pub use loader::ConfigError;
pub use settings::{AppSettings, DriverSettings, GpuSettings, HostSettings, LoggingSettings};
pub use types::{ContainerConfig, DINPUT_MAPPER_STANDARD, DINPUT_MAPPER_XINPUT};
