mod loader;
mod model;
mod program;
mod validation;

pub use loader::{CONFIG_FILE_NAME, ConfigLoader, FileConfigLoader, FileSystem, RealFileSystem};
pub use model::{CheckConfig, Config, RunConfig};
pub use program::build_program;
pub use validation::validate_config;
