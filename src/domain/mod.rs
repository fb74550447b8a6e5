pub mod action;
pub mod args;
pub mod config_tree;
pub mod flag;
pub mod options;

pub use action::{Action, UnknownAction};
pub use args::CropArgs;
pub use config_tree::{crop_config_value, ConfigValueError, CROP_CONFIG_PATH};
pub use flag::Flag;
pub use options::InvocationOptions;
