pub mod input;
pub mod output;

pub use input::HookInput;
pub use output::{ErrorReport, HookOutput, Status};
