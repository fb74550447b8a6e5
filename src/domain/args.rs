use super::{Action, Flag, InvocationOptions};

/// Ordered argument list for one crop invocation.
///
/// Always `subcommand [--config V] [--version V] [--description V]`, built
/// fresh for each call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CropArgs(Vec<String>);

impl CropArgs {
    /// Build the argument list for `action`.
    ///
    /// `config` is the already-resolved crop config value from the host tree.
    /// The description is dropped for actions that do not accept one.
    pub fn build(action: Action, config: Option<&str>, options: &InvocationOptions) -> Self {
        let mut args = vec![action.subcommand().to_string()];
        let mut push = |flag: Flag, value: &str| {
            args.push(flag.as_str().to_string());
            args.push(value.to_string());
        };

        if let Some(config) = config {
            push(Flag::Config, config);
        }
        if let Some(version) = options.version() {
            push(Flag::Version, version);
        }
        if action.accepts_description() {
            if let Some(description) = options.description() {
                push(Flag::Description, description);
            }
        }
        CropArgs(args)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Value following `flag`, if the flag is present.
    #[cfg(test)]
    pub fn value_of(&self, flag: Flag) -> Option<&str> {
        self.0
            .iter()
            .position(|a| flag == a.as_str())
            .and_then(|i| self.0.get(i + 1))
            .map(String::as_str)
    }

    /// The full command line as shown in diagnostics: `crop update-product --version 1`.
    pub fn command_line(&self, program: &str) -> String {
        std::iter::once(program)
            .chain(self.0.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
