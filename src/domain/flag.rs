/// A flag understood by the crop CLI.
///
/// Declaration order matches the order flags are appended to an argument list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Flag {
    Config,
    Version,
    Description,
}

impl Flag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Flag::Config => "--config",
            Flag::Version => "--version",
            Flag::Description => "--description",
        }
    }
}

impl PartialEq<str> for Flag {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Flag {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl std::fmt::Display for Flag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
