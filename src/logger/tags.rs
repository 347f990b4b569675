/// Log tags identifying the subsystem a message originates from.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogTag {
    Api,
    Auth,
    Filters,
    Import,
    Session,
    Dashboard,
    Config,
}

impl LogTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogTag::Api => "API",
            LogTag::Auth => "AUTH",
            LogTag::Filters => "FILTERS",
            LogTag::Import => "IMPORT",
            LogTag::Session => "SESSION",
            LogTag::Dashboard => "DASHBOARD",
            LogTag::Config => "CONFIG",
        }
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
