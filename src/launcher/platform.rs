/// Platform detection
///
/// Maps the running OS onto one of the launch variants.

use std::env;

/// Operating systems launchpad knows how to open terminals on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Linux,
    Windows,
    /// Anything else, carrying the OS name for error messages
    Other(String),
}

impl Platform {
    /// The platform this binary is running on
    pub fn current() -> Self {
        Self::from_os(env::consts::OS)
    }

    /// Map an OS name as reported by `std::env::consts::OS`
    pub fn from_os(os: &str) -> Self {
        match os {
            "macos" => Platform::MacOs,
            "linux" => Platform::Linux,
            "windows" => Platform::Windows,
            other => Platform::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Platform::MacOs => "macos",
            Platform::Linux => "linux",
            Platform::Windows => "windows",
            Platform::Other(os) => os,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Platform::Other(_))
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_os() {
        assert_eq!(Platform::from_os("macos"), Platform::MacOs);
        assert_eq!(Platform::from_os("linux"), Platform::Linux);
        assert_eq!(Platform::from_os("windows"), Platform::Windows);
        assert_eq!(
            Platform::from_os("haiku"),
            Platform::Other("haiku".to_string())
        );
    }

    #[test]
    fn test_display_and_support() {
        assert_eq!(Platform::Linux.to_string(), "linux");
        assert_eq!(Platform::Other("plan9".to_string()).to_string(), "plan9");
        assert!(Platform::Windows.is_supported());
        assert!(!Platform::Other("plan9".to_string()).is_supported());
    }

    #[test]
    fn test_current_is_consistent() {
        assert_eq!(Platform::current().name(), env::consts::OS);
    }
}
