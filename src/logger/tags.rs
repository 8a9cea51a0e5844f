/// Log tags identify the subsystem a message comes from.
///
/// Each tag maps to a `--debug-<key>` command-line flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTag {
    System,
    Config,
    Telegram,
    Api,
    Prices,
    Pools,
    Chain,
    Other(String),
}

impl LogTag {
    /// Key used by `--debug-<key>` flags
    pub fn to_debug_key(&self) -> String {
        match self {
            LogTag::System => "system".to_string(),
            LogTag::Config => "config".to_string(),
            LogTag::Telegram => "telegram".to_string(),
            LogTag::Api => "api".to_string(),
            LogTag::Prices => "prices".to_string(),
            LogTag::Pools => "pools".to_string(),
            LogTag::Chain => "chain".to_string(),
            LogTag::Other(s) => s.to_lowercase(),
        }
    }

    /// Uncolored label used in log files
    pub fn to_plain_string(&self) -> String {
        match self {
            LogTag::Other(s) => s.to_uppercase(),
            other => other.to_debug_key().to_uppercase(),
        }
    }

    /// All tags that have a dedicated debug flag
    pub fn all() -> Vec<LogTag> {
        vec![
            LogTag::System,
            LogTag::Config,
            LogTag::Telegram,
            LogTag::Api,
            LogTag::Prices,
            LogTag::Pools,
            LogTag::Chain,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_keys() {
        assert_eq!(LogTag::Telegram.to_debug_key(), "telegram");
        assert_eq!(LogTag::Other("Misc".to_string()).to_debug_key(), "misc");
        assert_eq!(LogTag::Chain.to_plain_string(), "CHAIN");
    }
}
