use std::env;

/// Decides whether missing configuration values are fatal or fall back to development defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    #[must_use]
    pub fn from_env_var() -> Self {
        match env::var("ENV") {
            Ok(val) => Self::parse(&val),
            Err(_) => Environment::Development,
        }
    }

    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_values() {
        assert_eq!(Environment::parse("PROD"), Environment::Production);
        assert_eq!(Environment::parse("production"), Environment::Production);
        assert_eq!(Environment::parse("dev"), Environment::Development);
        assert_eq!(Environment::parse("staging"), Environment::Development);
    }
}
