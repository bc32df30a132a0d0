//! Runtime settings.
//!
//! Values are layered: built-in defaults, then an optional `trivia.toml` in the
//! working directory, then `TRIVIA_*` environment variables (`__` separates
//! nested keys, e.g. `TRIVIA_APPLICATION__PORT=8000`).

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use serde_aux::field_attributes::{
    deserialize_number_from_string, deserialize_option_number_from_string,
};

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub quiz: QuizSettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

#[derive(Deserialize, Clone, Debug)]
pub struct DatabaseSettings {
    pub path: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_connections: u32,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct QuizSettings {
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub seed: Option<u64>,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseSettings {
    pub fn in_memory() -> Self {
        Self {
            path: crate::db::IN_MEMORY.to_owned(),
            max_connections: 1,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::defaults()?
            .add_source(File::with_name("trivia").required(false))
            .add_source(Self::environment())
            .build()?
            .try_deserialize()
    }

    fn environment() -> Environment {
        Environment::with_prefix("TRIVIA")
            .prefix_separator("_")
            .separator("__")
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("application.host", "0.0.0.0")?
            .set_default("application.port", 5000)?
            .set_default("database.path", "trivia.db")?
            .set_default("database.max_connections", 5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn settings_from(toml: &str) -> Settings {
        Settings::defaults()
            .unwrap()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn defaults_apply_without_sources() {
        let settings = settings_from("");
        assert_eq!(settings.application.address(), "0.0.0.0:5000");
        assert_eq!(settings.database.path, "trivia.db");
        assert_eq!(settings.database.max_connections, 5);
        assert_eq!(settings.quiz.seed, None);
    }

    #[test]
    fn file_overrides_defaults() {
        let settings = settings_from(
            r#"
            [application]
            host = "127.0.0.1"
            port = "8080"

            [database]
            path = ":memory:"

            [quiz]
            seed = 42
            "#,
        );
        assert_eq!(settings.application.address(), "127.0.0.1:8080");
        assert_eq!(settings.database.path, ":memory:");
        assert_eq!(settings.database.max_connections, 5);
        assert_eq!(settings.quiz.seed, Some(42));
    }

    fn settings_from_env(toml: &str, vars: &[(&str, &str)]) -> Settings {
        let vars: config::Map<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Settings::defaults()
            .unwrap()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .add_source(Settings::environment().source(Some(vars)))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn environment_overrides_file() {
        let settings = settings_from_env(
            r#"
            [application]
            port = 8080

            [quiz]
            seed = 1
            "#,
            &[
                ("TRIVIA_APPLICATION__PORT", "9000"),
                ("TRIVIA_DATABASE__PATH", "/tmp/trivia.db"),
                ("TRIVIA_DATABASE__MAX_CONNECTIONS", "2"),
                ("TRIVIA_QUIZ__SEED", "42"),
            ],
        );
        assert_eq!(settings.application.address(), "0.0.0.0:9000");
        assert_eq!(settings.database.path, "/tmp/trivia.db");
        assert_eq!(settings.database.max_connections, 2);
        assert_eq!(settings.quiz.seed, Some(42));
    }

    #[test]
    fn unprefixed_variables_are_ignored() {
        let settings = settings_from_env(
            "",
            &[("APPLICATION__PORT", "9000"), ("DATABASE_PATH", "other.db")],
        );
        assert_eq!(settings.application.port, 5000);
        assert_eq!(settings.database.path, "trivia.db");
    }
}
