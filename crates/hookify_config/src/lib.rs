// --- File: crates/hookify_config/src/lib.rs ---

use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use serde_json::Value;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub mod models;
pub use models::*;

/// Loads the application configuration.
///
/// Sources are layered in order: `config/default`, `config/{RUN_ENV}` (both
/// optional, any format the `config` crate understands), then environment
/// variables with the `PREFIX` prefix (default `HKF`) and `__` as the
/// section separator. `secret_from_env` markers in the resulting config are
/// substituted from plain env vars afterwards.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env::var("PREFIX").unwrap_or_else(|_| "HKF".to_string());

    let manifest_dir =
        PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string()));
    // Member crates live two levels below the workspace root; walk up until
    // the config directory shows up so the loader works from any of them.
    let workspace_root = manifest_dir
        .ancestors()
        .find(|p| p.join("config").is_dir())
        .map(Path::to_path_buf)
        .unwrap_or(manifest_dir);

    let default_path = workspace_root.join("config/default");
    let env_path = workspace_root.join(format!("config/{}", run_env));

    debug!("config: default_path: {}", default_path.display());
    debug!("config: env_path: {}", env_path.display());

    let builder = Config::builder()
        .add_source(File::with_name(default_path.to_str().unwrap_or("config/default")).required(false))
        .add_source(File::with_name(env_path.to_str().unwrap_or("config/debug")).required(false))
        .add_source(Environment::with_prefix(&prefix).separator("__"));

    let raw_config: AppConfig = builder.build()?.try_deserialize()?;
    Ok(apply_env_overrides_from_marker(raw_config))
}

/// Recursively replaces all "secret_from_env" string values with environment variable values
fn inject_env_secrets(value: &mut Value) {
    fn walk(path: Vec<String>, obj: &mut Value) {
        match obj {
            Value::Object(map) => {
                for (k, v) in map.iter_mut() {
                    let mut new_path = path.clone();
                    new_path.push(k.to_string());
                    walk(new_path, v);
                }
            }
            Value::String(s) if s == "secret_from_env" => {
                let env_key = path.join("_").to_uppercase();
                if let Ok(env_val) = std::env::var(&env_key) {
                    *obj = Value::String(env_val);
                } else {
                    warn!("env var {} not found for secret_from_env", env_key);
                }
            }
            _ => {}
        }
    }

    walk(vec![], value);
}

/// Applies environment overrides based on "secret_from_env" markers in serialized config
pub fn apply_env_overrides_from_marker(config: AppConfig) -> AppConfig {
    let mut json = serde_json::to_value(&config).expect("AppConfig must be serializable");
    inject_env_secrets(&mut json);
    serde_json::from_value(json).expect("AppConfig must remain deserializable")
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The file is loaded at most once per process. `DOTENV_OVERRIDE` or a
/// leading `.env*` command line argument select an alternative file;
/// otherwise `.env` is used.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = std::env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config(shared_secret: Option<String>) -> AppConfig {
        AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8086,
            },
            use_webhooks: true,
            webhook: Some(WebhookConfig {
                shared_secret,
                default_secret: None,
            }),
        }
    }

    #[test]
    fn marker_is_replaced_from_env() {
        std::env::set_var("WEBHOOK_SHARED_SECRET", "hunter2");
        let config = sample_config(Some("secret_from_env".to_string()));

        let resolved = apply_env_overrides_from_marker(config);

        assert_eq!(
            resolved.webhook.unwrap().shared_secret.as_deref(),
            Some("hunter2")
        );
    }

    #[test]
    fn plain_values_are_left_alone() {
        let config = sample_config(Some("already-set".to_string()));

        let resolved = apply_env_overrides_from_marker(config);

        assert_eq!(
            resolved.webhook.unwrap().shared_secret.as_deref(),
            Some("already-set")
        );
    }

    #[test]
    fn missing_env_var_keeps_the_marker() {
        std::env::remove_var("WEBHOOK_DEFAULT_SECRET");
        let mut config = sample_config(None);
        config.webhook = Some(WebhookConfig {
            shared_secret: None,
            default_secret: Some("secret_from_env".to_string()),
        });

        let resolved = apply_env_overrides_from_marker(config);

        assert_eq!(
            resolved.webhook.unwrap().default_secret.as_deref(),
            Some("secret_from_env")
        );
    }
}
