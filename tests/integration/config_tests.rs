//! Configuration integration tests
//!
//! YAML files, environment overrides and validation through `Config`.

#[cfg(test)]
mod tests {
    use litellm_user_import::{Config, ImportError};
    use std::collections::HashMap;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[tokio::test]
    async fn test_file_then_env_precedence() {
        let file = write_config(
            r#"
proxy:
  base_url: "http://file-proxy:4000"
  api_key: "sk-file"
submission:
  concurrency: 2
  timeout: 20
"#,
        );

        let mut config = Config::from_file(file.path()).await.unwrap();
        config
            .apply_env_from(env(&[
                ("LITELLM_API_KEY", "sk-env"),
                ("USER_IMPORT_CONCURRENCY", "8"),
            ]))
            .unwrap();
        config.validate().unwrap();

        assert_eq!(config.proxy.base_url, "http://file-proxy:4000");
        assert_eq!(config.proxy.api_key.as_deref(), Some("sk-env"));
        assert_eq!(config.proxy.user_new_url(), "http://file-proxy:4000/user/new");

        let submission = config.submission.to_submission_config();
        assert_eq!(submission.concurrency, 8);
        assert_eq!(submission.timeout, Duration::from_secs(20));
    }

    #[tokio::test]
    async fn test_later_layers_can_repair_file_values() {
        let file = write_config("submission:\n  concurrency: 0\n");

        let mut config = Config::read_file(file.path()).await.unwrap();
        config
            .apply_env_from(env(&[("USER_IMPORT_CONCURRENCY", "2")]))
            .unwrap();
        config.validate().unwrap();
        assert_eq!(config.submission.concurrency, 2);

        // Flags come last and are validated together with everything else
        let mut config = Config::read_file(file.path()).await.unwrap();
        config.submission.concurrency = 3;
        assert!(config.validate().is_ok());
    }

    #[tokio::test]
    async fn test_non_http_base_url_rejected() {
        let file = write_config("proxy:\n  base_url: \"ftp://proxy:21\"\n");
        let err = Config::from_file(file.path()).await.unwrap_err();
        assert!(matches!(err, ImportError::Config(_)));
    }

    #[tokio::test]
    async fn test_zero_timeout_rejected() {
        let file = write_config("submission:\n  timeout: 0\n");
        let err = Config::from_file(file.path()).await.unwrap_err();
        assert!(matches!(err, ImportError::Config(msg) if msg.contains("timeout")));
    }

    #[test]
    fn test_env_zero_concurrency_fails_validation() {
        let mut config = Config::default();
        config
            .apply_env_from(env(&[("USER_IMPORT_CONCURRENCY", "0")]))
            .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_delimiter() {
        let mut config = Config::default();
        config
            .apply_env_from(env(&[("USER_IMPORT_DELIMITER", ";")]))
            .unwrap();
        assert_eq!(config.input.delimiter, ';');

        let err = config
            .apply_env_from(env(&[("USER_IMPORT_DELIMITER", ";;")]))
            .unwrap_err();
        assert!(matches!(err, ImportError::Config(_)));
    }
}
