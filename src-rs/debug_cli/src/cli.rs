use std::env;

use crate::models::CLIConfig;

const DEFAULT_URL: &str = "http://localhost:3000";
const DEFAULT_USER: &str = "debug-cli";

pub fn parse_config() -> CLIConfig {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_from(&args, |key| env::var(key).ok())
}

pub fn parse_from<F>(args: &[String], lookup: F) -> CLIConfig
where
    F: Fn(&str) -> Option<String>,
{
    let env_opt = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
    let mut cfg = CLIConfig {
        base_url: env_opt("MICROTIPS_URL").unwrap_or_else(|| DEFAULT_URL.to_string()),
        token: env_opt("MICROTIPS_TOKEN"),
        user_id: env_opt("MICROTIPS_USER").unwrap_or_else(|| DEFAULT_USER.to_string()),
    };

    let mut idx = 0;
    while idx < args.len() {
        let value = args.get(idx + 1);
        match (args[idx].as_str(), value) {
            ("--base", Some(value)) => {
                cfg.base_url = value.clone();
                idx += 1;
            }
            ("--token", Some(value)) => {
                cfg.token = Some(value.clone());
                idx += 1;
            }
            ("--user", Some(value)) => {
                cfg.user_id = value.clone();
                idx += 1;
            }
            _ => {}
        }
        idx += 1;
    }

    cfg
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_without_env_or_flags() {
        let cfg = parse_from(&[], |_| None);
        assert_eq!(cfg.base_url, DEFAULT_URL);
        assert_eq!(cfg.token, None);
        assert_eq!(cfg.user_id, DEFAULT_USER);
    }

    #[test]
    fn flags_override_env() {
        let lookup = |key: &str| match key {
            "MICROTIPS_TOKEN" => Some("from-env".to_string()),
            "MICROTIPS_USER" => Some("env-user".to_string()),
            _ => None,
        };
        let cfg = parse_from(&args(&["--token", "flag", "--base", "http://x:1"]), lookup);
        assert_eq!(cfg.token.as_deref(), Some("flag"));
        assert_eq!(cfg.base_url, "http://x:1");
        assert_eq!(cfg.user_id, "env-user");
    }

    #[test]
    fn trailing_flag_without_value_is_ignored() {
        let cfg = parse_from(&args(&["--user"]), |_| None);
        assert_eq!(cfg.user_id, DEFAULT_USER);
    }
}
