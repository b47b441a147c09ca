use actix_cors::Cors;
use actix_web::http::Uri;
use clap::Parser;

use crate::error::ConfigError;

pub const ANY_ORIGIN: &str = "*";

#[derive(Debug, Clone, Parser)]
#[command(name = "mri-backend", about = "Upload endpoint that returns an MRI verdict")]
pub struct Config {
    /// Address the HTTP server listens on.
    #[arg(long, env = "MRI_BIND", default_value = "127.0.0.1:8000")]
    pub bind: String,

    /// Origins allowed by CORS. `*` allows any origin.
    #[arg(
        long = "allowed-origin",
        env = "MRI_ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = ANY_ORIGIN
    )]
    pub allowed_origins: Vec<String>,

    /// Seed for the confidence generator. Unseeded when absent.
    #[arg(long, env = "MRI_SEED")]
    pub seed: Option<u64>,

    /// tracing filter directive.
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_filter: String,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.allowed_origins.is_empty() {
            return Err(ConfigError::NoOrigins);
        }
        for origin in self.allowed_origins.iter().filter(|o| o.as_str() != ANY_ORIGIN) {
            let invalid = |reason: &str| ConfigError::InvalidOrigin {
                origin: origin.clone(),
                reason: reason.to_string(),
            };
            let uri: Uri = origin.parse().map_err(|_| invalid("not a URI"))?;
            let scheme = match uri.scheme_str() {
                Some(scheme @ ("http" | "https")) => scheme,
                _ => return Err(invalid("scheme must be http or https")),
            };
            let authority = uri.authority().ok_or_else(|| invalid("missing host"))?;
            // Browsers send `Origin` as scheme://host[:port] only.
            if origin.as_str() != format!("{}://{}", scheme, authority) {
                return Err(invalid("must not carry a path, query or fragment"));
            }
        }
        Ok(())
    }

    pub fn is_permissive(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == ANY_ORIGIN)
    }

    /// Any method and header, credentials allowed; origins as configured.
    pub fn cors(&self) -> Cors {
        let cors = Cors::default()
            .allow_any_method()
            .allow_any_header()
            .supports_credentials();

        if self.is_permissive() {
            return cors.allow_any_origin();
        }
        self.allowed_origins
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin))
    }
}

#[cfg(test)]
impl Config {
    pub(crate) fn with_origins(origins: &[&str]) -> Config {
        Config {
            bind: "127.0.0.1:0".to_string(),
            allowed_origins: origins.iter().map(|o| o.to_string()).collect(),
            seed: None,
            log_filter: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn default_of(id: &str) -> Vec<String> {
        let command = Config::command();
        let arg = command
            .get_arguments()
            .find(|a| a.get_id() == id)
            .unwrap();
        arg.get_default_values()
            .iter()
            .map(|v| v.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn defaults_are_permissive() {
        assert_eq!(default_of("allowed_origins"), vec![ANY_ORIGIN.to_string()]);
        assert_eq!(default_of("bind"), vec!["127.0.0.1:8000".to_string()]);
        assert!(default_of("seed").is_empty());

        let config = Config::with_origins(&[ANY_ORIGIN]);
        assert!(config.is_permissive());
        config.validate().unwrap();
    }

    #[test]
    fn origins_split_on_commas() {
        // Explicit flags take precedence over MRI_* variables.
        let config = Config::try_parse_from([
            "mri-backend",
            "--allowed-origin",
            "http://localhost:5173,https://mri.example.com",
            "--seed",
            "9",
        ])
        .unwrap();
        assert_eq!(
            config.allowed_origins,
            vec!["http://localhost:5173", "https://mri.example.com"]
        );
        assert!(!config.is_permissive());
        assert_eq!(config.seed, Some(9));
        config.validate().unwrap();
    }

    #[test]
    fn rejects_origin_without_scheme() {
        let err = Config::with_origins(&["mri.example.com"]).validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOrigin { ref origin, .. } if origin == "mri.example.com"));
    }

    #[test]
    fn rejects_origin_with_path() {
        for origin in [
            "http://localhost:5173/",
            "https://mri.example.com/upload",
            "https://mri.example.com?x=1",
        ] {
            let err = Config::with_origins(&[origin]).validate().unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidOrigin { origin: ref o, .. } if o == origin),
                "{origin}"
            );
        }
        Config::with_origins(&["http://localhost:5173", "https://mri.example.com:8443"])
            .validate()
            .unwrap();
    }

    #[test]
    fn empty_origin_list_is_rejected() {
        let err = Config::with_origins(&[]).validate().unwrap_err();
        assert!(matches!(err, ConfigError::NoOrigins));
    }
}
