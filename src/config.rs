/// Environment variables that override config file entries, as `(variable, [table, key])`.
pub const ENV_OVERRIDES: &[(&str, [&str; 2])] = &[
    ("IPFS_GATEWAY_URL", ["gateway", "host"]),
    ("CONTENT_MODERATOR_SUBSCRIPTION_KEY", ["classifier", "subscription_key"]),
    ("CONTENT_MODERATOR_ENDPOINT", ["classifier", "endpoint"]),
    ("LISTEN_ADDR", ["server", "listen"]),
];

fn classifier_type_default() -> String {
    "azure_content_moderator".to_string()
}

fn listen_default() -> std::net::SocketAddr {
    std::net::SocketAddr::from(([0, 0, 0, 0], 8080))
}

#[derive(serde::Deserialize, Debug)]
pub struct GatewayConfig {
    pub host: String,
}

#[derive(serde::Deserialize, Debug)]
pub struct ClassifierConfig {
    #[serde(rename = "type", default = "classifier_type_default")]
    pub typ: String,

    /// Passed to the classifier named by `typ`.
    #[serde(flatten)]
    pub params: toml::Table,
}

#[derive(serde::Deserialize, Debug)]
pub struct ServerConfig {
    #[serde(default = "listen_default")]
    pub listen: std::net::SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { listen: listen_default() }
    }
}

#[derive(serde::Deserialize, Debug)]
pub struct Config {
    pub gateway: GatewayConfig,
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl Config {
    /// Reads `path` (a missing file counts as empty), then applies environment overrides.
    pub fn load(path: &std::path::Path) -> Result<Self, anyhow::Error> {
        let table = match std::fs::read(path) {
            Ok(buf) => toml::from_str::<toml::Table>(std::str::from_utf8(&buf)?)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("config file {} not found, using environment only", path.display());
                toml::Table::new()
            }
            Err(e) => return Err(e.into()),
        };
        Self::from_table(table, |name| std::env::var(name).ok())
    }

    pub fn from_table(mut table: toml::Table, env: impl Fn(&str) -> Option<String>) -> Result<Self, anyhow::Error> {
        for (name, [section, key]) in ENV_OVERRIDES {
            let value = if let Some(value) = env(*name) {
                value
            } else {
                continue;
            };
            let section = table
                .entry(section.to_string())
                .or_insert(toml::Value::Table(toml::Table::new()));
            match section {
                toml::Value::Table(section) => {
                    section.insert(key.to_string(), toml::Value::String(value));
                }
                _ => return Err(anyhow::format_err!("config: {} is not a table", name)),
            }
        }

        Ok(toml::Value::Table(table).try_into()?)
    }

    pub fn classifier_params(&self) -> toml::Value {
        toml::Value::Table(self.classifier.params.clone())
    }
}
