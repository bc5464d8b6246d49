use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "conf/bingo.conf";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BingoConfig {
    pub phrases_file: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub seed: Option<u64>,
}

impl BingoConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        Self::from_str_content(&content)
    }

    pub fn from_str_content(content: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config_map = parse_config(content)?;

        let phrases_file = config_map.get("phrases_file")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        let log_file = config_map.get("log_file")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        let seed = match config_map.get("seed") {
            Some(s) => Some(s.parse::<u64>().map_err(|e| format!("invalid seed {s:?}: {e}"))?),
            None => None,
        };

        Ok(BingoConfig { phrases_file, log_file, seed })
    }

    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let config_path = path.as_ref();

        match Self::from_file(config_path) {
            Ok(config) => {
                eprintln!("📄 Loaded configuration from {}", config_path.display());
                config
            }
            Err(e) => {
                eprintln!("⚠️  Could not load config from {}: {}. Using defaults.", config_path.display(), e);
                Self::default()
            }
        }
    }
}

fn parse_config(content: &str) -> Result<HashMap<String, String>, Box<dyn std::error::Error>> {
    let mut config = HashMap::new();

    for line in content.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Parse key = value pairs
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim().to_string();
            let value = value.trim().to_string();
            config.insert(key, value);
        }
    }

    Ok(config)
}
