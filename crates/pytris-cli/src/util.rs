use std::{fs::File, io, path::Path};

use anyhow::Context;
use pytris_engine::GameConfig;

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Reads a game configuration from a JSON file. Missing fields take their defaults.
pub fn read_config_file<P>(path: P) -> anyhow::Result<GameConfig>
where
    P: AsRef<Path>,
{
    read_json_file("config", path)
}

#[cfg(test)]
mod tests {
    use std::{env, fs, process};

    use super::*;

    #[test]
    fn test_read_config_file() {
        let path = env::temp_dir().join(format!("pytris-config-{}.json", process::id()));
        fs::write(&path, r#"{ "num_cols": 12, "num_nextup": 2 }"#).unwrap();
        let config = read_config_file(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(config.num_cols, 12);
        assert_eq!(config.num_nextup, 2);
        assert_eq!(config.num_rows, 20);
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = read_config_file("/nonexistent/pytris.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/pytris.json"));
    }
}
