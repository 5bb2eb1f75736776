//! INI file configuration adapter.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
[data]
prices_path = multistocks.csv
symbols = AAPL,MMM,KO,V,CAT
year = 2024

[optimizer]
initial_capital = 10000.0
max_window = 256
top_n = 20

[report]
output_path = sma_rank_all.csv
"#;

    #[test]
    fn from_string_parses_all_sections() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(
            adapter.get_string("data", "prices_path"),
            Some("multistocks.csv".to_string())
        );
        assert_eq!(adapter.get_int("data", "year", 0), 2024);
        assert_eq!(
            adapter.get_double("optimizer", "initial_capital", 0.0),
            10_000.0
        );
        assert_eq!(adapter.get_int("optimizer", "max_window", 0), 256);
        assert_eq!(adapter.get_int("optimizer", "top_n", 0), 20);
        assert_eq!(
            adapter.get_string("report", "output_path"),
            Some("sma_rank_all.csv".to_string())
        );
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string("[data]\nyear = 2024\n").unwrap();
        assert_eq!(adapter.get_string("data", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn get_int_returns_default_for_missing_or_bad_value() {
        let adapter = FileConfigAdapter::from_string("[optimizer]\nmax_window = lots\n").unwrap();
        assert_eq!(adapter.get_int("optimizer", "max_window", 256), 256);
        assert_eq!(adapter.get_int("optimizer", "missing", 42), 42);
    }

    #[test]
    fn get_double_returns_default_for_missing_or_bad_value() {
        let adapter =
            FileConfigAdapter::from_string("[optimizer]\ninitial_capital = cheap\n").unwrap();
        assert_eq!(
            adapter.get_double("optimizer", "initial_capital", 10_000.0),
            10_000.0
        );
        assert_eq!(adapter.get_double("optimizer", "missing", 99.9), 99.9);
    }

    #[test]
    fn from_file_reads_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", SAMPLE).unwrap();
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("data", "symbols"),
            Some("AAPL,MMM,KO,V,CAT".to_string())
        );
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        assert!(FileConfigAdapter::from_file("/nonexistent/config.ini").is_err());
    }
}
