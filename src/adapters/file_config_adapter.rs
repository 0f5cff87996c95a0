//! INI file configuration adapter.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

#[derive(Debug)]
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

    const REPLAY_INI: &str = r#"
[replay]
symbol = BTC/USDT
initial_funds = 1000.0
fee_pct = 0.1
bill_id = btc-hourly

[report]
detail = all
"#;

    #[test]
    fn from_string_parses_sections() {
        let adapter = FileConfigAdapter::from_string(REPLAY_INI).unwrap();
        assert_eq!(
            adapter.get_string("replay", "symbol"),
            Some("BTC/USDT".to_string())
        );
        assert_eq!(adapter.get_double("replay", "initial_funds", 0.0), 1000.0);
        assert_eq!(adapter.get_double("replay", "fee_pct", 0.0), 0.1);
        assert_eq!(
            adapter.get_string("report", "detail"),
            Some("all".to_string())
        );
    }

    #[test]
    fn missing_keys_fall_back() {
        let adapter = FileConfigAdapter::from_string("[replay]\nsymbol = ETH/USDT\n").unwrap();
        assert_eq!(adapter.get_string("replay", "bill_id"), None);
        assert_eq!(adapter.get_string("nowhere", "symbol"), None);
        assert_eq!(adapter.get_double("replay", "fee_pct", 0.25), 0.25);
    }

    #[test]
    fn non_numeric_values_fall_back() {
        let adapter =
            FileConfigAdapter::from_string("[replay]\ninitial_funds = lots\nfee_pct = x\n")
                .unwrap();
        assert_eq!(adapter.get_double("replay", "initial_funds", 1.5), 1.5);
        assert_eq!(adapter.get_double("replay", "fee_pct", 0.0), 0.0);
    }


    #[test]
    fn from_file_reads_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", REPLAY_INI).unwrap();
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("replay", "bill_id"),
            Some("btc-hourly".to_string())
        );
    }

    #[test]
    fn from_file_missing_is_error() {
        assert!(FileConfigAdapter::from_file("/nonexistent/tradeledger.ini").is_err());
    }
}
