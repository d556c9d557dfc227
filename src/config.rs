use std::path::PathBuf;

use clap::Parser;

/// Command-line configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "aceros-fis", version, about = "Selector de aceros al carbono")]
pub struct Config {
    /// Steel table to load (.csv, .json or .parquet). Falls back to the
    /// built-in sample table when it cannot be read.
    #[arg(long = "data", env = "ACEROS_FIS_DATA", default_value = "steel_data.csv")]
    pub data_path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_path_flag() {
        let cfg = Config::try_parse_from(["aceros-fis", "--data", "tabla.parquet"]).unwrap();
        assert_eq!(cfg.data_path, PathBuf::from("tabla.parquet"));
    }
}
