use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_DATA_PATH: &str = "employment_dataset.csv";
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8050";

/// Serve chart-ready views over an employment dataset.
#[derive(Debug, Clone, Parser)]
#[command(name = "employment-views")]
#[command(about = "Employment dataset views for the dashboard frontend", long_about = None)]
pub struct Args {
    /// Dataset file (.csv, .json, .parquet).
    #[arg(long, default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Address the HTTP listener binds to.
    #[arg(long, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen: SocketAddr,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["employment-views"]).unwrap();
        assert_eq!(args.data, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(args.listen, "127.0.0.1:8050".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn overrides() {
        let args = Args::try_parse_from([
            "employment-views",
            "--data",
            "/srv/jobs.parquet",
            "--listen",
            "0.0.0.0:9000",
        ])
        .unwrap();
        assert_eq!(args.data, PathBuf::from("/srv/jobs.parquet"));
        assert_eq!(args.listen.port(), 9000);
    }

    #[test]
    fn rejects_bad_address() {
        assert!(Args::try_parse_from(["employment-views", "--listen", "nowhere"]).is_err());
    }
}
