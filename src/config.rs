// config.rs
use std::env;

const DEFAULT_LOT_SERVICE_URL: &str =
    "https://maps.six.nsw.gov.au/arcgis/rest/services/sixmaps/Guras/MapServer/10/query";
const DEFAULT_ADDRESS_SERVICE_URL: &str =
    "https://maps.six.nsw.gov.au/arcgis/rest/services/sixmaps/Guras/MapServer/9/query";

/// Run configuration, read once at startup from the environment plus the
/// operator name given on the command line. The operator name is stamped
/// into `update_user` on every address write.
pub struct Config {
    pub primary_db: String,
    pub secondary_db: String,
    pub lot_service_url: String,
    pub address_service_url: String,
    pub report_dir: String,
    pub actor: String,
    /// When set, failure prompts are answered with an automatic abort
    /// instead of blocking on stdin.
    pub unattended: bool,
}

impl Config {
    pub fn from_env(actor: String) -> Self {
        Self {
            primary_db: env::var("GPR_DB_PATH").unwrap_or_else(|_| "gpr.sqlite3".to_string()),
            secondary_db: env::var("GPR_DB_FALLBACK_PATH")
                .unwrap_or_else(|_| "gpr_dr.sqlite3".to_string()),
            lot_service_url: env::var("GURAS_LOT_SERVICE_URL")
                .unwrap_or_else(|_| DEFAULT_LOT_SERVICE_URL.to_string()),
            address_service_url: env::var("GURAS_ADDRESS_SERVICE_URL")
                .unwrap_or_else(|_| DEFAULT_ADDRESS_SERVICE_URL.to_string()),
            report_dir: env::var("GPR_REPORT_DIR")
                .unwrap_or_else(|_| "exception_reports".to_string()),
            actor,
            unattended: env::var("GPR_UNATTENDED").is_ok(),
        }
    }
}
