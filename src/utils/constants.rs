pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_THEME_FILE: &str = ".canarycheck/theme.json";
pub const DEFAULT_PAGE_OUT: &str = "canarycheck.html";

pub const SERVER_URL_ENV: &str = "CANARY_SERVER_URL";
pub const THEME_FILE_ENV: &str = "CANARY_THEME_FILE";
pub const REQUEST_TIMEOUT_ENV: &str = "CANARY_REQUEST_TIMEOUT_SECS";
pub const PAGE_OUT_ENV: &str = "CANARY_PAGE_OUT";

// multipart field names expected by POST /check
pub const FILE_FIELD: &str = "file";
pub const SCAN_FIELD: &str = "virustotal";
