//! Application-level configuration constants.

// Backend
pub const API_BASE_URL: &str = match option_env!("EKKLESIA_API_URL") {
    Some(url) => url,
    None => "http://localhost:3000/api",
};

// Draw widgets
pub const TICK_MS: u32 = 1_000;
pub const DEFAULT_NAMES_PLACEHOLDER: &str = "Ana\nBruno\nCarla";
pub const DEFAULT_RANGE_MIN: &str = "1";
pub const DEFAULT_RANGE_MAX: &str = "100";

// Operations screens
pub const CHECKPOINT_REFRESH_MS: u32 = 10_000;
pub const ORDERS_REFRESH_MS: u32 = 15_000;
pub const MAX_PROOF_BYTES: f64 = 5.0 * 1024.0 * 1024.0;

// DOM hooks for the JavaScript helpers
pub const CHART_CANVAS_ID: &str = "checkpointChart";
pub const SALES_CANVAS_ID: &str = "salesChart";
pub const SCANNER_ELEMENT_ID: &str = "qrScanner";
