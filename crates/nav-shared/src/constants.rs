//! Application-wide constants

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_MENU_ENDPOINT: &str = "/web_menu";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CACHE_KEY: &str = "app_menu_cache";
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;
pub const DEFAULT_PAGE_SUFFIX: &str = "Page";
pub const LOG_FILE_NAME: &str = "navctl.log";

/// Endpoints that never carry the session cookie.
pub const PUBLIC_ROUTES: [&str; 3] = ["/auth/login", "/auth/forgot-password", "/auth/register"];

/// Role priority used to pick a viewer's primary role, highest first.
pub const ROLE_HIERARCHY: [&str; 3] = ["admin", "manager", "user"];
