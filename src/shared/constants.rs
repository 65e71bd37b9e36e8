/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// ROUTES
// =============================================================================

/// Login entry point; guards redirect here
pub const LOGIN_PATH: &str = "/accounts/login";

/// Landing page after a successful login
pub const DASHBOARD_PATH: &str = "/accounts/dashboard";

// =============================================================================
// MESSAGES
// =============================================================================

pub const MSG_LOGIN_SUCCESS: &str = "Berhasil masuk.";
pub const MSG_LOGIN_FAILED: &str = "Username atau password salah.";
pub const MSG_LOGOUT: &str = "Anda telah logout.";

// =============================================================================
// COOKIES
// =============================================================================

/// Cookie carrying flash notifications across a redirect
pub const FLASH_COOKIE_NAME: &str = "kampus_messages";
