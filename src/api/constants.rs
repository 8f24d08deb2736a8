//! Backend endpoint paths, relative to the configured API base URL

/// Create short link (`POST`, anonymous or owner)
pub const SHORTEN_PATH: &str = "/shorten";

/// Owner's links (`GET`, owner-only)
pub const MY_URLS_PATH: &str = "/my-urls";

pub const LOGIN_PATH: &str = "/login";

pub const REGISTER_PATH: &str = "/register";

/// Signed-in account (`GET`, owner-only)
pub const PROFILE_PATH: &str = "/profile";

/// Per-code statistics (`GET`); the code is percent-encoded as a path segment
pub fn stats_path(code: &str) -> String {
    format!("/url/{}/stats", urlencoding::encode(code))
}
