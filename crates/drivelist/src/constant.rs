pub const BASE_URL: &str = "https://www.googleapis.com/drive/v2";

pub const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/auth";

pub const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

pub const TIMEOUT_SECONDS: u64 = 60;
