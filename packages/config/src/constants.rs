// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names used by the server

// Server
pub const PORT: &str = "PORT";
pub const HOST: &str = "HOST";

// CORS
pub const CORS_ORIGIN: &str = "CORS_ORIGIN";

// Database
pub const DATABASE_PATH: &str = "DATABASE_PATH";
pub const DB_MAX_CONNECTIONS: &str = "DB_MAX_CONNECTIONS";

// Logging
pub const RUST_LOG: &str = "RUST_LOG";
