// Accounts and sessions: Argon2 password hashes, HS256 session tokens, and the
// `Session` extractor that carries the caller through protected handlers.

pub mod handlers;
pub mod password;
pub mod session;
pub mod token;
