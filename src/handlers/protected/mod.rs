// handlers/protected/mod.rs - endpoints that need an authenticated session
pub mod api;
pub mod products;
