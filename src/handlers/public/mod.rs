// handlers/public/mod.rs - endpoints reachable without a session
//
// Login form, logout, health and the root redirect. Static assets under
// /public are served directly by the router.
pub mod login;
pub mod status;

pub use login::{login_page, login_post, logout};
pub use status::{health, root};
