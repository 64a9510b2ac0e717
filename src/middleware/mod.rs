pub mod auth;
pub mod require_role;

pub use auth::{api_session, page_session, AuthUser};
pub use require_role::{require_admin_api, require_admin_page, require_user_api, require_user_page};
