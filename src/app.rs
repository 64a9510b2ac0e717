use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::handlers::{elevated, protected, public};
use crate::middleware::{
    api_session, page_session, require_admin_api, require_admin_page, require_user_api,
    require_user_page,
};
use crate::state::AppState;
use crate::types::{RestAccess, Role};

/// Full application router with state attached
pub fn app(state: AppState) -> Router {
    let static_dir = ServeDir::new(&state.config.server.static_dir);

    Router::new()
        // Public
        .merge(public_routes())
        .nest_service("/public", static_dir)
        // Any session
        .merge(session_routes(&state))
        // USER pages
        .merge(user_routes(&state))
        // ADMIN pages
        .merge(admin_routes(&state))
        // JSON API
        .merge(api_routes(&state))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .route("/login", get(public::login_page).post(public::login_post))
        .route("/logout", post(public::logout))
}

fn session_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/notAuthorized", get(protected::products::not_authorized))
        .route_layer(middleware::from_fn_with_state(state.clone(), page_session))
}

fn user_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/user/products", get(protected::products::index))
        // Layers run bottom-up: session first, then the role check
        .route_layer(middleware::from_fn(require_user_page))
        .route_layer(middleware::from_fn_with_state(state.clone(), page_session))
}

fn admin_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/admin/newProduct", get(elevated::new_product))
        .route("/admin/saveProduct", post(elevated::save_product))
        .route("/admin/updateProduct", get(elevated::update_product_form))
        .route("/admin/update", post(elevated::update_product))
        .route("/admin/delete", post(elevated::delete_product))
        .route_layer(middleware::from_fn(require_admin_page))
        .route_layer(middleware::from_fn_with_state(state.clone(), page_session))
}

fn api_routes(state: &AppState) -> Router<AppState> {
    let (read_role, write_role) = match state.config.security.rest_access {
        RestAccess::RoleBased => (Some(Role::User), Some(Role::Admin)),
        RestAccess::Authenticated => (None, None),
    };

    let reads = Router::new()
        .route("/products", get(protected::api::list))
        .route("/products/:id", get(protected::api::show));
    let writes = Router::new().route("/products/:id", delete(protected::api::remove));

    with_api_role(reads, read_role)
        .merge(with_api_role(writes, write_role))
        .route_layer(middleware::from_fn_with_state(state.clone(), api_session))
}

fn with_api_role(router: Router<AppState>, role: Option<Role>) -> Router<AppState> {
    match role {
        Some(Role::Admin) => router.route_layer(middleware::from_fn(require_admin_api)),
        Some(Role::User) => router.route_layer(middleware::from_fn(require_user_api)),
        None => router,
    }
}
