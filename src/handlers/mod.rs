// handlers/mod.rs - three security tiers
//
// Public (no session) → Protected (any session, USER pages and the JSON API)
// → Elevated (ADMIN pages). Role checks live in the router, not in handlers.
pub mod elevated;
pub mod protected;
pub mod public;
