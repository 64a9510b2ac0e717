// handlers/elevated/mod.rs - product management pages, ADMIN role only
pub mod admin;

pub use admin::{delete_product, new_product, save_product, update_product, update_product_form};
