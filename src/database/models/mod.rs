pub mod product;

pub use product::{FieldErrors, NewProduct, Product, ProductFields, ProductForm};
