pub mod generate;
pub mod list;

pub use generate::{GenerateConfig, generate_docs};
pub use list::list_routes;
