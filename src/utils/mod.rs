pub mod middleware;
pub mod templates;

pub use templates::Templates;
