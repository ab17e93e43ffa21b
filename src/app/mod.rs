pub mod ports;
pub mod session;

pub use session::CatalogSession;
