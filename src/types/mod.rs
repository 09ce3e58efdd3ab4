mod layout;
mod primitive;
mod registry;
mod resolve;
mod session;

pub use layout::*;
pub use primitive::*;
pub use registry::TypeRegistry;
pub use resolve::resolve;
pub use session::{Session, parse_source, parse_sources};
