mod model;
mod print;
mod unpack;

pub use model::TypeModel;
pub use print::print_model;
pub use unpack::{Endian, Value, unpack};


#[cfg(test)]
mod unpack_test;
