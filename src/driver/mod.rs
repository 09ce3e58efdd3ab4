mod driver;

pub use driver::parse_headers;
