mod io;

pub use io::write_file;

#[cfg(test)]
pub mod testing;
