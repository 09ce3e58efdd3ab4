mod cmd;

pub use cmd::run;
