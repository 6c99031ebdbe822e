pub mod ascii;
pub mod checks;
pub mod logging;
pub mod tuning_file;
