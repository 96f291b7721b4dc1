pub mod blob;
pub mod file;
pub mod memory;
