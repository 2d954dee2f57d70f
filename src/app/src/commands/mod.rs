pub mod page;
pub mod timer;
pub mod upload;
