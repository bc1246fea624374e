pub mod page;
pub mod result;
