pub mod nesting;
pub mod scope;
