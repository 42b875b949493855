mod flattened;
mod flattened_ref;
pub mod shape;
pub mod value_ext;
