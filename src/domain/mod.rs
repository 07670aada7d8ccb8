pub mod cardinality;
pub mod linker;
pub mod models;
pub mod normalize;
pub mod validate;
