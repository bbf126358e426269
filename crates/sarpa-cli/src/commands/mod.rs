pub mod rank;
pub mod submit;
pub mod validate;
