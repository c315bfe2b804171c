pub mod collector;
pub mod form_model;
pub mod owner;
