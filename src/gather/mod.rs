pub mod form_elements;
pub mod gatherer;
