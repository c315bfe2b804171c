pub mod expression;
pub mod page_functions;
