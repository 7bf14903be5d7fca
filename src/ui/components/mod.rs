pub mod category_block;
pub mod fields;
