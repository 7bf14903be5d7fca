pub mod dataset;
pub mod form;
pub mod record;
pub mod schema;
pub mod taxonomy;
