pub mod category_resolver;
pub mod review_store;
pub mod transfer_service;
