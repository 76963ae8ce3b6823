pub mod catalog_service;
pub mod client_service;
pub mod identity_service;
pub mod sale_service;

#[cfg(test)]
pub mod test_support;
