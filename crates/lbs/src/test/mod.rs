pub mod test_code_cache;
pub mod test_config;
pub mod test_registry;
