use std::env;

use spotetl::config;

// Single test so nothing else races on the environment variable.
#[test]
fn test_db_batch_size_parsing_and_bounds() {
    unsafe { env::set_var("DB_BATCH_SIZE", "250") };
    assert_eq!(config::db_batch_size(), 250);

    // oversized values are capped to stay under PostgreSQL's 65535
    // bind-parameter limit for the widest insert
    unsafe { env::set_var("DB_BATCH_SIZE", "100000") };
    assert_eq!(config::db_batch_size(), 5000);

    unsafe { env::set_var("DB_BATCH_SIZE", "0") };
    assert_eq!(config::db_batch_size(), 1000);

    unsafe { env::set_var("DB_BATCH_SIZE", "lots") };
    assert_eq!(config::db_batch_size(), 1000);

    unsafe { env::remove_var("DB_BATCH_SIZE") };
    assert_eq!(config::db_batch_size(), 1000);
}
