pub mod create_account;
