pub mod a001_account;
pub mod a002_bi_report;
pub mod a003_favorite;
