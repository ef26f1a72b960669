pub mod api_utils;
pub mod export;
pub mod icons;
pub mod power_bi;
pub mod storage;
