//! Общие типы для backend и frontend портала отчётов.
//!
//! - `domain` - аккаунты, отчёты Power BI, избранное
//! - `dashboards` - каталог отчётов (d400)
//! - `usecases` - экспорт отчёта в файл (u501)

pub mod dashboards;
pub mod domain;
pub mod usecases;
