//! In-process request access log and the `/log` report built from it.

pub mod query;
pub mod record;
pub mod report;

pub use query::LogQuery;
pub use record::{Access, AccessLog, RequestInfo, current_access};
pub use report::{Column, LogReport, Notice, NoticeLevel, PageStats, Table};
