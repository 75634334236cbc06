//! HTTP middleware.

pub(crate) mod request_log;
