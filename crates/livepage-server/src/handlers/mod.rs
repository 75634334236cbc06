//! HTTP request handlers.

pub(crate) mod reload_status;
