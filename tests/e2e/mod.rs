//! End-to-end scenarios over the HTTP API

mod app_suite;
