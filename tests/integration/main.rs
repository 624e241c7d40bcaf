//! Integration tests for the storefront access layer.

mod helpers;

mod access_test;
mod auth_store_test;
mod routing_test;
