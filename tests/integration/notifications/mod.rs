//! Push delivery integration tests

mod pushy_test;
