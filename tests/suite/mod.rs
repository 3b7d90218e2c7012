//! Integration test suite modules

mod boundaries;
mod jokes;
mod navigation;
mod pages;
