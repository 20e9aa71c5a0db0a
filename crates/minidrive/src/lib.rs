//! A small drive browser: a read-only folder catalog with breadcrumb navigation.

pub mod catalog;
pub mod db;
pub mod navigator;
pub mod settings;
pub mod ui;
