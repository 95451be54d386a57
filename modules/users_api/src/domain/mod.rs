pub mod age;
pub mod error;
pub mod merge;
pub mod ports;
pub mod repo;
pub mod service;
pub mod validation;
