pub mod problem;
pub mod request_id;
pub mod rest;
