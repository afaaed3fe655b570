pub mod clock;
pub mod config;
pub mod environment;
pub mod errors;
pub mod feedback;
pub mod form;
pub mod forms;
pub mod normalization;
pub mod record;
pub mod routes;
pub mod schema;
pub mod store;
pub mod submission;

#[cfg(test)]
mod test_support;
