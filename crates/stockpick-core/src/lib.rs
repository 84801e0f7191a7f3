pub mod calculator;
pub mod error;
pub mod glossary;
pub mod guides;
pub mod mcp_api;
pub mod model;
