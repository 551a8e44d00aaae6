//! Enroll Assist — driving-school registration over a form and a chat flow.

pub mod api;
pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod students;
