//! HTTP handlers

pub mod health;
pub mod form;
pub mod upload;
pub mod analyses;
