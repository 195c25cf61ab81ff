//! Command handlers

pub mod template;
pub mod upload;
pub mod view;
