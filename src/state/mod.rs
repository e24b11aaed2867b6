/// State management module
/// 
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - The download-convert-preview controller (pipeline.rs)

pub mod data;
pub mod pipeline;
