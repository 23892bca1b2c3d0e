//! Presentation layer: panels plus the egui_plot chart and map sinks.

pub mod charts;
pub mod maps;
pub mod panels;
