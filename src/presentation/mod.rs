pub mod egui_view;
pub mod text_view;

pub use text_view::{render_groups, render_text};
