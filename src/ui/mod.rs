pub mod campus;
pub mod canvas;
pub mod panels;
