pub mod ansi;
pub mod bar;
pub mod boxes;
pub mod graph;
