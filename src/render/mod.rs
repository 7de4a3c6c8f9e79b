pub mod cpu;
pub mod text;
