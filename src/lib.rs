// Reusable library API — the CLI in main.rs is a thin wrapper over these
pub mod domains;
pub mod errors;
pub mod grid;
pub mod log;
pub mod render;
pub mod slots;
pub mod solver;
pub mod words;
