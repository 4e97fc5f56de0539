pub mod attitude;
