pub mod orbital;
