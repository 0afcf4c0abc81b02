pub mod lending;
