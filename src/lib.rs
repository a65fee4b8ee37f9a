pub mod config;
pub mod db;
pub mod handlers;
pub mod paths;
pub mod scoring;
pub mod state;

#[cfg(test)]
pub mod testing;
