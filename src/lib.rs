pub mod chess;
pub mod config;
pub mod perft;
