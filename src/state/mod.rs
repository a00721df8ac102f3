pub mod board;

pub use board::{BoardAction, BoardState, ToastNote};
