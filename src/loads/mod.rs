//! Applied force and moment resultants

mod load_state;

pub use load_state::LoadState;
