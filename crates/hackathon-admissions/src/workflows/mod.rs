pub mod rankings;
pub mod roster;
