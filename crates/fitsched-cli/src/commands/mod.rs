pub mod generate;
pub mod package;
pub mod preview;
pub mod slots;
pub mod trainer;
