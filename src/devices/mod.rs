pub mod arduino;

pub use arduino::Arduino;
