pub mod debounce;
pub mod directory;
pub mod usecase;
