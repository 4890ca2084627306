mod selector;

pub use selector::ResolutionSelector;
