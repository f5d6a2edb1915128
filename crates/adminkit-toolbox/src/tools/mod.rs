// Property files
pub mod update_property;

// Search
pub mod bigfiles;
pub mod search;

// Text processing
pub mod lines;
