pub mod cats;
pub mod search;
