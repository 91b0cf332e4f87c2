pub mod inspect;
pub mod summarize;
