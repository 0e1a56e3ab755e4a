// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand.

    // Zero-arg form: String::new()
    () => {
        ::std::string::String::new()
    };
    // Single expression: anything String::from accepts
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}
