// Copyright (C) 2020-2024 Andy Kurnia.

// plumbing errors only. game rejections are values, see game_event.
pub struct EngineError {
    s: String,
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.s)
    }
}

impl std::fmt::Debug for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        (self as &dyn std::fmt::Display).fmt(f)
    }
}

impl std::error::Error for EngineError {}

pub fn new(s: String) -> EngineError {
    EngineError { s }
}

pub type BoxAnyError = Box<dyn std::error::Error>;
pub type Returns<T> = Result<T, BoxAnyError>;

#[macro_export]
macro_rules! return_error {
    ($error:expr) => {
        return Err($crate::error::new($error).into());
    };
}
