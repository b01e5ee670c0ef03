mod validator;

pub use validator::{check, validate};
