pub mod value;

pub use value::{Constant, Value};
