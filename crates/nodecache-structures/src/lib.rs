//! The value model for nodecache. Defines the argument tree that node
//! computations receive and the tensor buffer type used for large numeric
//! payloads such as images.

mod arg_value;
mod error;
mod tensor_buffer;

pub use arg_value::{ArgValue, CallArguments, ScalarValue};
pub use error::ValueError;
pub use tensor_buffer::{TensorBuffer, TensorData};
