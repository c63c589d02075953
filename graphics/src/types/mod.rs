//! Descriptors and plain-data types handed to a GPU backend.

mod buffer;

pub use buffer::{
    BufferDescriptor, BufferUsage, COPY_BUFFER_ALIGNMENT, DrawIndexedArgs, IndexFormat,
    PrimitiveTopology,
};
