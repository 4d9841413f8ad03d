//! Large homogeneous numeric buffers with shape metadata.
//!
//! A `TensorBuffer` carries image or tensor payloads into node computations.
//! The engine only ever needs two things from it: its shape descriptor and a
//! canonical byte view for structural hashing.

use std::borrow::Cow;
use std::fmt::{Display, Formatter};
use ndarray::ArrayD;
use crate::ValueError;

/// The homogeneous element payload of a [`TensorBuffer`].
///
/// Two element types cover the data node computations exchange: `U8` for
/// image-style data and `F32` for float tensors.
#[derive(Debug, Clone, PartialEq)]
pub enum TensorData {
    U8(ArrayD<u8>),
    F32(ArrayD<f32>),
}

/// A large homogeneous numeric array with a shape descriptor.
///
/// Stored in whatever layout the producer handed over; [`canonical_bytes`]
/// always yields the row-major element bytes so that two buffers with equal
/// shape and contents view identically regardless of source layout.
///
/// [`canonical_bytes`]: TensorBuffer::canonical_bytes
#[derive(Debug, Clone, PartialEq)]
pub struct TensorBuffer {
    data: TensorData,
}

impl TensorBuffer {
    /// Creates a buffer over existing u8 array data.
    pub fn from_u8(data: ArrayD<u8>) -> TensorBuffer {
        TensorBuffer { data: TensorData::U8(data) }
    }

    /// Creates a buffer over existing f32 array data.
    pub fn from_f32(data: ArrayD<f32>) -> TensorBuffer {
        TensorBuffer { data: TensorData::F32(data) }
    }

    /// Creates a u8 buffer from a flat vector and a shape descriptor.
    pub fn from_shape_vec_u8(shape: &[usize], data: Vec<u8>) -> Result<TensorBuffer, ValueError> {
        let array = ArrayD::from_shape_vec(shape.to_vec(), data).map_err(|e| {
            ValueError::BadParameters(format!("u8 data does not fit shape {:?}: {}", shape, e))
        })?;
        Ok(TensorBuffer::from_u8(array))
    }

    /// Creates an f32 buffer from a flat vector and a shape descriptor.
    pub fn from_shape_vec_f32(shape: &[usize], data: Vec<f32>) -> Result<TensorBuffer, ValueError> {
        let array = ArrayD::from_shape_vec(shape.to_vec(), data).map_err(|e| {
            ValueError::BadParameters(format!("f32 data does not fit shape {:?}: {}", shape, e))
        })?;
        Ok(TensorBuffer::from_f32(array))
    }

    /// Returns the shape descriptor of the underlying array.
    pub fn get_shape(&self) -> &[usize] {
        match &self.data {
            TensorData::U8(array) => array.shape(),
            TensorData::F32(array) => array.shape(),
        }
    }

    /// Returns the total number of elements.
    pub fn element_count(&self) -> usize {
        match &self.data {
            TensorData::U8(array) => array.len(),
            TensorData::F32(array) => array.len(),
        }
    }

    /// A small tag discriminating the element type. Participates in the
    /// structural hash so equal bytes of different dtypes do not collide.
    pub fn dtype_tag(&self) -> u8 {
        match &self.data {
            TensorData::U8(_) => 1,
            TensorData::F32(_) => 2,
        }
    }

    /// Human-readable element type name.
    pub fn dtype_name(&self) -> &'static str {
        match &self.data {
            TensorData::U8(_) => "u8",
            TensorData::F32(_) => "f32",
        }
    }

    /// Returns the element bytes in canonical (row-major, contiguous) order.
    ///
    /// Borrows when the array already is in standard layout, otherwise
    /// materializes a row-major copy. This is the expensive input to buffer
    /// hashing; callers time it rather than bounding it.
    pub fn canonical_bytes(&self) -> Cow<'_, [u8]> {
        match &self.data {
            TensorData::U8(array) => match array.as_slice() {
                Some(slice) => Cow::Borrowed(slice),
                None => Cow::Owned(array.iter().copied().collect()),
            },
            TensorData::F32(array) => match array.as_slice() {
                Some(slice) => Cow::Borrowed(bytemuck::cast_slice(slice)),
                None => Cow::Owned(array.iter().flat_map(|v| v.to_ne_bytes()).collect()),
            },
        }
    }

    /// Borrows the raw payload.
    pub fn get_data(&self) -> &TensorData {
        &self.data
    }
}

impl Display for TensorBuffer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "TensorBuffer({}, shape={:?})", self.dtype_name(), self.get_shape())
    }
}

impl From<TensorData> for TensorBuffer {
    fn from(data: TensorData) -> Self {
        TensorBuffer { data }
    }
}
