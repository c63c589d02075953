//! Typed, fixed-shape CPU buffers.
//!
//! [`Buffer1D`], [`Buffer2D`] and [`Buffer3D`] store plain-old-data elements
//! contiguously so their bytes can be handed to a GPU upload without copying.
//! The shape is fixed at creation; only element values change afterwards.

use std::ops::{Deref, DerefMut};

use bytemuck::Pod;

/// A contiguous array of `T`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Buffer1D<T: Pod> {
    data: Vec<T>,
}

impl<T: Pod> Buffer1D<T> {
    /// Size in bytes of one element.
    pub const ELEMENT_SIZE: usize = std::mem::size_of::<T>();

    /// Create a zero-filled buffer.
    pub fn zeroed(len: usize) -> Self {
        Self {
            data: vec![T::zeroed(); len],
        }
    }

    /// Take ownership of existing elements.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Raw bytes, suitable for a buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// Length in bytes.
    pub fn byte_len(&self) -> usize {
        self.data.len() * Self::ELEMENT_SIZE
    }

    /// Give back the elements.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: Pod> From<Vec<T>> for Buffer1D<T> {
    fn from(data: Vec<T>) -> Self {
        Self::from_vec(data)
    }
}

impl<T: Pod> FromIterator<T> for Buffer1D<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T: Pod> Deref for Buffer1D<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.data
    }
}

impl<T: Pod> DerefMut for Buffer1D<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.data
    }
}

/// A row-major `width x height` grid of `T`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Buffer2D<T: Pod> {
    data: Vec<T>,
    width: usize,
    height: usize,
}

impl<T: Pod> Buffer2D<T> {
    /// Size in bytes of one element.
    pub const ELEMENT_SIZE: usize = std::mem::size_of::<T>();

    /// Create a zero-filled grid.
    pub fn zeroed(width: usize, height: usize) -> Self {
        Self {
            data: vec![T::zeroed(); width * height],
            width,
            height,
        }
    }

    /// Wrap row-major elements. Returns `None` if the length does not match the shape.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Option<Self> {
        (data.len() == width * height).then_some(Self {
            data,
            width,
            height,
        })
    }

    /// Elements per row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`.
    pub fn extent(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if any extent is zero.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn offset(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Element at the given coordinates.
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        self.offset(x, y).map(|i| &self.data[i])
    }

    /// Mutable element at the given coordinates.
    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        self.offset(x, y).map(|i| &mut self.data[i])
    }

    /// One row as a slice.
    pub fn row(&self, y: usize) -> Option<&[T]> {
        (y < self.height).then(|| &self.data[y * self.width..(y + 1) * self.width])
    }

    /// All elements in storage order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Raw bytes, suitable for a texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// Bytes per row.
    pub fn row_pitch(&self) -> usize {
        self.width * Self::ELEMENT_SIZE
    }
}

/// A `width x height x depth` volume of `T`, x fastest, then y, then z.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Buffer3D<T: Pod> {
    data: Vec<T>,
    width: usize,
    height: usize,
    depth: usize,
}

impl<T: Pod> Buffer3D<T> {
    /// Size in bytes of one element.
    pub const ELEMENT_SIZE: usize = std::mem::size_of::<T>();

    /// Create a zero-filled volume.
    pub fn zeroed(width: usize, height: usize, depth: usize) -> Self {
        Self {
            data: vec![T::zeroed(); width * height * depth],
            width,
            height,
            depth,
        }
    }

    /// Wrap elements. Returns `None` if the length does not match the shape.
    pub fn from_vec(width: usize, height: usize, depth: usize, data: Vec<T>) -> Option<Self> {
        (data.len() == width * height * depth).then_some(Self {
            data,
            width,
            height,
            depth,
        })
    }

    /// Elements per row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of slices.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// `(width, height, depth)`.
    pub fn extent(&self) -> (usize, usize, usize) {
        (self.width, self.height, self.depth)
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if any extent is zero.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn offset(&self, x: usize, y: usize, z: usize) -> Option<usize> {
        (x < self.width && y < self.height && z < self.depth)
            .then(|| (z * self.height + y) * self.width + x)
    }

    /// Element at the given coordinates.
    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<&T> {
        self.offset(x, y, z).map(|i| &self.data[i])
    }

    /// Mutable element at the given coordinates.
    pub fn get_mut(&mut self, x: usize, y: usize, z: usize) -> Option<&mut T> {
        self.offset(x, y, z).map(|i| &mut self.data[i])
    }

    /// All elements in storage order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Raw bytes, suitable for a volume texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// Bytes per `width x height` slice.
    pub fn slice_pitch(&self) -> usize {
        self.width * self.height * Self::ELEMENT_SIZE
    }
}
