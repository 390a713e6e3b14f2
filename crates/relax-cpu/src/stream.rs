//! STREAM buffers over two storage representations

use ndarray::{Array1, Zip};
use relax_core::{BufferKind, RelaxError, Result, StreamBuffers};

fn check_lengths(a: usize, b: usize, c: usize) -> Result<()> {
    if a != b || b != c {
        return Err(RelaxError::BufferLengthMismatch { a, b, c });
    }
    if a == 0 {
        return Err(RelaxError::EmptyBuffer);
    }
    Ok(())
}

/// Resizable `Vec<f64>` buffers driven by explicit index loops
#[derive(Debug, Clone)]
pub struct VecBuffers {
    a: Vec<f64>,
    b: Vec<f64>,
    c: Vec<f64>,
}

impl VecBuffers {
    /// Buffers of length `len` holding a = 1.0, b = 2.0, c = 0.0
    pub fn new(len: usize) -> Result<Self> {
        Self::from_vecs(vec![1.0; len], vec![2.0; len], vec![0.0; len])
    }

    pub fn from_vecs(a: Vec<f64>, b: Vec<f64>, c: Vec<f64>) -> Result<Self> {
        check_lengths(a.len(), b.len(), c.len())?;
        Ok(Self { a, b, c })
    }
}

impl StreamBuffers for VecBuffers {
    fn kind(&self) -> BufferKind {
        BufferKind::TypedVec
    }

    fn len(&self) -> usize {
        self.a.len()
    }

    fn copy(&mut self) {
        for k in 0..self.c.len() {
            self.c[k] = self.a[k];
        }
    }

    fn scale(&mut self, scalar: f64) {
        for k in 0..self.b.len() {
            self.b[k] = scalar * self.c[k];
        }
    }

    fn add(&mut self) {
        for k in 0..self.c.len() {
            self.c[k] = self.a[k] + self.b[k];
        }
    }

    fn triad(&mut self, scalar: f64) {
        for k in 0..self.a.len() {
            self.a[k] = self.b[k] + scalar * self.c[k];
        }
    }

    fn a(&self) -> &[f64] {
        &self.a
    }

    fn b(&self) -> &[f64] {
        &self.b
    }

    fn c(&self) -> &[f64] {
        &self.c
    }
}

/// `ndarray` buffers updated with whole-array expressions
#[derive(Debug, Clone)]
pub struct NdBuffers {
    a: Array1<f64>,
    b: Array1<f64>,
    c: Array1<f64>,
}

impl NdBuffers {
    /// Buffers of length `len` holding a = 1.0, b = 2.0, c = 0.0
    pub fn new(len: usize) -> Result<Self> {
        Self::from_arrays(
            Array1::from_elem(len, 1.0),
            Array1::from_elem(len, 2.0),
            Array1::zeros(len),
        )
    }

    pub fn from_arrays(a: Array1<f64>, b: Array1<f64>, c: Array1<f64>) -> Result<Self> {
        check_lengths(a.len(), b.len(), c.len())?;
        // Slice accessors rely on contiguous storage
        Ok(Self {
            a: a.as_standard_layout().into_owned(),
            b: b.as_standard_layout().into_owned(),
            c: c.as_standard_layout().into_owned(),
        })
    }
}

impl StreamBuffers for NdBuffers {
    fn kind(&self) -> BufferKind {
        BufferKind::NdArray
    }

    fn len(&self) -> usize {
        self.a.len()
    }

    fn copy(&mut self) {
        self.c.assign(&self.a);
    }

    fn scale(&mut self, scalar: f64) {
        Zip::from(&mut self.b)
            .and(&self.c)
            .for_each(|b, &c| *b = scalar * c);
    }

    fn add(&mut self) {
        Zip::from(&mut self.c)
            .and(&self.a)
            .and(&self.b)
            .for_each(|c, &a, &b| *c = a + b);
    }

    fn triad(&mut self, scalar: f64) {
        Zip::from(&mut self.a)
            .and(&self.b)
            .and(&self.c)
            .for_each(|a, &b, &c| *a = b + scalar * c);
    }

    fn a(&self) -> &[f64] {
        self.a.as_slice().unwrap_or(&[])
    }

    fn b(&self) -> &[f64] {
        self.b.as_slice().unwrap_or(&[])
    }

    fn c(&self) -> &[f64] {
        self.c.as_slice().unwrap_or(&[])
    }
}

/// Freshly initialised buffers of the requested representation.
pub fn new_buffers(kind: BufferKind, len: usize) -> Result<Box<dyn StreamBuffers>> {
    Ok(match kind {
        BufferKind::TypedVec => Box::new(VecBuffers::new(len)?),
        BufferKind::NdArray => Box::new(NdBuffers::new(len)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use relax_core::{StreamOp, STREAM_SCALAR};

    #[test]
    fn test_initial_values() {
        for kind in BufferKind::ALL {
            let buf = new_buffers(kind, 3).unwrap();
            assert_eq!(buf.kind(), kind);
            assert_eq!(buf.a(), &[1.0, 1.0, 1.0]);
            assert_eq!(buf.b(), &[2.0, 2.0, 2.0]);
            assert_eq!(buf.c(), &[0.0, 0.0, 0.0]);
        }
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(VecBuffers::new(0), Err(RelaxError::EmptyBuffer)));
        assert!(matches!(NdBuffers::new(0), Err(RelaxError::EmptyBuffer)));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let err = VecBuffers::from_vecs(vec![1.0; 2], vec![1.0; 3], vec![1.0; 2]).unwrap_err();
        assert!(matches!(
            err,
            RelaxError::BufferLengthMismatch { a: 2, b: 3, c: 2 }
        ));
    }

    #[test]
    fn test_sequence_on_mixed_values() {
        let a = vec![1.0, -2.0, 0.5];
        let b = vec![4.0, 0.0, 8.0];
        let c = vec![9.0, 9.0, 9.0];
        let mut v = VecBuffers::from_vecs(a.clone(), b.clone(), c.clone()).unwrap();
        let mut n = NdBuffers::from_arrays(a.into(), b.into(), c.into()).unwrap();

        for op in StreamOp::ALL {
            v.run(op, STREAM_SCALAR);
            n.run(op, STREAM_SCALAR);
            assert_eq!(v.a(), n.a());
            assert_eq!(v.b(), n.b());
            assert_eq!(v.c(), n.c());
        }

        // c = a, b = 3c, c = a + b, a = b + 3c
        assert_eq!(v.c(), &[4.0, -8.0, 2.0]);
        assert_eq!(v.b(), &[3.0, -6.0, 1.5]);
        assert_eq!(v.a(), &[15.0, -30.0, 7.5]);
    }
}
