//! STREAM kernels across buffer representations
