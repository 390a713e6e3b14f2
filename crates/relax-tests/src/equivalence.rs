//! Cross-backend agreement with the scalar reference
