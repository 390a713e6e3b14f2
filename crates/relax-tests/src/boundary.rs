//! Output boundary ring across backends
