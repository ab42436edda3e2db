//! Non-owning views over caller-allocated pixel and mask buffers.

/// Validated buffer and mask views.
pub mod view;
