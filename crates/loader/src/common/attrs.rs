//! Memory transaction attributes.
//!
//! Guest memory writes carry metadata used by the host's memory subsystem for
//! access control and tracing. This module provides:
//! 1. **Attribute Set:** Requester identity, debug access, and security state.
//! 2. **Sanitization:** Construction from user configuration never produces
//!    `unspecified` or `user`-originated attribute states.

/// Attributes accompanying a guest memory transaction.
///
/// Only the three fields below are representable; the "unspecified" and
/// "user" states some memory subsystems model are cleared by construction
/// and cannot be set from configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemTxAttrs {
    /// Identity of the requesting agent, forwarded to the memory subsystem.
    pub requester_id: u16,
    /// Marks the transaction as a debugger access.
    pub debug: bool,
    /// Marks the transaction as originating from the secure world.
    pub secure: bool,
}

impl MemTxAttrs {
    /// Creates a new attribute set.
    ///
    /// # Arguments
    ///
    /// * `requester_id` - Identity of the requesting agent.
    /// * `debug` - Whether this is a debugger access.
    /// * `secure` - Whether this is a secure-world access.
    ///
    /// # Returns
    ///
    /// A new `MemTxAttrs` instance.
    pub const fn new(requester_id: u16, debug: bool, secure: bool) -> Self {
        Self {
            requester_id,
            debug,
            secure,
        }
    }
}
