//! Assembling DNS wire-format data.
//!
//! Composing is the process of appending the wire-format representation
//! of a value to a buffer. The [`ComposeTarget`] trait describes such a
//! buffer. It is implemented for `Vec<u8>` and, if the `bytes` feature
//! is enabled, for [`bytes::BytesMut`].

#[cfg(feature = "bytes")]
use bytes::BytesMut;
use crate::name::Name;

//------------ ComposeTarget -------------------------------------------------

/// A buffer that DNS wire-format data can be appended to.
pub trait ComposeTarget {
    /// Appends a slice of octets to the end of the target.
    fn append_slice(&mut self, slice: &[u8]);

    /// Appends the wire format of a domain name to the end of the target.
    ///
    /// Returns the number of octets appended. The default implementation
    /// appends the uncompressed wire format of the name. A target that
    /// keeps track of names it has already rendered can override this
    /// method and emit a compression pointer for a known suffix instead.
    fn append_name(&mut self, name: &Name) -> usize {
        self.append_slice(name.as_slice());
        name.len()
    }
}

impl<'a, T: ComposeTarget + ?Sized> ComposeTarget for &'a mut T {
    fn append_slice(&mut self, slice: &[u8]) {
        (*self).append_slice(slice)
    }

    fn append_name(&mut self, name: &Name) -> usize {
        (*self).append_name(name)
    }
}

impl ComposeTarget for Vec<u8> {
    fn append_slice(&mut self, slice: &[u8]) {
        self.extend_from_slice(slice)
    }
}

#[cfg(feature = "bytes")]
impl ComposeTarget for BytesMut {
    fn append_slice(&mut self, slice: &[u8]) {
        self.extend_from_slice(slice)
    }
}

//============ Testing =======================================================
