// SPDX-License-Identifier: GPL-3.0-or-later

//! The owning handle for text that crosses the C boundary.

use std::ffi::{CStr, CString, NulError};

use libc::c_char;

/// A heap-allocated, null-terminated text buffer whose ownership moves
/// to a foreign caller.
///
/// The raw pointer exists only between [`OwnedJson::into_raw`] and
/// [`OwnedJson::reclaim`]. Both ends of that window go through the
/// `CString` held inside, which pins the transfer to a single allocator:
/// a buffer handed out by one exported function can only be released by
/// its counterpart.
#[derive(Debug)]
pub struct OwnedJson {
    inner: CString,
}

impl OwnedJson {
    /// Wraps a rendered document. Fails when the text contains an
    /// interior null byte, which a JSON document never does.
    pub fn new(text: String) -> Result<Self, NulError> {
        CString::new(text).map(|inner| OwnedJson { inner })
    }

    /// Borrows the buffer with its terminator.
    pub fn as_c_str(&self) -> &CStr {
        self.inner.as_c_str()
    }

    /// Moves the buffer to the caller. The handle is consumed; the
    /// returned pointer is the only way back, via [`OwnedJson::reclaim`].
    pub fn into_raw(self) -> *mut c_char {
        self.inner.into_raw()
    }

    /// Takes a buffer back from the caller. Null yields `None`.
    ///
    /// # Safety
    /// The pointer must originate from [`OwnedJson::into_raw`] and must
    /// not have been reclaimed before.
    pub unsafe fn reclaim(data: *mut c_char) -> Option<Self> {
        if data.is_null() {
            None
        } else {
            let inner = unsafe { CString::from_raw(data) };
            Some(OwnedJson { inner })
        }
    }
}
