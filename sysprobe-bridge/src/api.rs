// SPDX-License-Identifier: GPL-3.0-or-later

//! This file implements the exported C ABI of the bridge.
//!
//! The surface is two functions. [`sysprobe_get_system_info_as_json`]
//! probes the host, renders the report as JSON and transfers the buffer
//! to the caller. [`sysprobe_free_json_string`] takes the buffer back
//! and releases it. The pairing is the entire contract: allocation
//! happens in one function, deallocation in the other, both through the
//! [`OwnedJson`] handle.
//!
//! The bridge owns no error taxonomy. When the report cannot be
//! rendered, the getter logs the cause and returns null; null stays a
//! legal input to the free function.

use std::sync::Once;

use libc::c_char;
use thiserror::Error;

use sysprobe::probe::SystemInfo;
use sysprobe::render;

use crate::owned::OwnedJson;

/// The ways the getter can fail to produce a buffer. A failure surfaces
/// to the caller as a null return, with the cause in the log.
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Failed to render the system report: {0}")]
    Render(#[from] serde_json::Error),
    #[error("Failed to convert the document to a C string: {0}")]
    Convert(#[from] std::ffi::NulError),
}

static INIT_LOGGING: Once = Once::new();

/// Set up the logging system on the first call through the ABI.
///
/// A foreign host does not run a Rust `main`, so the initialization has
/// to happen at the boundary. Later calls are no-ops, and a logger
/// installed by the host process wins.
fn init_logging() {
    INIT_LOGGING.call_once(|| {
        use std::io::Write;

        let pid = std::process::id();
        let _ = env_logger::Builder::from_default_env()
            .format(move |buf, record| {
                writeln!(buf, "[bridge/{pid}] {} {}", record.level(), record.args())
            })
            .try_init();
    });
}

/// Probe the host and wrap the rendered document for the boundary.
fn system_info_json() -> Result<OwnedJson, BridgeError> {
    let info = SystemInfo::capture();
    let text = render::to_json_string(&info)?;
    let json = OwnedJson::new(text)?;

    Ok(json)
}

/// Returns the host system information as a JSON document.
///
/// The result is a heap-allocated, null-terminated UTF-8 buffer, owned
/// by the caller from the moment this function returns. It stays valid
/// until it is passed to [`sysprobe_free_json_string`], which must
/// happen exactly once. Returns null when the document cannot be
/// produced.
#[unsafe(no_mangle)]
pub extern "C" fn sysprobe_get_system_info_as_json() -> *mut c_char {
    init_logging();

    match system_info_json() {
        Ok(json) => json.into_raw(),
        Err(err) => {
            log::error!("{err}");
            std::ptr::null_mut()
        }
    }
}

/// Releases a document obtained from [`sysprobe_get_system_info_as_json`].
///
/// Passing null is a no-op.
///
/// # Safety
/// The pointer must have been returned by
/// [`sysprobe_get_system_info_as_json`] and must not be used afterwards.
/// Passing any other pointer, or the same pointer twice, is undefined
/// behavior and is not detected.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sysprobe_free_json_string(data: *mut c_char) {
    drop(unsafe { OwnedJson::reclaim(data) });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;

    #[test]
    fn test_returns_json_object() {
        let data = sysprobe_get_system_info_as_json();
        assert!(!data.is_null());

        let text = unsafe { CStr::from_ptr(data) }
            .to_str()
            .expect("the document is valid UTF-8");
        assert!(text.starts_with('{'));

        let document: serde_json::Value =
            serde_json::from_str(text).expect("the document is valid JSON");
        assert!(document.get("cpu_manufacturer").is_some());
        assert!(document.get("cpu_architecture").is_some());
        assert!(document.get("cache_info").is_some());
        assert!(document.get("cpu_capabilities").is_some());
        assert!(document.get("memory").is_some());

        unsafe { sysprobe_free_json_string(data) };
    }

    #[test]
    fn test_free_with_null_ptr() {
        unsafe { sysprobe_free_json_string(std::ptr::null_mut()) };
    }

    #[test]
    fn test_consecutive_calls_are_independent() {
        let first = sysprobe_get_system_info_as_json();
        let second = sysprobe_get_system_info_as_json();
        assert!(!first.is_null());
        assert!(!second.is_null());
        assert_ne!(first, second);

        // Releasing the first buffer leaves the second one readable.
        unsafe { sysprobe_free_json_string(first) };

        let text = unsafe { CStr::from_ptr(second) }
            .to_str()
            .expect("the document is valid UTF-8");
        let _: serde_json::Value =
            serde_json::from_str(text).expect("the document is valid JSON");

        unsafe { sysprobe_free_json_string(second) };
    }

    #[test]
    fn test_document_parses_into_the_record() {
        let data = sysprobe_get_system_info_as_json();
        assert!(!data.is_null());

        let text = unsafe { CStr::from_ptr(data) }.to_str().unwrap();
        let parsed: SystemInfo = serde_json::from_str(text).unwrap();
        assert_eq!(parsed.cpu_architecture, std::env::consts::ARCH);

        unsafe { sysprobe_free_json_string(data) };
    }
}
