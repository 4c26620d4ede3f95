// SPDX-License-Identifier: GPL-3.0-or-later

//! Safe caller-side view of the exported ABI.
//!
//! This is what a foreign host is expected to do with the two exported
//! functions, spelled out in Rust: call the getter, borrow the buffer,
//! parse it into the typed record, and return the buffer exactly once.
//! In-process consumers can use it directly; for everyone else it
//! documents the contract.

use std::ffi::CStr;

use anyhow::Result;
use sysprobe::probe::SystemInfo;

use crate::api::{sysprobe_free_json_string, sysprobe_get_system_info_as_json};

/// Fetch the system report through the C ABI and parse it back.
///
/// The buffer is released before this function returns, also when the
/// parse fails.
pub fn fetch_system_info() -> Result<SystemInfo> {
    let data = sysprobe_get_system_info_as_json();
    anyhow::ensure!(!data.is_null(), "the bridge returned no JSON document");

    let result = unsafe { CStr::from_ptr(data) }
        .to_str()
        .map_err(anyhow::Error::from)
        .and_then(|text| Ok(serde_json::from_str(text)?));

    unsafe { sysprobe_free_json_string(data) };
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_round_trip() {
        let info = fetch_system_info().expect("the report crosses the boundary");

        assert_eq!(info.cpu_architecture, std::env::consts::ARCH);
    }

    #[test]
    fn test_fetch_matches_direct_probe() {
        let through_the_bridge = fetch_system_info().unwrap();
        let direct = SystemInfo::capture();

        // Everything the probe reports is stable within a process.
        assert_eq!(through_the_bridge, direct);
    }

    #[test]
    fn test_fetch_twice() {
        let first = fetch_system_info().unwrap();
        let second = fetch_system_info().unwrap();

        assert_eq!(first, second);
    }
}
