// SPDX-License-Identifier: GPL-3.0-or-later

//! Cache topology probing.
//!
//! Linux publishes the per-CPU cache hierarchy under sysfs. The probe
//! reads the hierarchy of the first logical CPU and reports the size of
//! each level it finds. Hosts without that sysfs tree report zero sizes.

#[cfg(any(target_os = "linux", test))]
use std::fs;
#[cfg(any(target_os = "linux", test))]
use std::io;
#[cfg(any(target_os = "linux", test))]
use std::path::Path;

use super::CacheInfo;

#[cfg(target_os = "linux")]
const SYSFS_CACHE_DIR: &str = "/sys/devices/system/cpu/cpu0/cache";

/// Read the cache topology of the first logical CPU.
pub(crate) fn capture() -> CacheInfo {
    #[cfg(target_os = "linux")]
    {
        match read_cache_dir(Path::new(SYSFS_CACHE_DIR)) {
            Ok(info) => info,
            Err(err) => {
                log::debug!("cache topology not readable: {err}");
                CacheInfo::default()
            }
        }
    }
    #[cfg(not(target_os = "linux"))]
    {
        CacheInfo::default()
    }
}

/// Walk the `index*` entries of a sysfs cache directory and collect the
/// sizes by level and kind. An entry with a missing or unparsable
/// attribute is skipped, only a missing directory is an error.
#[cfg(any(target_os = "linux", test))]
fn read_cache_dir(root: &Path) -> io::Result<CacheInfo> {
    let mut info = CacheInfo::default();
    for entry in fs::read_dir(root)? {
        let path = entry?.path();
        let is_index = path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().starts_with("index"));
        if !is_index {
            continue;
        }

        let Ok(level) = fs::read_to_string(path.join("level")) else {
            continue;
        };
        let Ok(kind) = fs::read_to_string(path.join("type")) else {
            continue;
        };
        let Ok(size) = fs::read_to_string(path.join("size")) else {
            continue;
        };

        let Ok(level) = level.trim().parse::<u32>() else {
            continue;
        };
        let Some(size) = parse_size(size.trim()) else {
            continue;
        };

        match (level, kind.trim()) {
            (1, "Instruction") => info.l1i = size,
            (1, "Data") => info.l1d = size,
            (1, "Unified") => info.l1u = size,
            (2, "Instruction") => info.l2i = size,
            (2, "Data") => info.l2d = size,
            (2, "Unified") => info.l2u = size,
            (3, "Instruction") => info.l3i = size,
            (3, "Data") => info.l3d = size,
            (3, "Unified") => info.l3u = size,
            _ => {}
        }
    }
    Ok(info)
}

/// Parse a sysfs cache size like `32K` or `8M` into bytes. A bare number
/// is taken as bytes already.
#[cfg(any(target_os = "linux", test))]
fn parse_size(text: &str) -> Option<u64> {
    if let Some(kilo) = text.strip_suffix('K') {
        kilo.parse::<u64>().ok().map(|value| value * 1024)
    } else if let Some(mega) = text.strip_suffix('M') {
        mega.parse::<u64>().ok().map(|value| value * 1024 * 1024)
    } else {
        text.parse::<u64>().ok()
    }
}
