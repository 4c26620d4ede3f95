// SPDX-License-Identifier: GPL-3.0-or-later

//! Physical memory probing.

use sysinfo::System;

use super::MemoryInfo;

/// Total physical memory of the host in bytes.
pub(crate) fn capture(system: &System) -> MemoryInfo {
    MemoryInfo {
        total: system.total_memory(),
    }
}
