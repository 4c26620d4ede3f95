// SPDX-License-Identifier: GPL-3.0-or-later

//! The module contains the host probing functionality.
//!
//! A probe takes a snapshot of the host hardware: CPU identification,
//! cache topology, SIMD capabilities and physical memory. The snapshot is
//! plain data; rendering it as JSON lives in the [`crate::render`] module.
//!
//! The field layout of [`SystemInfo`] is the wire contract of the JSON
//! document the bridge hands out, so renaming a field changes the ABI of
//! the whole workspace.

mod cache;
mod cpu;
mod memory;

use std::fmt;

use serde::{Deserialize, Serialize};
use sysinfo::System;

/// A snapshot of the host hardware characteristics.
///
/// Capturing does not fail: a sub-probe that cannot read its source
/// reports an empty string or zero sizes and leaves a note in the debug
/// log.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct SystemInfo {
    pub cpu_manufacturer: String,
    pub cpu_architecture: String,
    pub cache_info: CacheInfo,
    pub cpu_capabilities: CpuCapabilities,
    pub memory: MemoryInfo,
}

/// Cache sizes in bytes, by level and kind.
///
/// `i` is instruction, `d` is data, `u` is unified. A size of zero means
/// the host does not report that cache.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
pub struct CacheInfo {
    pub l1i: u64,
    pub l1d: u64,
    pub l1u: u64,
    pub l2i: u64,
    pub l2d: u64,
    pub l2u: u64,
    pub l3i: u64,
    pub l3d: u64,
    pub l3u: u64,
}

/// Runtime-detected x86 SIMD instruction set extensions.
///
/// Every flag is false on non-x86 hosts.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
pub struct CpuCapabilities {
    pub x86_sse2: bool,
    pub x86_sse3: bool,
    pub x86_ssse3: bool,
    pub x86_sse4_1: bool,
    pub x86_sse4_2: bool,
    pub x86_popcnt_insn: bool,
    pub x86_avx: bool,
    pub x86_avx2: bool,
    pub x86_fma3: bool,
    pub x86_avx512f: bool,
    pub x86_avx512bw: bool,
    pub x86_avx512dq: bool,
    pub x86_avx512vl: bool,
}

/// Physical memory characteristics, sizes in bytes.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
pub struct MemoryInfo {
    pub total: u64,
}

impl SystemInfo {
    /// Captures the hardware characteristics of the current host.
    pub fn capture() -> Self {
        let mut system = System::new();
        system.refresh_cpu_all();
        system.refresh_memory();

        SystemInfo {
            cpu_manufacturer: cpu::manufacturer(&system),
            cpu_architecture: cpu::architecture(),
            cache_info: cache::capture(),
            cpu_capabilities: cpu::capabilities(),
            memory: memory::capture(&system),
        }
    }

    #[cfg(test)]
    pub fn from_strings(manufacturer: &str, architecture: &str) -> Self {
        Self {
            cpu_manufacturer: manufacturer.to_string(),
            cpu_architecture: architecture.to_string(),
            cache_info: CacheInfo {
                l1i: 32768,
                l1d: 32768,
                l2u: 1048576,
                l3u: 8388608,
                ..Default::default()
            },
            cpu_capabilities: CpuCapabilities {
                x86_sse2: true,
                x86_popcnt_insn: true,
                ..Default::default()
            },
            memory: MemoryInfo { total: 17179869184 },
        }
    }
}

impl fmt::Display for SystemInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "SystemInfo cpu={}/{}, memory={} bytes",
            self.cpu_manufacturer, self.cpu_architecture, self.memory.total
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_reports_compiled_architecture() {
        let info = SystemInfo::capture();

        assert_eq!(info.cpu_architecture, std::env::consts::ARCH);
    }

    #[test]
    fn test_capture_reports_memory() {
        let info = SystemInfo::capture();

        assert!(info.memory.total > 0);
    }

    #[test]
    fn test_display_format() {
        let info = SystemInfo::from_strings("GenuineIntel", "x86_64");
        let display_output = format!("{}", info);

        assert!(display_output.contains("GenuineIntel"));
        assert!(display_output.contains("x86_64"));
        assert!(display_output.contains("17179869184 bytes"));
    }
}
