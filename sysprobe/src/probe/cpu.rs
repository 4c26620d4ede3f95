// SPDX-License-Identifier: GPL-3.0-or-later

//! CPU identification and capability probing.

use sysinfo::System;

use super::CpuCapabilities;

/// The vendor identification string of the first logical CPU.
pub(crate) fn manufacturer(system: &System) -> String {
    match system.cpus().first() {
        Some(cpu) => cpu.vendor_id().to_string(),
        None => {
            log::debug!("no logical CPU visible, manufacturer left empty");
            String::new()
        }
    }
}

/// The CPU architecture the library was compiled for.
pub(crate) fn architecture() -> String {
    std::env::consts::ARCH.to_string()
}

/// Detect which SIMD instruction set extensions the host supports.
///
/// This is a runtime check, the answer can be wider than the feature set
/// the library itself was compiled with.
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub(crate) fn capabilities() -> CpuCapabilities {
    CpuCapabilities {
        x86_sse2: std::arch::is_x86_feature_detected!("sse2"),
        x86_sse3: std::arch::is_x86_feature_detected!("sse3"),
        x86_ssse3: std::arch::is_x86_feature_detected!("ssse3"),
        x86_sse4_1: std::arch::is_x86_feature_detected!("sse4.1"),
        x86_sse4_2: std::arch::is_x86_feature_detected!("sse4.2"),
        x86_popcnt_insn: std::arch::is_x86_feature_detected!("popcnt"),
        x86_avx: std::arch::is_x86_feature_detected!("avx"),
        x86_avx2: std::arch::is_x86_feature_detected!("avx2"),
        x86_fma3: std::arch::is_x86_feature_detected!("fma"),
        x86_avx512f: std::arch::is_x86_feature_detected!("avx512f"),
        x86_avx512bw: std::arch::is_x86_feature_detected!("avx512bw"),
        x86_avx512dq: std::arch::is_x86_feature_detected!("avx512dq"),
        x86_avx512vl: std::arch::is_x86_feature_detected!("avx512vl"),
    }
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
pub(crate) fn capabilities() -> CpuCapabilities {
    CpuCapabilities::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_architecture_is_not_empty() {
        assert!(!architecture().is_empty());
    }

    #[test]
    fn test_manufacturer_from_refreshed_system() {
        let mut system = System::new();
        system.refresh_cpu_all();

        // Whatever the vendor string is, a refreshed system has CPUs.
        assert!(!system.cpus().is_empty());
        let _ = manufacturer(&system);
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn test_x86_64_baseline_features() {
        let capabilities = capabilities();

        // SSE2 is part of the x86_64 baseline.
        assert!(capabilities.x86_sse2);
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn test_avx2_implies_avx() {
        let capabilities = capabilities();

        if capabilities.x86_avx2 {
            assert!(capabilities.x86_avx);
        }
    }
}
