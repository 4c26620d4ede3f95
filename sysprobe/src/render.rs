// SPDX-License-Identifier: GPL-3.0-or-later

//! This module renders probe records as JSON.
//!
//! Two renderings exist: a compact single-line string, which is what
//! crosses the C boundary, and a pretty-printed stream for terminals.
//! Both produce a single JSON object and neither emits a trailing
//! newline.

use std::io;

use serde::Serialize;

/// Render a record as a compact JSON string.
pub fn to_json_string<T>(record: &T) -> Result<String, serde_json::Error>
where
    T: Serialize,
{
    serde_json::to_string(record)
}

/// Write a record as JSON into the writer.
pub fn write_json<W, T>(writer: W, record: &T, pretty: bool) -> Result<(), serde_json::Error>
where
    W: io::Write,
    T: Serialize,
{
    if pretty {
        serde_json::to_writer_pretty(writer, record)
    } else {
        serde_json::to_writer(writer, record)
    }
}
