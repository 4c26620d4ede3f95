// SPDX-License-Identifier: GPL-3.0-or-later

use std::env;
use std::fs::File;
use std::io::Write;
use std::process::ExitCode;

use sysprobe::{args, probe, render};

/// Driver function of the application.
fn main() -> anyhow::Result<ExitCode> {
    // Initialize the logging system.
    env_logger::init();
    // Get the package name and version from Cargo
    let pkg_name = env!("CARGO_PKG_NAME");
    let pkg_version = env!("CARGO_PKG_VERSION");
    log::info!("{pkg_name} v{pkg_version}");
    let os = env::consts::OS;
    let family = env::consts::FAMILY;
    let arch = env::consts::ARCH;
    log::info!("Running on... {family}/{os} {arch}");

    // Parse the command line arguments.
    let matches = args::cli().get_matches();
    let arguments = args::Arguments::try_from(matches)?;
    log::info!("{arguments}");

    // Probe the host and render the record.
    let info = probe::SystemInfo::capture();
    log::info!("{info}");

    let pretty = !arguments.compact;
    match &arguments.output {
        Some(path) => {
            let mut file = File::create(path)?;
            render::write_json(&mut file, &info, pretty)?;
            writeln!(file)?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            render::write_json(&mut handle, &info, pretty)?;
            writeln!(handle)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
