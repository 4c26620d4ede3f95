// SPDX-License-Identifier: GPL-3.0-or-later

//! This module contains the command line interface of the application.
//!
//! The command line parsing is implemented using the `clap` library.
//! The module defines the `Arguments` type to represent a structured
//! form of the program invocation.

use std::fmt;

use clap::{arg, command, ArgAction, ArgMatches, Command};

/// Represents the command line arguments of the application.
#[derive(Debug, PartialEq)]
pub struct Arguments {
    // Where the JSON document is written; stdout when not set.
    pub output: Option<String>,
    // Render the document on a single line instead of pretty printing.
    pub compact: bool,
}

/// Builds the command line interface of the application.
pub fn cli() -> Command {
    command!()
        .about("Prints the host system information as a JSON document")
        .arg(arg!(-o --output <FILE> "Write the JSON document to a file instead of stdout"))
        .arg(
            arg!(-c --compact "Render the JSON document on a single line")
                .action(ArgAction::SetTrue),
        )
}

impl TryFrom<ArgMatches> for Arguments {
    type Error = anyhow::Error;

    fn try_from(matches: ArgMatches) -> Result<Self, Self::Error> {
        let output = matches.get_one::<String>("output").map(String::to_string);
        let compact = matches.get_flag("compact");

        Ok(Arguments { output, compact })
    }
}

impl fmt::Display for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Arguments output={}, compact={}",
            self.output.as_deref().unwrap_or("<stdout>"),
            self.compact
        )
    }
}
