// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! hbjson-to-glb - HBJSON building model to binary glTF converter.
//!
//! Reads a document from a file or stdin, converts it with
//! [`hbmesh_processing::convert_model`] and writes the GLB next to the input,
//! to `--output`, or to stdout. Logs go to stderr.

use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use hbmesh_core::Model;
use hbmesh_processing::{convert_model, ConvertOptions};
use tracing_subscriber::EnvFilter;

mod args;
mod config;

use args::{has_model_extension, usage, Args, Command, Input, Output};
use config::{Config, QUIET_LOG_FILTER};

fn main() -> ExitCode {
    let args = match Args::parse_from(std::env::args().skip(1)) {
        Ok(Command::Convert(args)) => args,
        Ok(Command::Help) => {
            println!("{}", usage());
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{}", usage());
            return ExitCode::from(2);
        }
    };

    let config = Config::from_env();
    init_logging(&config, args.quiet);

    match run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(config: &Config, quiet: bool) {
    let filter = if quiet {
        QUIET_LOG_FILTER
    } else {
        config.log_filter.as_str()
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args, config: &Config) -> Result<()> {
    if let Input::File(path) = &args.input {
        if !has_model_extension(path) {
            tracing::warn!(
                path = %path.display(),
                "Input does not have an .hbjson or .json extension"
            );
        }
    }

    let bytes = read_input(&args.input)?;
    let model = Model::from_slice(&bytes).context("Failed to parse HBJSON document")?;
    tracing::info!(
        rooms = model.rooms.len(),
        faces = model.face_count(),
        apertures = model.aperture_count(),
        "Loaded model"
    );

    let options = ConvertOptions {
        rotate: args.rotate || config.rotate,
        ..Default::default()
    };
    let output = convert_model(&model, &options).context("Failed to convert model")?;

    let target = args.output_target();
    write_output(&target, &output.glb)?;
    if let Output::File(path) = &target {
        tracing::info!(path = %path.display(), bytes = output.glb.len(), "Wrote GLB");
    }

    if args.stats {
        let stats = serde_json::to_string_pretty(&output.stats)?;
        eprintln!("{stats}");
    }
    Ok(())
}

fn read_input(input: &Input) -> Result<Vec<u8>> {
    match input {
        Input::Stdin => {
            let mut bytes = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut bytes)
                .context("Failed to read HBJSON from stdin")?;
            Ok(bytes)
        }
        Input::File(path) => {
            fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
        }
    }
}

fn write_output(output: &Output, glb: &[u8]) -> Result<()> {
    match output {
        Output::Stdout => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(glb).context("Failed to write GLB to stdout")?;
            stdout.flush().context("Failed to flush stdout")?;
        }
        Output::File(path) => {
            fs::write(path, glb).with_context(|| format!("Failed to write {}", path.display()))?;
        }
    }
    Ok(())
}
