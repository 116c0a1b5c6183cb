// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Hermod-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Hermod and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Hermod CLI entrypoint.
//!
//! By default this connects to a routing solver speaking line-delimited
//! JSON over TCP and runs the interactive dashboard against it.
//!
//! Use `--demo` to run against built-in fixture data without a solver.

use std::error::Error;
use std::sync::Arc;

use hermod::client::{Backend, DemoBackend, RemoteBackend};
use hermod::model::NodeId;
use hermod::pipeline::Pipelines;
use hermod::session::Session;

const DEFAULT_ENDPOINT: &str = "127.0.0.1:7340";
const ENDPOINT_ENV: &str = "HERMOD_ENDPOINT";

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--endpoint <host:port>] [--start-node <id>]\n  {program} --demo [--start-node <id>]\n  {program} --help\n\nThe endpoint defaults to ${ENDPOINT_ENV} or {DEFAULT_ENDPOINT}.\n--demo uses built-in fixture data and cannot be combined with --endpoint.\n--start-node preselects the route start; it falls back to the first depot\nwhen the id is not part of the loaded dataset."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    demo: bool,
    endpoint: Option<String>,
    start_node: Option<NodeId>,
    help: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--endpoint" => {
                if options.endpoint.is_some() {
                    return Err(());
                }
                let addr = args.next().ok_or(())?;
                if addr.is_empty() {
                    return Err(());
                }
                options.endpoint = Some(addr);
            }
            "--start-node" => {
                if options.start_node.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let id: NodeId = raw.parse().map_err(|_| ())?;
                options.start_node = Some(id);
            }
            "--help" | "-h" => {
                options.help = true;
            }
            _ => return Err(()),
        }
    }

    if options.demo && options.endpoint.is_some() {
        return Err(());
    }

    Ok(options)
}

fn run_dashboard<B: Backend + 'static>(
    runtime: &tokio::runtime::Runtime,
    backend: B,
    start_node: Option<NodeId>,
    solver_label: String,
) -> Result<(), Box<dyn Error>> {
    let (pipelines, events) = Pipelines::new(Arc::new(backend), runtime.handle().clone());
    let session = Session::new(start_node);

    runtime.block_on(async move {
        let tui_join = tokio::task::spawn_blocking(move || {
            hermod::tui::run(session, pipelines, events, solver_label)
                .map_err(|err| err.to_string())
        })
        .await;

        let tui_result = tui_join.map_err(|err| -> Box<dyn Error> { Box::new(err) })?;
        tui_result.map_err(|err| {
            Box::new(std::io::Error::new(std::io::ErrorKind::Other, err)) as Box<dyn Error>
        })?;
        Ok::<(), Box<dyn Error>>(())
    })
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "hermod".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        if options.help {
            print_usage(&program);
            return Ok(());
        }

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        if options.demo {
            run_dashboard(&runtime, DemoBackend::new(), options.start_node, "demo".to_owned())
        } else {
            let endpoint = options
                .endpoint
                .or_else(|| std::env::var(ENDPOINT_ENV).ok().filter(|value| !value.is_empty()))
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_owned());
            let backend = RemoteBackend::new(endpoint.clone());
            run_dashboard(&runtime, backend, options.start_node, endpoint)
        }
    })();

    if let Err(err) = result {
        eprintln!("hermod: {err}");
        std::process::exit(1);
    }
}
