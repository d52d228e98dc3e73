use std::io;

use anyhow::Result;
#[cfg(not(feature = "dialogs"))]
use anyhow::bail;
use tracing::{info, info_span};

use exi_cli::paths::{PathProvider, PromptPaths, resolve_input_dir, resolve_output_file};
use exi_cli::pipeline::{analyse, output, run_pipeline};
use exi_cli::types::{PipelineOptions, PipelineResult, RunConfig};
use exi_ingest::{DecodePolicy, IngestOptions};
use exi_report::ensure_csv_extension;

use crate::cli::{Cli, DecodeArg};

/// Run the analysis. `Ok(None)` means a path selection was cancelled.
pub fn run_analysis(cli: &Cli) -> Result<Option<PipelineResult>> {
    let run_span = info_span!("run");
    let _run_guard = run_span.enter();
    let options = pipeline_options(cli);

    if let (Some(input_dir), Some(output_file)) = (&cli.input_dir, &cli.output) {
        let config = RunConfig {
            input_dir: input_dir.clone(),
            output_file: ensure_csv_extension(output_file.clone()),
        };
        return run_pipeline(&config, &options).map(Some);
    }

    // The report destination is chosen only after the analysis succeeded.
    let mut provider = path_provider(cli)?;
    let Some(input_dir) = resolve_input_dir(cli.input_dir.clone(), provider.as_mut())? else {
        info!("No input folder selected");
        return Ok(None);
    };
    let analysis = analyse(&input_dir, &options)?;
    let Some(output_file) = resolve_output_file(cli.output.clone(), provider.as_mut())? else {
        info!("No output file selected");
        return Ok(None);
    };
    output(analysis, output_file).map(Some)
}

fn pipeline_options(cli: &Cli) -> PipelineOptions {
    let decode_policy = match cli.decode {
        DecodeArg::Ignore => DecodePolicy::Ignore,
        DecodeArg::Replace => DecodePolicy::Replace,
    };
    PipelineOptions {
        ingest: IngestOptions::default().with_decode_policy(decode_policy),
        ..PipelineOptions::default()
    }
}

#[cfg(feature = "dialogs")]
fn path_provider(cli: &Cli) -> Result<Box<dyn PathProvider>> {
    if cli.dialogs {
        return Ok(Box::new(exi_cli::paths::DialogPaths));
    }
    Ok(prompt_provider())
}

#[cfg(not(feature = "dialogs"))]
fn path_provider(cli: &Cli) -> Result<Box<dyn PathProvider>> {
    if cli.dialogs {
        bail!("native dialogs are not available in this build (enable the `dialogs` feature)");
    }
    Ok(prompt_provider())
}

fn prompt_provider() -> Box<dyn PathProvider> {
    Box::new(PromptPaths::new(io::stdin().lock(), io::stderr()))
}
