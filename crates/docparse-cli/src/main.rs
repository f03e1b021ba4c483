use std::fmt::Display;
use std::fs;
use std::io::{self, Write};
use std::process;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use serde_json::{Value, json};
use tabwriter::TabWriter;
use tracing_subscriber::EnvFilter;

use docparse_io::canonical_json::canonical_model_json;
use docparse_io::engine::{DumpState, Field, Model, ModelSchema, TypedValue, UploadResource};
use docparse_io::model_json;
use docparse_io::models::registry;
use docparse_io::request::{Diagnostic, RequestOptions, RetryPolicy, from_convert_error, prepare_model};

#[derive(Debug, Parser)]
#[command(name = "docparse", version, about = "Parse API schema inspection and conversion CLI")]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace). RUST_LOG wins when set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every registered model.
    Schemas,
    /// Print a model's fields as tab-separated rows.
    Inspect {
        /// Model name (case-insensitive), e.g. ParseResponse
        model: String,
    },
    /// Coerce a JSON file against a model and print the dumped wire form.
    Coerce {
        model: String,
        /// Input JSON path
        input: String,
        /// Output canonical (key-sorted, minified) JSON
        #[arg(long)]
        canonical: bool,
        /// On failure, print diagnostics as JSON on stdout
        #[arg(long)]
        json: bool,
    },
    /// Build a request body from a JSON file and report its retry budget.
    Request {
        model: String,
        /// Input JSON path (upload fields are attached with --upload)
        input: String,
        /// Attach a file to an upload field
        #[arg(long = "upload", value_name = "FIELD=PATH")]
        uploads: Vec<String>,
        #[arg(long)]
        max_retries: Option<u32>,
        #[arg(long)]
        timeout_ms: Option<u64>,
        /// On failure, print diagnostics as JSON on stdout
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: u8) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "debug".to_string(),
            _ => "trace".to_string(),
        },
    };
    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn exit_with(code: i32, msg: impl Display) -> ! {
    eprintln!("{msg}");
    process::exit(code);
}

fn lookup(model: &str) -> &'static ModelSchema {
    registry()
        .get(model)
        .unwrap_or_else(|| exit_with(1, format!("unknown model `{model}`")))
}

fn read_input(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| exit_with(1, format!("{path}: {e}")))
}

/// Parse `input` against `schema`, exiting 2 on conversion failure.
fn parse_or_exit(schema: &'static ModelSchema, input: &str, json: bool) -> anyhow::Result<Model> {
    let text = read_input(input);
    match model_json::parse_model_json(schema, &text) {
        Ok(model) => Ok(model),
        Err(err) => fail_conversion(&err.diagnostics(), err, json),
    }
}

/// Exit 2, printing `diagnostics` on stdout first when `json` is set.
fn fail_conversion(diagnostics: &[Diagnostic], err: impl Display, json: bool) -> ! {
    if json {
        match serde_json::to_string_pretty(diagnostics) {
            Ok(out) => println!("{out}"),
            Err(e) => exit_with(1, e),
        }
    }
    exit_with(2, err);
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Command::Schemas => {
            let mut tw = TabWriter::new(io::stdout()).padding(2);
            writeln!(tw, "model\tfields\trequired")?;
            for schema in registry().schemas() {
                writeln!(
                    tw,
                    "{}\t{}\t{}",
                    schema.name(),
                    schema.fields().len(),
                    schema.required_wire_names().join(",")
                )?;
            }
            tw.flush().context("failed to write schema table")?;
        }

        Command::Inspect { model } => {
            let schema = lookup(&model);
            let mut out = io::stdout().lock();
            writeln!(out, "field\twire\ttype\trequired\tnullable")?;
            for field in schema.fields() {
                writeln!(
                    out,
                    "{}\t{}\t{}\t{}\t{}",
                    field.name(),
                    field.wire_name(),
                    field.converter().describe(),
                    yes_no(field.is_required()),
                    yes_no(field.is_nullable())
                )?;
            }
        }

        Command::Coerce {
            model,
            input,
            canonical,
            json,
        } => {
            let schema = lookup(&model);
            tracing::debug!(model = schema.name(), input = %input, "coercing");
            let parsed = parse_or_exit(schema, &input, json)?;

            if canonical {
                let out = canonical_model_json(&parsed)
                    .unwrap_or_else(|e| fail_conversion(&from_convert_error(&e), e, json));
                println!("{out}");
            } else {
                let wire = parsed
                    .dump(&mut DumpState::new())
                    .unwrap_or_else(|e| fail_conversion(&from_convert_error(&e), e, json));
                println!("{wire:#}");
            }
        }

        Command::Request {
            model,
            input,
            uploads,
            max_retries,
            timeout_ms,
            json,
        } => {
            let schema = lookup(&model);
            let mut parsed = parse_or_exit(schema, &input, json)?;

            for arg in &uploads {
                let (field, path) = arg
                    .split_once('=')
                    .unwrap_or_else(|| exit_with(1, format!("invalid --upload `{arg}`, expected FIELD=PATH")));
                let upload = UploadResource::from_path(path)
                    .unwrap_or_else(|e| exit_with(1, format!("{path}: {e}")));
                tracing::debug!(field, path, "attaching upload");
                if let Err(e) = parsed.set(field, Field::Value(TypedValue::Upload(upload))) {
                    fail_conversion(&from_convert_error(&e), e, json);
                }
            }

            let options = RequestOptions {
                max_retries,
                timeout_ms,
                ..RequestOptions::default()
            };
            let prepared = prepare_model(&parsed, &options, &RetryPolicy::default())
                .unwrap_or_else(|e| fail_conversion(&e.diagnostics(), e, json));

            let parts: Vec<Value> = prepared
                .body
                .uploads
                .iter()
                .map(|p| {
                    json!({
                        "path": p.path,
                        "filename": p.filename,
                        "content_type": p.content_type,
                        "size": p.bytes.len(),
                    })
                })
                .collect();
            let summary = json!({
                "body": prepared.body.json,
                "uploads": parts,
                "can_retry": prepared.body.can_retry,
                "max_retries": prepared.max_retries,
                "timeout_ms": prepared.timeout_ms,
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
