use anyhow::Context;
use clap::{Parser, Subcommand};
use pipegraf::filter::compute_implicit_namepass;
use pipegraf::model::{NodeRole, Pipeline};
use pipegraf::{render, schema};

#[derive(Parser)]
#[command(name = "pipegraf")]
#[command(about = "Pipeline graph compiler for Telegraf configs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a pipeline blob into a Telegraf config document.
    Render {
        /// Pipeline JSON (legacy secret-store shapes are upgraded at load).
        #[arg(long)]
        pipeline: String,

        /// Output path; stdout when omitted.
        #[arg(short = 'o', long)]
        out: Option<String>,
    },

    /// Validate a pipeline and report the implicit namepass per output.
    Check {
        #[arg(long)]
        pipeline: String,
    },

    /// Parse a plugin README into a structured field schema (JSON).
    Fields {
        #[arg(long)]
        readme: String,

        #[arg(long)]
        plugin: String,

        /// Plugin role: input, processor, aggregator, serializer or output.
        #[arg(long)]
        role: String,

        #[arg(short = 'o', long)]
        out: Option<String>,
    },
}

fn main() -> pipegraf::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Render { pipeline, out } => {
            let doc = render::render(&load_pipeline(&pipeline)?)?;
            emit(out.as_deref(), &doc)?;
        }

        Commands::Check { pipeline } => {
            let pipeline = load_pipeline(&pipeline)?;
            pipeline.validate()?;

            let implicit = compute_implicit_namepass(&pipeline);
            if implicit.is_empty() {
                println!("ok: no implicit filters needed");
            }
            for (output_id, names) in implicit {
                println!("output {}: inherits namepass = {:?}", output_id, names);
            }
        }

        Commands::Fields {
            readme,
            plugin,
            role,
            out,
        } => {
            let role = parse_role(&role)?;
            let text = std::fs::read_to_string(&readme)
                .with_context(|| format!("read readme {}", readme))?;

            // Accept either a full README (toml fence extracted) or a bare
            // config block.
            let block = schema::extract_config_block(&text).unwrap_or(text);
            let parsed = schema::parse(&block, &plugin, role);
            emit(out.as_deref(), &serde_json::to_string_pretty(&parsed)?)?;
        }
    }

    Ok(())
}

fn load_pipeline(path: &str) -> pipegraf::Result<Pipeline> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read pipeline {}", path))?;
    Pipeline::from_json(&text)
}

fn parse_role(raw: &str) -> pipegraf::Result<NodeRole> {
    serde_json::from_value(serde_json::Value::String(raw.to_string()))
        .with_context(|| format!("unknown role: {}", raw))
}

fn emit(out: Option<&str>, content: &str) -> pipegraf::Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, content).with_context(|| format!("write {}", path))?;
            println!("Wrote {}", path);
        }
        None => println!("{}", content),
    }
    Ok(())
}
