use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use protoschema::{
    CompileOptions, compile_descriptor_set_with_options,
    core::{PresencePolicy, format_file_schema},
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "schemadump",
    about = "Print the resolved schema model of a protobuf descriptor set"
)]
struct Cli {
    /// Path to a serialized google.protobuf.FileDescriptorSet
    input: PathBuf,

    /// Only print the file with this name (e.g. "acme/v1/order.proto")
    #[arg(short, long)]
    file: Option<String>,

    /// FileOptions extension carrying a module-prefix override
    #[arg(long)]
    module_prefix_extension: Option<String>,

    /// Treat scalar fields as never nullable in derived shapes
    #[arg(long)]
    always_default: bool,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Cli {
    fn compile_options(&self) -> CompileOptions {
        let policy = if self.always_default {
            PresencePolicy::AlwaysDefault
        } else {
            PresencePolicy::PresenceAware
        };
        CompileOptions {
            presence_policy: policy,
            module_prefix_extension: self.module_prefix_extension.clone(),
        }
    }

    fn run(self) -> Result<()> {
        let data = fs::read(&self.input)
            .with_context(|| format!("failed to read {}", self.input.display()))?;
        let files = compile_descriptor_set_with_options(&data, &self.compile_options())?;

        let mut text = String::new();
        for file in files
            .iter()
            .filter(|f| self.file.as_ref().is_none_or(|name| &f.name == name))
        {
            text.push_str(&format_file_schema(file)?);
        }

        match self.output {
            Some(path) => fs::write(path, text)?,
            None => print!("{text}"),
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    Cli::parse().run()
}
