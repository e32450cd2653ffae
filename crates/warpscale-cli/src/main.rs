use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "warpscale",
    about = "WarpScale — autoscaler spec converter",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand a schema document into the API spec (JSON).
    ///
    /// The document format is picked from the extension: .toml or .json.
    Expand {
        #[arg(short, long)]
        file: String,
    },
    /// Flatten an API spec (JSON) back into a schema document.
    Flatten {
        #[arg(short, long)]
        file: String,
        /// Output format: toml or json
        #[arg(long, default_value = "toml")]
        format: String,
    },
    /// Print the JSON patch that updates the old spec to the new one.
    Patch {
        #[arg(long)]
        old: String,
        #[arg(long)]
        new: String,
        /// Prefix prepended to every patch path
        #[arg(long, default_value = "/spec")]
        prefix: String,
    },
    /// Check that a schema document expands cleanly.
    Validate {
        #[arg(short, long)]
        file: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("warpscale=info".parse()?)
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Expand { file } => commands::convert::expand(&file),
        Commands::Flatten { file, format } => commands::convert::flatten(&file, &format),
        Commands::Patch { old, new, prefix } => commands::patch::patch(&old, &new, &prefix),
        Commands::Validate { file } => commands::convert::validate(&file),
    }
}
