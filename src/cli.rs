use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "opencode-lombok")]
#[command(about = "Detect Lombok in a Java project and wire lombok.jar into jdtls as a javaagent")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Base data directory (defaults to the platform opencode data dir)
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Use this lombok.jar location instead of <data-dir>/bin/jdtls/bin/lombok.jar
    #[arg(long, value_name = "FILE")]
    pub jar: Option<PathBuf>,

    /// Never download lombok.jar
    #[arg(long)]
    pub no_download: bool,

    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Environment variable holding the JVM options to augment
    #[arg(long, value_name = "NAME")]
    pub options_var: Option<String>,

    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Print whether the project depends on Lombok
    Detect {
        #[arg(value_name = "DIR", default_value = ".")]
        path: PathBuf,
    },
    /// Make sure lombok.jar exists locally and print its path
    Provision,
    /// Print JVM options with the lombok javaagent appended
    Merge {
        #[arg(long, value_name = "OPTS", allow_hyphen_values = true)]
        existing: Option<String>,

        #[arg(value_name = "JAR")]
        jar: String,
    },
    /// Run detection, provisioning and merging for a project
    Configure {
        #[arg(value_name = "DIR", default_value = ".")]
        path: PathBuf,

        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Print the resolved data directory and jar location
    DataDir,
    /// Configure the project, then run a command with the options installed
    Exec {
        #[arg(long, value_name = "DIR", default_value = ".")]
        path: PathBuf,

        #[arg(value_name = "CMD", required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Shell,
    Value,
}
