use anyhow::{Context, Result, bail};
use clap::Parser;
use opencode_lombok::agent::merge_options;
use opencode_lombok::cli::{Cli, Commands, OutputFormat};
use opencode_lombok::config::{Settings, options_var};
use opencode_lombok::configure::{Outcome, configure};
use opencode_lombok::logging::init_logging;
use opencode_lombok::platform::{Env, Platform};
use opencode_lombok::provision::{HttpSource, ensure_jar};
use opencode_lombok::scan::project_uses_lombok;
use std::path::Path;
use std::process::{Command, ExitCode};

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let home = dirs::home_dir();
    dispatch(cli, &Env::from_process(), home.as_deref())
}

/// Home is only resolved by the subcommands that need a data directory.
fn dispatch(cli: Cli, env: &Env, home: Option<&Path>) -> Result<ExitCode> {
    let settings = || -> Result<Settings> {
        let settings = Settings::resolve(&cli, Platform::current(), env, home)?;
        tracing::debug!(?settings, "resolved settings");
        Ok(settings)
    };

    match &cli.command {
        Commands::Detect { path } => {
            println!("{}", project_uses_lombok(path));
        }
        Commands::Provision => {
            let settings = settings()?;
            let source = HttpSource::default();
            let Some(jar) = ensure_jar(
                &settings.jar_path,
                settings.download_disabled,
                &source,
                &settings.download_url,
            ) else {
                bail!("lombok.jar unavailable");
            };
            println!("{}", jar.display());
        }
        Commands::Merge { existing, jar } => {
            let existing = existing
                .as_deref()
                .or_else(|| env.get(options_var(&cli)));
            println!("{}", merge_options(existing, jar));
        }
        Commands::Configure { path, format } => {
            let outcome = configure(path, &settings()?, &HttpSource::default());
            print!("{}", render_outcome(&outcome, *format)?);
        }
        Commands::DataDir => {
            let settings = settings()?;
            println!("data_dir: {}", settings.data_dir.display());
            println!("jar: {}", settings.jar_path.display());
        }
        Commands::Exec { path, command } => {
            let outcome = configure(path, &settings()?, &HttpSource::default());
            return exec_with(&outcome, command);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn render_outcome(outcome: &Outcome, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(outcome)?),
        OutputFormat::Shell => match outcome.env_assignment() {
            Some((name, value)) => {
                let quoted = shlex::try_quote(value)
                    .with_context(|| format!("Cannot shell-quote value of {name}"))?;
                format!("export {name}={quoted}\n")
            }
            None => String::new(),
        },
        OutputFormat::Value => match outcome.env_assignment() {
            Some((_, value)) => format!("{value}\n"),
            None => String::new(),
        },
    };
    Ok(rendered)
}

fn exec_with(outcome: &Outcome, command: &[String]) -> Result<ExitCode> {
    let (program, args) = command
        .split_first()
        .context("No command given to exec")?;

    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some((name, value)) = outcome.env_assignment() {
        cmd.env(name, value);
    }

    let status = cmd
        .status()
        .with_context(|| format!("Failed to execute {program}"))?;
    let code = status
        .code()
        .and_then(|c| u8::try_from(c).ok())
        .map(ExitCode::from)
        .unwrap_or(ExitCode::FAILURE);
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["opencode-lombok"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    fn configured(options: &str) -> Outcome {
        Outcome::Configured {
            jar: PathBuf::from("/tmp/lombok.jar"),
            options_var: "JAVA_TOOL_OPTIONS".to_string(),
            options: options.to_string(),
        }
    }

    #[test]
    fn shell_format_quotes_the_value() {
        let out = render_outcome(
            &configured("-Xmx2g -javaagent:/tmp/lombok.jar"),
            OutputFormat::Shell,
        )
        .unwrap();
        assert_eq!(
            out,
            "export JAVA_TOOL_OPTIONS='-Xmx2g -javaagent:/tmp/lombok.jar'\n"
        );
    }

    #[test]
    fn value_format_is_empty_when_not_configured() {
        let out = render_outcome(&Outcome::NotDetected, OutputFormat::Value).unwrap();
        assert!(out.is_empty());
        let out = render_outcome(&Outcome::NotDetected, OutputFormat::Shell).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn json_format_carries_status() {
        let out = render_outcome(&configured("-javaagent:/tmp/lombok.jar"), OutputFormat::Json)
            .unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["status"], "configured");
        assert_eq!(v["options"], "-javaagent:/tmp/lombok.jar");
    }

    #[test]
    fn detect_and_merge_run_without_home() {
        let project = tempfile::tempdir().unwrap();
        let detect = parse(&["detect", &project.path().to_string_lossy()]);
        assert!(dispatch(detect, &Env::new(), None).is_ok());

        let merge = parse(&["merge", "--existing", "-Xmx2g", "/tmp/lombok.jar"]);
        assert!(dispatch(merge, &Env::new(), None).is_ok());
    }

    #[test]
    fn data_dir_needs_home_unless_overridden() {
        let err = dispatch(parse(&["data-dir"]), &Env::new(), None).unwrap_err();
        assert!(err.to_string().contains("home directory"));

        let overridden = parse(&["--data-dir", "/custom", "data-dir"]);
        assert!(dispatch(overridden, &Env::new(), None).is_ok());
    }
}
