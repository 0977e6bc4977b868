use std::path::{Path, PathBuf};

use builder_codegen::model::DeclarationResolver;
use builder_codegen::{generate, project, GenerateOptions};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "builder-codegen")]
#[command(about = "Generates fluent builder companions for class declarations")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate builder sources for every marked class in the project.
    Generate {
        /// Project description file.
        #[arg(short, long)]
        project: PathBuf,

        /// Output directory for generated sources.
        #[arg(short, long, default_value = "generated")]
        out: PathBuf,

        /// Skip the copy constructor on generated builders.
        #[arg(long)]
        no_copy_constructor: bool,
    },

    /// Run generation without writing any files.
    Check {
        /// Project description file.
        #[arg(short, long)]
        project: PathBuf,

        /// Skip the copy constructor on generated builders.
        #[arg(long)]
        no_copy_constructor: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate {
            project,
            out,
            no_copy_constructor,
        } => run(&project, Some(&out), no_copy_constructor),
        Commands::Check {
            project,
            no_copy_constructor,
        } => run(&project, None, no_copy_constructor),
    }
}

fn run(
    project_path: &Path,
    out: Option<&Path>,
    no_copy_constructor: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let project = project::load(project_path)?;
    let options = GenerateOptions {
        copy_constructor: !no_copy_constructor,
    };

    // One failing target must not block the others; record and move on.
    let mut failed = 0usize;
    for &target in &project.targets {
        match generate(&project.model, target, &options) {
            Ok(unit) => match out {
                Some(out) => {
                    let path = out.join(unit.relative_path());
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &unit.text)?;
                    tracing::info!(file = %path.display(), "wrote builder");
                }
                None => {
                    tracing::info!(builder = %unit.name, "builder ok");
                }
            },
            Err(err) => {
                failed += 1;
                tracing::error!(
                    target_type = %project.model.qualified_name(target),
                    error = %err,
                    "builder generation failed"
                );
            }
        }
    }

    if failed > 0 {
        return Err(format!("builder generation failed for {failed} target(s)").into());
    }
    Ok(())
}
