use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::info;
use thiserror::Error;

use gradebook::{
    import_marks, sample_marks_csv, student_marks, AccessError, Config, ConfigError, ExamKind,
    MemoryStore, Role, Session, StudentId, SubjectId, UserId, ViewError,
};

/// Any kind of error in the pipeline marks file -> store -> report.
#[derive(Debug, Error)]
pub enum Error {
    #[error("no store file configured, use --store or a config file")]
    MissingStore,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("error during CSV processing: {0}")]
    CsvError(#[from] csv::Error),
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error(transparent)]
    View(#[from] ViewError),
}

/// Manage marks of a school gradebook.
#[derive(Debug, Parser)]
#[clap(version)]
struct Args {
    /// Configuration file
    #[clap(long, default_value = "gradebook.toml")]
    config: PathBuf,
    /// CSV file holding stored marks, overrides the configuration
    #[clap(long)]
    store: Option<PathBuf>,
    /// Acting user, overrides the configuration
    #[clap(long, requires = "role")]
    user: Option<String>,
    /// Role of the acting user
    #[clap(long, requires = "user")]
    role: Option<Role>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Import a marks file for one subject and exam
    Import {
        file: PathBuf,
        #[clap(long)]
        subject: String,
        #[clap(long)]
        exam: ExamKind,
    },
    /// Print a sample marks file
    Template,
    /// Print the marks of a student
    Show { student: String },
    /// Print every stored mark
    Dump,
}

fn load_config(args: &Args) -> Result<Config, Error> {
    // A missing config file is fine as long as the flags say everything needed
    let mut config = if args.config.exists() {
        Config::load(&args.config)?
    } else {
        Config::default()
    };
    if let Some(store) = &args.store {
        config.store.path = store.clone();
    }
    if config.store.path.as_os_str().is_empty() {
        return Err(Error::MissingStore);
    }
    Ok(config)
}

fn session(args: &Args, config: &Config) -> Session {
    match (&args.user, args.role) {
        (Some(user), Some(role)) => Session::new(UserId::from(user.as_str()), role),
        _ => config.session(),
    }
}

fn load_store(path: &Path) -> Result<MemoryStore, Error> {
    if !path.exists() {
        info!("{} does not exist yet, starting from an empty store", path.display());
        return Ok(MemoryStore::new());
    }
    Ok(MemoryStore::load_csv(&mut csv::Reader::from_path(path)?)?)
}

async fn save_store(store: &MemoryStore, path: &Path) -> Result<(), Error> {
    let mut writer = csv::Writer::from_path(path)?;
    store.dump_csv(&mut writer).await?;
    Ok(())
}

/// Everything a command touching marks works with.
struct Context {
    config: Config,
    session: Session,
    store: MemoryStore,
}

fn open(args: &Args) -> Result<Context, Error> {
    let config = load_config(args)?;
    let session = session(args, &config);
    let store = load_store(&config.store.path)?;
    Ok(Context {
        config,
        session,
        store,
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    let args = Args::parse();

    match &args.command {
        Command::Import {
            file,
            subject,
            exam,
        } => {
            let input = std::fs::read_to_string(file).map_err(|source| Error::Io {
                path: file.clone(),
                source,
            })?;
            let Context {
                config,
                session,
                store,
            } = open(&args)?;
            let subject = SubjectId::from(subject.as_str());
            let summary = import_marks(&session, &store, &input, &subject, *exam).await?;
            save_store(&store, &config.store.path).await?;

            println!("{}", summary);
            for note in summary.notes.iter() {
                println!("  {}", note);
            }
        }
        Command::Template => print!("{}", sample_marks_csv()),
        Command::Show { student } => {
            let context = open(&args)?;
            let student = StudentId::from(student.as_str());
            let records = student_marks(&context.session, &context.store, &student).await?;
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            for record in records {
                writer.serialize(record)?;
            }
            writer.flush().map_err(csv::Error::from)?;
        }
        Command::Dump => {
            let context = open(&args)?;
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            context.store.dump_csv(&mut writer).await?;
        }
    }

    Ok(())
}
