//! Command line front end for timetable lookups.
//!
//! # Responsibility
//! - Load configuration, start logging and open the database.
//! - Print student or teacher timetables, one lesson per line.

use clap::{Args, Parser, Subcommand};
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;
use university_core::{
    init_logging_from_config, CoreConfig, SqliteTimetableRepository, TimetableService,
};

#[derive(Parser)]
#[command(name = "university_cli")]
#[command(about = "Query the university timetable database")]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// SQLite database file; overrides `database.path` from the config.
    #[arg(long)]
    db: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print core linkage information
    Ping,
    /// Print a student's timetable
    StudentTimetable(TimetableArgs),
    /// Print a teacher's timetable
    TeacherTimetable(TimetableArgs),
}

#[derive(Args)]
struct TimetableArgs {
    #[arg(long)]
    id: i64,
    /// First day, yyyy-MM-dd.
    #[arg(long)]
    from: String,
    /// Last day, yyyy-MM-dd.
    #[arg(long)]
    to: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("event=cli_run module=cli status=error error={message}");
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let mut config = match &cli.config {
        Some(path) => CoreConfig::load(path).map_err(|err| err.to_string())?,
        None => CoreConfig::default(),
    };
    if let Some(db) = cli.db {
        config.database.path = Some(db);
    }
    init_logging_from_config(&config.logging)?;

    if let Commands::Ping = cli.command {
        println!("university_core ping={}", university_core::ping());
        println!("university_core version={}", university_core::core_version());
        return Ok(());
    }

    let conn = config.open_database().map_err(|err| err.to_string())?;
    let repo = SqliteTimetableRepository::try_new(&conn).map_err(|err| err.to_string())?;
    let service = TimetableService::new(repo);

    let timetable = match cli.command {
        Commands::StudentTimetable(args) => {
            service.student_timetable(args.id, &args.from, &args.to)
        }
        Commands::TeacherTimetable(args) => {
            service.teacher_timetable(args.id, &args.from, &args.to)
        }
        Commands::Ping => return Ok(()),
    }
    .map_err(|err| err.to_string())?;

    if timetable.is_empty() {
        println!(
            "no lessons between {} and {}",
            timetable.interval.start, timetable.interval.end
        );
    } else {
        print!("{timetable}");
    }
    Ok(())
}
