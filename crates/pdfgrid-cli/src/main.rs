mod commands;
mod output;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pdfgrid",
    version,
    about = "Rebuild tables from PDF text and export them as xlsx"
)]
struct Cli {
    /// Log debug details (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by the commands that reconstruct a table.
#[derive(Args)]
pub struct GridArgs {
    /// JSON options file (column_threshold, row_threshold, sheet_name)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum x distance for two positions to share a column
    #[arg(long, value_name = "N")]
    column_threshold: Option<f64>,

    /// Maximum y distance for two positions to share a row
    #[arg(long, value_name = "N")]
    row_threshold: Option<f64>,

    /// Worksheet name for the table
    #[arg(long, value_name = "NAME")]
    sheet: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert the table in a PDF into an xlsx workbook
    Convert {
        /// Path to PDF file
        input_file: PathBuf,

        /// Workbook to write (default: table_export.xlsx)
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        #[command(flatten)]
        grid: GridArgs,
    },
    /// Print the reconstructed table without writing a workbook
    Preview {
        /// Path to PDF file
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        #[command(flatten)]
        grid: GridArgs,
    },
    /// Manage the student roster
    Roster {
        /// Store directory
        #[arg(long, default_value = commands::DEFAULT_STORE, global = true)]
        store: PathBuf,

        #[command(subcommand)]
        action: RosterAction,
    },
    /// Record and export attendance points
    Attendance {
        /// Store directory
        #[arg(long, default_value = commands::DEFAULT_STORE, global = true)]
        store: PathBuf,

        #[command(subcommand)]
        action: AttendanceAction,
    },
}

#[derive(Subcommand)]
enum RosterAction {
    /// List students
    List,
    /// Add a student
    Add { name: String },
    /// Remove a student and their attendance records
    Remove { name: String },
}

#[derive(Subcommand)]
enum AttendanceAction {
    /// Record one attendance
    Record {
        #[arg(long)]
        student: String,

        /// Day of week (Monday..Sunday)
        #[arg(long)]
        day: String,

        /// Mass time, e.g. "6:30 AM"
        #[arg(long)]
        mass: String,

        /// The student also attended the meeting
        #[arg(long)]
        meeting: bool,
    },
    /// Print point totals per student
    Summary,
    /// Write detailed and summary sheets to an xlsx workbook
    Export {
        /// Workbook to write (default: attendance_report.xlsx)
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Convert {
            input_file,
            out,
            grid,
        } => commands::convert::run(input_file, out, &grid),
        Commands::Preview {
            input_file,
            output,
            grid,
        } => commands::preview::run(input_file, &output, &grid),
        Commands::Roster { store, action } => match action {
            RosterAction::List => commands::roster::list(&store),
            RosterAction::Add { name } => commands::roster::add(&store, &name),
            RosterAction::Remove { name } => commands::roster::remove(&store, &name),
        },
        Commands::Attendance { store, action } => match action {
            AttendanceAction::Record {
                student,
                day,
                mass,
                meeting,
            } => commands::attendance::record(&store, &student, &day, &mass, meeting),
            AttendanceAction::Summary => commands::attendance::summary(&store),
            AttendanceAction::Export { out } => commands::attendance::export(&store, out),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
