use clap::{Parser, ValueEnum};
use migration::{migrate, MigrationCommand};
use sea_orm::Database;

#[derive(Clone, Copy, ValueEnum)]
enum Command {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

impl From<Command> for MigrationCommand {
    fn from(command: Command) -> Self {
        match command {
            Command::Up => MigrationCommand::Up,
            Command::Down => MigrationCommand::Down,
            Command::Fresh => MigrationCommand::Fresh,
            Command::Reset => MigrationCommand::Reset,
            Command::Refresh => MigrationCommand::Refresh,
            Command::Status => MigrationCommand::Status,
        }
    }
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Social backend database migration tool")]
struct Args {
    /// Migration command to run
    #[arg(value_enum)]
    command: Command,

    /// Database URL (postgres://... or sqlite://path?mode=rwc)
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("migration=info,sqlx=warn")
        .init();

    let args = Args::parse();

    if args.database_url.contains(":memory:") {
        eprintln!("❌ SQLite in-memory databases are not supported for CLI operations.");
        eprintln!("The database would be destroyed as soon as the command completes.");
        std::process::exit(2);
    }

    let db = match Database::connect(&args.database_url).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("❌ Failed to connect to database: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = migrate(&db, args.command.into()).await {
        eprintln!("Migration failed: {e}");
        std::process::exit(1);
    }
}
