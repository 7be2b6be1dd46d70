use clap::{Parser, Subcommand};
use linguadesk_access::RoleRegistry;
use linguadesk_cli::report::{self, Query};

#[derive(Parser)]
#[command(name = "linguadesk-cli")]
#[command(about = "Linguadesk CLI - Inspect roles and evaluate access rules", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every role with a summary of its grants
    Roles,
    /// Evaluate one access check for a role (exit code 1 when denied)
    Check {
        /// Role id, e.g. teacher
        #[arg(short = 'r', long)]
        role: String,

        /// Page path, e.g. /teacher/homework
        #[arg(short = 'p', long)]
        page: Option<String>,

        /// Page action: read, write, delete, admin (default read)
        #[arg(short = 'a', long)]
        action: Option<String>,

        /// Function name, e.g. homework_submission
        #[arg(short = 'f', long)]
        function: Option<String>,

        /// Data category, e.g. students
        #[arg(short = 'd', long)]
        data: Option<String>,

        /// Special permission, e.g. manage_roles
        #[arg(short = 's', long)]
        special: Option<String>,
    },
    /// List the pages a role can read and the actions it holds on each
    Pages {
        /// Role id
        #[arg(short = 'r', long)]
        role: String,
    },
}

fn main() {
    let cli = Cli::parse();
    let registry = RoleRegistry::with_defaults();

    match cli.command {
        Commands::Roles => print!("{}", report::roles_table(&registry)),
        Commands::Check {
            role,
            page,
            action,
            function,
            data,
            special,
        } => handle_check(&registry, &role, page, action, function, data, special),
        Commands::Pages { role } => match report::pages_table(&registry, &role) {
            Ok(table) => print!("{table}"),
            Err(e) => {
                eprintln!("❌ {}", e);
                std::process::exit(2);
            }
        },
    }
}

fn handle_check(
    registry: &RoleRegistry,
    role: &str,
    page: Option<String>,
    action: Option<String>,
    function: Option<String>,
    data: Option<String>,
    special: Option<String>,
) {
    let query = match Query::from_flags(page, action, function, data, special) {
        Ok(query) => query,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(2);
        }
    };

    if report::evaluate(registry, role, &query) {
        println!("✅ {} may {}", role, query.describe());
    } else {
        println!("⛔ {} may not {}", role, query.describe());
        std::process::exit(1);
    }
}
