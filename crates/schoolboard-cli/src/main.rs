use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use schoolboard_cli::admin::{NewAdmin, create_admin};
use schoolboard_cli::seeder::{self, SeedConfig};
use schoolboard_config::IdentityConfig;
use schoolboard_identity::IdentityClient;
use sqlx::PgPool;

#[derive(Parser)]
#[command(name = "schoolboard-cli")]
#[command(about = "Schoolboard CLI - Administrative tools for Schoolboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an administrator: identity account plus admin row
    CreateAdmin {
        /// Sign-in username (3-20 characters)
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// First name
        #[arg(short = 'f', long)]
        first_name: Option<String>,

        /// Last name
        #[arg(short = 'l', long)]
        last_name: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with a demo school
    Seed {
        /// Number of grades
        #[arg(long, default_value = "6")]
        grades: usize,

        /// Number of classes per grade
        #[arg(long, default_value = "1")]
        classes_per_grade: usize,

        /// Number of teachers
        #[arg(long, default_value = "15")]
        teachers: usize,

        /// Number of lessons
        #[arg(long, default_value = "30")]
        lessons: usize,

        /// Number of parents
        #[arg(long, default_value = "25")]
        parents: usize,

        /// Number of students
        #[arg(short = 's', long, default_value = "50")]
        students: usize,

        /// Number of exams, assignments, results and attendance records each
        #[arg(long, default_value = "10")]
        coursework: usize,

        /// Number of events and announcements each
        #[arg(long, default_value = "5")]
        notices: usize,
    },
    /// Clear all seeded data (keeps admins created with create-admin)
    ClearSeed,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let pool = match schoolboard_db::init_db_pool().await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("❌ Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    let cli = Cli::parse();

    match cli.command {
        Commands::CreateAdmin {
            username,
            first_name,
            last_name,
            password,
        } => handle_create_admin(&pool, username, first_name, last_name, password).await,
        Commands::Seed {
            grades,
            classes_per_grade,
            teachers,
            lessons,
            parents,
            students,
            coursework,
            notices,
        } => {
            let config = SeedConfig {
                grades,
                classes_per_grade,
                teachers,
                lessons,
                parents,
                students,
                exams: coursework,
                assignments: coursework,
                results: coursework,
                attendance: coursework,
                events: notices,
                announcements: notices,
            };
            handle_seed(&pool, &config).await
        }
        Commands::ClearSeed => handle_clear_seed(&pool).await,
    }
}

fn prompt(value: Option<String>, label: &str) -> String {
    value.unwrap_or_else(|| {
        Input::new()
            .with_prompt(label)
            .interact_text()
            .unwrap_or_else(|e| {
                eprintln!("❌ Failed to read {}: {}", label.to_lowercase(), e);
                std::process::exit(1);
            })
    })
}

async fn handle_create_admin(
    pool: &PgPool,
    username: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    password: Option<String>,
) {
    let username = prompt(username, "Username");
    let first_name = prompt(first_name, "First name");
    let last_name = prompt(last_name, "Last name");
    let password = password.unwrap_or_else(|| {
        Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .unwrap_or_else(|e| {
                eprintln!("❌ Failed to read password: {}", e);
                std::process::exit(1);
            })
    });

    let identity = match IdentityClient::from_config(&IdentityConfig::from_env()) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("❌ Identity provider unavailable: {}", e);
            std::process::exit(1);
        }
    };
    if identity.as_memory().is_some() {
        println!("⚠️  Using the in-memory identity provider; the account will not outlive this process.");
    }

    let admin = NewAdmin {
        username,
        password,
        first_name,
        last_name,
    };

    match create_admin(pool, &identity, admin).await {
        Ok(created) => {
            println!("\n✅ Admin created successfully!");
            println!("   Username: {}", created.username);
            println!("   Identity id: {}", created.id);
        }
        Err(e) => {
            eprintln!("\n❌ Error creating admin: {}", e);
            for field in e.fields() {
                eprintln!("   {}: {}", field.field, field.message);
            }
            std::process::exit(1);
        }
    }
}

async fn handle_seed(pool: &PgPool, config: &SeedConfig) {
    if let Err(e) = seeder::seed_all(pool, config).await {
        eprintln!("\n❌ Error seeding database: {}", e);
        eprintln!("   Run `clear-seed` first if the database already holds seed data.");
        std::process::exit(1);
    }
}

async fn handle_clear_seed(pool: &PgPool) {
    if let Err(e) = seeder::clear_all(pool).await {
        eprintln!("\n❌ Error clearing seeded data: {}", e);
        std::process::exit(1);
    }
}
