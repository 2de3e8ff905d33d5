use clap::{Parser, Subcommand};
use elmavize_backend::config::Config;
use elmavize_backend::helper::form_helpers::{is_valid_email, MIN_PASSWORD_LENGTH};
use elmavize_backend::models::db_operations::users_db_operations;
use elmavize_backend::models::UserRole;
use elmavize_backend::setup::{db_setup, seed};
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "setup_cli", author, version, about = "A CLI for initial site setup.", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the .env configuration file.
    #[arg(long, required = true, value_name = "FILE")]
    env_file: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand, Debug)]
enum DbAction {
    /// Creates the database file and its tables.
    Setup,
    /// Loads sample countries, programs, posts, FAQs and pages into an empty database.
    Seed,
}

#[derive(Subcommand, Debug)]
enum AdminAction {
    Create {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "Admin")]
        name: String,
    },
    List,
    ChangePassword {
        #[arg(long)]
        email: String,
        #[arg(long)]
        new_password: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = Config::from_env(&cli.env_file)
        .expect("FATAL: Failed to load or parse configuration.");

    env_logger::init_from_env(env_logger::Env::new().default_filter_or(&config.log_level));

    match &cli.command {
        Commands::Db { action } => match action {
            DbAction::Setup => setup_database(&config),
            DbAction::Seed => seed_database(&config),
        },
        Commands::Admin { action } => match action {
            AdminAction::Create { email, password, name } => {
                create_admin_user(&config, email, password, name);
            }
            AdminAction::List => {
                list_admin_users(&config);
            }
            AdminAction::ChangePassword { email, new_password } => {
                change_admin_password(&config, email, new_password);
            }
        },
    }
}

fn open_existing(config: &Config) -> Option<Connection> {
    let db_path = config.database_file();
    if !db_path.exists() {
        eprintln!("❌ Error: Database not found at '{}'. Please run `setup_cli db setup` first.", db_path.display());
        return None;
    }
    match Connection::open(&db_path) {
        Ok(conn) => match db_setup::configure_connection(&conn) {
            Ok(()) => Some(conn),
            Err(e) => {
                eprintln!("❌ Error configuring database connection: {}", e);
                None
            }
        },
        Err(e) => {
            eprintln!("❌ Error opening database: {}", e);
            None
        }
    }
}

fn setup_database(config: &Config) {
    let db_path = config.database_file();
    if db_path.exists() {
        println!("ℹ️ Database already exists at '{}'. Missing tables will be created.", db_path.display());
    } else {
        println!("\nSetting up database at '{}'...", db_path.display());
    }

    if let Some(parent_dir) = db_path.parent() {
        if let Err(e) = fs::create_dir_all(parent_dir) {
            eprintln!("❌ Error: Could not create database directory: {}", e);
            return;
        }
    }

    let mut conn = match Connection::open(&db_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("❌ Error: Could not create database file: {}", e);
            return;
        }
    };
    match db_setup::setup_site_db(&mut conn) {
        Ok(_) => println!("✅ Database setup completed successfully."),
        Err(e) => eprintln!("❌ Error setting up database: {}", e),
    }
}

fn seed_database(config: &Config) {
    let Some(mut conn) = open_existing(config) else { return };
    match seed::seed_sample_content(&mut conn) {
        Ok(summary) => println!(
            "✅ Seeded {} countries, {} visa programs, {} blog posts, {} FAQs and {} pages.",
            summary.countries, summary.visa_programs, summary.blog_posts, summary.faqs, summary.pages
        ),
        Err(e) => eprintln!("❌ Error seeding database: {}", e),
    }
}

fn create_admin_user(config: &Config, email: &str, password: &str, name: &str) {
    if !is_valid_email(email) {
        eprintln!("❌ Error: '{}' is not a valid email address.", email);
        return;
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        eprintln!("❌ Error: Password must be at least {} characters.", MIN_PASSWORD_LENGTH);
        return;
    }
    let Some(conn) = open_existing(config) else { return };

    match users_db_operations::create_user(&conn, email, password, name, UserRole::Admin) {
        Ok(user) => println!("✅ Admin user '{}' created successfully.", user.email),
        Err(e) => eprintln!("❌ Error creating admin user: {}. It might be because the email already exists.", e),
    }
}

fn list_admin_users(config: &Config) {
    let Some(conn) = open_existing(config) else { return };

    println!("Listing Admin Users:");
    match users_db_operations::read_users_by_role(&conn, UserRole::Admin) {
        Ok(users) if users.is_empty() => println!("(none)"),
        Ok(users) => {
            for user in users {
                println!("- {} <{}> created {}", user.name, user.email, user.created_at.format("%Y-%m-%d"));
            }
        }
        Err(e) => eprintln!("❌ Error fetching admins: {}", e),
    }
}

fn change_admin_password(config: &Config, email: &str, new_password: &str) {
    if new_password.chars().count() < MIN_PASSWORD_LENGTH {
        eprintln!("❌ Error: Password must be at least {} characters.", MIN_PASSWORD_LENGTH);
        return;
    }
    let Some(conn) = open_existing(config) else { return };

    let user = match users_db_operations::read_user_by_email(&conn, email) {
        Some(user) if user.role == UserRole::Admin => user,
        _ => {
            eprintln!("❌ Error: No admin user with email '{}' found.", email);
            return;
        }
    };
    match users_db_operations::update_password(&conn, &user.id, new_password) {
        Ok(()) => println!("✅ Password for admin user '{}' changed successfully.", email),
        Err(e) => eprintln!("❌ Error updating password: {}", e),
    }
}
