mod render;
mod store;
mod transport;


use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use bookshelf::catalog::{BookList, DELETE_CONFIRMATION, DELETE_FAILED};
use bookshelf::config::{API_URL_ENV, ApiConfig, DEFAULT_API_URL};
use bookshelf::form::{BookDraft, BookField, BookForm, LoginForm, RegisterForm};
use bookshelf::{ApiClient, ApiError};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use crate::store::FileStore;
use crate::transport::{ReqwestTransport, TerminalNavigator};

type CliClient = ApiClient<FileStore, ReqwestTransport, TerminalNavigator>;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("not logged in; run `bookshelf login` first")]
    NotLoggedIn,
    #[error("{0}")]
    Failed(String),
    #[error("aborted")]
    Aborted,
    #[error("failed to read from terminal: {0}")]
    Io(#[from] io::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "bookshelf", about = "Personal book catalog client")]
struct Cli {
    #[arg(long, env = API_URL_ENV, default_value = DEFAULT_API_URL)]
    base_url: String,

    #[arg(long, env = "BOOKSHELF_SESSION_FILE", default_value = ".bookshelf-session.json")]
    session_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the session token.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "BOOKSHELF_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and store the session token.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "BOOKSHELF_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out and forget the stored session.
    Logout,
    /// Show the signed-in user from the stored session.
    Whoami,
    Books(BooksCommand),
}

#[derive(Args, Debug)]
struct BooksCommand {
    #[command(subcommand)]
    command: BooksSubcommand,
}

#[derive(Subcommand, Debug)]
enum BooksSubcommand {
    List {
        #[arg(long)]
        json: bool,
    },
    Show {
        id: i64,
        #[arg(long)]
        json: bool,
    },
    Add(BookFields),
    Edit {
        id: i64,
        #[command(flatten)]
        fields: BookFields,
    },
    Delete {
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Args, Debug, Default)]
struct BookFields {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    author: Option<String>,
    #[arg(long)]
    isbn: Option<String>,
    #[arg(long)]
    published_date: Option<String>,
    #[arg(long)]
    description: Option<String>,
}

impl BookFields {
    /// Overwrite draft fields that were given on the command line.
    fn apply_to(self, draft: &mut BookDraft) {
        let overrides = [
            (BookField::Title, self.title),
            (BookField::Author, self.author),
            (BookField::Isbn, self.isbn),
            (BookField::PublishedDate, self.published_date),
            (BookField::Description, self.description),
        ];
        for (field, value) in overrides {
            if let Some(value) = value {
                draft.set(field, value);
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let client = ApiClient::new(
        ApiConfig::new(Some(&cli.base_url)),
        FileStore::new(&cli.session_file),
        ReqwestTransport::new(),
        TerminalNavigator,
    );
    tracing::debug!(base_url = client.config().base_url(), "starting");

    match cli.command {
        Command::Login { email, password } => run_login(&client, email, password).await,
        Command::Register {
            name,
            email,
            password,
        } => run_register(&client, name, email, password).await,
        Command::Logout => {
            client.logout().await;
            println!("Logged out.");
            Ok(())
        }
        Command::Whoami => run_whoami(&client),
        Command::Books(books) => run_books(&client, books).await,
    }
}

async fn run_login(client: &CliClient, email: String, password: String) -> Result<(), CliError> {
    let mut form = LoginForm {
        email,
        password,
        ..LoginForm::default()
    };
    match form.submit(client).await {
        Some(user) => {
            println!("Logged in as {} <{}>", user.name, user.email);
            Ok(())
        }
        None => Err(CliError::Failed(form.error.unwrap_or_default())),
    }
}

async fn run_register(
    client: &CliClient,
    name: String,
    email: String,
    password: String,
) -> Result<(), CliError> {
    let mut form = RegisterForm {
        name,
        email,
        password,
        ..RegisterForm::default()
    };
    match form.submit(client).await {
        Some(user) => {
            println!("Registered {} <{}>", user.name, user.email);
            Ok(())
        }
        None => Err(CliError::Failed(form.error.unwrap_or_default())),
    }
}

fn run_whoami(client: &CliClient) -> Result<(), CliError> {
    let user = client.session().restore().ok_or(CliError::NotLoggedIn)?;
    println!("{} <{}>", user.name, user.email);
    Ok(())
}

async fn run_books(client: &CliClient, books: BooksCommand) -> Result<(), CliError> {
    // Book screens are only reachable with a session, like the web routes.
    if !client.session().is_authenticated() {
        return Err(CliError::NotLoggedIn);
    }

    match books.command {
        BooksSubcommand::List { json } => {
            let mut list = BookList::default();
            list.load(client).await;
            if let Some(error) = list.error.take() {
                return Err(CliError::Failed(error));
            }
            if json {
                print_json(&serde_json::to_value(&list.books)?)
            } else {
                println!("{}", render::render_list(&list));
                Ok(())
            }
        }
        BooksSubcommand::Show { id, json } => {
            let book = client
                .get_book(id)
                .await
                .map_err(|error| failure(&error, bookshelf::form::LOAD_BOOK_FAILED))?;
            if json {
                print_json(&serde_json::to_value(&book)?)
            } else {
                println!("{}", render::render_book(&book));
                Ok(())
            }
        }
        BooksSubcommand::Add(fields) => {
            let mut form = BookForm::create();
            fields.apply_to(&mut form.draft);
            save(client, form).await
        }
        BooksSubcommand::Edit { id, fields } => {
            let mut form = BookForm::edit(id);
            form.load(client).await;
            if let Some(error) = form.error.take() {
                return Err(CliError::Failed(error));
            }
            fields.apply_to(&mut form.draft);
            save(client, form).await
        }
        BooksSubcommand::Delete { id, yes } => {
            if !yes && !confirm(DELETE_CONFIRMATION, io::stdin().lock(), io::stderr())? {
                return Err(CliError::Aborted);
            }
            let mut list = BookList::default();
            if !list.delete(client, id).await {
                return Err(CliError::Failed(
                    list.error.unwrap_or_else(|| DELETE_FAILED.to_owned()),
                ));
            }
            println!("Deleted book #{id}.");
            Ok(())
        }
    }
}

async fn save(client: &CliClient, mut form: BookForm) -> Result<(), CliError> {
    match form.submit(client).await {
        Some(book) => {
            println!("{}", render::render_book(&book));
            Ok(())
        }
        None => Err(CliError::Failed(form.error.unwrap_or_default())),
    }
}

fn failure(error: &ApiError, fallback: &str) -> CliError {
    tracing::debug!(%error, "command failed");
    CliError::Failed(error.user_message(fallback))
}

/// Ask a yes/no question; anything but `y`/`yes` declines.
fn confirm(question: &str, mut input: impl BufRead, mut output: impl Write) -> Result<bool, CliError> {
    write!(output, "{question} [y/N] ")?;
    output.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
