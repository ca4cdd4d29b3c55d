//! DMAP CLI Client
//!
//! Command-line interface for a DMAP server. One operation per invocation.

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use dmap::{Client, Config, Value};
use tracing_subscriber::{fmt, EnvFilter};

/// DMAP CLI
#[derive(Parser, Debug)]
#[command(name = "dmap-cli")]
#[command(about = "CLI for a DMAP key-value server")]
#[command(version)]
struct Args {
    /// Server address (host:port)
    server: String,

    /// Connect timeout in milliseconds (0 = blocking)
    #[arg(long, default_value = "0")]
    connect_timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Set a key-value pair
    Set {
        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },

    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Delete a key
    Del {
        /// The key to delete
        key: String,
    },

    /// Update the value of an existing key
    Upd {
        /// The key to update
        key: String,

        /// The new value
        value: String,
    },

    /// Compare-and-exchange; prints the value stored before the operation
    Cmpxchg {
        /// The key to modify
        key: String,

        /// Value to store if the current one matches
        exchange: String,

        /// Value the current one must equal
        comparand: String,
    },
}

impl Commands {
    fn label(&self) -> &'static str {
        match self {
            Commands::Set { .. } => "Set",
            Commands::Get { .. } => "Get",
            Commands::Del { .. } => "Delete",
            Commands::Upd { .. } => "Update",
            Commands::Cmpxchg { .. } => "Cmpxchg",
        }
    }
}

fn main() {
    // Diagnostics go to stdout; keep tracing on stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            println!("{}", e.render());
            std::process::exit(code);
        }
    };

    let config = Config::builder()
        .server_addr(&args.server)
        .connect_timeout_ms(args.connect_timeout_ms)
        .build();

    let mut client = match Client::connect(config) {
        Ok(c) => c,
        Err(e) => {
            println!("Dial failed: {}", e);
            std::process::exit(1);
        }
    };

    let label = args.command.label();
    let result = run(&mut client, args.command);
    client.close();

    match result {
        Ok(Some(value)) => println!("{}", String::from_utf8_lossy(value.trimmed())),
        Ok(None) => {}
        Err(e) => {
            println!("{} key failed: {}", label, e);
            std::process::exit(1);
        }
    }
}

/// Execute one command, returning the value for get and cmpxchg
fn run(client: &mut Client, command: Commands) -> dmap::Result<Option<Value>> {
    match command {
        Commands::Set { key, value } => client.set_key(key, value).map(|_| None),
        Commands::Get { key } => client.get_key(key).map(Some),
        Commands::Del { key } => client.delete_key(key).map(|_| None),
        Commands::Upd { key, value } => client.update_key(key, value).map(|_| None),
        Commands::Cmpxchg {
            key,
            exchange,
            comparand,
        } => client.compare_exchange_key(key, exchange, comparand).map(Some),
    }
}
