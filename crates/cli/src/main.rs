// tally - keypad calculator with AI-assisted solving

mod exit_codes;
mod repl;
mod session;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::{EXIT_AI_DISABLED, EXIT_AI_MISSING_KEY, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE};
use session::Session;
use tally_ai_client::AiClient;
use tally_config::{AiConfigStatus, ResolvedAiConfig};
use tally_engine::ERROR_SENTINEL;
use tally_history::HistoryStore;

#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Keypad calculator with AI-assisted solving")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate an expression and print the result
    #[command(after_help = "\
Examples:
  tally eval '2+3*4'
  tally eval 'sqrt((3+1)*(5-1))'
  tally eval '0.1+0.2'")]
    Eval {
        /// Expression to evaluate
        expression: String,
    },

    /// Interactive keypad
    Repl,

    /// Send a natural-language math prompt to the AI solver
    #[command(after_help = "\
Examples:
  tally ask 'what is 15% of 240'
  tally ask 'integrate x squared from 0 to 2'

Requires TALLY_GEMINI_KEY (or GEMINI_API_KEY) in the environment.")]
    Ask {
        /// The prompt, in plain language
        prompt: String,
    },

    /// Show or clear the calculation history
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },

    /// Check the AI solver configuration
    Doctor,
}

#[derive(Subcommand)]
enum HistoryCommands {
    /// List recorded calculations, most recent first
    List {
        /// Show at most this many entries
        #[arg(long)]
        limit: Option<usize>,

        /// Emit JSON instead of the table
        #[arg(long)]
        json: bool,
    },
    /// Remove all recorded calculations
    Clear,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let code = match cli.command {
        Commands::Eval { expression } => cmd_eval(&expression),
        Commands::Repl => cmd_repl(),
        Commands::Ask { prompt } => cmd_ask(&prompt),
        Commands::History { command } => cmd_history(command),
        Commands::Doctor => cmd_doctor(),
    };
    ExitCode::from(code)
}

fn open_session() -> Session {
    Session::open(HistoryStore::at_default_path())
}

fn cmd_eval(expression: &str) -> u8 {
    let mut session = open_session();
    session.recall(expression, "");
    match session.calculate() {
        None => EXIT_SUCCESS, // empty expression, empty result
        Some(result) if result == ERROR_SENTINEL => {
            println!("{}", result);
            EXIT_ERROR
        }
        Some(result) => {
            println!("{}", result);
            EXIT_SUCCESS
        }
    }
}

fn cmd_repl() -> u8 {
    let mut session = open_session();
    match repl::run(&mut session) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("terminal error: {}", e);
            EXIT_ERROR
        }
    }
}

fn cmd_ask(prompt: &str) -> u8 {
    let config = ResolvedAiConfig::load();
    match config.status {
        AiConfigStatus::Disabled => {
            eprintln!("AI solving is disabled in settings");
            return EXIT_AI_DISABLED;
        }
        AiConfigStatus::MissingKey => {
            if let Some(reason) = &config.blocking_reason {
                eprintln!("{}", reason);
            }
            return EXIT_AI_MISSING_KEY;
        }
        AiConfigStatus::Ready => {}
    }

    let api_key = config.api_key.as_deref().unwrap_or_default();
    let client = AiClient::new(&config.endpoint, &config.model, api_key);

    let mut session = open_session();
    let solution = match session.ask(&client, prompt) {
        Ok(solution) => solution,
        Err(busy) => {
            eprintln!("{}", busy);
            return EXIT_USAGE;
        }
    };

    println!("{}", solution.result);
    for step in &solution.steps {
        println!("  {}", step);
    }
    if solution.result == ERROR_SENTINEL {
        EXIT_ERROR
    } else {
        EXIT_SUCCESS
    }
}

fn cmd_history(command: HistoryCommands) -> u8 {
    let mut session = open_session();
    match command {
        HistoryCommands::List { limit, json } => {
            let items = session.history().items();
            let shown = &items[..limit.unwrap_or(items.len()).min(items.len())];

            if json {
                match serde_json::to_string_pretty(shown) {
                    Ok(out) => println!("{}", out),
                    Err(e) => {
                        eprintln!("could not encode history: {}", e);
                        return EXIT_ERROR;
                    }
                }
                return EXIT_SUCCESS;
            }

            for item in shown {
                let when = chrono::DateTime::from_timestamp_millis(item.timestamp)
                    .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_else(|| "-".to_string());
                let origin = if item.is_ai() { "ai" } else { "local" };
                println!("{}  [{}]  {} = {}", when, origin, item.expression, item.result);
                if let Some(explanation) = &item.explanation {
                    println!("    {}", explanation);
                }
            }
            EXIT_SUCCESS
        }
        HistoryCommands::Clear => {
            session.clear_history();
            EXIT_SUCCESS
        }
    }
}

fn cmd_doctor() -> u8 {
    let config = ResolvedAiConfig::load();
    print!("{}", config);
    match config.status {
        AiConfigStatus::Ready => EXIT_SUCCESS,
        AiConfigStatus::Disabled => EXIT_AI_DISABLED,
        AiConfigStatus::MissingKey => EXIT_AI_MISSING_KEY,
    }
}
