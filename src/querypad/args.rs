use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "querypad")]
#[command(about = "A live playground for tree query patterns", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Format a query (from an argument, a file path, or stdin)
    #[command(alias = "f")]
    Fmt {
        /// Query text or a path to a query file; reads stdin when omitted
        input: Option<String>,

        /// Target line width for the formatted output
        #[arg(short, long)]
        width: Option<usize>,
    },
    /// Print the parsed pattern tree of a query
    Tree {
        /// Query text or a path to a query file; reads stdin when omitted
        input: Option<String>,
    },
    /// Encode a query as a share token, or decode one back to text
    Token {
        /// Query text or a path to a query file; with no input, prints
        /// the saved session token
        input: Option<String>,

        /// Decode a share token instead of encoding
        #[arg(long, conflicts_with = "input")]
        decode: Option<String>,
    },
    /// Restore a shared session from a token and open the playground
    #[command(alias = "o")]
    Open {
        /// A share token produced by `querypad token`
        token: String,
    },
    /// Get or set configuration values
    Config {
        /// Configuration key (e.g. "width")
        key: Option<String>,

        /// Value to set the key to
        value: Option<String>,
    },
}
