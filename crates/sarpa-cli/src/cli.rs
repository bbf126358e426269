use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "sarpa",
    about = "Sarpa: snakebite incident intake and dispatch matching",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a raw incident report without submitting it
    Validate {
        /// Path to the raw report JSON (form-field shape)
        #[arg(long)]
        input: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rank one responder pool against a location
    Rank {
        /// Path to the responder roster JSONL
        #[arg(long, default_value = ".sarpa/roster.jsonl")]
        roster: String,

        /// Responder kind: handler or hospital
        #[arg(long)]
        kind: String,

        /// Report latitude (omit both --lat and --lon for an unresolved location)
        #[arg(long)]
        lat: Option<f64>,

        /// Report longitude
        #[arg(long)]
        lon: Option<f64>,

        /// Max responders returned (overrides config)
        #[arg(long)]
        limit: Option<usize>,

        /// Path to the core config TOML
        #[arg(long, default_value = ".sarpa/sarpa.toml")]
        config: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Submit an incident: validate, allocate an id, rank both pools
    Submit {
        /// Path to the raw report JSON (form-field shape)
        #[arg(long)]
        input: String,

        /// Path to the responder roster JSONL
        #[arg(long, default_value = ".sarpa/roster.jsonl")]
        roster: String,

        /// Report latitude (omit both --lat and --lon for an unresolved location)
        #[arg(long)]
        lat: Option<f64>,

        /// Report longitude
        #[arg(long)]
        lon: Option<f64>,

        /// Reported fix accuracy in meters
        #[arg(long)]
        accuracy: Option<f64>,

        /// Path to the core config TOML
        #[arg(long, default_value = ".sarpa/sarpa.toml")]
        config: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
