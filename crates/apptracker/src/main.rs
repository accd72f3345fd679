//! `apptrack` - CLI for apptracker
//!
//! Each invocation opens the data file, runs one store operation, and prints
//! the result.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use apptracker::cli::{AddCommand, Cli, Command, ConfigCommand};
use apptracker::{init_logging, shell, ApplicationStore, CollegeApplication, Config};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let mut config = Config::load_from(cli.config.clone()).context("loading configuration")?;
    if let Some(path) = cli.data_file.clone() {
        config.storage.data_file = Some(path);
    }

    match cli.command {
        Command::Add(add_cmd) => handle_add(&config, add_cmd),
        Command::List(list_cmd) => {
            handle_list(&config, list_cmd.json)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Search(search_cmd) => {
            handle_search(&config, &search_cmd.query, search_cmd.json)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Delete(delete_cmd) => {
            handle_delete(&config, &delete_cmd.name);
            Ok(ExitCode::SUCCESS)
        }
        Command::Status(status_cmd) => {
            handle_status(&config, status_cmd.json)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Config(config_cmd) => {
            handle_config(&config, config_cmd)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn open_store(config: &Config) -> ApplicationStore {
    ApplicationStore::open_file(config.data_file())
}

/// Turn the raw add arguments into a record, validating every field first.
fn build_application(cmd: AddCommand) -> apptracker::Result<CollegeApplication> {
    let cost = shell::parse_cost(cmd.cost.as_deref().unwrap_or_default())?;
    let application_date = shell::parse_date(cmd.applied.as_deref().unwrap_or_default())?;
    let expected_decision_date = shell::parse_date(cmd.decision.as_deref().unwrap_or_default())?;

    let mut recommenders = Vec::with_capacity(cmd.recommenders.len());
    for spec in &cmd.recommenders {
        if let Some(recommender) = shell::parse_recommender(spec)? {
            recommenders.push(recommender);
        }
    }

    Ok(CollegeApplication {
        college_name: cmd.college,
        address: cmd.address,
        application_date,
        cost,
        platform: cmd.platform,
        recommenders,
        expected_decision_date,
        essay_written: cmd.essay,
        transcripts_submitted: cmd.transcripts,
    })
}

fn handle_add(config: &Config, cmd: AddCommand) -> anyhow::Result<ExitCode> {
    let application = match build_application(cmd) {
        Ok(application) => application,
        Err(e) if e.is_validation_error() => {
            eprintln!("{}", shell::error_message(&e));
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e).context("building application"),
    };

    let mut store = open_store(config);
    let message = shell::saved_message(&application);
    store.add(application);
    println!("{message}");
    Ok(ExitCode::SUCCESS)
}

fn handle_list(config: &Config, json: bool) -> anyhow::Result<()> {
    let store = open_store(config);
    if json {
        println!("{}", serde_json::to_string_pretty(store.list_all())?);
    } else {
        print!(
            "{}",
            with_newline(shell::format_list(store.list_all(), &config.render_options()))
        );
    }
    Ok(())
}

fn handle_search(config: &Config, query: &str, json: bool) -> anyhow::Result<()> {
    let store = open_store(config);
    let results = store.search_by_name(query);
    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print!(
            "{}",
            with_newline(shell::format_search(query, &results, &config.render_options()))
        );
    }
    Ok(())
}

fn handle_delete(config: &Config, name: &str) {
    let mut store = open_store(config);
    let removed = store.delete_by_name(name);
    println!("{}", shell::delete_message(name, removed));
    if removed {
        print!(
            "{}",
            with_newline(shell::format_list(store.list_all(), &config.render_options()))
        );
    }
}

fn handle_status(config: &Config, json: bool) -> anyhow::Result<()> {
    let store = open_store(config);
    let stats = store.stats();
    let opts = config.render_options();

    if json {
        let status = serde_json::json!({
            "data_file": stats.location,
            "load_failed": store.load_failed(),
            "applications": stats.total_applications,
            "recommenders": stats.total_recommenders,
            "essays_written": stats.essays_written,
            "transcripts_submitted": stats.transcripts_submitted,
            "total_cost": stats.total_cost,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("apptrack status");
        println!("---------------");
        println!("Data file:      {}", stats.location);
        println!("Applications:   {}", stats.total_applications);
        println!("Recommenders:   {}", stats.total_recommenders);
        println!(
            "Essays done:    {}/{}",
            stats.essays_written, stats.total_applications
        );
        println!(
            "Transcripts:    {}/{}",
            stats.transcripts_submitted, stats.total_applications
        );
        println!("Total cost:     ${}", opts.cost(stats.total_cost));
        if store.load_failed() {
            println!();
            println!("Warning: the data file could not be read; showing an empty list.");
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Data file:          {}", config.data_file().display());
                println!();
                println!("[Display]");
                match config.display.cost_decimals {
                    Some(decimals) => println!("  Cost decimals:      {decimals}"),
                    None => println!("  Cost decimals:      shortest"),
                }
                println!("  Empty date:         {}", config.display.empty_date);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}

fn with_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}
