use std::io::Write;

use fatsecret_search::client::{ErrorKind, FatSecretClient, FatSecretError};
use fatsecret_search::report;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with the report
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".to_string().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let client = match FatSecretClient::from_env() {
        Ok(client) => client,
        Err(e) => {
            println!("Error: {}", e);
            return Ok(());
        }
    };

    let mut input = BufReader::new(tokio::io::stdin()).lines();

    loop {
        match run_once(&client, &mut input).await {
            Ok(true) => continue,
            Ok(false) => break,
            Err(e) => match e.downcast_ref::<FatSecretError>() {
                Some(err) if err.kind() == ErrorKind::Configuration => println!("Error: {}", err),
                Some(err) => println!("API Error: {}", err),
                None => println!("Unexpected error: {:#}", e),
            },
        }
    }

    Ok(())
}

/// Runs one prompt-search-print round. Returns `false` when the user is done.
async fn run_once(client: &FatSecretClient, input: &mut Input) -> anyhow::Result<bool> {
    let Some(query) = prompt(input, "Enter food to search (empty to quit): ").await? else {
        return Ok(false);
    };
    if query.is_empty() {
        return Ok(false);
    }

    let Some(max_results) = prompt_number(input, "Enter number of results (1-50): ").await?
    else {
        return Ok(false);
    };
    let Some(page_number) = prompt_number(input, "Enter page number: ").await? else {
        return Ok(false);
    };

    let foods = client.search(&query, max_results, page_number).await?;

    if foods.is_empty() {
        println!("No foods found for '{}'.", query);
    } else {
        println!("\n{}", report::render_foods(&foods));
    }
    Ok(true)
}

async fn prompt(input: &mut Input, message: &str) -> anyhow::Result<Option<String>> {
    print!("{}", message);
    std::io::stdout().flush()?;
    Ok(input.next_line().await?.map(|line| line.trim().to_string()))
}

async fn prompt_number(input: &mut Input, message: &str) -> anyhow::Result<Option<u32>> {
    loop {
        let Some(line) = prompt(input, message).await? else {
            return Ok(None);
        };
        match line.parse::<u32>() {
            Ok(value) => return Ok(Some(value)),
            Err(_) => println!("Error: '{}' is not a valid non-negative number", line),
        }
    }
}
