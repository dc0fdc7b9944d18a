use crate::table::render_table;
use anyhow::Result;
use bizquery::{
    config::AppConfig,
    prompts::samples::SAMPLE_QUESTIONS,
    providers::{db::sqlite::SqliteProvider, factory::create_provider},
    AgentOptions, QueryAgent, QuerySource,
};
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
pub struct AskArgs {
    /// The question, in plain English
    #[arg(required_unless_present = "samples")]
    question: Option<String>,
    /// The database file. Defaults to `db_url` from the configuration.
    #[arg(long)]
    db: Option<String>,
    /// Skip the business analysis of the results
    #[arg(long)]
    no_interpret: bool,
    /// Print the sample questions and exit
    #[arg(long)]
    samples: bool,
}

pub async fn handle_ask(args: &AskArgs, config: &AppConfig) -> Result<()> {
    if args.samples {
        println!("💡 Sample questions:");
        for question in SAMPLE_QUESTIONS {
            println!("  - {question}");
        }
        return Ok(());
    }
    let question = args.question.as_deref().unwrap_or_default();

    let db_path = args.db.as_deref().unwrap_or(&config.db_url);
    let provider = SqliteProvider::new(db_path).await?;
    provider.initialize_schema().await?;

    let mut options = AgentOptions::from(&config.agent);
    if args.no_interpret {
        options.interpret_results = false;
    }
    let agent = QueryAgent::builder()
        .ai_provider(create_provider(&config.ai)?)
        .storage(Box::new(provider))
        .options(options)
        .build()?;

    info!(db = %db_path, "Asking question");
    println!("🤔 Analyzing: {question}");
    let answer = agent.answer(question).await?;

    let origin = match answer.source {
        QuerySource::Shortcut => "built-in query",
        QuerySource::Model => "generated query",
    };
    println!("\nSQL ({origin}):\n{}\n", answer.sql);

    if answer.rows.is_empty() {
        println!("(no rows)");
    } else {
        println!("{}", render_table(&answer.columns, &answer.rows));
        let suffix = if answer.truncated { ", truncated" } else { "" };
        println!("({} rows{suffix})", answer.row_count);
    }

    if let Some(narrative) = &answer.narrative {
        println!("\n📝 {narrative}");
    }
    if let Some(analysis) = &answer.analysis {
        println!("\n📊 Analysis:\n{analysis}");
    }
    if let Some(error) = &answer.analysis_error {
        println!("\n⚠️  Analysis unavailable: {error}");
    }
    Ok(())
}
