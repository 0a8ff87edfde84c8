//! nvm-crew: run the payment crew once and print what each agent produced.

use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nvm_crew::{
    crew_inputs, payment_crew, CrewConfig, CrewError, DormantExecutor, PaymentTool,
    PipelineReport, ToolRegistry,
};
use nvm_pay::PaymentGateway;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run().await {
        Ok(report) if report.succeeded() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(error = %e, "Crew could not start");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<PipelineReport, CrewError> {
    let config = CrewConfig::from_env()?;
    let gateway = Arc::new(PaymentGateway::new(&config.gateway)?);

    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(PaymentTool::new(gateway)))?;

    let pipeline = payment_crew(&config, Arc::new(registry))?;

    println!(
        "=== Starting payment crew (failure policy: {}) ===",
        pipeline.policy()
    );
    let report = pipeline
        .run(&DormantExecutor, &crew_inputs(&config))
        .await;

    println!("\n=== Tasks (run {}) ===", report.run_id);
    for outcome in &report.outcomes {
        println!(
            "\n[{}] {} ({}, {}ms)\n{}",
            outcome.status, outcome.task_id, outcome.agent, outcome.duration_ms, outcome.output
        );
    }

    println!("\n=== Final result ===");
    println!("{}", report.final_output().unwrap_or("(no task completed)"));

    Ok(report)
}
