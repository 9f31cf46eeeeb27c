use crate::{
    EXIT_FAILURES, EXIT_SUCCESS,
    analyzer::swarmlint::{FleetEvaluator, OutputFormat, Target, formatter},
    cli::Cli,
    config,
    docker::{ConnectionTarget, DockerClient, OrchestrationClient},
};

/// Run the conformity audit described by the command line.
pub async fn handle_check(cli: &Cli) -> crate::Result<i32> {
    let mut config = config::load_config(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);

    if !config.output.color {
        colored::control::set_override(false);
    }

    let target = ConnectionTarget::resolve(&config.connection)?;
    let client = DockerClient::connect(target, config.connection.timeout())?;
    log::debug!("connected to docker at {}", client.target());

    let scope = Target::parse(Some(cli.service.as_str()));
    run_check(&client, &scope, config.output.format).await
}

/// Audit `scope` through `client` and render the report in `format`.
///
/// Returns the process exit code: [`EXIT_SUCCESS`] when no check failed,
/// [`EXIT_FAILURES`] otherwise. Fatal errors are returned as `Err`.
pub async fn run_check(
    client: &dyn OrchestrationClient,
    scope: &Target,
    format: OutputFormat,
) -> crate::Result<i32> {
    let evaluator = FleetEvaluator::new(client);

    let report = match format {
        OutputFormat::Plain => {
            let report = evaluator
                .evaluate_with(scope, formatter::plain::log_service)
                .await?;
            formatter::plain::log_fleet(&report);
            report
        }
        OutputFormat::Json => {
            let report = evaluator.evaluate(scope).await?;
            println!("{}", formatter::json::format(&report));
            report
        }
    };

    Ok(if report.has_failures() {
        EXIT_FAILURES
    } else {
        EXIT_SUCCESS
    })
}
