use clap::{value_parser, Arg, ArgAction, Command};
use ortwin_cli::{load_data_dir, run_interactive, run_timed, StdConsole};
use ortwin_core::{ControllerConfig, ConstraintValidator, ProcedureController, ProcedureGraph};
use std::path::PathBuf;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Command::new("ortwin")
        .version("0.1.0")
        .about("Fact-graph-driven procedure guidance for instrumented theatres")
        .subcommand_required(true)
        .subcommand(
            Command::new("run")
                .about("Run the procedure with a timer-driven advance trigger")
                .arg(data_dir_arg())
                .arg(
                    Arg::new("interval")
                        .long("interval")
                        .default_value("2")
                        .value_parser(value_parser!(u64))
                        .help("Seconds between advance triggers"),
                )
                .arg(show_report_arg()),
        )
        .subcommand(
            Command::new("interactive")
                .about("Drive the procedure from the keyboard")
                .arg(data_dir_arg())
                .arg(show_report_arg()),
        )
        .subcommand(
            Command::new("check")
                .about("Validate a data directory without running the procedure")
                .arg(data_dir_arg()),
        );

    match cli.get_matches().subcommand() {
        Some(("run", args)) => {
            let interval = *args.get_one::<u64>("interval").unwrap_or(&2);
            let controller = build_controller(args)?;
            run_timed(controller, Duration::from_secs(interval)).await
        }
        Some(("interactive", args)) => {
            let controller = build_controller(args)?;
            run_interactive(controller)?;
            Ok(())
        }
        Some(("check", args)) => check(args),
        _ => unreachable!("subcommand is required"),
    }
}

fn data_dir_arg() -> Arg {
    Arg::new("data-dir")
        .long("data-dir")
        .default_value("data")
        .value_parser(value_parser!(PathBuf))
        .help("Directory holding procedure.json, constraints.json, sensors.json")
}

fn show_report_arg() -> Arg {
    Arg::new("show-report")
        .long("show-report")
        .action(ArgAction::SetTrue)
        .help("Print the raw validation report on violation")
}

fn build_controller(
    args: &clap::ArgMatches,
) -> anyhow::Result<ProcedureController<StdConsole>> {
    let dir = args
        .get_one::<PathBuf>("data-dir")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("data"));
    let data = load_data_dir(&dir)?;

    let config = ControllerConfig {
        show_validation_report: args.get_flag("show-report"),
        ..ControllerConfig::default()
    };

    Ok(ProcedureController::new(
        data.graph,
        data.cursor,
        Box::new(data.replay),
        Box::new(data.rules),
        StdConsole::new(),
        config,
    ))
}

fn check(args: &clap::ArgMatches) -> anyhow::Result<()> {
    let dir = args
        .get_one::<PathBuf>("data-dir")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("data"));
    let data = load_data_dir(&dir)?;

    ProcedureGraph::new(&data.graph).validate_structure(&data.cursor.plan)?;
    println!("Plan structure: ok");

    let outcome = data.rules.check(&data.graph);
    if outcome.conforms {
        println!("Initial snapshot conformance: ok");
        Ok(())
    } else {
        println!("Initial snapshot conformance: FAILED\n{}", outcome.report);
        anyhow::bail!("initial snapshot does not conform")
    }
}
