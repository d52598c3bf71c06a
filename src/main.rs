use clap::{CommandFactory, Parser};
use ms_reader::utils::logger;
use ms_reader::{
    CliConfig, Coordinator, CoordinatorError, DeploymentMode, ProcessConverter, ProcessExtractor,
    ResourceRoot,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    match config.mode {
        DeploymentMode::Cli => logger::init_cli_logger(config.verbose),
        DeploymentMode::Container => logger::init_container_logger(config.verbose),
    }

    tracing::info!("Starting ms-reader ({:?} mode)", config.mode);
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let root = match ResourceRoot::discover() {
        Ok(root) => Some(root),
        Err(e) => {
            tracing::warn!("Cannot determine executable location: {}", e);
            None
        }
    };

    let settings = match config.resolve(root.as_ref()) {
        Ok(settings) => settings,
        Err(e) => fail(e),
    };
    tracing::debug!("Resolved settings: {:?}", settings);

    let coordinator = Coordinator::new(
        ProcessExtractor::new(settings.extractor),
        ProcessConverter::new(settings.converter),
        settings.conversions_dir,
    );

    let mut stdout = std::io::stdout();
    match coordinator.run(&settings.run, &mut stdout).await {
        Ok(result) => {
            tracing::info!("Converted output saved to: {}", result.output_file.display());
            Ok(())
        }
        Err(e) => fail(e),
    }
}

fn fail(e: CoordinatorError) -> ! {
    tracing::error!("Run failed while {}: {}", e.phase(), e);
    tracing::debug!("Recovery suggestion: {}", e.recovery_suggestion());

    if let CoordinatorError::Usage { .. } = e {
        let bin = std::env::args()
            .next()
            .unwrap_or_else(|| "ms-reader".to_string());
        eprintln!("{}", e);
        eprintln!("Usage: {} -i <input_directory> -o <output_directory>", bin);
        eprintln!("{}", CliConfig::command().render_help());
    } else {
        eprintln!("{}", e);
        eprintln!("Hint: {}", e.recovery_suggestion());
    }
    std::process::exit(e.exit_code());
}
