use anyhow::{Context, Result};
use glosa::{
    Command, CommandClipboard, Config, CopyOutcome, FileClipboard, Reply, ReviewPageData, Session,
    TerminalNotifier, write_page,
};
use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

/// File the report is written to when no system clipboard is available.
const EXPORT_FILE: &str = "export.txt";

/// Opens the command source: the script file if given, stdin otherwise.
fn command_source(config: &Config) -> Result<Box<dyn BufRead>> {
    match &config.script {
        Some(path) => {
            let file = fs::File::open(path)
                .with_context(|| format!("Failed to open script: {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}

fn write_review_page(
    config: &Config,
    title: &str,
    session: &Session<TerminalNotifier>,
) -> Result<PathBuf> {
    let path = write_page(&config.output, ReviewPageData::from_session(title, session))
        .context("Failed to write review page")?;
    println!("Generated: {}", path.display());
    Ok(path)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::parse();
    config.validate().context("Invalid configuration")?;

    let source = fs::read_to_string(&config.input)
        .with_context(|| format!("Failed to read input file: {}", config.input.display()))?;
    fs::create_dir_all(&config.output).context("Failed to create output directory")?;

    let title = config.title();
    let mut session = Session::new(TerminalNotifier);
    session.set_source(source);

    let mut clipboard = CommandClipboard::default();
    let mut fallback = FileClipboard::new(config.output.join(EXPORT_FILE));

    for line in command_source(&config)?.lines() {
        let line = line.context("Failed to read command")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let command = match Command::parse_line(line) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        // Errors were already reported through the notifier
        let Ok(reply) = session.apply(command) else {
            continue;
        };
        match reply {
            Reply::Done => {}
            Reply::Output(text) => println!("{}", text),
            Reply::Copy => {
                let outcome = session.copy_report(&mut clipboard, &mut fallback);
                if let Ok(CopyOutcome::Fallback) = outcome {
                    println!("Informe guardado en {}", fallback.path().display());
                }
            }
            Reply::Write => {
                write_review_page(&config, &title, &session)?;
            }
            Reply::Quit => break,
        }
    }

    let page = write_review_page(&config, &title, &session)?;
    if !config.no_open
        && let Err(e) = open::that(&page)
    {
        log::warn!("Failed to open {} in the browser: {}", page.display(), e);
    }

    Ok(())
}
