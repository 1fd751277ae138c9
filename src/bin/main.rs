use anyhow::{Context, Result};
use clap::Parser;
use crossterm::style::Stylize;
use crossterm::tty::IsTty;
use log::info;
use phrase_core::config::{Config, OutputFormat};
use phrase_core::core::types::SENTINEL_WORD;
use phrase_core::fuzzy::nearest::find_nearest_with_distance;
use phrase_core::persistence::load_or_build;
use phrase_core::{Passphrase, PassphraseGenerator, WordGraph};
use rand::rngs::OsRng;
use std::io::{self, Write};

fn main() -> Result<()> {
    let config = Config::parse();

    env_logger::Builder::from_default_env()
        .filter_level(config.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .target(env_logger::Target::Stderr)
        .init();

    let graph = load_or_build(&config.corpus, config.snapshot.as_deref())
        .with_context(|| format!("unable to load word graph from {}", config.corpus.display()))?;
    info!("word graph ready: {} words", graph.n_words().saturating_sub(1));

    let stdout = io::stdout();
    let styled = stdout.is_tty();
    let mut out = stdout.lock();

    if let Some(range) = &config.dump {
        for id in range.start..range.end.min(graph.n_words()) {
            writeln!(out, "{}", graph.describe_word(id)?)?;
        }
        return Ok(());
    }

    let settings = config.settings()?;
    let hook = match &settings.hook {
        Some(query) => {
            let (id, distance) = find_nearest_with_distance(&graph, query);
            info!("hook {:?} matched {:?} (distance {})", query, graph.word(id)?, distance);
            id
        }
        None => SENTINEL_WORD,
    };

    let generator = PassphraseGenerator::new(&graph, settings.length).with_hook(hook)?;
    let mut rng = OsRng;

    match config.format {
        OutputFormat::Json => {
            for _ in 0..settings.count {
                let phrase = generator.generate(&mut rng)?;
                writeln!(out, "{}", serde_json::to_string(&phrase)?)?;
            }
        }
        OutputFormat::Text => {
            print_banner(&mut out, &graph, &generator, settings.count, hook, styled)?;
            for _ in 0..settings.count {
                let phrase = generator.generate(&mut rng)?;
                print_phrase(&mut out, &phrase, styled)?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

fn print_banner(
    out: &mut impl Write,
    graph: &WordGraph,
    generator: &PassphraseGenerator<'_>,
    count: usize,
    hook: usize,
    styled: bool,
) -> Result<()> {
    writeln!(
        out,
        "Generating {} passwords with {} bits of entropy",
        count,
        generator.entropy_bits()
    )?;
    if hook != SENTINEL_WORD {
        writeln!(out, "    hook: {}", graph.word(hook)?)?;
    }

    let pass_len = generator.length() * 3;
    let header = format!("{:<width$}    {}", "Password", "Mnemonic", width = pass_len);
    if styled {
        writeln!(out, "{}", header.bold())?;
    } else {
        writeln!(out, "{}", header)?;
    }
    writeln!(out, "{}    {}", "-".repeat(pass_len), "-".repeat(generator.length() * 4))?;
    Ok(())
}

fn print_phrase(out: &mut impl Write, phrase: &Passphrase, styled: bool) -> io::Result<()> {
    let password = phrase.password();
    if styled {
        writeln!(out, "{}    {}", password.bold(), phrase.mnemonic())
    } else {
        writeln!(out, "{}    {}", password, phrase.mnemonic())
    }
}
