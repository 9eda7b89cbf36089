// Controls: W/A/S/D or arrow keys (immediate response). R restarts the level, Q quits.

use ColorSokoban::config::{Cli, Mode, Settings};
use ColorSokoban::console_interface::ConsoleInput::*;
use ColorSokoban::console_interface::{
    cleanup_terminal, handle_input, render_coverage, render_game, render_session_to_string,
    setup_terminal,
};
use ColorSokoban::core::{Campaign, CampaignProgress, Direction, MoveOutcome, MoveReport};
use ColorSokoban::levels::CampaignFile;
use ColorSokoban::models::GameRenderState;
use ColorSokoban::score::{BestTimes, LevelStats};
use anyhow::{Context, bail};
use clap::Parser;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> anyhow::Result<()> {
    let settings = Settings::from_cli(Cli::parse())?;
    let _guard = setup_logging(&settings.log_dir)?;

    let campaign_file = match &settings.levels {
        Some(path) => CampaignFile::load(path)?,
        None => CampaignFile::builtin(),
    };

    match settings.mode {
        Mode::Check => run_check(&campaign_file),
        Mode::Replay => {
            let campaign = start_campaign(campaign_file, settings.start_level)?;
            run_replay(campaign, &settings.moves)
        }
        Mode::Interactive => {
            let campaign = start_campaign(campaign_file, settings.start_level)?;
            let mut terminal = setup_terminal()?;
            let result = run_interactive(campaign, &settings.best_times, &mut terminal);
            cleanup_terminal()?;
            result
        }
    }
}

/// Logs go to a file, stdout belongs to the terminal UI.
fn setup_logging(log_dir: &Path) -> anyhow::Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;
    let file_appender = tracing_appender::rolling::never(log_dir, "color_sokoban.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::info!(log_dir = %log_dir.display(), "logging initialized");
    Ok(guard)
}

fn start_campaign(file: CampaignFile, start_level: usize) -> anyhow::Result<Campaign> {
    let mut campaign = file.into_campaign()?;
    if !campaign.jump_to(start_level) {
        bail!(
            "level {} does not exist, the campaign has {} levels",
            start_level,
            campaign.level_count()
        );
    }
    Ok(campaign)
}

fn run_check(file: &CampaignFile) -> anyhow::Result<()> {
    let layouts = file.layouts()?;
    for (index, (name, layout)) in layouts.iter().enumerate() {
        let colors: Vec<_> = layout.grid.target_colors().iter().map(|c| c.name()).collect();
        println!(
            "{:>3} {:<20} {}x{} boxes {} targets {} colors [{}]",
            index,
            name,
            layout.grid.width(),
            layout.grid.height(),
            layout.spawns.boxes.len(),
            layout.grid.targets().count(),
            colors.join(", ")
        );
    }
    println!("{} levels ok", layouts.len());
    Ok(())
}

fn run_replay(mut campaign: Campaign, moves: &str) -> anyhow::Result<()> {
    let mut last: Option<MoveReport> = None;
    for (i, c) in moves.chars().filter(|c| !c.is_whitespace()).enumerate() {
        let Some(direction) = Direction::from_char(c) else {
            bail!("move {} is {:?}, expected one of U D L R", i, c);
        };
        let report = campaign.submit_move(direction);
        println!("{:>4} {} {:?}", i, c, report.outcome);
        last = Some(report);
    }

    let session = campaign.session();
    println!("{}", campaign.level_name());
    print!("{}", render_session_to_string(session));
    println!("{}", render_coverage(session));
    println!("state: {:?}", session.current_state());
    if let Some(report) = last {
        println!("{}", serde_json::to_string(&report)?);
    }
    Ok(())
}

fn render_state(
    campaign: &Campaign,
    stats: &LevelStats,
    best: &BestTimes,
    last_outcome: Option<MoveOutcome>,
) -> GameRenderState {
    GameRenderState {
        level_name: campaign.level_name().to_string(),
        level_index: campaign.level_index(),
        level_count: campaign.level_count(),
        won: campaign.session().is_complete(),
        finished: campaign.is_finished(),
        last_outcome,
        stats: stats.clone(),
        best: best.get(campaign.level_name()).copied(),
    }
}

/// Blocks until a key is pressed. Returns false if that key asked to quit.
fn wait_for_key() -> anyhow::Result<bool> {
    loop {
        match handle_input()? {
            Timeout => {}
            Quit => return Ok(false),
            _ => return Ok(true),
        }
    }
}

fn run_interactive(
    mut campaign: Campaign,
    best_times_path: &Path,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> anyhow::Result<()> {
    let mut best = BestTimes::load(best_times_path)?;
    let mut stats = LevelStats::start();
    let mut last_outcome = None;

    render_game(terminal, campaign.session(), &render_state(&campaign, &stats, &best, None))?;

    loop {
        if campaign.level_complete() {
            // A level solved at load has no run to record.
            if stats.moves > 0 {
                let seconds = stats.elapsed().as_secs_f32();
                if best.submit(campaign.level_name(), seconds, stats.moves) {
                    best.save(best_times_path)?;
                }
            }
            render_game(terminal, campaign.session(), &render_state(&campaign, &stats, &best, last_outcome))?;

            // Keep showing the win screen until user inputs
            if !wait_for_key()? {
                break;
            }
            match campaign.advance() {
                CampaignProgress::NextLevel(_) => {
                    stats = LevelStats::start();
                    last_outcome = None;
                }
                CampaignProgress::Finished => {
                    render_game(terminal, campaign.session(), &render_state(&campaign, &stats, &best, last_outcome))?;
                    wait_for_key()?;
                    break;
                }
                CampaignProgress::NotComplete => {}
            }
            render_game(terminal, campaign.session(), &render_state(&campaign, &stats, &best, last_outcome))?;
            continue;
        }

        match handle_input()? {
            Quit => break,
            Restart => {
                campaign.restart_level();
                stats = LevelStats::start();
                last_outcome = None;
            }
            Move(direction) => {
                let report = campaign.submit_move(direction);
                stats.record(&report);
                last_outcome = Some(report.outcome);
            }
            Timeout | Unknown => {}
        }

        render_game(terminal, campaign.session(), &render_state(&campaign, &stats, &best, last_outcome))?;
    }

    Ok(())
}
