use crate::core::{
    Color, Direction, EntityRegistry, GridMap, LevelError, LevelLayout, LevelSession, Position,
    Spawns, Tile,
};
use crate::models::GameRenderState;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout},
    style::{Color as UiColor, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
};
use std::io;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Occupant {
    Player,
    Box(Color),
}

fn box_char(color: Color) -> char {
    match color {
        Color::Orange => '$',
        Color::Red => 'R',
        Color::Blue => 'B',
        Color::Green => 'G',
        Color::Gray => 'Y',
    }
}

fn target_char(color: Color) -> char {
    match color {
        Color::Orange => '.',
        Color::Red => 'r',
        Color::Blue => 'b',
        Color::Green => 'g',
        Color::Gray => 'y',
    }
}

/// A box resting on a target of its own color.
fn covered_char(color: Color) -> char {
    match color {
        Color::Orange => '*',
        Color::Red => '1',
        Color::Blue => '2',
        Color::Green => '3',
        Color::Gray => '4',
    }
}

fn player_on_target_char(color: Color) -> char {
    match color {
        Color::Orange => '+',
        Color::Red => '5',
        Color::Blue => '6',
        Color::Green => '7',
        Color::Gray => '8',
    }
}

/// A box on a target of another color is drawn as the box alone.
fn cell_char(tile: Tile, occupant: Option<Occupant>) -> char {
    match (tile, occupant) {
        (Tile::Wall, _) => '#',
        (Tile::Target(color), Some(Occupant::Player)) => player_on_target_char(color),
        (_, Some(Occupant::Player)) => '@',
        (Tile::Target(target), Some(Occupant::Box(color))) if target == color => covered_char(color),
        (_, Some(Occupant::Box(color))) => box_char(color),
        (Tile::Target(color), None) => target_char(color),
        (Tile::Floor, None) => ' ',
    }
}

fn read_cell(ch: char) -> Option<(Tile, Option<Occupant>)> {
    match ch {
        '#' => return Some((Tile::Wall, None)),
        ' ' | '-' | '_' => return Some((Tile::Floor, None)),
        '@' => return Some((Tile::Floor, Some(Occupant::Player))),
        'o' => return Some((Tile::Target(Color::Orange), None)),
        'O' => return Some((Tile::Floor, Some(Occupant::Box(Color::Orange)))),
        _ => {}
    }
    Color::ALL.into_iter().find_map(|color| {
        let target = Tile::Target(color);
        if ch == box_char(color) {
            Some((Tile::Floor, Some(Occupant::Box(color))))
        } else if ch == target_char(color) {
            Some((target, None))
        } else if ch == covered_char(color) {
            Some((target, Some(Occupant::Box(color))))
        } else if ch == player_on_target_char(color) {
            Some((target, Some(Occupant::Player)))
        } else {
            None
        }
    })
}

/// Reads a level drawn in text. Blank lines are skipped and short rows are padded with floor.
pub fn parse_level(s: &str) -> Result<LevelLayout, LevelError> {
    let mut rows: Vec<Vec<Tile>> = Vec::new();
    let mut player: Option<Position> = None;
    let mut boxes: Vec<(Position, Color)> = Vec::new();
    let max_width = s.lines().map(|line| line.chars().count()).max().unwrap_or(0);

    let mut y = 0;
    for line in s.lines() {
        if line.is_empty() {
            continue;
        }

        let mut row = Vec::with_capacity(max_width);
        for (x, ch) in line.chars().enumerate() {
            let pos = Position::new(x as i32, y);
            let (tile, occupant) = read_cell(ch).ok_or(LevelError::UnknownCharacter { ch, pos })?;
            match occupant {
                Some(Occupant::Player) => match player {
                    Some(first) => return Err(LevelError::DuplicatePlayer { first, second: pos }),
                    None => player = Some(pos),
                },
                Some(Occupant::Box(color)) => boxes.push((pos, color)),
                None => {}
            }
            row.push(tile);
        }
        // Pad row to max width with Floor
        row.resize(max_width, Tile::Floor);
        rows.push(row);
        y += 1;
    }

    let grid = GridMap::from_rows(rows)?;
    let player = player.ok_or(LevelError::MissingPlayer)?;
    LevelLayout::new(grid, Spawns { player, boxes })
}

fn occupant_at(entities: &EntityRegistry, pos: Position) -> Option<Occupant> {
    if entities.player_position() == pos {
        return Some(Occupant::Player);
    }
    entities.box_at(pos).map(|b| Occupant::Box(b.color))
}

pub fn render_game_to_string(grid: &GridMap, entities: &EntityRegistry) -> String {
    let mut result = String::new();
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let pos = Position::new(x, y);
            let tile = grid.tile_at(pos).unwrap_or(Tile::Wall);
            result.push(cell_char(tile, occupant_at(entities, pos)));
        }
        result.push('\n');
    }
    result
}

fn ui_color(color: Color) -> UiColor {
    match color {
        Color::Orange => UiColor::Rgb(255, 140, 0),
        Color::Red => UiColor::Red,
        Color::Blue => UiColor::Blue,
        Color::Green => UiColor::Green,
        Color::Gray => UiColor::Gray,
    }
}

/// The board with pieces drawn in their color and targets shaded in theirs.
pub fn render_board_lines(session: &LevelSession) -> Vec<Line<'static>> {
    let grid = session.grid();
    let entities = session.entities();
    (0..grid.height())
        .map(|y| {
            let spans: Vec<Span<'static>> = (0..grid.width())
                .map(|x| {
                    let pos = Position::new(x, y);
                    let tile = grid.tile_at(pos).unwrap_or(Tile::Wall);
                    let occupant = occupant_at(entities, pos);
                    let mut style = match occupant {
                        Some(Occupant::Box(color)) => Style::default().fg(ui_color(color)),
                        _ => Style::default().fg(UiColor::White),
                    };
                    if let Tile::Target(color) = tile {
                        style = style.bg(ui_color(color));
                        if occupant.is_none() {
                            style = style.fg(UiColor::Black);
                        }
                    }
                    Span::styled(cell_char(tile, occupant).to_string(), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

pub fn render_session_to_string(session: &LevelSession) -> String {
    render_game_to_string(session.grid(), session.entities())
}

/// `orange 1/2  red 0/1`, one entry per target color on the grid.
pub fn render_coverage(session: &LevelSession) -> String {
    session
        .grid()
        .target_colors()
        .iter()
        .map(|&color| {
            let covered = session.coverage().count(color);
            let total = session.box_totals().get(&color).copied().unwrap_or(0);
            format!("{} {}/{}", color.name(), covered, total)
        })
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

pub fn cleanup_terminal() -> anyhow::Result<()> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::LeaveAlternateScreen)?;
    Ok(())
}

pub fn render_game(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &LevelSession,
    state: &GameRenderState,
) -> anyhow::Result<()> {
    terminal.draw(|f| {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3), Constraint::Length(3)])
            .split(f.area());

        // Game area
        let title = format!(
            "{} ({}/{})",
            state.level_name,
            state.level_index + 1,
            state.level_count
        );
        let game_paragraph = Paragraph::new(Text::from(render_board_lines(session)))
            .block(Block::default().borders(Borders::ALL).title(title))
            .alignment(Alignment::Center);
        f.render_widget(game_paragraph, chunks[0]);

        let status = format!(
            "{} | moves {} pushes {} | {:.1}s",
            render_coverage(session),
            state.stats.moves,
            state.stats.pushes,
            state.stats.elapsed().as_secs_f32()
        );
        let status = match &state.best {
            Some(best) => format!("{} | best {:.1}s / {} moves", status, best.seconds, best.moves),
            None => status,
        };
        let status_paragraph = Paragraph::new(status)
            .block(Block::default().borders(Borders::ALL).title("Coverage"))
            .style(Style::default().fg(UiColor::Yellow))
            .alignment(Alignment::Center);
        f.render_widget(status_paragraph, chunks[1]);

        // Instructions
        let instructions = if state.finished {
            "All levels complete! Press any key to quit."
        } else if state.won {
            "Level complete! Press any key for the next level."
        } else {
            "Controls: WASD or Arrow keys to move, R to restart, Q to quit"
        };

        let instructions = if let Some(outcome) = &state.last_outcome {
            format!("{} | Last: {:?}", instructions, outcome)
        } else {
            instructions.to_string()
        };

        let instruction_paragraph = Paragraph::new(instructions)
            .block(Block::default().borders(Borders::ALL).title("Instructions"))
            .style(Style::default().fg(UiColor::Cyan))
            .alignment(Alignment::Center);
        f.render_widget(instruction_paragraph, chunks[2]);
    })?;
    Ok(())
}

pub enum ConsoleInput {
    Move(Direction),
    Restart,
    Quit,
    Timeout,
    Unknown,
}

pub fn handle_input() -> anyhow::Result<ConsoleInput> {
    if event::poll(std::time::Duration::from_millis(50))? {
        if let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event::read()?
        {
            return Ok(match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => ConsoleInput::Quit,
                KeyCode::Char('r') | KeyCode::Char('R') => ConsoleInput::Restart,
                KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => {
                    ConsoleInput::Move(Direction::Up)
                }
                KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => {
                    ConsoleInput::Move(Direction::Down)
                }
                KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                    ConsoleInput::Move(Direction::Left)
                }
                KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                    ConsoleInput::Move(Direction::Right)
                }
                _ => ConsoleInput::Unknown,
            });
        }
    }
    Ok(ConsoleInput::Timeout)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::SessionState;

    #[test]
    fn parse_level_reads_colors() {
        let layout = parse_level("#@Rr.#\n#  *g#\n").unwrap();
        assert_eq!(layout.spawns.player, Position::new(1, 0));
        assert_eq!(
            layout.spawns.boxes,
            vec![(Position::new(2, 0), Color::Red), (Position::new(3, 1), Color::Orange)]
        );
        assert_eq!(layout.grid.tile_at(Position::new(3, 0)), Ok(Tile::Target(Color::Red)));
        assert_eq!(layout.grid.tile_at(Position::new(4, 1)), Ok(Tile::Target(Color::Green)));
    }

    #[test]
    fn parse_level_pads_short_rows() {
        let layout = parse_level("#@.$#\n#\n").unwrap();
        assert_eq!(layout.grid.width(), 5);
        assert_eq!(layout.grid.tile_at(Position::new(4, 1)), Ok(Tile::Floor));
    }

    #[test]
    fn parse_level_rejects_bad_input() {
        assert_eq!(
            parse_level("#@.?#").unwrap_err(),
            LevelError::UnknownCharacter { ch: '?', pos: Position::new(3, 0) }
        );
        assert_eq!(parse_level("# .$#").unwrap_err(), LevelError::MissingPlayer);
        assert_eq!(
            parse_level("#@.@#").unwrap_err(),
            LevelError::DuplicatePlayer { first: Position::new(1, 0), second: Position::new(3, 0) }
        );
    }

    #[test]
    fn render_matches_parsed_text() {
        let level = "#####\n#@$.#\n# *.#\n#Rr #\n#####\n";
        let layout = parse_level(level).unwrap();
        let session = LevelSession::new(layout);
        assert_eq!(render_session_to_string(&session), level);
    }

    #[test]
    fn covered_targets_render_and_parse_for_every_color() {
        for color in Color::ALL {
            let level = format!("#@{}{}#\n", box_char(color), target_char(color));
            let mut session = LevelSession::new(parse_level(&level).unwrap());
            session.submit_move(Direction::Right);
            assert!(session.is_complete(), "{:?}", color);

            let rendered = render_session_to_string(&session);
            assert_eq!(rendered, format!("# @{}#\n", covered_char(color)));

            let reparsed = LevelSession::new(parse_level(&rendered).unwrap());
            assert_eq!(render_session_to_string(&reparsed), rendered);
            assert_eq!(reparsed.coverage().count(color), 1);
            assert_eq!(reparsed.current_state(), SessionState::Completed);
        }
    }

    #[test]
    fn player_on_target_renders_and_parses_for_every_color() {
        for color in Color::ALL {
            let level = format!("#@{} {}{}#\n", target_char(color), box_char(color), target_char(color));
            let mut session = LevelSession::new(parse_level(&level).unwrap());
            session.submit_move(Direction::Right);

            let rendered = render_session_to_string(&session);
            let expected = format!("# {} {}{}#\n", player_on_target_char(color), box_char(color), target_char(color));
            assert_eq!(rendered, expected);

            let reparsed = parse_level(&rendered).unwrap();
            assert_eq!(reparsed.spawns.player, Position::new(2, 0));
            assert_eq!(reparsed.grid.tile_at(Position::new(2, 0)), Ok(Tile::Target(color)));
        }
    }

    #[test]
    fn board_lines_shade_targets_in_their_color() {
        let session = LevelSession::new(parse_level("#@R r#").unwrap());
        let lines = render_board_lines(&session);
        let cells = &lines[0].spans;

        assert_eq!(cells.len(), 6);
        assert_eq!(cells[2].content, "R");
        assert_eq!(cells[2].style.fg, Some(UiColor::Red));
        assert_eq!(cells[4].content, "r");
        assert_eq!(cells[4].style.bg, Some(UiColor::Red));
        assert_eq!(cells[3].style.bg, None);
    }

    #[test]
    fn coverage_line_lists_each_target_color() {
        let session = LevelSession::new(parse_level("#@$.*Rr#").unwrap());
        assert_eq!(render_coverage(&session), "orange 1/2  red 0/1");
    }
}
