//! Interactive terminal loop.

use crate::input::{InputOutcome, InputRouter};
use crate::render::{glyph, render_board};
use crate::session::TurnCoordinator;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use metaboard_core::GameStatus;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};
use std::io;
use tracing::{error, info, instrument};

const HELP: &str = "arrows/hjkl move, enter/space or 1-9 choose, r restart, q quit";

/// Runs the game until the user quits; returns the session for saving.
#[instrument(skip_all, fields(players = session.players()))]
pub fn run(mut session: TurnCoordinator) -> Result<TurnCoordinator> {
    info!("Starting terminal UI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let res = event_loop(&mut terminal, &mut session);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res.map(|()| session)
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &mut TurnCoordinator,
) -> Result<()> {
    let mut router = InputRouter::new(session.board().geometry().grid());
    let mut message = String::from("New game");

    loop {
        terminal.draw(|frame| draw(frame, session, &router, &message))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        message = match router.handle_key(key.code, session) {
            InputOutcome::Quit => {
                info!(moves = session.history().len(), "User quit");
                return Ok(());
            }
            InputOutcome::Placed(GameStatus::Won(player)) => format!("Player {} wins!", player),
            InputOutcome::Placed(GameStatus::Draw) => "Draw!".to_string(),
            InputOutcome::Placed(GameStatus::InProgress) => "Mark placed".to_string(),
            InputOutcome::Descended => "Entered sub-board".to_string(),
            InputOutcome::Restarted => "Game restarted".to_string(),
            InputOutcome::Rejected(reason) => reason,
            InputOutcome::Moved | InputOutcome::Ignored => continue,
        };
    }
}

fn draw(frame: &mut Frame, session: &TurnCoordinator, router: &InputRouter, message: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Min(3),    // Board
            Constraint::Length(4), // Status
        ])
        .split(frame.area());

    let geometry = session.board().geometry();
    let title = Paragraph::new(format!(
        "Board of Boards: {0}x{0}, depth {1}",
        geometry.grid(),
        geometry.depth()
    ))
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let cursor = (!session.status().is_over()).then(|| router.cursor());
    let board = Paragraph::new(render_board(session.board(), cursor))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(board, chunks[1]);

    let turn = match session.status() {
        GameStatus::InProgress => {
            let player = session.current_player();
            let action = if session.board().is_playing_leaves() {
                "place a mark"
            } else {
                "choose a sub-board"
            };
            format!("Player {} ({}): {}", player, glyph(player.cell()), action)
        }
        finished => format!("Game over: {}. Press 'r' to restart or 'q' to quit.", finished),
    };
    let status = Paragraph::new(format!("{}\n{} | {}", turn, message, HELP))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[2]);
}
