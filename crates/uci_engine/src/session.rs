//! UCI command handling, kept apart from stdin/stdout so it can be tested.

use std::io::Write;
use std::time::Duration;

use alphabeta_engine::score::mate_distance;
use alphabeta_engine::{limits_from, AlphaBetaEngine, IterationInfo, SearchConfig};
use chess_core::{move_to_uci, set_position_from_uci, Color, Engine, Position};
use tracing::warn;

/// Moves assumed left in the game when the GUI sends a clock without `movestogo`.
const DEFAULT_MOVES_TO_GO: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct UciSession {
    engine: AlphaBetaEngine,
    pos: Position,
}

/// Parsed arguments of `go`.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct GoArgs {
    pub depth: Option<u8>,
    pub move_time: Option<Duration>,
    pub wtime: Option<u64>,
    pub btime: Option<u64>,
    pub winc: u64,
    pub binc: u64,
    pub moves_to_go: Option<u64>,
}

impl GoArgs {
    pub fn parse(args: &[&str]) -> Self {
        let mut go = GoArgs::default();
        let mut it = args.iter();
        while let Some(&key) = it.next() {
            let value = it.clone().next().and_then(|v| v.parse::<u64>().ok());
            match (key, value) {
                ("depth", Some(v)) => go.depth = Some(v.min(u8::MAX as u64) as u8),
                ("movetime", Some(v)) => go.move_time = Some(Duration::from_millis(v)),
                ("wtime", Some(v)) => go.wtime = Some(v),
                ("btime", Some(v)) => go.btime = Some(v),
                ("winc", Some(v)) => go.winc = v,
                ("binc", Some(v)) => go.binc = v,
                ("movestogo", Some(v)) => go.moves_to_go = Some(v.max(1)),
                _ => continue,
            }
            it.next();
        }
        go
    }

    /// Budget for this move: `movetime` if given, otherwise a slice of the
    /// side's remaining clock plus its increment.
    pub fn budget(&self, side: Color) -> Option<Duration> {
        if self.move_time.is_some() {
            return self.move_time;
        }
        let (clock, inc) = match side {
            Color::White => (self.wtime?, self.winc),
            Color::Black => (self.btime?, self.binc),
        };
        let slice = clock / self.moves_to_go.unwrap_or(DEFAULT_MOVES_TO_GO) + inc;
        Some(Duration::from_millis(slice.min(clock)))
    }
}

impl UciSession {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            engine: AlphaBetaEngine::new(config),
            pos: Position::startpos(),
        }
    }

    pub fn position(&self) -> &Position {
        &self.pos
    }

    pub fn handle(&mut self, line: &str, out: &mut impl Write) -> std::io::Result<Flow> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&command) = parts.first() else {
            return Ok(Flow::Continue);
        };

        match command {
            "uci" => {
                writeln!(out, "id name {}", self.engine.name())?;
                writeln!(out, "id author {}", self.engine.author())?;
                let config = self.engine.config();
                writeln!(out, "option name NullMove type check default {}", config.null_move)?;
                writeln!(out, "option name LMR type check default {}", config.late_move_reduction)?;
                writeln!(
                    out,
                    "option name UseHash type check default {}",
                    config.use_transposition_table
                )?;
                writeln!(
                    out,
                    "option name AspirationWindow type spin default {} min 1 max 1000",
                    config.aspiration_window
                )?;
                writeln!(
                    out,
                    "option name QuiescenceDepth type spin default {} min 0 max 64",
                    config.max_quiescence_depth
                )?;
                writeln!(out, "uciok")?;
            }
            "isready" => writeln!(out, "readyok")?,
            "setoption" => self.set_option(&parts[1..], out)?,
            "ucinewgame" => {
                self.engine.new_game();
                self.pos = Position::startpos();
            }
            "position" => match set_position_from_uci(&parts[1..]) {
                Ok(pos) => self.pos = pos,
                Err(err) => {
                    warn!(%err, line, "rejected position command");
                    writeln!(out, "info string {err}")?;
                }
            },
            "go" => self.go(&parts[1..], out)?,
            "quit" => return Ok(Flow::Quit),
            _ => {
                // ignore unknown commands
            }
        }
        Ok(Flow::Continue)
    }

    /// `setoption name <id> [value <x>]`
    fn set_option(&mut self, args: &[&str], out: &mut impl Write) -> std::io::Result<()> {
        let Some(n) = args.iter().position(|&a| a == "name") else {
            return Ok(());
        };
        // Only a `value` after the name ends it.
        let rest = &args[n + 1..];
        let (name, value) = match rest.iter().position(|&a| a == "value") {
            Some(v) => (rest[..v].join(" "), rest[v + 1..].join(" ")),
            None => (rest.join(" "), String::new()),
        };
        if !self.engine.set_option(&name, &value) {
            writeln!(out, "info string ignored option {name}")?;
        }
        Ok(())
    }

    fn go(&mut self, args: &[&str], out: &mut impl Write) -> std::io::Result<()> {
        let go = GoArgs::parse(args);
        let limits = limits_from(go.depth, go.budget(self.pos.side_to_move));

        let mut lines = Vec::new();
        let outcome = self
            .engine
            .search_with_info(&self.pos, limits, |info| lines.push(info_line(info)));
        for line in lines {
            writeln!(out, "{line}")?;
        }
        match outcome.best_move {
            Some(mv) => writeln!(out, "bestmove {}", move_to_uci(mv)),
            None => writeln!(out, "bestmove 0000"),
        }
    }
}

pub fn info_line(info: &IterationInfo) -> String {
    let score = match mate_distance(info.score) {
        // UCI counts mates in moves, not plies.
        Some(plies) if plies > 0 => format!("mate {}", (plies + 1) / 2),
        Some(plies) => format!("mate {}", -((-plies + 1) / 2)),
        None => format!("cp {}", info.score),
    };
    let ms = info.elapsed.as_millis().max(1) as u64;
    format!(
        "info depth {} seldepth {} score {} nodes {} nps {} time {} pv {}",
        info.depth,
        info.seldepth,
        score,
        info.nodes,
        info.nodes * 1000 / ms,
        ms,
        move_to_uci(info.best_move)
    )
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
